use crate::{ClientError, Issuer};
use core::fmt;
use phrasepool::{FileStorage, IssueStatus, LocalPool, PhraseGenerator, Storage, TemplateGenerator};

const GENERIC_ERROR: &str = "Something went wrong";

/// What the shell currently shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    /// Nothing requested yet.
    Idle,
    Phrase(String),
    /// The server has issued every phrase.
    Depleted,
    /// The local pool has used every phrase it can find; only
    /// [`Shell::reset_local`] helps.
    LocalDepleted,
    /// A request failed and no fallback was available.
    Error(String),
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Your next phrase will appear here…"),
            Self::Phrase(phrase) => f.write_str(phrase),
            Self::Depleted => {
                f.write_str("You’ve used all phrases. Reset the database to start over.")
            }
            Self::LocalDepleted => f.write_str(
                "You’ve used all phrases on this device. Reset local history to start over.",
            ),
            Self::Error(message) => f.write_str(message),
        }
    }
}

/// Which pool ran dry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Depletion {
    Server,
    Local,
}

/// Drives issuance for a user-facing front end.
///
/// The shell keeps the same three pieces of state a page would (the last
/// phrase, a depleted flag and an error message) and derives a [`View`] from
/// them: depletion wins over errors, errors win over a stale phrase.
///
/// Built with [`Shell::with_fallback`], a failed request is answered from the
/// local pool instead and no error is ever shown.
pub struct Shell<I, S = FileStorage, G = TemplateGenerator>
where
    I: Issuer,
    S: Storage,
    G: PhraseGenerator,
{
    issuer: I,
    fallback: Option<LocalPool<S, G>>,
    phrase: Option<String>,
    depleted: Option<Depletion>,
    error: Option<String>,
}

impl<I> Shell<I>
where
    I: Issuer,
{
    /// A shell without fallback: failures are shown to the user.
    pub const fn new(issuer: I) -> Self {
        Self::from_parts(issuer, None)
    }
}

impl<I, S, G> Shell<I, S, G>
where
    I: Issuer,
    S: Storage,
    G: PhraseGenerator,
{
    /// A fallback-capable shell: failures are answered by `pool`.
    pub const fn with_fallback(issuer: I, pool: LocalPool<S, G>) -> Self {
        Self::from_parts(issuer, Some(pool))
    }

    const fn from_parts(issuer: I, fallback: Option<LocalPool<S, G>>) -> Self {
        Self {
            issuer,
            fallback,
            phrase: None,
            depleted: None,
            error: None,
        }
    }

    pub const fn fallback(&self) -> Option<&LocalPool<S, G>> {
        self.fallback.as_ref()
    }

    /// Requests the next phrase and updates the view.
    pub async fn generate(&mut self) -> View {
        self.error = None;

        let (status, source) = match self.issuer.issue().await {
            Ok(status) => (status, Depletion::Server),
            Err(e) => match &self.fallback {
                Some(pool) => {
                    tracing::warn!(error = %e, "phrase server unavailable, using local pool");
                    (pool.issue_next(), Depletion::Local)
                }
                None => {
                    tracing::error!(error = %e, "phrase request failed");
                    self.error = Some(error_message(&e));
                    return self.view();
                }
            },
        };

        match status {
            IssueStatus::Ready { phrase } => {
                self.phrase = Some(phrase);
                self.depleted = None;
            }
            IssueStatus::Depleted => {
                self.phrase = None;
                self.depleted = Some(source);
            }
        }

        self.view()
    }

    /// Clears the local history. Returns `false`, doing nothing, when the
    /// shell has no fallback pool.
    pub fn reset_local(&mut self) -> bool {
        let Some(pool) = &self.fallback else {
            return false;
        };

        pool.reset_local();
        self.phrase = None;
        self.depleted = None;
        self.error = None;
        true
    }

    pub fn view(&self) -> View {
        if let Some(depletion) = self.depleted {
            match depletion {
                Depletion::Server => View::Depleted,
                Depletion::Local => View::LocalDepleted,
            }
        } else if let Some(error) = &self.error {
            View::Error(error.clone())
        } else if let Some(phrase) = &self.phrase {
            View::Phrase(phrase.clone())
        } else {
            View::Idle
        }
    }
}

fn error_message(e: &ClientError) -> String {
    let message = e.to_string();
    if message.is_empty() {
        GENERIC_ERROR.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use phrasepool::{MemoryStorage, SEEN_KEY, Words};
    use std::{collections::VecDeque, sync::Mutex};

    /// Replays a fixed list of outcomes.
    struct ScriptedIssuer {
        outcomes: Mutex<VecDeque<Result<IssueStatus, ClientError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedIssuer {
        fn new(outcomes: Vec<Result<IssueStatus, ClientError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Issuer for ScriptedIssuer {
        async fn issue(&self) -> Result<IssueStatus, ClientError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted outcome left")
        }
    }

    fn ready(phrase: &str) -> Result<IssueStatus, ClientError> {
        Ok(IssueStatus::Ready {
            phrase: phrase.to_string(),
        })
    }

    fn failed(message: &str) -> Result<IssueStatus, ClientError> {
        Err(ClientError::Status {
            status: 500,
            message: message.to_string(),
        })
    }

    fn local_pool() -> LocalPool<MemoryStorage> {
        LocalPool::new(MemoryStorage::new(), TemplateGenerator::default())
    }

    #[tokio::test]
    async fn starts_idle() {
        let shell = Shell::new(ScriptedIssuer::new(vec![]));
        assert_eq!(shell.view(), View::Idle);
        assert_eq!(shell.view().to_string(), "Your next phrase will appear here…");
    }

    #[tokio::test]
    async fn success_renders_phrase() {
        let mut shell = Shell::new(ScriptedIssuer::new(vec![ready("A Quick Fox Jumps")]));
        assert_eq!(
            shell.generate().await,
            View::Phrase("A Quick Fox Jumps".to_string())
        );
    }

    #[tokio::test]
    async fn depletion_is_terminal_until_a_phrase_arrives() {
        let mut shell = Shell::new(ScriptedIssuer::new(vec![
            ready("A Quick Fox Jumps"),
            Ok(IssueStatus::Depleted),
            failed("disk full"),
            ready("An Odd Owl Sings"),
        ]));

        shell.generate().await;
        assert_eq!(shell.generate().await, View::Depleted);
        // An error does not hide the depleted state.
        assert_eq!(shell.generate().await, View::Depleted);
        assert_eq!(
            shell.generate().await,
            View::Phrase("An Odd Owl Sings".to_string())
        );
    }

    #[tokio::test]
    async fn failure_without_fallback_shows_message() {
        let mut shell = Shell::new(ScriptedIssuer::new(vec![
            ready("A Quick Fox Jumps"),
            failed("disk full"),
            ready("An Odd Owl Sings"),
        ]));

        shell.generate().await;
        assert_eq!(shell.generate().await, View::Error("disk full".to_string()));
        assert_eq!(
            shell.generate().await,
            View::Phrase("An Odd Owl Sings".to_string())
        );
    }

    #[tokio::test]
    async fn empty_error_message_falls_back_to_generic_text() {
        let mut shell = Shell::new(ScriptedIssuer::new(vec![failed("")]));
        assert_eq!(shell.generate().await, View::Error(GENERIC_ERROR.to_string()));
    }

    #[tokio::test]
    async fn failure_with_fallback_uses_local_pool() {
        let mut shell =
            Shell::with_fallback(ScriptedIssuer::new(vec![failed("disk full")]), local_pool());

        let View::Phrase(phrase) = shell.generate().await else {
            panic!("expected a phrase from the local pool");
        };
        assert_eq!(shell.fallback().unwrap().seen(), vec![phrase]);
        assert_eq!(shell.issuer.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn server_success_does_not_touch_local_pool() {
        let mut shell = Shell::with_fallback(
            ScriptedIssuer::new(vec![ready("A Quick Fox Jumps")]),
            local_pool(),
        );

        shell.generate().await;
        assert!(shell.fallback().unwrap().seen().is_empty());
    }

    #[tokio::test]
    async fn server_depletion_is_not_a_failure() {
        let mut shell = Shell::with_fallback(
            ScriptedIssuer::new(vec![Ok(IssueStatus::Depleted)]),
            local_pool(),
        );

        assert_eq!(shell.generate().await, View::Depleted);
        assert!(shell.fallback().unwrap().seen().is_empty());
    }

    #[tokio::test]
    async fn local_depletion_points_at_local_reset() {
        let words = Words::from_slices(&["Fox"], &["Quick"], &["Jumps"], &["Twice"]).unwrap();
        let storage = MemoryStorage::new();
        storage
            .set_item(SEEN_KEY, r#"["A Quick Fox Jumps","A Quick Fox Jumps Twice"]"#)
            .unwrap();
        let pool = LocalPool::new(storage, TemplateGenerator::with_words(words));
        let mut shell = Shell::with_fallback(
            ScriptedIssuer::new(vec![Err(ClientError::Offline), Ok(IssueStatus::Depleted)]),
            pool,
        );

        let view = shell.generate().await;
        assert_eq!(view, View::LocalDepleted);
        assert!(view.to_string().contains("Reset local history"));

        // The server running dry still asks for a database reset.
        let view = shell.generate().await;
        assert_eq!(view, View::Depleted);
        assert!(view.to_string().contains("Reset the database"));

        assert!(shell.reset_local());
        assert_eq!(shell.view(), View::Idle);
    }

    #[tokio::test]
    async fn reset_local_requires_fallback() {
        let mut plain = Shell::new(ScriptedIssuer::new(vec![]));
        assert!(!plain.reset_local());

        let mut shell = Shell::with_fallback(
            ScriptedIssuer::new(vec![Err(ClientError::Offline)]),
            local_pool(),
        );
        shell.generate().await;
        assert_eq!(shell.fallback().unwrap().seen().len(), 1);

        assert!(shell.reset_local());
        assert!(shell.fallback().unwrap().seen().is_empty());
        assert_eq!(shell.view(), View::Idle);
    }
}
