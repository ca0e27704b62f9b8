/// Represents the result of asking a pool for its next phrase.
///
/// - [`IssueStatus::Ready`] carries a phrase that has now been consumed and
///   will not be issued again by the same pool.
/// - [`IssueStatus::Depleted`] means the pool has nothing left to give. It is
///   an expected, terminal signal rather than an error: a file pool stays
///   depleted until it is reset, a local pool until its history is cleared.
///
/// # Example
///
/// ```
/// use phrasepool::{IssueStatus, LocalPool, MemoryStorage, TemplateGenerator};
///
/// let pool = LocalPool::new(MemoryStorage::default(), TemplateGenerator::default());
/// match pool.issue_next() {
///     IssueStatus::Ready { phrase } => println!("Draw: {phrase}"),
///     IssueStatus::Depleted => println!("Out of phrases"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IssueStatus {
    /// A phrase was issued.
    Ready {
        /// The issued phrase.
        phrase: String,
    },
    /// The pool is exhausted.
    Depleted,
}

impl IssueStatus {
    /// Returns the phrase, or `None` when depleted.
    pub fn into_phrase(self) -> Option<String> {
        match self {
            Self::Ready { phrase } => Some(phrase),
            Self::Depleted => None,
        }
    }

    pub const fn is_depleted(&self) -> bool {
        matches!(self, Self::Depleted)
    }
}
