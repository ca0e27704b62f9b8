#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{PhraseGenerator, RandSource, ThreadRandom, Words};

/// Probability that a generated phrase ends with an extra clause.
pub const EXTRA_PROBABILITY: f64 = 0.6;

/// Returns the indefinite article for `word`: "An" before a vowel, otherwise
/// "A".
///
/// Only the first character is inspected, case-insensitively. An empty word
/// takes "A".
///
/// # Example
/// ```
/// use phrasepool::article_for;
///
/// assert_eq!(article_for("Elegant"), "An");
/// assert_eq!(article_for("sleepy"), "A");
/// ```
pub fn article_for(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "An",
        _ => "A",
    }
}

/// A template-based phrase generator.
///
/// Each phrase has the shape `{Article} {Adjective} {Noun} {Verb}[ {Extra}]`.
/// The adjective, noun and verb are drawn independently and uniformly; the
/// extra clause is appended with probability [`EXTRA_PROBABILITY`].
///
/// ## Features
/// - ✅ Infallible (the vocabulary is validated up front)
/// - ✅ Pluggable randomness via [`RandSource`]
/// - ❌ Unique (use a pool for consume-without-replacement semantics)
///
/// # Example
/// ```
/// use phrasepool::{PhraseGenerator, TemplateGenerator};
///
/// let generator = TemplateGenerator::default();
/// let phrase = generator.generate();
/// assert!(phrase.starts_with("A ") || phrase.starts_with("An "));
/// ```
#[derive(Clone, Debug)]
pub struct TemplateGenerator<R = ThreadRandom>
where
    R: RandSource,
{
    words: Words,
    rng: R,
}

impl<R> TemplateGenerator<R>
where
    R: RandSource,
{
    /// Creates a new [`TemplateGenerator`] over `words`, drawing from `rng`.
    pub const fn new(words: Words, rng: R) -> Self {
        Self { words, rng }
    }

    pub const fn words(&self) -> &Words {
        &self.words
    }

    fn pick<'a>(&self, words: &'a [String]) -> &'a str {
        &words[self.rng.index(words.len())]
    }
}

impl TemplateGenerator<ThreadRandom> {
    /// Generator over `words` using the thread-local RNG.
    pub const fn with_words(words: Words) -> Self {
        Self::new(words, ThreadRandom)
    }
}

impl Default for TemplateGenerator<ThreadRandom> {
    fn default() -> Self {
        Self::with_words(Words::default())
    }
}

impl<R> PhraseGenerator for TemplateGenerator<R>
where
    R: RandSource,
{
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    fn generate(&self) -> String {
        let noun = self.pick(self.words.nouns());
        let adjective = self.pick(self.words.adjectives());
        let verb = self.pick(self.words.verbs());
        let article = article_for(adjective);

        if self.rng.chance(EXTRA_PROBABILITY) {
            let extra = self.pick(self.words.extras());
            format!("{article} {adjective} {noun} {verb} {extra}")
        } else {
            format!("{article} {adjective} {noun} {verb}")
        }
    }
}
