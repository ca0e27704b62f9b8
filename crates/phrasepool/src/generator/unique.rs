use std::collections::HashSet;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Error, PhraseGenerator, Result};

/// Fewest consecutive duplicate draws tolerated before giving up.
pub const MIN_STALE_DRAWS: usize = 4_096;

/// Most consecutive duplicate draws tolerated before giving up.
pub const MAX_STALE_DRAWS: usize = 1 << 24;

/// Consecutive duplicate draws tolerated per phrase of `available`.
const STALE_DRAWS_PER_PHRASE: usize = 64;

/// Generates `count` distinct phrases, discarding duplicates as they occur.
///
/// Phrases keep the order in which they were first produced. `available` is
/// the size of the reachable phrase space (see
/// [`Words::combinations`](crate::Words::combinations)); asking for more than
/// that fails immediately.
///
/// `available` is only an upper bound, so the loop also stops after a run of
/// duplicate draws proportional to it (clamped to
/// `MIN_STALE_DRAWS..=MAX_STALE_DRAWS`). At that point the generator is taken
/// to have nothing new left.
///
/// # Errors
/// - [`Error::NotEnoughPhrases`] if `count > available`, or if the generator
///   stops producing new phrases first. In the latter case `available` is the
///   number of distinct phrases actually seen.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(generator)))]
pub fn generate_unique<G>(generator: &G, count: usize, available: usize) -> Result<Vec<String>>
where
    G: PhraseGenerator + ?Sized,
{
    if count > available {
        return Err(Error::NotEnoughPhrases {
            requested: count,
            available,
        });
    }

    let stale_limit = available
        .saturating_mul(STALE_DRAWS_PER_PHRASE)
        .clamp(MIN_STALE_DRAWS, MAX_STALE_DRAWS);

    let mut seen = HashSet::with_capacity(count);
    let mut phrases = Vec::with_capacity(count);
    let mut stale = 0;
    while phrases.len() < count {
        let phrase = generator.generate();
        if seen.insert(phrase.clone()) {
            phrases.push(phrase);
            stale = 0;
            continue;
        }

        stale += 1;
        if stale >= stale_limit {
            #[cfg(feature = "tracing")]
            tracing::warn!(found = phrases.len(), stale, "generator ran out of new phrases");
            return Err(Error::NotEnoughPhrases {
                requested: count,
                available: phrases.len(),
            });
        }
    }

    Ok(phrases)
}
