use crate::{Error, Result};
use serde::Deserialize;
use std::{collections::HashSet, fs, path::Path};

const NOUNS: &[&str] = &[
    "Penguin", "Toaster", "Wizard", "Cactus", "Giraffe", "Robot", "Pirate", "Octopus",
    "Dinosaur", "Snowman", "Llama", "Astronaut", "Cupcake", "Dragon", "Hamster", "Ninja",
    "Pineapple", "Vampire", "Koala", "Mermaid", "Walrus", "Unicorn", "Sloth", "Gnome",
    "Flamingo", "Mummy", "Hedgehog", "Teapot", "Lobster", "Scarecrow", "Raccoon", "Yeti",
    "Banana", "Owl", "Squirrel", "Zombie", "Moose", "Jellyfish", "Goblin", "Potato",
];

const ADJECTIVES: &[&str] = &[
    "Sleepy", "Grumpy", "Sparkly", "Tiny", "Enormous", "Fluffy", "Invisible", "Nervous",
    "Dancing", "Ancient", "Electric", "Soggy", "Jolly", "Upside-down", "Wobbly", "Elegant",
    "Hungry", "Sneaky", "Angry", "Confused", "Glowing", "Bouncy", "Icy", "Majestic",
    "Overdressed", "Sticky", "Fancy", "Heroic", "Ordinary", "Clumsy", "Unlucky", "Frozen",
    "Magnetic", "Awkward", "Shy", "Royal", "Extra-large", "Dizzy", "Orange", "Squeaky",
];

const VERBS: &[&str] = &[
    "Juggling", "Skateboarding", "Knitting", "Surfing", "Baking", "Yodeling", "Painting",
    "Sneezing", "Tap Dancing", "Riding a Unicycle", "Playing Chess", "Eating Spaghetti",
    "Lifting Weights", "Hula Hooping", "Reading a Map", "Blowing Bubbles", "Climbing a Ladder",
    "Walking a Dog", "Flying a Kite", "Doing Yoga", "Building a Sandcastle", "Brushing Teeth",
    "Playing the Tuba", "Chasing a Butterfly", "Taking a Selfie", "Ice Skating",
    "Mowing the Lawn", "Hiding", "Fishing", "Sword Fighting",
];

const EXTRAS: &[&str] = &[
    "on the Moon", "in a Bathtub", "at a Wedding", "in the Rain", "on a Rollercoaster",
    "under the Sea", "in a Library", "on a Tightrope", "at the Zoo", "in Outer Space",
    "during a Thunderstorm", "on Roller Skates", "in a Haunted House", "at the Beach",
    "on a Pirate Ship", "in a Treehouse", "at a Birthday Party", "on Top of a Volcano",
    "in Slow Motion", "with a Top Hat", "while Blindfolded", "in the Desert",
    "on a Trampoline", "at the Dentist", "inside a Snow Globe",
];

/// The four word categories phrases are composed from.
///
/// Every category is guaranteed non-empty once constructed, which is the only
/// precondition [`TemplateGenerator`](crate::TemplateGenerator) needs to stay
/// infallible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Words {
    nouns: Vec<String>,
    adjectives: Vec<String>,
    verbs: Vec<String>,
    extras: Vec<String>,
}

#[derive(Deserialize)]
struct WordsFile {
    nouns: Vec<String>,
    adjectives: Vec<String>,
    verbs: Vec<String>,
    extras: Vec<String>,
}

impl Words {
    /// Creates a vocabulary from owned categories.
    ///
    /// Repeated words within a category are dropped, keeping the first
    /// occurrence, so every word left is equally likely.
    ///
    /// # Errors
    /// - [`Error::EmptyCategory`] if any category is empty.
    pub fn new(
        nouns: Vec<String>,
        adjectives: Vec<String>,
        verbs: Vec<String>,
        extras: Vec<String>,
    ) -> Result<Self> {
        let nouns = dedup(nouns);
        let adjectives = dedup(adjectives);
        let verbs = dedup(verbs);
        let extras = dedup(extras);

        for (category, words) in [
            ("nouns", &nouns),
            ("adjectives", &adjectives),
            ("verbs", &verbs),
            ("extras", &extras),
        ] {
            if words.is_empty() {
                return Err(Error::EmptyCategory { category });
            }
        }

        Ok(Self {
            nouns,
            adjectives,
            verbs,
            extras,
        })
    }

    /// Convenience constructor over borrowed slices.
    ///
    /// # Errors
    /// - [`Error::EmptyCategory`] if any category is empty.
    pub fn from_slices(
        nouns: &[&str],
        adjectives: &[&str],
        verbs: &[&str],
        extras: &[&str],
    ) -> Result<Self> {
        let owned = |words: &[&str]| words.iter().map(|w| (*w).to_string()).collect();
        Self::new(owned(nouns), owned(adjectives), owned(verbs), owned(extras))
    }

    /// Loads a vocabulary from a JSON object with `nouns`, `adjectives`,
    /// `verbs` and `extras` arrays.
    ///
    /// # Errors
    /// - [`Error::Read`] if the file cannot be read.
    /// - [`Error::Corrupt`] if it is not the expected JSON shape.
    /// - [`Error::EmptyCategory`] if any category is empty.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: WordsFile = serde_json::from_str(&raw).map_err(|source| Error::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(file.nouns, file.adjectives, file.verbs, file.extras)
    }

    pub fn nouns(&self) -> &[String] {
        &self.nouns
    }

    pub fn adjectives(&self) -> &[String] {
        &self.adjectives
    }

    pub fn verbs(&self) -> &[String] {
        &self.verbs
    }

    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    /// Upper bound on the number of distinct phrases this vocabulary can
    /// produce: every adjective/noun/verb triple, with or without each extra.
    ///
    /// Words are distinct within a category, but different picks can still
    /// join into the same text (verb `Jumps` plus extra `High` against verb
    /// `Jumps High`), so the real count may be lower.
    pub fn combinations(&self) -> usize {
        self.adjectives
            .len()
            .saturating_mul(self.nouns.len())
            .saturating_mul(self.verbs.len())
            .saturating_mul(self.extras.len().saturating_add(1))
    }
}

fn dedup(words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(words.len());
    words.into_iter().filter(|w| seen.insert(w.clone())).collect()
}

impl Default for Words {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| (*w).to_string()).collect();
        Self {
            nouns: owned(NOUNS),
            adjectives: owned(ADJECTIVES),
            verbs: owned(VERBS),
            extras: owned(EXTRAS),
        }
    }
}
