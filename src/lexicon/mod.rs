//! Word lists.
//!
//! The engine only ever asks one question of a lexicon: is this word in it?
//! Lookups are case-insensitive. Loading happens once, before play.

use rustc_hash::FxHashSet;
use std::io::BufRead;
use std::path::Path;

use crate::core::error::LexiconError;

/// Set membership over normalized words.
pub trait Lexicon {
    /// Case-insensitive membership check.
    fn contains(&self, word: &str) -> bool;
}

impl<L: Lexicon + ?Sized> Lexicon for &L {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }
}

impl<L: Lexicon + ?Sized> Lexicon for Box<L> {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }
}

/// In-memory word list, one lower-cased entry per word.
#[derive(Clone, Debug, Default)]
pub struct WordList {
    words: FxHashSet<String>,
}

impl WordList {
    /// Create an empty word list (every word is invalid).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from words in memory.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Read one word per line. Blank lines are skipped.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, LexiconError> {
        let mut words = FxHashSet::default();
        for line in reader.lines() {
            let word = line?.trim().to_lowercase();
            if !word.is_empty() {
                words.insert(word);
            }
        }
        Ok(Self { words })
    }

    /// Load a word list file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| LexiconError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_reader(std::io::BufReader::new(file))?;

        tracing::info!(path = %path.display(), words = list.len(), "Loaded word list");

        Ok(list)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Lexicon for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}
