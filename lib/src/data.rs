use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Number of top-frequency words over which the per-letter occurrence counts
/// are accumulated.
pub const LETTER_COUNT_CAP: usize = 10_000;

const CACHE_SCHEMA_VERSION: u32 = 1;

/// Discovery rank and corpus frequency for one dictionary word.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct WordStats {
    /// Zero-based position of the word's line among well-formed corpus lines.
    /// The corpus is ordered by frequency, so this ranks the word globally
    /// across all word lengths.
    pub rank: u32,
    /// Corpus frequency, from the third field of the word's line.
    pub frequency: u64,
}

/// All dictionary words of one length, with their stats and the per-letter
/// occurrence counts over the most frequent subset. Read-only once loaded.
pub struct WordBank {
    word_length: usize,
    words: HashMap<Arc<str>, WordStats>,
    letter_counts: HashMap<char, u32>,
}

/// On-disk snapshot of a parsed [`WordBank`], keyed by word length. The
/// schema version tag invalidates caches written by incompatible builds.
#[derive(Serialize, Deserialize)]
struct DictionaryCache {
    schema_version: u32,
    word_length: usize,
    words: HashMap<Arc<str>, WordStats>,
    letter_counts: HashMap<char, u32>,
}

impl WordBank {
    /// Parses the frequency corpus from the given reader, retaining words of
    /// the requested length.
    ///
    /// Each line holds whitespace-separated fields: the word first, its
    /// frequency third. Lines with fewer than three fields or a non-integer
    /// frequency are skipped. A word is retained iff its uppercased form is
    /// exactly `word_length` letters A-Z; the first occurrence wins. Line
    /// order over well-formed lines defines the discovery rank.
    pub fn from_corpus<R: BufRead>(reader: R, word_length: usize) -> io::Result<WordBank> {
        let lines = reader.lines().collect::<io::Result<Vec<String>>>()?;
        // Field splitting is the bulk of the load cost, so it fans out;
        // the indexed map keeps line order for rank assignment.
        let parsed: Vec<Option<(String, u64)>> = lines
            .par_iter()
            .map(|line| parse_corpus_line(line))
            .collect();

        let mut words: HashMap<Arc<str>, WordStats> = HashMap::new();
        let mut letter_counts: HashMap<char, u32> = HashMap::new();
        let mut rank: u32 = 0;
        for entry in parsed {
            let Some((word, frequency)) = entry else {
                continue;
            };
            let this_rank = rank;
            rank += 1;
            if word.len() != word_length || !word.bytes().all(|b| b.is_ascii_uppercase()) {
                continue;
            }
            if words.contains_key(word.as_str()) {
                continue;
            }
            if words.len() < LETTER_COUNT_CAP {
                for letter in word.chars() {
                    *letter_counts.entry(letter).or_insert(0) += 1;
                }
            }
            words.insert(
                Arc::from(word.as_str()),
                WordStats {
                    rank: this_rank,
                    frequency,
                },
            );
        }
        debug!(
            "retained {} of {} well-formed corpus lines",
            words.len(),
            rank
        );
        Ok(WordBank {
            word_length,
            words,
            letter_counts,
        })
    }

    /// Builds a bank directly from `(word, frequency)` pairs, ranked in
    /// iteration order. Entries that do not fit the word length or alphabet
    /// are dropped, exactly as in corpus parsing.
    pub fn from_entries<I, S>(word_length: usize, entries: I) -> WordBank
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut words: HashMap<Arc<str>, WordStats> = HashMap::new();
        let mut letter_counts: HashMap<char, u32> = HashMap::new();
        for (index, (word, frequency)) in entries.into_iter().enumerate() {
            let word = word.as_ref().to_ascii_uppercase();
            if word.len() != word_length || !word.bytes().all(|b| b.is_ascii_uppercase()) {
                continue;
            }
            if words.contains_key(word.as_str()) {
                continue;
            }
            if words.len() < LETTER_COUNT_CAP {
                for letter in word.chars() {
                    *letter_counts.entry(letter).or_insert(0) += 1;
                }
            }
            words.insert(
                Arc::from(word.as_str()),
                WordStats {
                    rank: index as u32,
                    frequency,
                },
            );
        }
        WordBank {
            word_length,
            words,
            letter_counts,
        }
    }

    /// Loads the bank from the per-length cache under `cache_dir` when a
    /// valid one exists, and otherwise parses the corpus and rewrites the
    /// cache. Cache read failures fall back to parsing; cache write failures
    /// are logged and non-fatal.
    pub fn load_or_build(
        corpus_path: &Path,
        cache_dir: &Path,
        word_length: usize,
    ) -> io::Result<WordBank> {
        let cache_path = cache_dir.join(format!("dictionary.save.{}.ron", word_length));
        if let Some(bank) = WordBank::load_cache(&cache_path, word_length) {
            info!("loaded dictionary cache {}", cache_path.display());
            return Ok(bank);
        }
        info!("parsing frequency corpus {}", corpus_path.display());
        let reader = BufReader::new(File::open(corpus_path)?);
        let bank = WordBank::from_corpus(reader, word_length)?;
        if let Err(err) = bank.write_cache(&cache_path) {
            warn!(
                "could not write dictionary cache {}: {}",
                cache_path.display(),
                err
            );
        }
        Ok(bank)
    }

    /// Reads a cached bank, returning `None` when the file is absent,
    /// unreadable, or was written for another schema version or word length.
    pub fn load_cache(path: &Path, word_length: usize) -> Option<WordBank> {
        let contents = fs::read_to_string(path).ok()?;
        let cache: DictionaryCache = match ron::from_str(&contents) {
            Ok(cache) => cache,
            Err(err) => {
                warn!("ignoring unreadable dictionary cache {}: {}", path.display(), err);
                return None;
            }
        };
        if cache.schema_version != CACHE_SCHEMA_VERSION || cache.word_length != word_length {
            debug!("dictionary cache {} is stale", path.display());
            return None;
        }
        Some(WordBank {
            word_length: cache.word_length,
            words: cache.words,
            letter_counts: cache.letter_counts,
        })
    }

    /// Writes the bank's cache snapshot to the given path.
    pub fn write_cache(&self, path: &Path) -> io::Result<()> {
        let cache = DictionaryCache {
            schema_version: CACHE_SCHEMA_VERSION,
            word_length: self.word_length,
            words: self.words.clone(),
            letter_counts: self.letter_counts.clone(),
        };
        let serialized = ron::to_string(&cache)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let mut file = File::create(path)?;
        file.write_all(serialized.as_bytes())
    }

    /// The length of every word in the bank.
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Returns the number of retained words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the stats recorded for the given word, if it is in the bank.
    pub fn stats(&self, word: &str) -> Option<WordStats> {
        self.words.get(word).copied()
    }

    /// Returns the letter's occurrence count over the bank's top-frequency
    /// subset, or 0 for letters that never appear there.
    pub fn letter_count(&self, letter: char) -> u32 {
        self.letter_counts.get(&letter).copied().unwrap_or(0)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &WordStats)> {
        self.words.iter()
    }
}

fn parse_corpus_line(line: &str) -> Option<(String, u64)> {
    let mut fields = line.split_whitespace();
    let word = fields.next()?;
    fields.next()?;
    let frequency: u64 = fields.next()?.parse().ok()?;
    Some((word.to_ascii_uppercase(), frequency))
}
