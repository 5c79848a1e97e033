use crate::data::WordBank;
use crate::engine::sort_by_frequency;
use crate::engine::Candidate;
use std::sync::Arc;

/// Returns the letters with the highest occurrence counts over the bank's
/// top-frequency subset, one per word position.
///
/// Ties break alphabetically, so the selection is deterministic for a given
/// bank.
pub fn top_letters(bank: &WordBank) -> Vec<char> {
    let mut counts: Vec<(char, u32)> = ('A'..='Z')
        .map(|letter| (letter, bank.letter_count(letter)))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    counts.truncate(bank.word_length());
    counts.into_iter().map(|(letter, _)| letter).collect()
}

/// Suggests opening guesses before any feedback exists: the most frequent
/// words of the full bank that contain every one of the bank's most common
/// letters, in any positions.
///
/// This is a coverage heuristic. It favors guesses that touch as much of the
/// letter distribution as possible, without attempting any information-gain
/// computation.
pub fn suggest_initial_guesses(bank: &WordBank, limit: usize) -> Vec<Candidate> {
    let letters = top_letters(bank);
    let mut suggestions: Vec<Candidate> = bank
        .iter()
        .filter(|(word, _)| letters.iter().all(|letter| word.contains(*letter)))
        .map(|(word, stats)| Candidate {
            word: Arc::clone(word),
            frequency: stats.frequency,
            rank: stats.rank,
        })
        .collect();
    sort_by_frequency(&mut suggestions);
    suggestions.truncate(limit);
    suggestions
}
