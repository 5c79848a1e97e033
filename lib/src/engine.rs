use crate::data::WordBank;
use crate::restrictions::EligibilityModel;
use crate::results::GuessFeedback;
use crate::results::SolverError;
use std::sync::Arc;

/// One surviving dictionary word, with the stats used to rank it.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Candidate {
    pub word: Arc<str>,
    pub frequency: u64,
    pub rank: u32,
}

/// Re-derives the surviving candidate set from the full bank.
///
/// Every word in the bank is re-checked against the model, so the result
/// depends only on the bank and the model, never on earlier rounds'
/// candidate sets. The scan is linear in the bank and runs once per human
/// round, which keeps the incremental-pruning bug class off the table at no
/// perceptible cost.
///
/// Survivors are ordered by corpus frequency descending, with the discovery
/// rank breaking ties so the order is reproducible.
pub fn filter_candidates(bank: &WordBank, model: &EligibilityModel) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = bank
        .iter()
        .filter(|(word, _)| model.permits(word))
        .map(|(word, stats)| Candidate {
            word: Arc::clone(word),
            frequency: stats.frequency,
            rank: stats.rank,
        })
        .collect();
    sort_by_frequency(&mut candidates);
    candidates
}

pub(crate) fn sort_by_frequency(candidates: &mut [Candidate]) {
    candidates.sort_unstable_by(|a, b| b.frequency.cmp(&a.frequency).then(a.rank.cmp(&b.rank)));
}

/// A single interactive session over one word bank.
///
/// The session owns the current [`EligibilityModel`] and threads each
/// round's replacement value forward; a round that fails validation leaves
/// the model exactly as it was.
pub struct Session<'a> {
    bank: &'a WordBank,
    model: EligibilityModel,
}

impl<'a> Session<'a> {
    pub fn new(bank: &'a WordBank) -> Session<'a> {
        Session {
            bank,
            model: EligibilityModel::new(bank.word_length()),
        }
    }

    pub fn model(&self) -> &EligibilityModel {
        &self.model
    }

    /// Applies one round of feedback and returns the re-derived candidate
    /// set.
    pub fn apply_feedback(
        &mut self,
        feedback: &GuessFeedback,
    ) -> Result<Vec<Candidate>, SolverError> {
        self.model = self.model.with_feedback(feedback)?;
        Ok(self.candidates())
    }

    /// Returns the words still consistent with all feedback so far, most
    /// frequent first.
    pub fn candidates(&self) -> Vec<Candidate> {
        filter_candidates(self.bank, &self.model)
    }
}
