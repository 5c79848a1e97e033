use crate::results::GuessFeedback;
use crate::results::LetterColor;
use crate::results::SolverError;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::result::Result;

/// The partially-known target word: one slot per position, pinned by green
/// feedback. A pinned slot never reverts.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Skeleton {
    slots: Vec<Option<char>>,
}

impl Skeleton {
    fn new(word_length: usize) -> Skeleton {
        Skeleton {
            slots: vec![None; word_length],
        }
    }

    /// Returns the confirmed letter at the given position, if any.
    pub fn get(&self, position: usize) -> Option<char> {
        self.slots.get(position).copied().flatten()
    }

    /// Returns the number of positions.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` once every position is confirmed.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    fn pin(&mut self, position: usize, letter: char) -> Result<(), SolverError> {
        match self.slots[position] {
            Some(pinned) if pinned != letter => Err(SolverError::SkeletonConflict {
                position,
                pinned,
                conflicting: letter,
            }),
            _ => {
                self.slots[position] = Some(letter);
                Ok(())
            }
        }
    }
}

impl fmt::Display for Skeleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            write!(f, "{}", slot.unwrap_or('_'))?;
        }
        Ok(())
    }
}

/// Occurrence bounds and position legality for one letter, derived from
/// accumulated feedback.
///
/// The bounds describe occurrences at positions *not* pinned by the skeleton;
/// a pinned green instance is accounted for by its pin. Bounds only tighten:
/// `min_count` rises with yellow feedback, `max_count` falls with black
/// feedback, and `allowed` entries only flip to `false`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LetterEligibility {
    min_count: u8,
    max_count: u8,
    allowed: Vec<bool>,
}

impl LetterEligibility {
    /// A record created by the letter's first green result. The single
    /// required occurrence is immediately transferred into the skeleton pin.
    fn for_green(word_length: usize) -> LetterEligibility {
        LetterEligibility {
            min_count: 1,
            max_count: word_length as u8,
            allowed: vec![true; word_length],
        }
    }

    /// A record created by the letter's first yellow or black result.
    fn unconstrained(word_length: usize) -> LetterEligibility {
        LetterEligibility {
            min_count: 0,
            max_count: word_length as u8,
            allowed: vec![true; word_length],
        }
    }

    /// The minimum number of non-pinned occurrences the word must contain.
    pub fn min_count(&self) -> u8 {
        self.min_count
    }

    /// The maximum number of non-pinned occurrences the word may contain.
    pub fn max_count(&self) -> u8 {
        self.max_count
    }

    /// Returns whether the letter may legally occupy the given position.
    pub fn is_allowed_at(&self, position: usize) -> bool {
        self.allowed.get(position).copied().unwrap_or(false)
    }
}

/// Fresh per-round aggregate of one letter's yellow and black results.
struct RoundTally {
    min: u8,
    max: u8,
    banned: Vec<bool>,
}

impl RoundTally {
    fn new(word_length: usize) -> RoundTally {
        RoundTally {
            min: 0,
            max: word_length as u8,
            banned: vec![false; word_length],
        }
    }
}

/// The session-wide model of everything feedback has revealed: the skeleton
/// of green-confirmed positions plus one [`LetterEligibility`] record per
/// letter that has appeared in feedback.
///
/// The model is a value: [`EligibilityModel::with_feedback`] returns a new,
/// strictly tighter model and leaves `self` untouched, so the round loop can
/// thread the current value forward and discard a round that turns out to be
/// contradictory.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct EligibilityModel {
    word_length: usize,
    skeleton: Skeleton,
    letters: HashMap<char, LetterEligibility>,
}

impl EligibilityModel {
    /// Creates an empty model for words of the given length.
    pub fn new(word_length: usize) -> EligibilityModel {
        EligibilityModel {
            word_length,
            skeleton: Skeleton::new(word_length),
            letters: HashMap::new(),
        }
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Returns the eligibility record for the given letter, if any feedback
    /// has mentioned it.
    pub fn letter(&self, letter: char) -> Option<&LetterEligibility> {
        self.letters.get(&letter)
    }

    /// Returns a new model tightened by one round of feedback.
    ///
    /// Greens are applied first: each pins its position and consumes one
    /// occurrence from the letter's floating minimum. Yellow and black
    /// results are then aggregated into a per-letter tally for this round
    /// alone (yellows before blacks, so a black caps the letter at exactly
    /// the yellow-derived minimum) and merged into the persistent records,
    /// which never relax. A merge that leaves some letter requiring more
    /// occurrences than it permits fails with
    /// [`SolverError::ContradictoryFeedback`].
    pub fn with_feedback(
        &self,
        feedback: &GuessFeedback,
    ) -> Result<EligibilityModel, SolverError> {
        if feedback.len() != self.word_length {
            return Err(SolverError::WordLength {
                expected: self.word_length,
                actual: feedback.len(),
            });
        }
        let mut next = self.clone();

        for (position, letter, color) in feedback.slots() {
            if color != LetterColor::Green {
                continue;
            }
            next.skeleton.pin(position, letter)?;
            let record = next
                .letters
                .entry(letter)
                .or_insert_with(|| LetterEligibility::for_green(self.word_length));
            record.min_count = record.min_count.saturating_sub(1);
            record.allowed[position] = false;
        }

        let mut tallies: HashMap<char, RoundTally> = HashMap::new();
        for (position, letter, color) in feedback.slots() {
            if color != LetterColor::Yellow {
                continue;
            }
            let tally = tallies
                .entry(letter)
                .or_insert_with(|| RoundTally::new(self.word_length));
            tally.min += 1;
            tally.banned[position] = true;
        }
        for (position, letter, color) in feedback.slots() {
            if color != LetterColor::Black {
                continue;
            }
            let tally = tallies
                .entry(letter)
                .or_insert_with(|| RoundTally::new(self.word_length));
            tally.max = tally.min;
            tally.banned[position] = true;
        }

        for (letter, tally) in tallies {
            let record = match next.letters.entry(letter) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    entry.insert(LetterEligibility::unconstrained(self.word_length))
                }
            };
            if record.min_count < tally.min {
                record.min_count = tally.min;
            }
            if record.max_count > tally.max {
                record.max_count = tally.max;
            }
            for (position, banned) in tally.banned.iter().enumerate() {
                if *banned {
                    record.allowed[position] = false;
                }
            }
            if record.min_count > record.max_count {
                return Err(SolverError::ContradictoryFeedback(
                    letter,
                    record.min_count,
                    record.max_count,
                ));
            }
        }
        Ok(next)
    }

    /// Returns `true` iff the given word is consistent with the skeleton and
    /// every eligibility record.
    ///
    /// Checks run in order with short-circuit rejection: skeleton
    /// consistency, per-position legality, occurrence bounds over the
    /// non-pinned tally, and required-letter completeness. Pinned positions
    /// are excluded from the tally since the pin already accounts for them.
    pub fn permits(&self, word: &str) -> bool {
        if word.len() != self.word_length || !word.bytes().all(|b| b.is_ascii_alphabetic()) {
            return false;
        }
        let mut counts: HashMap<char, u8> = HashMap::new();
        for (position, letter) in word.char_indices() {
            match self.skeleton.get(position) {
                Some(pinned) if pinned == letter => continue,
                Some(_) => return false,
                None => {}
            }
            *counts.entry(letter).or_insert(0) += 1;
            if let Some(record) = self.letters.get(&letter) {
                if !record.allowed[position] {
                    return false;
                }
            }
        }
        for (letter, count) in &counts {
            if let Some(record) = self.letters.get(letter) {
                if *count < record.min_count || *count > record.max_count {
                    return false;
                }
            }
        }
        for (letter, record) in &self.letters {
            let count = counts.get(letter).copied().unwrap_or(0);
            if record.min_count > 0 && count < record.min_count {
                return false;
            }
            // Re-checked here so letters proven entirely absent reject even
            // when the tally never saw them.
            if count > record.max_count {
                return false;
            }
        }
        true
    }
}
