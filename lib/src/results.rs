use std::iter::zip;
use thiserror::Error;

/// The feedback color reported for one letter of a guess.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LetterColor {
    /// The letter is absent, net of occurrences already accounted for by
    /// green or yellow feedback in the same guess.
    Black,
    /// The letter is correct and in the correct position.
    Green,
    /// The letter is present in the word, but not at this position.
    Yellow,
    /// The slot carries no information. Used for repeated letters beyond what
    /// the response mechanism can disambiguate.
    Unused,
}

impl LetterColor {
    /// Parses one character of the `b`/`g`/`y`/`u` wire alphabet.
    pub fn from_code(code: char) -> Result<LetterColor, SolverError> {
        match code.to_ascii_lowercase() {
            'b' => Ok(LetterColor::Black),
            'g' => Ok(LetterColor::Green),
            'y' => Ok(LetterColor::Yellow),
            'u' => Ok(LetterColor::Unused),
            _ => Err(SolverError::InvalidColorCode(code)),
        }
    }
}

/// Indicates that an error occurred while interpreting a round of feedback.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SolverError {
    /// Indicates a guess containing characters outside `A`-`Z`.
    #[error("guess {0:?} must contain only letters A-Z")]
    InvalidGuess(Box<str>),
    /// Indicates a feedback event whose length does not match the session's
    /// word length.
    #[error("expected a {expected} letter guess, got {actual} letters")]
    WordLength { expected: usize, actual: usize },
    /// Indicates a color string whose length does not match its guess.
    #[error("expected {expected} color codes, got {actual}")]
    ColorCount { expected: usize, actual: usize },
    /// Indicates a character outside the `b`/`g`/`y`/`u` color alphabet.
    #[error("invalid color code {0:?}")]
    InvalidColorCode(char),
    /// Indicates a green result for a position already confirmed as a
    /// different letter.
    #[error("position {position} is already confirmed as {pinned:?} and cannot become {conflicting:?}")]
    SkeletonConflict {
        position: usize,
        pinned: char,
        conflicting: char,
    },
    /// Indicates accumulated feedback that requires more occurrences of a
    /// letter than it permits.
    #[error("contradictory feedback for {0:?}: at least {1} occurrences required but at most {2} permitted")]
    ContradictoryFeedback(char, u8, u8),
}

/// One round's input: a guessed word paired with a color per position.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct GuessFeedback {
    guess: Box<str>,
    colors: Vec<LetterColor>,
}

impl GuessFeedback {
    /// Builds a feedback event from a guess and one color per letter.
    ///
    /// The guess is uppercased; it must consist solely of ASCII letters, and
    /// `colors` must have one entry per letter.
    pub fn new(guess: &str, colors: Vec<LetterColor>) -> Result<GuessFeedback, SolverError> {
        let guess = guess.to_ascii_uppercase();
        if guess.is_empty() || !guess.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(SolverError::InvalidGuess(guess.into()));
        }
        if colors.len() != guess.len() {
            return Err(SolverError::ColorCount {
                expected: guess.len(),
                actual: colors.len(),
            });
        }
        Ok(GuessFeedback {
            guess: guess.into(),
            colors,
        })
    }

    /// Builds a feedback event from a guess and a `b`/`g`/`y`/`u` color
    /// string, one code per letter.
    pub fn from_strings(guess: &str, colors: &str) -> Result<GuessFeedback, SolverError> {
        let colors = colors
            .chars()
            .map(LetterColor::from_code)
            .collect::<Result<Vec<LetterColor>, SolverError>>()?;
        GuessFeedback::new(guess, colors)
    }

    /// Returns the uppercased guess.
    pub fn guess(&self) -> &str {
        &self.guess
    }

    /// Returns the number of letters in the guess.
    pub fn len(&self) -> usize {
        self.guess.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guess.is_empty()
    }

    /// Iterates over `(position, letter, color)` triples.
    pub fn slots(&self) -> impl Iterator<Item = (usize, char, LetterColor)> + '_ {
        zip(self.guess.char_indices(), self.colors.iter())
            .map(|((position, letter), color)| (position, letter, *color))
    }
}
