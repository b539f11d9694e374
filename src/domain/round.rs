/// A single round of the game: the secret word, its mask, and the guess
/// state machine.
///
/// ## Transitions
/// ┌─────────┬──────────────────┬────────────────────────────────┐
/// │ State   │ Input             │ Next                           │
/// ├─────────┼──────────────────┼────────────────────────────────┤
/// │ Ongoing │ guess (any hit)   │ Ongoing, or Won when the mask  │
/// │         │                   │ is fully revealed              │
/// │ Ongoing │ guess (no match)  │ Ongoing, or Lost at the 4th    │
/// │         │                   │ miss                           │
/// │ Won/Lost│ guess             │ rejected (RoundOver), no change│
/// └─────────┴──────────────────┴────────────────────────────────┘
///
/// A hit never increments the miss count, so Won and Lost cannot become
/// true in the same transition. New-game replaces the Round wholesale;
/// no field survives across rounds.

use std::collections::BTreeSet;

use crate::domain::mask::{same_letter, MaskedWord, LINE_LENGTH};

/// Misses allowed before the round is lost, one per gallows body part.
pub const GUESS_LIMIT: u32 = 4;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Verdict {
    Ongoing,
    Won,
    Lost,
}

/// What a single accepted guess did, for the presentation layer's
/// correct/incorrect highlight.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GuessOutcome {
    /// The letter occurs in the word; `revealed` positions were uncovered.
    Hit { revealed: usize },
    /// The letter does not occur; the miss count went up by one.
    Miss,
}

/// A rejected guess. The round state is guaranteed unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GuessError {
    NotALetter(char),
    AlreadyGuessed(char),
    RoundOver,
}

/// Derived per-letter state for the on-screen letter board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LetterStatus {
    Untried,
    Hit,
    Miss,
}

#[derive(Clone, Debug)]
pub struct Round {
    category: String,
    word: String,
    mask: MaskedWord,
    misses: u32,
    guessed: BTreeSet<char>,
}

impl Round {
    /// Start a fresh round: full mask, zero misses, empty guess set.
    pub fn new(category: String, word: String) -> Self {
        let mut mask = MaskedWord::conceal(&word);
        mask.insert_break(LINE_LENGTH, &word);
        Round {
            category,
            word,
            mask,
            misses: 0,
            guessed: BTreeSet::new(),
        }
    }

    /// Apply one guessed letter. Case-insensitive; reveals every matching
    /// position (original casing), or counts a miss if none match.
    /// Invalid input (non-letters, repeats, guesses after the round has
    /// ended) is rejected without touching any state.
    pub fn guess(&mut self, raw: char) -> Result<GuessOutcome, GuessError> {
        if self.verdict() != Verdict::Ongoing {
            return Err(GuessError::RoundOver);
        }
        if !raw.is_alphabetic() {
            return Err(GuessError::NotALetter(raw));
        }

        let letter = normalize(raw);
        if !self.guessed.insert(letter) {
            return Err(GuessError::AlreadyGuessed(letter));
        }

        let revealed = self.mask.reveal(letter);
        if revealed == 0 {
            self.misses += 1;
            Ok(GuessOutcome::Miss)
        } else {
            Ok(GuessOutcome::Hit { revealed })
        }
    }

    /// Current verdict, derived fresh on every call (idempotent).
    /// Win is checked before loss.
    pub fn verdict(&self) -> Verdict {
        if self.mask.is_fully_revealed() {
            Verdict::Won
        } else if self.misses >= GUESS_LIMIT {
            Verdict::Lost
        } else {
            Verdict::Ongoing
        }
    }

    pub fn is_over(&self) -> bool {
        self.verdict() != Verdict::Ongoing
    }

    /// Gallows drawing stage, 1:1 with the miss count (0 = empty gallows,
    /// 4 = full figure).
    pub fn stage(&self) -> u8 {
        self.misses.min(GUESS_LIMIT) as u8
    }

    /// Board state for one letter key.
    pub fn letter_status(&self, raw: char) -> LetterStatus {
        let letter = normalize(raw);
        if !self.guessed.contains(&letter) {
            LetterStatus::Untried
        } else if self.word_contains(letter) {
            LetterStatus::Hit
        } else {
            LetterStatus::Miss
        }
    }

    fn word_contains(&self, letter: char) -> bool {
        self.word.chars().any(|c| same_letter(c, letter))
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn mask(&self) -> &MaskedWord {
        &self.mask
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    #[allow(dead_code)]
    pub fn guesses_left(&self) -> u32 {
        GUESS_LIMIT - self.misses
    }
}

/// Canonical (uppercase) form of a guessed letter.
fn normalize(raw: char) -> char {
    raw.to_uppercase().next().unwrap_or(raw)
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
