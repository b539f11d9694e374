/// The masked form of the secret word: pure display and win-check logic.
///
/// One slot per character of the word. Alphabetic characters start hidden;
/// everything else (spaces, hyphens, apostrophes) is shown from the start.
/// At most one space may be replaced by a line break so long phrases fit
/// the board.
///
/// ## Wrap placement (L = LINE_LENGTH)
/// ┌───────────────────────────────────────────┬──────────────────────┐
/// │ Condition                                  │ Break position       │
/// ├───────────────────────────────────────────┼──────────────────────┤
/// │ char count <= L                            │ none                 │
/// │ a space exists at index >= L-1             │ first such space     │
/// │ else: a space exists at index < L          │ last such space      │
/// │ else (one unbroken token longer than L)    │ none                 │
/// └───────────────────────────────────────────┴──────────────────────┘
///
/// The break slot is display-only: it never counts as a hidden letter and
/// never participates in the win comparison.

/// Width of a single board line, in characters of the raw word.
pub const LINE_LENGTH: usize = 13;

/// One character position of the masked word.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Slot {
    /// Unrevealed alphabetic character (drawn as the placeholder).
    Hidden(char),
    /// Revealed alphabetic character, or a non-alphabetic copied verbatim.
    Shown(char),
    /// Line-wrap marker substituted for one space.
    Break,
}

impl Slot {
    /// Is this slot still waiting to be guessed?
    pub fn is_hidden(self) -> bool {
        matches!(self, Slot::Hidden(_))
    }

    /// Character to draw for this slot (`None` splits the line).
    pub fn display_char(self) -> Option<char> {
        match self {
            Slot::Hidden(_) => Some('_'),
            Slot::Shown(c) => Some(c),
            Slot::Break => None,
        }
    }
}

/// Case-insensitive single-character comparison.
pub(crate) fn same_letter(a: char, b: char) -> bool {
    a.to_lowercase().eq(b.to_lowercase())
}

#[derive(Clone, Debug)]
pub struct MaskedWord {
    slots: Vec<Slot>,
}

impl MaskedWord {
    /// Mask every alphabetic character of `word`; copy the rest verbatim.
    pub fn conceal(word: &str) -> Self {
        let slots = word
            .chars()
            .map(|c| {
                if c.is_alphabetic() {
                    Slot::Hidden(c)
                } else {
                    Slot::Shown(c)
                }
            })
            .collect();
        MaskedWord { slots }
    }

    /// Apply the wrap-placement table above for a line width of `line_length`.
    pub fn insert_break(&mut self, line_length: usize, word: &str) {
        if word.chars().count() <= line_length {
            return;
        }

        let spaces: Vec<usize> = word
            .chars()
            .enumerate()
            .filter(|(_, c)| *c == ' ')
            .map(|(i, _)| i)
            .collect();

        let at_or_after = spaces.iter().copied().find(|&i| i + 1 >= line_length);
        let before = spaces.iter().copied().rev().find(|&i| i < line_length);

        if let Some(i) = at_or_after.or(before) {
            self.slots[i] = Slot::Break;
        }
    }

    /// Reveal every hidden slot matching `letter` (case-insensitive).
    /// Returns how many positions were revealed; 0 means a clean miss.
    pub fn reveal(&mut self, letter: char) -> usize {
        let mut revealed = 0;
        for slot in &mut self.slots {
            if let Slot::Hidden(c) = *slot {
                if same_letter(c, letter) {
                    *slot = Slot::Shown(c);
                    revealed += 1;
                }
            }
        }
        revealed
    }

    /// Won when every alphabetic position has been revealed; the in-order
    /// alphabetic characters of the mask then equal those of the word.
    pub fn is_fully_revealed(&self) -> bool {
        !self.slots.iter().any(|s| s.is_hidden())
    }

    /// Number of still-hidden (placeholder) positions.
    #[allow(dead_code)]
    pub fn hidden_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_hidden()).count()
    }

    #[allow(dead_code)]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Board lines: slots joined by single spaces, split at the break.
    /// `"_ _ L L _"` style, one string per display row.
    pub fn rows(&self) -> Vec<String> {
        let mut rows = vec![];
        let mut row = String::new();
        for slot in &self.slots {
            match slot.display_char() {
                Some(c) => {
                    if !row.is_empty() {
                        row.push(' ');
                    }
                    row.push(c);
                }
                None => {
                    rows.push(std::mem::take(&mut row));
                }
            }
        }
        rows.push(row);
        rows
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn masked(word: &str) -> MaskedWord {
        let mut m = MaskedWord::conceal(word);
        m.insert_break(LINE_LENGTH, word);
        m
    }

    #[test]
    fn conceal_hides_exactly_the_alphabetics() {
        let m = MaskedWord::conceal("NEW YORK");
        assert_eq!(m.slots().len(), 8);
        assert_eq!(
            m.hidden_count(),
            "NEW YORK".chars().filter(|c| c.is_alphabetic()).count()
        );
        assert_eq!(m.slots()[3], Slot::Shown(' '));
    }

    #[test]
    fn non_alphabetics_stay_verbatim_at_every_index() {
        let word = "IT'S A TRAP-DOOR";
        let mut m = MaskedWord::conceal(word);
        m.reveal('t');
        m.reveal('A');
        for (slot, c) in m.slots().iter().zip(word.chars()) {
            if !c.is_alphabetic() {
                assert_eq!(*slot, Slot::Shown(c));
            }
        }
    }

    #[test]
    fn reveal_copies_original_casing() {
        let mut m = MaskedWord::conceal("McCoy");
        assert_eq!(m.reveal('c'), 2);
        assert_eq!(m.slots()[1], Slot::Shown('c'));
        assert_eq!(m.slots()[2], Slot::Shown('C'));
    }

    #[test]
    fn reveal_counts_matches_and_misses() {
        let mut m = MaskedWord::conceal("HELLO");
        assert_eq!(m.reveal('L'), 2);
        assert_eq!(m.reveal('z'), 0);
        assert_eq!(m.rows(), vec!["_ _ L L _"]);
    }

    #[test]
    fn fully_revealed_after_all_distinct_letters() {
        let mut m = MaskedWord::conceal("HELLO");
        for c in ['h', 'e', 'l', 'o'] {
            m.reveal(c);
        }
        assert!(m.is_fully_revealed());
        assert_eq!(m.rows(), vec!["H E L L O"]);
    }

    // ── Wrap placement table ──

    #[test]
    fn short_word_gets_no_break() {
        let m = masked("HELLO");
        assert!(!m.slots().contains(&Slot::Break));
    }

    #[test]
    fn break_at_first_space_at_or_after_boundary() {
        let word = "THE GOLDEN GATE BRIDGE"; // spaces at 3, 10, 15
        let m = masked(word);
        assert_eq!(m.slots()[15], Slot::Break);
        assert_eq!(m.slots()[3], Slot::Shown(' '));
        assert_eq!(m.slots()[10], Slot::Shown(' '));
    }

    #[test]
    fn break_falls_back_to_last_space_before_boundary() {
        let word = "THE GODFATHERS"; // 14 chars, only space at 3
        let m = masked(word);
        assert_eq!(m.slots()[3], Slot::Break);
    }

    #[test]
    fn unbroken_long_token_renders_unwrapped() {
        let m = masked("ANTIDISESTABLISHMENTARIANISM");
        assert!(!m.slots().contains(&Slot::Break));
        assert_eq!(m.rows().len(), 1);
    }

    #[test]
    fn break_splits_display_rows_and_skips_win_check() {
        let word = "RIO DE JANEIRO BEACH"; // spaces at 3, 6, 14
        let mut m = masked(word);
        assert_eq!(m.slots()[14], Slot::Break);
        assert_eq!(m.rows().len(), 2);

        for c in ['r', 'i', 'o', 'd', 'e', 'j', 'a', 'n', 'b', 'c', 'h'] {
            m.reveal(c);
        }
        // The break replaced a space, not a letter: still winnable.
        assert!(m.is_fully_revealed());
        assert_eq!(m.rows(), vec!["R I O   D E   J A N E I R O", "B E A C H"]);
    }

    #[test]
    fn hidden_count_tracks_reveals() {
        let mut m = MaskedWord::conceal("CAT");
        assert_eq!(m.hidden_count(), 3);
        m.reveal('a');
        assert_eq!(m.hidden_count(), 2);
        m.reveal('x');
        assert_eq!(m.hidden_count(), 2);
    }
}
