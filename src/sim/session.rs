/// Session: the complete state of a running game.
///
/// Owns the validated word packs, the RNG, the current round, and the
/// across-rounds tally. The round itself enforces the guess rules; the
/// session translates outcomes into player-facing messages and keeps
/// score. A new round replaces the old Round wholesale.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::round::{GuessError, GuessOutcome, Round, Verdict, GUESS_LIMIT};
use crate::sim::words::{self, WordPack};

/// How long a transient message stays up, in simulation ticks.
const MESSAGE_TICKS: u32 = 50;

pub struct Session {
    pub packs: Vec<WordPack>,
    pub rng: StdRng,
    pub round: Round,

    // ── Tally ──
    pub wins: u32,
    pub losses: u32,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
    pub anim_tick: u32,
}

impl Session {
    pub fn new(packs: Vec<WordPack>) -> Self {
        Self::with_rng(packs, StdRng::from_entropy())
    }

    /// Seeded construction, for deterministic tests.
    pub fn with_rng(packs: Vec<WordPack>, mut rng: StdRng) -> Self {
        let entry = words::draw(&packs, &mut rng);
        let mut session = Session {
            packs,
            rng,
            round: Round::new(entry.category, entry.word),
            wins: 0,
            losses: 0,
            message: String::new(),
            message_timer: 0,
            anim_tick: 0,
        };
        session.announce_round();
        session
    }

    /// Replace the round with a freshly drawn word. Allowed at any time;
    /// an abandoned round counts as neither win nor loss.
    pub fn new_round(&mut self) {
        let entry = words::draw(&self.packs, &mut self.rng);
        log::info!("new round: category {:?}", entry.category);
        self.round = Round::new(entry.category, entry.word);
        self.announce_round();
    }

    /// Feed one guessed letter to the round and narrate the result.
    pub fn guess(&mut self, ch: char) {
        match self.round.guess(ch) {
            Ok(outcome) => match self.round.verdict() {
                Verdict::Won => {
                    self.wins += 1;
                    log::info!("round won with {} misses", self.round.misses());
                    self.set_message("You've won!", MESSAGE_TICKS);
                }
                Verdict::Lost => {
                    self.losses += 1;
                    log::info!("round lost; the word was {:?}", self.round.word());
                    self.set_message(
                        &format!("You lost! The word was {}", self.round.word()),
                        MESSAGE_TICKS,
                    );
                }
                Verdict::Ongoing => match outcome {
                    GuessOutcome::Hit { revealed } => {
                        log::debug!("hit: {revealed} positions revealed");
                    }
                    GuessOutcome::Miss => {
                        log::debug!("miss {} of {}", self.round.misses(), GUESS_LIMIT);
                    }
                },
            },
            Err(GuessError::AlreadyGuessed(c)) => {
                self.set_message(&format!("Already tried {c}"), MESSAGE_TICKS);
            }
            Err(GuessError::RoundOver) => {
                self.set_message("Round over. F2 deals a new word", MESSAGE_TICKS);
            }
            Err(GuessError::NotALetter(_)) => {}
        }
    }

    /// One simulation tick: advance animation, age the message.
    /// End-of-round messages stick around until the next round starts.
    pub fn tick(&mut self) {
        self.anim_tick = self.anim_tick.wrapping_add(1);
        if self.message_timer > 0 && !self.round.is_over() {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message.clear();
            }
        }
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    fn announce_round(&mut self) {
        let text = format!("Category: {}", self.round.category());
        self.set_message(&text, MESSAGE_TICKS);
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn single_word_packs(word: &str) -> Vec<WordPack> {
        vec![WordPack {
            category: "TEST".to_string(),
            words: vec![word.to_string()],
            path: PathBuf::from("test.txt"),
        }]
    }

    fn session(word: &str) -> Session {
        Session::with_rng(single_word_packs(word), StdRng::seed_from_u64(1))
    }

    #[test]
    fn fresh_session_announces_the_category() {
        let s = session("OTTER");
        assert_eq!(s.round.verdict(), Verdict::Ongoing);
        assert_eq!(s.message, "Category: TEST");
        assert_eq!((s.wins, s.losses), (0, 0));
    }

    #[test]
    fn winning_increments_the_tally_once() {
        let mut s = session("OTTER");
        for c in ['o', 't', 'e', 'r'] {
            s.guess(c);
        }
        assert_eq!(s.round.verdict(), Verdict::Won);
        assert_eq!(s.wins, 1);
        assert_eq!(s.message, "You've won!");

        s.guess('z'); // rejected, round is over
        assert_eq!(s.wins, 1);
        assert_eq!(s.message, "Round over. F2 deals a new word");
    }

    #[test]
    fn losing_reveals_the_word() {
        let mut s = session("OTTER");
        for c in ['q', 'x', 'z', 'w'] {
            s.guess(c);
        }
        assert_eq!(s.round.verdict(), Verdict::Lost);
        assert_eq!(s.losses, 1);
        assert_eq!(s.message, "You lost! The word was OTTER");
    }

    #[test]
    fn repeat_guess_is_called_out_without_a_miss() {
        let mut s = session("OTTER");
        s.guess('q');
        s.guess('q');
        assert_eq!(s.round.misses(), 1);
        assert_eq!(s.message, "Already tried Q");
    }

    #[test]
    fn abandoning_a_round_counts_neither_way() {
        let mut s = session("OTTER");
        s.guess('q');
        s.new_round();
        assert_eq!((s.wins, s.losses), (0, 0));
        assert_eq!(s.round.misses(), 0);
        assert_eq!(s.message, "Category: TEST");
    }

    #[test]
    fn messages_age_out_while_the_round_runs() {
        let mut s = session("OTTER");
        s.set_message("hello", 2);
        s.tick();
        assert_eq!(s.message, "hello");
        s.tick();
        assert!(s.message.is_empty());
    }

    #[test]
    fn end_of_round_message_survives_ticks() {
        let mut s = session("OTTER");
        for c in ['q', 'x', 'z', 'w'] {
            s.guess(c);
        }
        for _ in 0..200 {
            s.tick();
        }
        assert_eq!(s.message, "You lost! The word was OTTER");
    }

    #[test]
    fn seeded_sessions_draw_the_same_word() {
        let packs = vec![
            WordPack {
                category: "A".to_string(),
                words: vec!["Ant".to_string(), "Asp".to_string()],
                path: PathBuf::from("a.txt"),
            },
            WordPack {
                category: "B".to_string(),
                words: vec!["Bee".to_string(), "Boa".to_string()],
                path: PathBuf::from("b.txt"),
            },
        ];
        let a = Session::with_rng(packs.clone(), StdRng::seed_from_u64(42));
        let b = Session::with_rng(packs, StdRng::seed_from_u64(42));
        assert_eq!(a.round.word(), b.round.word());
        assert_eq!(a.round.category(), b.round.category());
    }
}
