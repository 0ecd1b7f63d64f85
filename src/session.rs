use crate::chains::WordChain;

/// Result of checking one submitted guess against the target word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Target solved, more words left to guess
    Correct,
    /// Target solved and the closing anchor reached
    ChainComplete,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub chain: WordChain,
    /// Index of the word being guessed, kept within 1..=chain.len() - 2 while playing
    /// and equal to the last index once the chain is complete.
    pub target_index: usize,
    /// Leading characters of the target shown to the player, 1..=target length
    pub revealed_count: usize,
    pub time_remaining: u32,
    pub running: bool,
}

impl SessionState {
    pub fn new(chain: WordChain, round_secs: u32) -> Self {
        Self {
            chain,
            target_index: 1,
            revealed_count: 1,
            time_remaining: round_secs,
            running: false,
        }
    }

    pub fn target_word(&self) -> &str {
        self.chain.word(self.target_index).unwrap_or_default()
    }

    pub fn target_len(&self) -> usize {
        self.target_word().chars().count()
    }

    pub fn is_complete(&self) -> bool {
        self.target_index >= self.chain.last_index()
    }

    /// Uppercases and trims `raw`, then compares it exactly with the target word.
    /// A wrong guess reveals one more letter (never past the word) and costs `penalty_secs`.
    pub fn apply_guess(&mut self, raw: &str, penalty_secs: u32) -> GuessOutcome {
        let guess = raw.trim().to_uppercase();

        if guess == self.target_word() {
            self.target_index += 1;
            self.revealed_count = 1;
            if self.is_complete() {
                GuessOutcome::ChainComplete
            } else {
                GuessOutcome::Correct
            }
        } else {
            self.revealed_count = (self.revealed_count + 1).min(self.target_len());
            self.time_remaining = self.time_remaining.saturating_sub(penalty_secs);
            GuessOutcome::Incorrect
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hot_dog() -> SessionState {
        let chain = WordChain::new(["HOT", "DOG", "HOUSE", "BOAT"]).unwrap();
        SessionState::new(chain, 60)
    }

    #[test]
    fn starts_on_first_interior_word() {
        let s = hot_dog();
        assert_eq!(s.target_index, 1);
        assert_eq!(s.revealed_count, 1);
        assert_eq!(s.time_remaining, 60);
        assert_eq!(s.target_word(), "DOG");
        assert!(!s.running);
    }

    #[test]
    fn wrong_guess_reveals_and_penalizes() {
        let mut s = hot_dog();
        assert_eq!(s.apply_guess("CAT", 5), GuessOutcome::Incorrect);
        assert_eq!(s.target_index, 1);
        assert_eq!(s.revealed_count, 2);
        assert_eq!(s.time_remaining, 55);
    }

    #[test]
    fn reveal_is_capped_at_word_length() {
        let mut s = hot_dog();
        for _ in 0..10 {
            s.apply_guess("nope", 5);
        }
        assert_eq!(s.revealed_count, 3);
        assert_eq!(s.time_remaining, 10);
    }

    #[test]
    fn penalty_floors_at_zero() {
        let mut s = hot_dog();
        s.time_remaining = 3;
        s.apply_guess("CAT", 5);
        assert_eq!(s.time_remaining, 0);
    }

    #[test]
    fn guess_is_trimmed_and_case_insensitive() {
        let mut s = hot_dog();
        assert_eq!(s.apply_guess("  dog \n", 5), GuessOutcome::Correct);
        assert_eq!(s.target_index, 2);
    }

    #[test]
    fn correct_guess_advances_and_resets_reveal() {
        let mut s = hot_dog();
        s.apply_guess("CAT", 5);
        assert_eq!(s.apply_guess("DOG", 5), GuessOutcome::Correct);
        assert_eq!(s.target_index, 2);
        assert_eq!(s.revealed_count, 1);
        assert_eq!(s.time_remaining, 55);
        assert!(!s.is_complete());
    }

    #[test]
    fn solving_last_interior_word_completes_chain() {
        let mut s = hot_dog();
        s.apply_guess("DOG", 5);
        assert_eq!(s.apply_guess("HOUSE", 5), GuessOutcome::ChainComplete);
        assert_eq!(s.target_index, 3);
        assert!(s.is_complete());
    }
}
