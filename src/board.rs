//! Board rendering rule.
//!
//! Turns a [`SessionState`] into the list of rows the player sees. Rows that
//! are neither anchors nor within one step of the target are left out
//! entirely rather than drawn blank.

use crate::session::SessionState;

pub const MASK: &str = "???";
pub const HIDDEN_CHAR: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// First or last word, always shown in full
    Anchor,
    Solved,
    /// The word being guessed, partially revealed
    Target,
    /// Next word, not reachable yet
    Masked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    /// Position of the word in the chain
    pub index: usize,
    pub kind: RowKind,
    pub text: String,
}

pub fn is_visible(state: &SessionState, index: usize) -> bool {
    state.chain.is_anchor(index) || index.abs_diff(state.target_index) <= 1
}

/// First `revealed` characters of `word`, padded with underscores to its full length.
pub fn reveal(word: &str, revealed: usize) -> String {
    word.chars()
        .enumerate()
        .map(|(i, c)| if i < revealed { c } else { HIDDEN_CHAR })
        .collect()
}

pub fn board_rows(state: &SessionState) -> Vec<BoardRow> {
    state
        .chain
        .words()
        .iter()
        .enumerate()
        .filter(|(index, _)| is_visible(state, *index))
        .map(|(index, word)| {
            let (kind, text) = if state.chain.is_anchor(index) {
                (RowKind::Anchor, word.clone())
            } else if index == state.target_index {
                (RowKind::Target, reveal(word, state.revealed_count))
            } else if index < state.target_index {
                (RowKind::Solved, word.clone())
            } else {
                (RowKind::Masked, MASK.to_string())
            };
            BoardRow { index, kind, text }
        })
        .collect()
}

/// First row to draw so that the target row sits in the middle of a
/// viewport of `height` rows.
pub fn scroll_offset(rows: &[BoardRow], height: usize) -> usize {
    let Some(target) = rows.iter().position(|r| r.kind == RowKind::Target) else {
        return 0;
    };
    if rows.len() <= height {
        return 0;
    }
    let max_offset = rows.len() - height;
    target.saturating_sub(height / 2).min(max_offset)
}

/// Rows that fit in a viewport of `height` rows. The two anchors stay pinned
/// to the top and bottom and only the rows between them scroll.
pub fn visible_window(rows: &[BoardRow], height: usize) -> Vec<&BoardRow> {
    if rows.len() <= height {
        return rows.iter().collect();
    }
    if height < 2 {
        let offset = scroll_offset(rows, height);
        return rows.iter().skip(offset).take(height).collect();
    }

    let [first, middle @ .., last] = rows else {
        return rows.iter().take(height).collect();
    };
    let inner = height - 2;
    let offset = scroll_offset(middle, inner);

    let mut window = Vec::with_capacity(height);
    window.push(first);
    window.extend(middle.iter().skip(offset).take(inner));
    window.push(last);
    window
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::WordChain;

    fn state(words: &[&str], target: usize, revealed: usize) -> SessionState {
        let mut s = SessionState::new(WordChain::new(words.iter()).unwrap(), 60);
        s.target_index = target;
        s.revealed_count = revealed;
        s
    }

    fn texts(rows: &[BoardRow]) -> Vec<&str> {
        rows.iter().map(|r| r.text.as_str()).collect()
    }

    const HOT_DOG: &[&str] = &["HOT", "DOG", "HOUSE", "BOAT"];

    #[test]
    fn initial_board() {
        let rows = board_rows(&state(HOT_DOG, 1, 1));
        assert_eq!(texts(&rows), ["HOT", "D__", MASK, "BOAT"]);
        assert_eq!(rows[1].kind, RowKind::Target);
        assert_eq!(rows[2].kind, RowKind::Masked);
    }

    #[test]
    fn wrong_guess_shows_one_more_letter() {
        let mut s = state(HOT_DOG, 1, 1);
        s.apply_guess("CAT", 5);
        let rows = board_rows(&s);
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].text, "DO_");
    }

    #[test]
    fn solved_neighbour_shown_in_full() {
        let rows = board_rows(&state(HOT_DOG, 2, 2));
        assert_eq!(texts(&rows), ["HOT", "DOG", "HO___", "BOAT"]);
        assert_eq!(rows[1].kind, RowKind::Solved);
    }

    #[test]
    fn far_rows_are_omitted() {
        let words = ["A", "BB", "CC", "DD", "EE", "FF", "G"];
        let rows = board_rows(&state(&words, 3, 1));
        let indices: Vec<usize> = rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, [0, 2, 3, 4, 6]);
        assert_eq!(texts(&rows), ["A", "CC", "D_", MASK, "G"]);
    }

    #[test]
    fn anchors_visible_at_every_step() {
        let words = ["START", "ONE", "TWO", "THREE", "FOUR", "END"];
        for target in 1..words.len() {
            let rows = board_rows(&state(&words, target, 1));
            assert_eq!(rows.first().map(|r| r.text.as_str()), Some("START"));
            assert_eq!(rows.last().map(|r| r.text.as_str()), Some("END"));
        }
    }

    #[test]
    fn completed_chain_has_no_target_row() {
        let rows = board_rows(&state(HOT_DOG, 3, 1));
        assert_eq!(texts(&rows), ["HOT", "HOUSE", "BOAT"]);
        assert!(rows.iter().all(|r| r.kind != RowKind::Target));
    }

    #[test]
    fn reveal_pads_to_full_length() {
        assert_eq!(reveal("HOUSE", 1), "H____");
        assert_eq!(reveal("HOUSE", 5), "HOUSE");
        assert_eq!(reveal("CAFÉ", 3), "CAF_");
    }

    #[test]
    fn scroll_centres_target() {
        let words = ["A", "BB", "CC", "DD", "EE", "FF", "G"];
        let rows = board_rows(&state(&words, 3, 1));
        assert_eq!(scroll_offset(&rows, 10), 0);
        assert_eq!(scroll_offset(&rows, 3), 1);
        assert_eq!(scroll_offset(&rows, 1), 2);
    }

    fn indices(rows: Vec<&BoardRow>) -> Vec<usize> {
        rows.iter().map(|r| r.index).collect()
    }

    #[test]
    fn window_keeps_anchors_when_short_of_room() {
        let words = ["A", "BB", "CC", "DD", "EE", "FF", "G"];
        let rows = board_rows(&state(&words, 3, 1));
        assert_eq!(indices(visible_window(&rows, 10)), [0, 2, 3, 4, 6]);
        assert_eq!(indices(visible_window(&rows, 3)), [0, 3, 6]);
        assert_eq!(indices(visible_window(&rows, 4)), [0, 2, 3, 6]);
        assert_eq!(indices(visible_window(&rows, 2)), [0, 6]);
    }

    #[test]
    fn window_pins_anchors_at_every_step() {
        for target in 1..HOT_DOG.len() {
            let rows = board_rows(&state(HOT_DOG, target, 1));
            let window = visible_window(&rows, 3);
            assert_eq!(window.first().map(|r| r.text.as_str()), Some("HOT"));
            assert_eq!(window.last().map(|r| r.text.as_str()), Some("BOAT"));
        }
    }
}
