//! Puzzle board text engine.
//!
//! Turns a phrase into the rows shown on the board, splits rows into
//! addressable cells, masks unrevealed letters and locates the cells a
//! guessed letter uncovers. Every function here is pure.
//!
//! All letter and phrase comparisons go through [`normalize`], so
//! `"È"`, `"e"` and `"E"` are the same letter and apostrophes never
//! affect a match.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Symbol drawn in place of a hidden letter cell.
pub const MASK_SYMBOL: char = '_';

/// Punctuation that is always visible on the board.
pub const PUNCTUATION: [char; 3] = [':', '!', '?'];

/// Vowels, after normalization.
pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

/// Apostrophe variants stripped by [`normalize`].
const APOSTROPHES: [char; 6] = ['\'', '\u{2019}', '\u{2018}', '`', '\u{02BC}', '\u{00B4}'];

/// Check if a character is any apostrophe variant.
pub fn is_apostrophe(c: char) -> bool {
    APOSTROPHES.contains(&c)
}

/// Canonical comparison form: uppercase, no diacritics, no apostrophes.
///
/// Idempotent. Never use the result for display.
pub fn normalize(s: &str) -> String {
    s.to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c) && !is_apostrophe(*c))
        .collect()
}

/// Normalized base letter of an alphabetic character.
///
/// A letter whose uppercase form is several characters (`ß` → `SS`) is its
/// own base letter, stripped of marks but not case mapped, so it can still be
/// hidden and guessed as one cell.
pub fn normalize_letter(c: char) -> Option<char> {
    if !c.is_alphabetic() {
        return None;
    }
    let mut buf = [0u8; 4];
    let normalized = normalize(c.encode_utf8(&mut buf));
    let mut letters = normalized.chars();
    match (letters.next(), letters.next()) {
        (Some(l), None) => Some(l),
        _ => c.nfd().find(|ch| !is_combining_mark(*ch)),
    }
}

/// Check if a character is a vowel once normalized.
pub fn is_vowel(c: char) -> bool {
    normalize_letter(c).is_some_and(|l| VOWELS.contains(&l))
}

/// Parse user input that should contain exactly one letter.
pub fn parse_single_letter(input: &str) -> Option<char> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => normalize_letter(c),
        _ => None,
    }
}

/// Count occurrences of a letter in a phrase, ignoring case and accents.
pub fn count_letter(text: &str, letter: char) -> usize {
    let Some(target) = normalize_letter(letter) else {
        return 0;
    };
    text.chars()
        .filter(|c| normalize_letter(*c) == Some(target))
        .count()
}

/// Every distinct normalized letter in a phrase.
pub fn phrase_letters(text: &str) -> BTreeSet<char> {
    text.chars().filter_map(normalize_letter).collect()
}

/// Letters currently shown to everyone in the active round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedSet {
    letters: BTreeSet<char>,
}

impl RevealedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reveal a letter. Returns false if it was already revealed.
    pub fn insert(&mut self, letter: char) -> bool {
        match normalize_letter(letter) {
            Some(l) => self.letters.insert(l),
            None => false,
        }
    }

    pub fn contains(&self, letter: char) -> bool {
        normalize_letter(letter).is_some_and(|l| self.letters.contains(&l))
    }

    pub fn extend(&mut self, letters: impl IntoIterator<Item = char>) {
        for l in letters {
            self.insert(l);
        }
    }

    pub fn clear(&mut self) {
        self.letters.clear();
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().copied()
    }
}

impl FromIterator<char> for RevealedSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Word-wrap a phrase into at most `max_rows` rows of at most `max_cols`
/// characters.
///
/// Words are packed greedily. A word longer than a row is cut into
/// `max_cols`-sized chunks, each on its own row. Content past the last row
/// is dropped.
pub fn build_board(text: &str, max_cols: usize, max_rows: usize) -> Vec<String> {
    let mut rows: Vec<String> = Vec::new();
    if max_cols == 0 || max_rows == 0 {
        return rows;
    }

    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        if rows.len() >= max_rows {
            break;
        }
        let word_len = word.chars().count();

        if word_len > max_cols {
            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_cols) {
                if rows.len() >= max_rows {
                    break;
                }
                rows.push(chunk.iter().collect());
            }
            continue;
        }

        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_cols {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            rows.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }

    if current_len > 0 && rows.len() < max_rows {
        rows.push(current);
    }
    rows
}

/// One addressable unit of a board row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Space,
    Punctuation(char),
    /// A letter, possibly carrying the apostrophe that directly follows it.
    Letter { letter: char, apostrophe: Option<char> },
    /// An apostrophe with no letter in front of it.
    Apostrophe(char),
    Other(char),
}

impl Cell {
    /// Characters of the row this cell covers.
    pub fn width(&self) -> usize {
        match self {
            Self::Letter {
                apostrophe: Some(_),
                ..
            } => 2,
            _ => 1,
        }
    }

    pub fn is_letter(&self) -> bool {
        matches!(self, Self::Letter { .. })
    }

    /// Normalized base letter, for letter cells.
    pub fn base_letter(&self) -> Option<char> {
        match self {
            Self::Letter { letter, .. } => normalize_letter(*letter),
            _ => None,
        }
    }

    /// Original text of the cell.
    pub fn push_text(&self, out: &mut String) {
        match *self {
            Self::Space => out.push(' '),
            Self::Punctuation(c) | Self::Apostrophe(c) | Self::Other(c) => out.push(c),
            Self::Letter { letter, apostrophe } => {
                out.push(letter);
                if let Some(a) = apostrophe {
                    out.push(a);
                }
            }
        }
    }
}

/// Split a row into cells. Concatenating the cells gives back the row.
pub fn parse_cells(row: &str) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(row.len());
    let mut chars = row.chars().peekable();

    while let Some(c) = chars.next() {
        let cell = if c.is_alphabetic() {
            let apostrophe = chars.next_if(|n| is_apostrophe(*n));
            Cell::Letter {
                letter: c,
                apostrophe,
            }
        } else if c == ' ' {
            Cell::Space
        } else if PUNCTUATION.contains(&c) {
            Cell::Punctuation(c)
        } else if is_apostrophe(c) {
            Cell::Apostrophe(c)
        } else {
            Cell::Other(c)
        };
        cells.push(cell);
    }
    cells
}

/// Render rows with every unrevealed letter cell replaced by one mask symbol.
pub fn mask_board(rows: &[String], revealed: &RevealedSet) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let mut out = String::with_capacity(row.len());
            for cell in parse_cells(row) {
                match cell.base_letter() {
                    Some(l) if !revealed.contains(l) => out.push(MASK_SYMBOL),
                    _ => cell.push_text(&mut out),
                }
            }
            out
        })
        .collect()
}

/// Board coordinate, in characters. Orders row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Coordinates uncovered by revealing `target`, in reveal order.
///
/// Row-major, left to right. A trailing apostrophe is listed right after
/// its letter.
pub fn letter_occurrences(rows: &[String], target: char) -> Vec<Position> {
    let Some(target) = normalize_letter(target) else {
        return Vec::new();
    };

    let mut found = Vec::new();
    for (r, row) in rows.iter().enumerate() {
        let mut col = 0;
        for cell in parse_cells(row) {
            if cell.base_letter() == Some(target) {
                found.push(Position::new(r, col));
                if cell.width() == 2 {
                    found.push(Position::new(r, col + 1));
                }
            }
            col += cell.width();
        }
    }
    found
}

/// A phrase laid out on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: Vec<String>,
}

impl Board {
    pub fn new(text: &str, max_cols: usize, max_rows: usize) -> Self {
        Self {
            rows: build_board(text, max_cols, max_rows),
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn masked(&self, revealed: &RevealedSet) -> Vec<String> {
        mask_board(&self.rows, revealed)
    }

    pub fn occurrences(&self, letter: char) -> Vec<Position> {
        letter_occurrences(&self.rows, letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_strips_accents_case_and_apostrophes() {
        assert_eq!(normalize("É"), normalize("E"));
        assert_eq!(normalize("perché"), "PERCHE");
        assert_eq!(normalize("L'ALBERO"), "LALBERO");
        assert_eq!(normalize("l\u{2019}àlbero"), "LALBERO");
    }

    #[test]
    fn test_normalize_idempotent() {
        for s in ["Città d'Italia", "ÀÉÎÕÜ", "straße", "  spazi  ", "già!"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_letter_helpers() {
        assert_eq!(normalize_letter('è'), Some('E'));
        assert_eq!(normalize_letter('7'), None);
        assert!(is_vowel('à'));
        assert!(!is_vowel('B'));
        assert_eq!(parse_single_letter(" b "), Some('B'));
        assert_eq!(parse_single_letter("BB"), None);
        assert_eq!(parse_single_letter(""), None);
        assert_eq!(parse_single_letter("?"), None);
        assert_eq!(count_letter("Però però", 'O'), 2);
        assert_eq!(count_letter("BABBO", 'b'), 3);
    }

    #[test]
    fn test_multi_char_uppercase_letter_stays_hidden() {
        assert_eq!(normalize_letter('ß'), Some('ß'));
        assert_eq!(parse_single_letter("ß"), Some('ß'));
        assert_eq!(count_letter("Straße", 'ß'), 1);
        assert!(!is_vowel('ß'));

        let revealed: RevealedSet = ['S', 'T', 'R', 'A', 'E'].into_iter().collect();
        assert_eq!(mask_board(&rows(&["Straße"]), &revealed), rows(&["Stra_e"]));
        let revealed: RevealedSet = ['ß'].into_iter().collect();
        assert_eq!(mask_board(&rows(&["Straße"]), &revealed), rows(&["____ß_"]));
    }

    #[test]
    fn test_build_board_single_row() {
        assert_eq!(build_board("CASA MIA", 14, 4), rows(&["CASA MIA"]));
    }

    #[test]
    fn test_build_board_wraps_greedily() {
        let board = build_board("LA VITA È BELLA PER TUTTI", 10, 4);
        assert_eq!(board, rows(&["LA VITA È", "BELLA PER", "TUTTI"]));
    }

    #[test]
    fn test_build_board_hard_wraps_long_words() {
        let board = build_board("UN PRECIPITEVOLISSIMEVOLMENTE", 8, 6);
        assert_eq!(board, rows(&["UN", "PRECIPIT", "EVOLISSI", "MEVOLMEN", "TE"]));
    }

    #[test]
    fn test_build_board_bounds() {
        let text = "UNO DUE TRE QUATTRO CINQUE SEI SETTE OTTO NOVE DIECI SUPERCALIFRAGILISTICO";
        for cols in 1..16 {
            for max_rows in 0..5 {
                let board = build_board(text, cols, max_rows);
                assert!(board.len() <= max_rows);
                assert!(board.iter().all(|r| r.chars().count() <= cols));
            }
        }
        assert!(build_board(text, 0, 4).is_empty());
    }

    #[test]
    fn test_build_board_truncates_silently() {
        let board = build_board("A B C D E F", 1, 3);
        assert_eq!(board, rows(&["A", "B", "C"]));
    }

    #[test]
    fn test_parse_cells_reconstructs_row() {
        for row in ["L'AMORE È", "'NDRANGHETA?", "DOV'È: QUI!", "ANNO 2024"] {
            let mut rebuilt = String::new();
            for cell in parse_cells(row) {
                cell.push_text(&mut rebuilt);
            }
            assert_eq!(rebuilt, row);
        }
    }

    #[test]
    fn test_parse_cells_groups_trailing_apostrophe() {
        let cells = parse_cells("L'A");
        assert_eq!(
            cells,
            vec![
                Cell::Letter {
                    letter: 'L',
                    apostrophe: Some('\'')
                },
                Cell::Letter {
                    letter: 'A',
                    apostrophe: None
                },
            ]
        );

        let cells = parse_cells("'A ?");
        assert_eq!(cells[0], Cell::Apostrophe('\''));
        assert_eq!(cells[2], Cell::Space);
        assert_eq!(cells[3], Cell::Punctuation('?'));
    }

    #[test]
    fn test_mask_board_partial() {
        let revealed: RevealedSet = ['C', 'A'].into_iter().collect();
        assert_eq!(mask_board(&rows(&["CASA"]), &revealed), rows(&["CA_A"]));
    }

    #[test]
    fn test_mask_board_apostrophe_cell_is_one_symbol() {
        let revealed: RevealedSet = ['A'].into_iter().collect();
        assert_eq!(
            mask_board(&rows(&["DELL'ARTE!"]), &revealed),
            rows(&["____A___!"])
        );
    }

    #[test]
    fn test_mask_board_full_reveal_is_identity() {
        let board = rows(&["L'ALBERO", "DELLA CITTÀ?"]);
        let revealed: RevealedSet = board.iter().flat_map(|r| phrase_letters(r)).collect();
        assert_eq!(mask_board(&board, &revealed), board);
    }

    #[test]
    fn test_letter_occurrences_order() {
        let board = rows(&["L'ALBA", "BELLA"]);
        assert_eq!(
            letter_occurrences(&board, 'l'),
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 3),
                Position::new(1, 2),
                Position::new(1, 3),
            ]
        );
        assert_eq!(
            letter_occurrences(&board, 'à'),
            vec![Position::new(0, 2), Position::new(0, 5), Position::new(1, 4)]
        );
        assert!(letter_occurrences(&board, '!').is_empty());
    }

    #[test]
    fn test_board_wrapper() {
        let board = Board::new("CIAO MONDO", 5, 2);
        assert_eq!(board.rows(), &rows(&["CIAO", "MONDO"])[..]);
        let revealed: RevealedSet = ['O'].into_iter().collect();
        assert_eq!(board.masked(&revealed), rows(&["___O", "_O__O"]));
        assert_eq!(board.occurrences('O').len(), 3);
    }
}
