// src/core/board.rs
use crate::core::types::{Coord, CELL_COUNT, GRID_SIZE};
use crate::error::{BoggleError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One cell: the die sitting there and the face currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub active: char,
    pub faces: Vec<char>,
}

impl Tile {
    /// A tile with a single fixed face.
    pub fn fixed(letter: char) -> Self {
        Self { active: letter, faces: vec![letter] }
    }
}

/// The 5×5 grid of tiles, stored row-major.
///
/// Every constructor validates that each cell holds exactly one ASCII letter,
/// normalized to lowercase, so the solver can take a snapshot without
/// re-checking. Serialized as the row-major tile list; deserializing goes
/// through [`Board::from_tiles`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tile>", into = "Vec<Tile>")]
pub struct Board {
    tiles: Vec<Tile>,
}

impl TryFrom<Vec<Tile>> for Board {
    type Error = BoggleError;

    fn try_from(tiles: Vec<Tile>) -> Result<Self> {
        Self::from_tiles(tiles)
    }
}

impl From<Board> for Vec<Tile> {
    fn from(board: Board) -> Self {
        board.tiles
    }
}

fn parse_letter(cell: &str, coord: Coord) -> Result<char> {
    let mut chars = cell.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_lowercase()),
        _ => Err(BoggleError::invalid_board(format!(
            "cell ({}, {}) must hold exactly one letter, got {:?}",
            coord.row, coord.col, cell
        ))),
    }
}

impl Board {
    /// Builds a board from 5 rows of 5 single-letter strings.
    pub fn from_rows<R, S>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        if rows.len() != GRID_SIZE {
            return Err(BoggleError::invalid_board(format!(
                "expected {} rows, got {}",
                GRID_SIZE,
                rows.len()
            )));
        }
        let mut tiles = Vec::with_capacity(CELL_COUNT);
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != GRID_SIZE {
                return Err(BoggleError::invalid_board(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    cells.len(),
                    GRID_SIZE
                )));
            }
            for (col, cell) in cells.iter().enumerate() {
                let letter = parse_letter(cell.as_ref(), Coord::new(row, col))?;
                tiles.push(Tile::fixed(letter));
            }
        }
        Ok(Self { tiles })
    }

    /// Builds a board from 25 letters in row-major order; whitespace is ignored.
    pub fn from_letters(letters: &str) -> Result<Self> {
        let cells: Vec<char> = letters.chars().filter(|c| !c.is_whitespace()).collect();
        if cells.len() != CELL_COUNT {
            return Err(BoggleError::invalid_board(format!(
                "expected {} letters, got {}",
                CELL_COUNT,
                cells.len()
            )));
        }
        let rows: Vec<Vec<String>> = cells
            .chunks(GRID_SIZE)
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Builds a board from dealt tiles. Every face must be a letter and the
    /// active face must be one of them.
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self> {
        if tiles.len() != CELL_COUNT {
            return Err(BoggleError::invalid_board(format!(
                "expected {} tiles, got {}",
                CELL_COUNT,
                tiles.len()
            )));
        }
        let mut normalized = Vec::with_capacity(CELL_COUNT);
        for (index, tile) in tiles.into_iter().enumerate() {
            let coord = Coord::from_index(index);
            let active = parse_letter(&tile.active.to_string(), coord)?;
            let faces = tile
                .faces
                .iter()
                .map(|f| parse_letter(&f.to_string(), coord))
                .collect::<Result<Vec<char>>>()?;
            if !faces.contains(&active) {
                return Err(BoggleError::invalid_board(format!(
                    "cell ({}, {}) shows {:?}, which is not a face of its die",
                    coord.row, coord.col, active
                )));
            }
            normalized.push(Tile { active, faces });
        }
        Ok(Self { tiles: normalized })
    }

    pub fn tile(&self, coord: Coord) -> &Tile {
        &self.tiles[coord.index()]
    }

    pub fn letter_at(&self, coord: Coord) -> char {
        self.tiles[coord.index()].active
    }

    /// Copies the active letters out, row-major. This is what a solve reads,
    /// so later board mutations cannot affect a running search.
    pub fn snapshot(&self) -> [u8; CELL_COUNT] {
        let mut letters = [0u8; CELL_COUNT];
        for (slot, tile) in letters.iter_mut().zip(&self.tiles) {
            // ASCII by construction.
            *slot = tile.active as u8;
        }
        letters
    }

    /// Spells the letters along a path.
    pub fn spell(&self, path: &[Coord]) -> String {
        path.iter().map(|&c| self.letter_at(c)).collect()
    }

    /// Rolls the die at `coord` again and shows the new face.
    pub fn reroll<R: Rng + ?Sized>(&mut self, coord: Coord, rng: &mut R) -> Result<char> {
        if !coord.in_bounds() {
            return Err(BoggleError::invalid_board(format!(
                "cell ({}, {}) is off the board",
                coord.row, coord.col
            )));
        }
        let tile = &mut self.tiles[coord.index()];
        if !tile.faces.is_empty() {
            tile.active = tile.faces[rng.random_range(0..tile.faces.len())];
        }
        Ok(tile.active)
    }

    /// Swaps two tiles, dice and faces together.
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<()> {
        if !a.in_bounds() || !b.in_bounds() {
            return Err(BoggleError::invalid_board("swap target is off the board"));
        }
        self.tiles.swap(a.index(), b.index());
        Ok(())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(GRID_SIZE)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|t| t.active.to_ascii_uppercase().to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ROWS: [[&str; 5]; 5] = [
        ["c", "a", "t", "x", "x"],
        ["s", "x", "x", "x", "x"],
        ["x", "x", "x", "x", "x"],
        ["x", "x", "x", "x", "x"],
        ["x", "x", "x", "x", "x"],
    ];

    #[test]
    fn builds_from_rows() {
        let board = Board::from_rows(&ROWS).unwrap();
        assert_eq!(board.letter_at(Coord::new(0, 2)), 't');
        assert_eq!(board.letter_at(Coord::new(1, 0)), 's');
        assert_eq!(&board.snapshot()[..6], b"catxxs");
    }

    #[test]
    fn uppercase_is_lowercased() {
        let board = Board::from_letters("CATXX SXXXX XXXXX XXXXX XXXXX").unwrap();
        assert_eq!(board.letter_at(Coord::new(0, 0)), 'c');
    }

    #[test]
    fn rejects_wrong_shape() {
        let short = &ROWS[..4];
        assert!(matches!(Board::from_rows(short), Err(BoggleError::InvalidBoard { .. })));

        let ragged: Vec<Vec<&str>> = vec![
            vec!["a"; 5],
            vec!["a"; 4],
            vec!["a"; 5],
            vec!["a"; 5],
            vec!["a"; 5],
        ];
        assert!(matches!(Board::from_rows(&ragged), Err(BoggleError::InvalidBoard { .. })));
        assert!(Board::from_letters("abc").is_err());
    }

    #[test]
    fn rejects_non_letter_cells() {
        let mut rows = ROWS.map(|r| r.map(String::from));
        rows[2][3] = "qu".to_string();
        assert!(Board::from_rows(&rows).is_err());
        rows[2][3] = "7".to_string();
        assert!(Board::from_rows(&rows).is_err());
        rows[2][3] = String::new();
        assert!(Board::from_rows(&rows).is_err());
    }

    #[test]
    fn spell_follows_path() {
        let board = Board::from_rows(&ROWS).unwrap();
        let path = [Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)];
        assert_eq!(board.spell(&path), "cat");
    }

    #[test]
    fn swap_exchanges_tiles() {
        let mut board = Board::from_rows(&ROWS).unwrap();
        board.swap(Coord::new(0, 0), Coord::new(1, 0)).unwrap();
        assert_eq!(board.letter_at(Coord::new(0, 0)), 's');
        assert_eq!(board.letter_at(Coord::new(1, 0)), 'c');
        assert!(board.swap(Coord::new(0, 0), Coord::new(5, 0)).is_err());
    }

    #[test]
    fn reroll_stays_on_die_faces() {
        let mut tiles: Vec<Tile> = (0..CELL_COUNT).map(|_| Tile::fixed('e')).collect();
        tiles[7] = Tile { active: 'a', faces: vec!['a', 'b', 'c'] };
        let mut board = Board::from_tiles(tiles).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let face = board.reroll(Coord::from_index(7), &mut rng).unwrap();
            assert!(['a', 'b', 'c'].contains(&face));
        }
        assert_eq!(board.reroll(Coord::new(0, 0), &mut rng).unwrap(), 'e');
    }

    #[test]
    fn serde_round_trip() {
        let board = Board::from_rows(&ROWS).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn deserializing_short_board_fails() {
        let json = r#"[
            {"active": "c", "faces": ["c"]},
            {"active": "a", "faces": ["a"]},
            {"active": "t", "faces": ["t"]}
        ]"#;
        let err = serde_json::from_str::<Board>(json).unwrap_err();
        assert!(err.to_string().contains("expected 25 tiles"));
    }

    #[test]
    fn deserializing_normalizes_and_checks_letters() {
        let mut tiles: Vec<Tile> = (0..CELL_COUNT).map(|_| Tile::fixed('e')).collect();
        tiles[0] = Tile { active: 'C', faces: vec!['C', 'D'] };
        let json = serde_json::to_string(&tiles).unwrap();
        let board: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board.letter_at(Coord::new(0, 0)), 'c');

        tiles[0] = Tile::fixed('é');
        let json = serde_json::to_string(&tiles).unwrap();
        assert!(serde_json::from_str::<Board>(&json).is_err());
    }

    #[test]
    fn active_face_must_belong_to_die() {
        let mut tiles: Vec<Tile> = (0..CELL_COUNT).map(|_| Tile::fixed('e')).collect();
        tiles[0] = Tile { active: 'z', faces: vec!['a'] };
        assert!(Board::from_tiles(tiles).is_err());
    }
}
