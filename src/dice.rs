// File: src/dice.rs
use crate::core::board::{Board, Tile};
use crate::core::types::CELL_COUNT;
use crate::error::{BoggleError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The 25 dice of the 5×5 game. The Qu face is reduced to `q` since a cell
/// holds a single letter.
#[rustfmt::skip]
const STANDARD_DICE: [&str; CELL_COUNT] = [
    "aaafrs", "aaeeee", "aafirs", "adennn", "aeeeem",
    "aeegmu", "aegmnn", "afirsy", "bjkqxz", "ccenst",
    "ceiilt", "ceilpt", "ceipst", "ddhnot", "dhhlor",
    "dhlnor", "dhlnor", "eiiitt", "emottt", "ensssu",
    "fiprsy", "gorrvw", "iprrry", "nootuw", "ooottu",
];

/// A full set of dice, one per cell. Deserializing goes through
/// [`DiceSet::from_faces`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<char>>", into = "Vec<Vec<char>>")]
pub struct DiceSet {
    dice: Vec<Vec<char>>,
}

impl TryFrom<Vec<Vec<char>>> for DiceSet {
    type Error = BoggleError;

    fn try_from(dice: Vec<Vec<char>>) -> Result<Self> {
        Self::from_faces(dice)
    }
}

impl From<DiceSet> for Vec<Vec<char>> {
    fn from(set: DiceSet) -> Self {
        set.dice
    }
}

impl Default for DiceSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl DiceSet {
    pub fn standard() -> Self {
        Self {
            dice: STANDARD_DICE.iter().map(|d| d.chars().collect()).collect(),
        }
    }

    /// Validates user-edited dice: exactly 25, each with at least one face,
    /// every face a letter. Faces are lowercased.
    pub fn from_faces(dice: Vec<Vec<char>>) -> Result<Self> {
        if dice.len() != CELL_COUNT {
            return Err(BoggleError::invalid_board(format!(
                "expected {} dice, got {}",
                CELL_COUNT,
                dice.len()
            )));
        }
        let mut normalized = Vec::with_capacity(CELL_COUNT);
        for (i, faces) in dice.into_iter().enumerate() {
            if faces.is_empty() {
                return Err(BoggleError::invalid_board(format!("die {} has no faces", i)));
            }
            if let Some(bad) = faces.iter().find(|c| !c.is_ascii_alphabetic()) {
                return Err(BoggleError::invalid_board(format!(
                    "die {} has non-letter face {:?}",
                    i, bad
                )));
            }
            normalized.push(faces.iter().map(|c| c.to_ascii_lowercase()).collect());
        }
        Ok(Self { dice: normalized })
    }

    /// Parses comma-separated faces per die, the format used when editing dice.
    pub fn parse<S: AsRef<str>>(dice: &[S]) -> Result<Self> {
        let faces = dice
            .iter()
            .map(|die| {
                die.as_ref()
                    .split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(|f| {
                        let mut chars = f.chars();
                        match (chars.next(), chars.next()) {
                            (Some(c), None) => Ok(c),
                            _ => Err(BoggleError::invalid_board(format!(
                                "face {:?} is not a single letter",
                                f
                            ))),
                        }
                    })
                    .collect::<Result<Vec<char>>>()
            })
            .collect::<Result<Vec<Vec<char>>>>()?;
        Self::from_faces(faces)
    }

    /// Reads an edited dice file: one die per line, faces comma-separated.
    /// Blank lines are ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let lines: Vec<&str> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Self::parse(&lines)
    }

    pub fn dice(&self) -> &[Vec<char>] {
        &self.dice
    }

    /// Shuffles the dice into random cells and rolls each one.
    pub fn deal<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Board> {
        let mut dice = self.dice.clone();
        dice.shuffle(rng);
        let tiles: Vec<Tile> = dice
            .into_iter()
            .map(|faces| Tile {
                active: faces[rng.random_range(0..faces.len())],
                faces,
            })
            .collect();
        Board::from_tiles(tiles)
    }
}
