// src/lib.rs
//! Word-search engine for a 5×5 letter-grid game.
//!
//! Build a [`Lexicon`] once, hand it to a [`GameEngine`], and solve every
//! board the host produces:
//!
//! ```
//! use boggle_core::{Board, GameEngine, SolverConfig};
//!
//! let engine = GameEngine::from_words(["cat", "cats", "act"], SolverConfig::default()).unwrap();
//! let board = Board::from_letters("catxx xsxxx xxxxx xxxxx xxxxx").unwrap();
//! let result = engine.solve(&board);
//!
//! let words: Vec<&str> = result.words().iter().map(|w| w.word.as_str()).collect();
//! assert_eq!(words, ["cats", "cat"]);
//! assert!(result.max_usage() > 0);
//! ```

pub mod config;
pub mod core;
pub mod dice;
pub mod error;
pub mod persistence;

pub use crate::config::{RankDisplay, SolverConfig};
pub use crate::core::board::{Board, Tile};
pub use crate::core::engine::GameEngine;
pub use crate::core::results::{FoundWord, Heatmap, SolveResult};
pub use crate::core::solver::{solve, Solver};
pub use crate::core::trie::Lexicon;
pub use crate::core::types::{Coord, Path, CELL_COUNT, GRID_SIZE};
pub use crate::dice::DiceSet;
pub use crate::error::{BoggleError, Result};
