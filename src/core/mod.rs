pub mod board;
pub mod engine;
pub mod results;
pub mod solver;
pub mod trie;
pub mod types;
