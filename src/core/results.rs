// src/core/results.rs
use crate::config::RankDisplay;
use crate::core::types::{Coord, Path, GRID_SIZE};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// A dictionary word found on the board, with every path that spells it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundWord {
    pub word: String,
    paths: Vec<Path>,
}

impl FoundWord {
    /// Number of distinct paths spelling this word.
    pub fn count(&self) -> usize {
        self.paths.len()
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// The first path found, used when only one line is drawn.
    pub fn representative(&self) -> &[Coord] {
        self.paths.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Length descending, then text ascending.
pub fn ranking_order(a: &FoundWord, b: &FoundWord) -> Ordering {
    b.word.len().cmp(&a.word.len()).then_with(|| a.word.cmp(&b.word))
}

/// Collects raw occurrences during one search pass, keyed by word text.
#[derive(Default)]
pub(crate) struct Occurrences {
    by_word: HashMap<String, Vec<Path>>,
    total: usize,
}

impl Occurrences {
    pub(crate) fn record(&mut self, word: &str, path: &[Coord]) {
        self.total += 1;
        if let Some(paths) = self.by_word.get_mut(word) {
            paths.push(path.to_vec());
        } else {
            self.by_word.insert(word.to_string(), vec![path.to_vec()]);
        }
    }

    pub(crate) fn total(&self) -> usize {
        self.total
    }

    /// Merges into one entry per word and applies the ranking order.
    pub(crate) fn into_ranked(self) -> Vec<FoundWord> {
        let mut words: Vec<FoundWord> = self
            .by_word
            .into_iter()
            .map(|(word, paths)| FoundWord { word, paths })
            .collect();
        words.sort_by(ranking_order);
        words
    }
}

/// What the host shows for one word, shaped by [`RankDisplay`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEntry<'a> {
    pub word: &'a str,
    pub count: usize,
    pub paths: &'a [Path],
}

/// Ranked words for one board snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    words: Vec<FoundWord>,
    /// Position of this solve in the engine's request order.
    pub sequence: u64,
    pub display: RankDisplay,
}

impl SolveResult {
    pub(crate) fn new(words: Vec<FoundWord>, display: RankDisplay) -> Self {
        Self { words, sequence: 0, display }
    }

    /// A result with no words, as produced by an empty lexicon.
    pub fn empty() -> Self {
        Self::new(Vec::new(), RankDisplay::default())
    }

    pub fn words(&self) -> &[FoundWord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Looks a word up by text.
    pub fn find(&self, word: &str) -> Option<&FoundWord> {
        // Ranked by length first, so only scan the band of equal length.
        self.words
            .iter()
            .skip_while(|w| w.word.len() > word.len())
            .take_while(|w| w.word.len() == word.len())
            .find(|w| w.word == word)
    }

    pub fn total_occurrences(&self) -> usize {
        self.words.iter().map(FoundWord::count).sum()
    }

    /// True if this result came from a later request than `other`.
    pub fn is_newer_than(&self, other: &SolveResult) -> bool {
        self.sequence > other.sequence
    }

    pub fn display_entries(&self) -> Vec<DisplayEntry<'_>> {
        self.words
            .iter()
            .map(|w| {
                let paths = match self.display {
                    RankDisplay::AllPaths => w.paths(),
                    RankDisplay::CountWithRepresentative => &w.paths[..w.paths.len().min(1)],
                };
                DisplayEntry { word: &w.word, count: w.count(), paths }
            })
            .collect()
    }

    /// Per-cell usage across every (word, path) occurrence.
    pub fn heatmap(&self) -> Heatmap {
        let mut heatmap = Heatmap::default();
        for path in self.words.iter().flat_map(|w| w.paths.iter()) {
            for &coord in path {
                heatmap.counts[coord.row][coord.col] += 1;
            }
        }
        heatmap.max = heatmap.counts.iter().flatten().copied().max().unwrap_or(0);
        heatmap
    }

    pub fn max_usage(&self) -> u32 {
        self.heatmap().max()
    }
}

/// How many found-word occurrences pass through each cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heatmap {
    counts: [[u32; GRID_SIZE]; GRID_SIZE],
    max: u32,
}

impl Heatmap {
    pub fn get(&self, coord: Coord) -> u32 {
        self.counts[coord.row][coord.col]
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Usage scaled to `0.0..=1.0`. Zero when nothing was found.
    pub fn intensity(&self, coord: Coord) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.get(coord) as f32 / self.max as f32
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, u32)> + '_ {
        Coord::all().map(move |c| (c, self.get(c)))
    }

    /// Every cell, including untouched ones at zero.
    pub fn to_map(&self) -> BTreeMap<Coord, u32> {
        self.iter().collect()
    }
}
