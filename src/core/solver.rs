// src/core/solver.rs
use crate::config::SolverConfig;
use crate::core::board::Board;
use crate::core::results::{Occurrences, SolveResult};
use crate::core::trie::{Lexicon, NodeId};
use crate::core::types::{Coord, CELL_COUNT};
use crate::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Exhaustive board search with prefix pruning.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

/// State for one depth-first pass. Every push in `visit` is undone before it
/// returns, so sibling branches always see a clean mask and path.
struct Search<'a> {
    letters: &'a [u8; CELL_COUNT],
    lexicon: &'a Lexicon,
    min_len: usize,
    max_len: usize,
    cancel: Option<&'a AtomicBool>,
    visited: u32,
    path: Vec<Coord>,
    word: String,
    found: Occurrences,
    nodes_visited: u64,
    cancelled: bool,
}

impl Search<'_> {
    /// `node` is the lexicon node for the letters already on the path.
    fn visit(&mut self, coord: Coord, node: NodeId) {
        if let Some(flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                self.cancelled = true;
                return;
            }
        }
        let bit = 1u32 << coord.index();
        if self.visited & bit != 0 || self.path.len() >= self.max_len {
            return;
        }
        let letter = self.letters[coord.index()];
        // No child means no word extends this prefix.
        let Some(next) = self.lexicon.step(node, letter) else {
            return;
        };
        self.nodes_visited += 1;

        self.visited |= bit;
        self.path.push(coord);
        self.word.push(letter as char);

        if self.word.len() >= self.min_len && self.lexicon.is_terminal(next) {
            self.found.record(&self.word, &self.path);
        }
        for neighbor in coord.neighbors() {
            self.visit(neighbor, next);
            if self.cancelled {
                break;
            }
        }

        self.word.pop();
        self.path.pop();
        self.visited &= !bit;
    }

    /// Searches from every start cell. False if the cancel flag stopped it.
    fn run(&mut self) -> bool {
        let root = self.lexicon.root();
        for start in Coord::all() {
            self.visit(start, root);
            if self.cancelled {
                debug!(nodes_visited = self.nodes_visited, "solve cancelled");
                return false;
            }
        }
        true
    }
}

impl Solver {
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Finds every word on the board, merged by text and ranked.
    pub fn solve(&self, board: &Board, lexicon: &Lexicon) -> SolveResult {
        let letters = board.snapshot();
        let mut search = self.search(&letters, lexicon, None);
        search.run();
        self.finish(search)
    }

    /// Like [`Solver::solve`], but gives up when `cancel` is set.
    /// Returns `None` if the search was abandoned.
    pub fn solve_cancellable(
        &self,
        board: &Board,
        lexicon: &Lexicon,
        cancel: &AtomicBool,
    ) -> Option<SolveResult> {
        let letters = board.snapshot();
        let mut search = self.search(&letters, lexicon, Some(cancel));
        search.run().then(|| self.finish(search))
    }

    /// Validates a 5×5 grid of single-letter strings, then solves it.
    pub fn solve_rows<R, S>(&self, rows: &[R], lexicon: &Lexicon) -> Result<SolveResult>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let board = Board::from_rows(rows)?;
        Ok(self.solve(&board, lexicon))
    }

    fn search<'a>(
        &self,
        letters: &'a [u8; CELL_COUNT],
        lexicon: &'a Lexicon,
        cancel: Option<&'a AtomicBool>,
    ) -> Search<'a> {
        Search {
            letters,
            lexicon,
            min_len: self.config.min_word_len,
            max_len: self.config.max_word_len.unwrap_or(CELL_COUNT),
            cancel,
            visited: 0,
            path: Vec::with_capacity(CELL_COUNT),
            word: String::with_capacity(CELL_COUNT),
            found: Occurrences::default(),
            nodes_visited: 0,
            cancelled: false,
        }
    }

    fn finish(&self, search: Search<'_>) -> SolveResult {
        let occurrences = search.found.total();
        let words = search.found.into_ranked();
        debug!(
            words = words.len(),
            occurrences,
            nodes_visited = search.nodes_visited,
            "board solved"
        );
        SolveResult::new(words, self.config.rank_display)
    }
}

/// Solves with the default configuration.
pub fn solve(board: &Board, lexicon: &Lexicon) -> SolveResult {
    Solver::default().solve(board, lexicon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::is_valid_path;

    fn cat_board() -> Board {
        Board::from_letters("catxx sxxxx xxxxx xxxxx xxxxx").unwrap()
    }

    fn words(result: &SolveResult) -> Vec<&str> {
        result.words().iter().map(|w| w.word.as_str()).collect()
    }

    #[test]
    fn finds_cat_but_not_act() {
        // 's' at (1,0) is not adjacent to 't' at (0,2), so no "cats".
        let lex = Lexicon::build(["cat", "cats", "act"]).unwrap();
        let result = solve(&cat_board(), &lex);
        assert_eq!(words(&result), vec!["cat"]);
        let cat = result.find("cat").unwrap();
        assert_eq!(
            cat.paths(),
            &[vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)]]
        );
    }

    #[test]
    fn finds_cats_when_s_touches_t() {
        let lex = Lexicon::build(["cat", "cats", "act"]).unwrap();
        let board = Board::from_letters("catxx xsxxx xxxxx xxxxx xxxxx").unwrap();
        let result = solve(&board, &lex);
        assert_eq!(words(&result), vec!["cats", "cat"]);
        assert_eq!(
            result.find("cats").unwrap().representative(),
            &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2), Coord::new(1, 1)]
        );
    }

    #[test]
    fn uniform_board_dedups_by_text() {
        let lex = Lexicon::build(["eee"]).unwrap();
        let board = Board::from_letters(&"e".repeat(25)).unwrap();
        let result = solve(&board, &lex);
        assert_eq!(result.len(), 1);
        let eee = &result.words()[0];
        assert_eq!(eee.word, "eee");
        assert!(eee.count() > 1);
        assert!(eee.paths().iter().all(|p| p.len() == 3 && is_valid_path(p)));
        let mut distinct = eee.paths().to_vec();
        distinct.sort();
        distinct.dedup();
        assert_eq!(distinct.len(), eee.count());
    }

    #[test]
    fn empty_lexicon_finds_nothing() {
        let result = solve(&cat_board(), &Lexicon::empty());
        assert!(result.is_empty());
        assert_eq!(result.max_usage(), 0);
        assert!(result.heatmap().iter().all(|(_, n)| n == 0));
    }

    #[test]
    fn min_word_len_filters_short_words() {
        let lex = Lexicon::build(["ca", "cat"]).unwrap();
        let default = solve(&cat_board(), &lex);
        assert_eq!(words(&default), vec!["cat"]);

        let solver = Solver::new(SolverConfig::default().with_min_word_len(2)).unwrap();
        assert_eq!(words(&solver.solve(&cat_board(), &lex)), vec!["cat", "ca"]);

        let solver = Solver::new(SolverConfig::default().with_min_word_len(4)).unwrap();
        assert!(solver.solve(&cat_board(), &lex).is_empty());
    }

    #[test]
    fn max_word_len_caps_depth() {
        let lex = Lexicon::build(["cat", "cats"]).unwrap();
        let board = Board::from_letters("catxx xsxxx xxxxx xxxxx xxxxx").unwrap();
        let solver = Solver::new(SolverConfig::default().with_max_word_len(3)).unwrap();
        assert_eq!(words(&solver.solve(&board, &lex)), vec!["cat"]);
    }

    #[test]
    fn cells_are_never_reused() {
        // "aba" would need (0,0) twice on a board with a single 'a' next to 'b'.
        let lex = Lexicon::build(["aba", "ab"]).unwrap();
        let board = Board::from_letters("abxxx xxxxx xxxxx xxxxx xxxxx").unwrap();
        assert!(solve(&board, &lex).is_empty());
    }

    #[test]
    fn solve_rows_validates_input() {
        let lex = Lexicon::build(["cat"]).unwrap();
        let rows = vec![vec!["c", "a", "t"]];
        assert!(Solver::default().solve_rows(&rows, &lex).is_err());

        let rows = [
            ["c", "a", "t", "x", "x"],
            ["x", "x", "x", "x", "x"],
            ["x", "x", "x", "x", "x"],
            ["x", "x", "x", "x", "x"],
            ["x", "x", "x", "x", "x"],
        ];
        let result = Solver::default().solve_rows(&rows, &lex).unwrap();
        assert_eq!(words(&result), vec!["cat"]);
    }

    #[test]
    fn cancelled_solve_returns_none() {
        let lex = Lexicon::build(["eee"]).unwrap();
        let board = Board::from_letters(&"e".repeat(25)).unwrap();
        let cancel = AtomicBool::new(true);
        assert!(Solver::default().solve_cancellable(&board, &lex, &cancel).is_none());

        let cancel = AtomicBool::new(false);
        let result = Solver::default().solve_cancellable(&board, &lex, &cancel).unwrap();
        assert_eq!(result, solve(&board, &lex));
    }

    #[test]
    fn configured_display_mode_is_kept() {
        use crate::config::RankDisplay;
        let lex = Lexicon::build(["cat"]).unwrap();
        let config = SolverConfig::default().with_rank_display(RankDisplay::CountWithRepresentative);
        let solver = Solver::new(config).unwrap();

        let result = solver.solve(&cat_board(), &lex);
        assert_eq!(result.display, RankDisplay::CountWithRepresentative);

        let cancel = AtomicBool::new(false);
        let result = solver.solve_cancellable(&cat_board(), &lex, &cancel).unwrap();
        assert_eq!(result.display, RankDisplay::CountWithRepresentative);

        // An empty lexicon still reports the configured mode.
        let result = solver.solve(&cat_board(), &Lexicon::empty());
        assert!(result.is_empty());
        assert_eq!(result.display, RankDisplay::CountWithRepresentative);
    }

    #[test]
    fn solving_twice_is_deterministic() {
        let lex = Lexicon::build(["tea", "eat", "ate", "seat", "east", "sea", "tees"]).unwrap();
        let board = Board::from_letters("teats easte stase eatte seats").unwrap();
        let first = solve(&board, &lex);
        let second = solve(&board, &lex);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
