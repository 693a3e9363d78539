use crate::config::SolverConfig;
use crate::core::board::Board;
use crate::core::results::SolveResult;
use crate::core::solver::Solver;
use crate::core::trie::Lexicon;
use crate::error::Result;
use crate::persistence::{fingerprint, load_from_disk, save_to_disk};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Owns the shared lexicon and solves boards against it.
///
/// Construction is the one-shot initialization step: an engine only exists
/// once its lexicon is fully built, and the lexicon is never mutated after
/// that. `solve` takes `&self`, so one engine can serve overlapping solves
/// from several threads.
pub struct GameEngine {
    lexicon: Arc<Lexicon>,
    solver: Solver,
    sequence: AtomicU64,
}

impl GameEngine {
    pub fn new(lexicon: Arc<Lexicon>, config: SolverConfig) -> Result<Self> {
        Ok(Self {
            lexicon,
            solver: Solver::new(config)?,
            sequence: AtomicU64::new(0),
        })
    }

    /// Builds the lexicon from a word list. Fails only if no word is usable.
    pub fn from_words<I, S>(words: I, config: SolverConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lexicon = Lexicon::build(words)?;
        Self::new(Arc::new(lexicon), config)
    }

    /// Loads a lexicon snapshot if one exists, is readable, and was built
    /// from the same word list; otherwise builds from `words()` and writes a
    /// fresh snapshot. The word list is always read so an edited dictionary
    /// is picked up on the next start.
    pub fn from_snapshot_or_words<F, I, S>(
        snapshot: &Path,
        words: F,
        config: SolverConfig,
    ) -> Result<Self>
    where
        F: FnOnce() -> Result<I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<S> = words()?.into_iter().collect();
        let expected = fingerprint(&words);
        if snapshot.exists() {
            match load_from_disk(snapshot) {
                Ok(loaded) if loaded.fingerprint != expected => {
                    debug!(path = %snapshot.display(), "word list changed since snapshot, rebuilding")
                }
                Ok(loaded) if loaded.lexicon.is_empty() => {
                    warn!(path = %snapshot.display(), "lexicon snapshot is empty, rebuilding")
                }
                Ok(loaded) => {
                    debug!(path = %snapshot.display(), words = loaded.lexicon.len(), "lexicon snapshot loaded");
                    return Self::new(Arc::new(loaded.lexicon), config);
                }
                Err(e) => warn!(path = %snapshot.display(), error = %e, "lexicon snapshot unreadable, rebuilding"),
            }
        }
        let lexicon = Lexicon::build(&words)?;
        if let Err(e) = save_to_disk(&lexicon, &expected, snapshot) {
            warn!(path = %snapshot.display(), error = %e, "could not write lexicon snapshot");
        }
        Self::new(Arc::new(lexicon), config)
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    pub fn config(&self) -> &SolverConfig {
        self.solver.config()
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Solves a board. Each result carries a sequence number that increases
    /// with every call, so the host can discard results that arrive late.
    pub fn solve(&self, board: &Board) -> SolveResult {
        let sequence = self.next_sequence();
        let mut result = self.solver.solve(board, &self.lexicon);
        result.sequence = sequence;
        debug!(sequence, words = result.len(), "solve finished");
        result
    }

    pub fn solve_cancellable(&self, board: &Board, cancel: &AtomicBool) -> Option<SolveResult> {
        let sequence = self.next_sequence();
        let mut result = self.solver.solve_cancellable(board, &self.lexicon, cancel)?;
        result.sequence = sequence;
        Some(result)
    }
}
