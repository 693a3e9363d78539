// --- File: src/core/trie.rs
use crate::error::{BoggleError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Index of a node inside the lexicon's node arena.
pub type NodeId = u32;

const ROOT: NodeId = 0;
const ALPHABET: usize = 26;

#[derive(Clone, Serialize, Deserialize)]
struct LexiconNode {
    children: [Option<NodeId>; ALPHABET],
    terminal: bool,
}

impl LexiconNode {
    fn new() -> Self {
        Self { children: [None; ALPHABET], terminal: false }
    }
}

/// Maps an ASCII lowercase letter to its child slot.
fn slot(letter: u8) -> Option<usize> {
    letter.is_ascii_lowercase().then(|| (letter - b'a') as usize)
}

/// An immutable prefix tree over `a..=z`.
///
/// Nodes live in a flat arena and reference their children by index, so a
/// built lexicon is a single allocation that can be shared across solves
/// and snapshotted to disk as-is. Deserialization re-checks the arena, so a
/// decoded lexicon always has a root and no dangling child ids.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "LexiconParts")]
pub struct Lexicon {
    nodes: Vec<LexiconNode>,
    word_count: usize,
}

/// Unchecked wire form of a [`Lexicon`].
#[derive(Deserialize)]
struct LexiconParts {
    nodes: Vec<LexiconNode>,
    word_count: usize,
}

impl TryFrom<LexiconParts> for Lexicon {
    type Error = String;

    fn try_from(parts: LexiconParts) -> std::result::Result<Self, Self::Error> {
        Self::from_parts(parts.nodes, parts.word_count)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::empty()
    }
}

impl Lexicon {
    /// A lexicon that contains no words. Solving against it finds nothing.
    pub fn empty() -> Self {
        Self { nodes: vec![LexiconNode::new()], word_count: 0 }
    }

    /// Reassembles a lexicon from raw nodes, checking that the root exists,
    /// every child id points inside the arena, and `word_count` matches the
    /// number of terminal nodes.
    fn from_parts(
        nodes: Vec<LexiconNode>,
        word_count: usize,
    ) -> std::result::Result<Self, String> {
        if nodes.is_empty() {
            return Err("lexicon has no root node".to_string());
        }
        let len = nodes.len();
        for (idx, node) in nodes.iter().enumerate() {
            if let Some(&child) = node.children.iter().flatten().find(|&&c| c as usize >= len) {
                return Err(format!(
                    "node {} points at child {} but only {} nodes exist",
                    idx, child, len
                ));
            }
        }
        let terminals = nodes.iter().filter(|n| n.terminal).count();
        if terminals != word_count {
            return Err(format!(
                "word count {} does not match {} terminal nodes",
                word_count, terminals
            ));
        }
        Ok(Self { nodes, word_count })
    }

    /// Builds a lexicon from a flat word list.
    ///
    /// Entries that are empty or contain anything other than `a..=z` are
    /// skipped. Duplicates are harmless. Fails only when no entry survives.
    pub fn build<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lexicon = Self::empty();
        let mut skipped = 0usize;
        for word in words {
            if !lexicon.insert(word.as_ref()) {
                skipped += 1;
            }
        }
        debug!(
            words = lexicon.word_count,
            nodes = lexicon.nodes.len(),
            skipped,
            "lexicon built"
        );
        if lexicon.word_count == 0 {
            return Err(BoggleError::EmptyLexicon);
        }
        Ok(lexicon)
    }

    /// Inserts one word, returning false if it was malformed.
    /// O(k) complexity where k is word length.
    fn insert(&mut self, word: &str) -> bool {
        // Validate up front so a rejected word never leaves dangling prefix nodes.
        if word.is_empty() || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return false;
        }
        let mut node_idx = ROOT as usize;
        for byte in word.bytes() {
            let s = (byte - b'a') as usize;
            let next_idx = match self.nodes[node_idx].children[s] {
                Some(id) => id as usize,
                None => {
                    let new_node_id = self.nodes.len();
                    self.nodes.push(LexiconNode::new());
                    self.nodes[node_idx].children[s] = Some(new_node_id as NodeId);
                    new_node_id
                }
            };
            node_idx = next_idx;
        }
        let node = &mut self.nodes[node_idx];
        if !node.terminal {
            node.terminal = true;
            self.word_count += 1;
        }
        true
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Follows one edge. `None` proves no word extends the current prefix.
    #[inline]
    pub fn step(&self, node: NodeId, letter: u8) -> Option<NodeId> {
        self.nodes[node as usize].children[slot(letter)?]
    }

    #[inline]
    pub fn is_terminal(&self, node: NodeId) -> bool {
        self.nodes[node as usize].terminal
    }

    fn walk(&self, s: &str) -> Option<NodeId> {
        s.bytes().try_fold(ROOT, |node, b| self.step(node, b))
    }

    /// True if `s` is empty or some word starts with `s`.
    pub fn contains_prefix(&self, s: &str) -> bool {
        self.walk(s).is_some()
    }

    /// True if `s` is exactly one of the words.
    pub fn contains_word(&self, s: &str) -> bool {
        self.walk(s).is_some_and(|node| self.is_terminal(node))
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl std::fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexicon")
            .field("words", &self.word_count)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_and_word_queries() {
        let lex = Lexicon::build(["cat", "cats", "act"]).unwrap();
        assert!(lex.contains_prefix(""));
        assert!(lex.contains_prefix("c"));
        assert!(lex.contains_prefix("ca"));
        assert!(lex.contains_prefix("cats"));
        assert!(!lex.contains_prefix("catsx"));
        assert!(!lex.contains_prefix("b"));

        assert!(lex.contains_word("cat"));
        assert!(lex.contains_word("cats"));
        assert!(lex.contains_word("act"));
        assert!(!lex.contains_word("ca"));
        assert!(!lex.contains_word(""));
    }

    #[test]
    fn malformed_words_are_skipped() {
        let lex = Lexicon::build(["dog", "", "Dog", "d-g", "dóg", "do g"]).unwrap();
        assert_eq!(lex.len(), 1);
        assert!(lex.contains_word("dog"));
        // A rejected entry must not leave its prefix behind.
        assert!(!lex.contains_prefix("d-"));
        assert!(!lex.contains_prefix("D"));
    }

    #[test]
    fn rejected_word_leaves_no_prefix_nodes() {
        let lex = Lexicon::build(["zebra", "qu!z"]).unwrap();
        assert!(!lex.contains_prefix("q"));
        assert_eq!(lex.node_count(), 1 + "zebra".len());
    }

    #[test]
    fn duplicates_are_harmless() {
        let lex = Lexicon::build(["eee", "eee", "eee"]).unwrap();
        assert_eq!(lex.len(), 1);
        assert_eq!(lex.node_count(), 4);
    }

    #[test]
    fn empty_input_is_an_error() {
        let words: [&str; 0] = [];
        assert!(matches!(Lexicon::build(words), Err(BoggleError::EmptyLexicon)));
        assert!(matches!(Lexicon::build(["", "123"]), Err(BoggleError::EmptyLexicon)));
    }

    #[test]
    fn empty_lexicon_answers_queries() {
        let lex = Lexicon::empty();
        assert!(lex.is_empty());
        assert!(lex.contains_prefix(""));
        assert!(!lex.contains_prefix("a"));
        assert!(!lex.contains_word("a"));
    }

    #[test]
    fn decoding_rejects_missing_root() {
        let bytes = bincode::serialize(&(0u64, 1u64)).unwrap();
        assert!(bincode::deserialize::<Lexicon>(&bytes).is_err());
    }

    #[test]
    fn decoding_rejects_dangling_child() {
        let mut root = LexiconNode::new();
        root.children[0] = Some(5);
        let parts = (vec![root, LexiconNode::new()], 0usize);
        let bytes = bincode::serialize(&parts).unwrap();
        assert!(bincode::deserialize::<Lexicon>(&bytes).is_err());
    }

    #[test]
    fn decoding_rejects_wrong_word_count() {
        let lex = Lexicon::build(["ab", "abc"]).unwrap();
        let bytes = bincode::serialize(&(&lex.nodes, 7usize)).unwrap();
        assert!(bincode::deserialize::<Lexicon>(&bytes).is_err());
    }

    #[test]
    fn decoding_accepts_built_lexicon() {
        let lex = Lexicon::build(["ab", "abc", "b"]).unwrap();
        let bytes = bincode::serialize(&lex).unwrap();
        let decoded: Lexicon = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded.len(), 3);
        assert!(decoded.contains_word("abc"));
        assert!(!decoded.contains_word("a"));
    }

    #[test]
    fn step_walks_edges() {
        let lex = Lexicon::build(["test", "tester"]).unwrap();
        let n = lex.step(lex.root(), b't').unwrap();
        let n = lex.step(n, b'e').unwrap();
        let n = lex.step(n, b's').unwrap();
        assert!(!lex.is_terminal(n));
        let n = lex.step(n, b't').unwrap();
        assert!(lex.is_terminal(n));
        assert_eq!(lex.step(n, b'x'), None);
        assert_eq!(lex.step(n, b'E'), None);
    }
}
