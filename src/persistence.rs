// File: src/persistence.rs
use crate::core::trie::Lexicon;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// SHA-256 over the word list a lexicon was built from.
pub type Fingerprint = [u8; 32];

/// A compiled lexicon together with the fingerprint of its source words.
#[derive(Serialize, Deserialize)]
pub struct LexiconSnapshot {
    pub fingerprint: Fingerprint,
    pub lexicon: Lexicon,
}

/// Hashes the tokens in order. Each token is length-prefixed so
/// `["ab", "c"]` and `["a", "bc"]` differ.
pub fn fingerprint<S: AsRef<str>>(words: &[S]) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update((words.len() as u64).to_le_bytes());
    for word in words {
        let bytes = word.as_ref().as_bytes();
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }
    hasher.finalize().into()
}

/// Writes a compiled lexicon snapshot. The file is written next to its
/// destination and renamed into place, so readers never see a partial file.
pub fn save_to_disk(lexicon: &Lexicon, fingerprint: &Fingerprint, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, &(fingerprint, lexicon))?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Reads a snapshot back. Structurally invalid lexicons fail to decode and
/// come back as `BoggleError::Snapshot`.
pub fn load_from_disk(path: &Path) -> Result<LexiconSnapshot> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: LexiconSnapshot = bincode::deserialize_from(reader)?;
    Ok(snapshot)
}
