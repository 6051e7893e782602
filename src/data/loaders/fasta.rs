// fasta.rs - Aligned FASTA loader

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use bio::io::fasta;
use crate::data::sequence::{Alignment, Sequence};

/// File extensions accepted as alignment files
pub const ALIGNMENT_EXTENSIONS: &[&str] = &["afa", "fasta", "fa", "fas", "aln"];

impl Alignment {
    /// Load an aligned FASTA file
    pub fn from_fasta_file(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open alignment file {}: {}", path.display(), e))?;
        Self::from_fasta_reader(BufReader::new(file))
            .map_err(|e| format!("{}: {}", path.display(), e))
    }

    /// Load aligned FASTA records from any reader.
    ///
    /// Sequence ids must be unique. Width is not checked here, see
    /// [`Alignment::check_shape`].
    pub fn from_fasta_reader<R: Read>(reader: R) -> Result<Self, String> {
        let reader = fasta::Reader::new(reader);
        let mut sequences = Vec::new();
        let mut seen = HashSet::new();

        for record_result in reader.records() {
            let record = record_result.map_err(|e| format!("Invalid FASTA record: {}", e))?;
            let id = record.id().to_string();
            if id.is_empty() {
                return Err(format!("FASTA record {} has an empty identifier", sequences.len() + 1));
            }
            if !seen.insert(id.clone()) {
                return Err(format!("Duplicate sequence id '{}'", id));
            }
            let seq = Sequence::new(id, record.seq())
                .with_description(record.desc().map(|d| d.to_string()));
            sequences.push(seq);
        }

        Ok(Self::new(sequences))
    }
}

/// List alignment files in a directory, sorted by file name.
///
/// With `extensions` empty every entry in [`ALIGNMENT_EXTENSIONS`] is accepted.
pub fn list_alignment_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, String> {
    let accepted = if extensions.is_empty() { ALIGNMENT_EXTENSIONS } else { extensions };

    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| accepted.iter().any(|a| a.eq_ignore_ascii_case(ext)))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiline_records() {
        let input = b">seq1 falcipain-2\nACDE\nFG-H\n>seq2\nacdefg.h\n";
        let aln = Alignment::from_fasta_reader(&input[..]).unwrap();

        assert_eq!(aln.len(), 2);
        assert_eq!(aln.sequences[0].id, "seq1");
        assert_eq!(aln.sequences[0].description.as_deref(), Some("falcipain-2"));
        assert_eq!(aln.sequences[0].residues, b"ACDEFG-H".to_vec());
        assert_eq!(aln.sequences[1].residues, b"ACDEFG.H".to_vec());
        assert_eq!(aln.check_shape(), Ok(8));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let input = b">a\nACDE\n>a\nACDE\n";
        let err = Alignment::from_fasta_reader(&input[..]).unwrap_err();
        assert!(err.contains("Duplicate sequence id 'a'"));
    }

    #[test]
    fn test_empty_input_gives_empty_alignment() {
        let aln = Alignment::from_fasta_reader(&b""[..]).unwrap();
        assert!(aln.is_empty());
    }
}
