// batch.rs - Conservation analysis over folders of alignments

use std::path::{Path, PathBuf};
use crate::core::conservation::{conservation_scores, highly_conserved, key_residues};
use crate::data::{list_alignment_files, Alignment};
use crate::output::{write_combined_summary, write_conservation_profile, write_conserved_report};

/// Extension picked up in batch mode
pub const BATCH_EXTENSIONS: &[&str] = &["afa"];

/// Name of the cross-folder summary written under `results_dir`
pub const COMBINED_SUMMARY: &str = "combined_analysis.tsv";

/// Settings for a batch run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub results_dir: PathBuf,
    pub key_positions: Vec<usize>,
    pub threshold: f64,
}

/// Conservation summary for one alignment file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// Name of the folder the file came from
    pub version: String,
    pub file_name: String,
    pub sequences: usize,
    pub width: usize,
    pub key_residues: Vec<(usize, f64)>,
    pub highly_conserved: Vec<(usize, f64)>,
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| String::from("alignment"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Analyse one alignment and write its profile and conserved report
/// into `output_dir`
pub fn analyze_alignment_file(
    path: &Path,
    version: &str,
    output_dir: &Path,
    config: &BatchConfig,
) -> Result<FileReport, String> {
    let alignment = Alignment::from_fasta_file(path)?;
    let profile = conservation_scores(&alignment)
        .map_err(|e| format!("{}: {}", path.display(), e))?;

    let conserved = highly_conserved(&profile, config.threshold);
    let stem = file_stem(path);
    let name = file_name(path);

    let profile_path = output_dir.join(format!("{}_conservation.tsv", stem));
    write_conservation_profile(&profile_path.to_string_lossy(), &profile)?;

    let report_path = output_dir.join(format!("{}_conserved.txt", stem));
    write_conserved_report(&report_path.to_string_lossy(), &name, config.threshold, &conserved)?;
    println!("   Analysis complete. Results saved to {}", report_path.display());

    Ok(FileReport {
        version: version.to_string(),
        file_name: name,
        sequences: alignment.len(),
        width: profile.len(),
        key_residues: key_residues(&profile, &config.key_positions),
        highly_conserved: conserved,
    })
}

/// Analyse every `*.afa` file in `folder`, sorted by name.
///
/// Files that fail are reported and skipped; only an unreadable folder is
/// an error.
pub fn process_folder(folder: &Path, config: &BatchConfig) -> Result<Vec<FileReport>, String> {
    let version = file_name(folder);
    let output_dir = config.results_dir.join(&version);
    std::fs::create_dir_all(&output_dir)
        .map_err(|e| format!("Failed to create results directory '{}': {}", output_dir.display(), e))?;

    let files = list_alignment_files(folder, BATCH_EXTENSIONS)?;
    println!("\n📂 Processing {}: Found {} MSA files", version, files.len());

    let mut reports = Vec::new();
    for path in &files {
        println!("🔬 Analyzing {}...", file_name(path));
        match analyze_alignment_file(path, &version, &output_dir, config) {
            Ok(report) => {
                println!(
                    "   {} sequences, width {}, {} highly conserved positions",
                    report.sequences,
                    report.width,
                    report.highly_conserved.len()
                );
                reports.push(report);
            }
            Err(e) => eprintln!("⚠️  Error analyzing {}: {}", path.display(), e),
        }
    }

    Ok(reports)
}

/// Write `combined_analysis.tsv` for a finished batch run.
///
/// Returns the written path, or `None` when no file was analysed.
pub fn write_batch_summary(config: &BatchConfig, reports: &[FileReport]) -> Result<Option<PathBuf>, String> {
    if reports.is_empty() {
        return Ok(None);
    }
    let summary_path = config.results_dir.join(COMBINED_SUMMARY);
    write_combined_summary(&summary_path.to_string_lossy(), reports)?;
    Ok(Some(summary_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("msadist_batch_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_process_folder_skips_bad_files() {
        let root = scratch("folder");
        let folder = root.join("v1");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("b_good.afa"), ">x\nACDE\n>y\nACDF\n").unwrap();
        fs::write(folder.join("a_ragged.afa"), ">x\nACDE\n>y\nAC\n").unwrap();
        fs::write(folder.join("notes.txt"), "ignored").unwrap();

        let config = BatchConfig {
            results_dir: root.join("results"),
            key_positions: vec![1, 4, 285],
            threshold: 0.95,
        };
        let reports = process_folder(&folder, &config).unwrap();

        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.version, "v1");
        assert_eq!(report.file_name, "b_good.afa");
        assert_eq!(report.key_residues, vec![(1, 1.0), (4, 0.5)]);
        assert_eq!(report.highly_conserved, vec![(1, 1.0), (2, 1.0), (3, 1.0)]);

        let text = fs::read_to_string(root.join("results/v1/b_good_conserved.txt")).unwrap();
        assert!(text.starts_with("Highly conserved residues (score > 0.95) in b_good.afa:\n"));
        assert!(root.join("results/v1/b_good_conservation.tsv").exists());
        assert!(!root.join("results/v1/a_ragged_conserved.txt").exists());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_summary_needs_reports() {
        let root = scratch("summary");
        let config = BatchConfig {
            results_dir: root.join("results"),
            key_positions: vec![1],
            threshold: 0.95,
        };
        assert_eq!(write_batch_summary(&config, &[]), Ok(None));
        assert!(!root.join("results").join(COMBINED_SUMMARY).exists());

        let report = FileReport {
            version: "v1".to_string(),
            file_name: "FP2.afa".to_string(),
            sequences: 2,
            width: 4,
            key_residues: vec![(1, 1.0)],
            highly_conserved: vec![(1, 1.0)],
        };
        let written = write_batch_summary(&config, &[report]).unwrap().unwrap();
        assert_eq!(written, root.join("results").join(COMBINED_SUMMARY));
        let text = fs::read_to_string(&written).unwrap();
        assert!(text.starts_with("Version\tMSA_file\tKey_Residues\tHighly_Conserved\n"));
        assert!(text.contains("v1\tFP2.afa\t"));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_missing_folder_is_an_error() {
        let root = scratch("missing");
        let config = BatchConfig {
            results_dir: root.join("results"),
            key_positions: Vec::new(),
            threshold: 0.95,
        };
        assert!(process_folder(&root.join("nope"), &config).is_err());
        let _ = fs::remove_dir_all(&root);
    }
}
