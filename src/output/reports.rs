// reports.rs - Cluster and conservation writers

use std::io::{self, Write};
use crate::core::{ClusterAssignment, FileReport};
use super::create_output;

/// Render `Sequence\tCluster` rows
pub fn render_clusters<W: Write>(writer: &mut W, assignment: &ClusterAssignment) -> io::Result<()> {
    writeln!(writer, "Sequence\tCluster")?;
    for (id, label) in &assignment.labels {
        writeln!(writer, "{}\t{}", id, label)?;
    }
    Ok(())
}

pub fn write_clusters(file_path: &str, assignment: &ClusterAssignment) -> Result<(), String> {
    let mut writer = create_output(file_path)?;
    render_clusters(&mut writer, assignment).map_err(|e| format!("Write error: {}", e))?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!(
        "✅ {} clusters written to: {}",
        assignment.n_clusters, file_path
    );
    Ok(())
}

/// Render the full profile, one 1-based position per row
pub fn render_conservation_profile<W: Write>(writer: &mut W, profile: &[f64]) -> io::Result<()> {
    writeln!(writer, "Position\tConservation Score")?;
    for (i, score) in profile.iter().enumerate() {
        writeln!(writer, "{}\t{:.3}", i + 1, score)?;
    }
    Ok(())
}

pub fn write_conservation_profile(file_path: &str, profile: &[f64]) -> Result<(), String> {
    let mut writer = create_output(file_path)?;
    render_conservation_profile(&mut writer, profile).map_err(|e| format!("Write error: {}", e))?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))
}

/// Render the highly conserved positions of one alignment file
pub fn render_conserved_report<W: Write>(
    writer: &mut W,
    file_name: &str,
    threshold: f64,
    conserved: &[(usize, f64)],
) -> io::Result<()> {
    writeln!(
        writer,
        "Highly conserved residues (score > {}) in {}:",
        threshold, file_name
    )?;
    writeln!(writer, "Position\tConservation Score")?;
    for (pos, score) in conserved {
        writeln!(writer, "{}\t{:.3}", pos, score)?;
    }
    Ok(())
}

pub fn write_conserved_report(
    file_path: &str,
    file_name: &str,
    threshold: f64,
    conserved: &[(usize, f64)],
) -> Result<(), String> {
    let mut writer = create_output(file_path)?;
    render_conserved_report(&mut writer, file_name, threshold, conserved)
        .map_err(|e| format!("Write error: {}", e))?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))
}

fn join_scores(scores: &[(usize, f64)]) -> String {
    scores
        .iter()
        .map(|(pos, score)| format!("{}:{:.3}", pos, score))
        .collect::<Vec<_>>()
        .join(";")
}

/// Render one summary row per analysed file
pub fn render_combined_summary<W: Write>(writer: W, reports: &[FileReport]) -> Result<(), csv::Error> {
    let mut table = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    table.write_record(["Version", "MSA_file", "Key_Residues", "Highly_Conserved"])?;
    for report in reports {
        table.write_record([
            report.version.as_str(),
            report.file_name.as_str(),
            join_scores(&report.key_residues).as_str(),
            join_scores(&report.highly_conserved).as_str(),
        ])?;
    }
    table.flush()?;
    Ok(())
}

pub fn write_combined_summary(file_path: &str, reports: &[FileReport]) -> Result<(), String> {
    let writer = create_output(file_path)?;
    render_combined_summary(writer, reports)
        .map_err(|e| format!("Failed to write summary '{}': {}", file_path, e))?;
    println!("📊 Combined analysis written to: {}", file_path);
    Ok(())
}
