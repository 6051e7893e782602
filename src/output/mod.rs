// mod.rs - Output formatters module

pub mod reports;

use std::fs::{File, create_dir_all};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use serde::Serialize;
use crate::core::DistanceMatrix;

pub use reports::{
    write_clusters, write_combined_summary, write_conservation_profile, write_conserved_report,
};

/// Supported matrix output formats
pub const MATRIX_FORMATS: &[&str] = &["tsv", "csv", "phylip", "nexus", "json"];

/// Ensure parent directory exists before creating file
pub(crate) fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        create_dir_all(parent)
            .map_err(|e| format!("Failed to create parent directory '{}': {}", parent.display(), e))?;
    }
    Ok(())
}

pub(crate) fn create_output(file_path: &str) -> Result<BufWriter<File>, String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    Ok(BufWriter::new(file))
}

fn generated_at() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Cell value as written, optionally rendered as similarity (1 - d)
fn cell(matrix: &DistanceMatrix, i: usize, j: usize, similarity: bool) -> Option<f64> {
    matrix.get(i, j).map(|d| if similarity { 1.0 - d } else { d })
}

fn format_value(value: Option<f64>, missing: &str) -> String {
    match value {
        Some(v) => format!("{:.6}", v),
        None => missing.to_string(),
    }
}

fn write_comment_header<W: Write>(
    writer: &mut W,
    matrix: &DistanceMatrix,
    similarity: bool,
    command_line: &str,
) -> io::Result<()> {
    writeln!(writer, "# Command: {}", command_line)?;
    writeln!(writer, "# Generated: {}", generated_at())?;
    writeln!(writer, "# msadist v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        writer,
        "# Metric: {} ({}), gaps: {}",
        matrix.metric,
        if similarity { "similarity" } else { "distance" },
        matrix.gap_policy
    )
}

/// Render a square delimited matrix with a comment header
pub fn render_delimited<W: Write>(
    writer: &mut W,
    matrix: &DistanceMatrix,
    delimiter: u8,
    similarity: bool,
    command_line: &str,
) -> io::Result<()> {
    write_comment_header(writer, matrix, similarity, command_line)?;

    let mut table = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(&mut *writer);

    let mut header = vec![String::from("Sequence")];
    header.extend(matrix.ids().iter().cloned());
    table.write_record(&header)?;

    for (i, id) in matrix.ids().iter().enumerate() {
        let mut record = Vec::with_capacity(matrix.n() + 1);
        record.push(id.clone());
        for j in 0..matrix.n() {
            record.push(format_value(cell(matrix, i, j, similarity), "NA"));
        }
        table.write_record(&record)?;
    }
    table.flush()
}

/// Render a lower-triangle PHYLIP matrix; run info trails the matrix
pub fn render_phylip<W: Write>(
    writer: &mut W,
    matrix: &DistanceMatrix,
    similarity: bool,
    command_line: &str,
) -> io::Result<()> {
    writeln!(writer, "    {}", matrix.n())?;

    for (i, id) in matrix.ids().iter().enumerate() {
        write!(writer, "{:<10}", id)?;
        for j in 0..=i {
            write!(writer, "  {}", format_value(cell(matrix, i, j, similarity), "NA"))?;
        }
        writeln!(writer)?;
    }

    // Trailing content is ignored by most PHYLIP parsers
    writeln!(writer)?;
    write_comment_header(writer, matrix, similarity, command_line)
}

/// Render a NEXUS DISTANCES block (lower triangle, `?` for undefined pairs)
pub fn render_nexus<W: Write>(
    writer: &mut W,
    matrix: &DistanceMatrix,
    similarity: bool,
    command_line: &str,
) -> io::Result<()> {
    writeln!(writer, "#NEXUS")?;
    writeln!(writer, "[Command: {}]", command_line)?;
    writeln!(writer, "[Generated: {}]", generated_at())?;
    writeln!(writer, "[msadist v{}]", env!("CARGO_PKG_VERSION"))?;
    writeln!(writer, "[Metric: {}, gaps: {}]", matrix.metric, matrix.gap_policy)?;
    writeln!(writer, "BEGIN DISTANCES;")?;
    writeln!(writer, "    DIMENSIONS NTAX={};", matrix.n())?;
    writeln!(writer, "    FORMAT LABELS LOWER DIAGONAL MISSING=?;")?;
    writeln!(writer, "    MATRIX")?;

    for (i, id) in matrix.ids().iter().enumerate() {
        write!(writer, "        {}", id)?;
        for j in 0..=i {
            write!(writer, " {}", format_value(cell(matrix, i, j, similarity), "?"))?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "    ;")?;
    writeln!(writer, "END;")
}

#[derive(Serialize)]
struct JsonMatrix<'a> {
    version: &'a str,
    command: &'a str,
    generated: String,
    metric: &'a str,
    gap_policy: &'a str,
    similarity: bool,
    ids: &'a [String],
    matrix: Vec<Vec<Option<f64>>>,
}

/// Render the matrix as a JSON document; undefined pairs are `null`
pub fn render_json<W: Write>(
    writer: &mut W,
    matrix: &DistanceMatrix,
    similarity: bool,
    command_line: &str,
) -> io::Result<()> {
    let rows = (0..matrix.n())
        .map(|i| (0..matrix.n()).map(|j| cell(matrix, i, j, similarity)).collect())
        .collect();
    let doc = JsonMatrix {
        version: env!("CARGO_PKG_VERSION"),
        command: command_line,
        generated: generated_at(),
        metric: &matrix.metric,
        gap_policy: &matrix.gap_policy,
        similarity,
        ids: matrix.ids(),
        matrix: rows,
    };
    serde_json::to_writer_pretty(&mut *writer, &doc)?;
    writeln!(writer)
}

/// Write distance matrix in the specified format
pub fn write_matrix(
    file_path: &str,
    format: &str,
    matrix: &DistanceMatrix,
    similarity: bool,
    command_line: &str,
) -> Result<(), String> {
    let format = format.to_lowercase();
    if !MATRIX_FORMATS.contains(&format.as_str()) {
        return Err(format!(
            "Unsupported output format: {}. Use: {}",
            format,
            MATRIX_FORMATS.join(", ")
        ));
    }

    let mut writer = create_output(file_path)?;
    let written = match format.as_str() {
        "tsv" => render_delimited(&mut writer, matrix, b'\t', similarity, command_line),
        "csv" => render_delimited(&mut writer, matrix, b',', similarity, command_line),
        "phylip" => render_phylip(&mut writer, matrix, similarity, command_line),
        "nexus" => render_nexus(&mut writer, matrix, similarity, command_line),
        _ => render_json(&mut writer, matrix, similarity, command_line),
    };
    written.map_err(|e| format!("Write error: {}", e))?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;

    println!("✅ Distance matrix written to: {} ({} format)", file_path, format.to_uppercase());
    Ok(())
}
