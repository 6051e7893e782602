// check_alignment.rs - Alignment sanity check, optionally against a written matrix

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use msadist::data::Alignment;

fn load_matrix_ids(file_path: &str) -> Result<HashSet<String>, Box<dyn std::error::Error>> {
    println!("📋 Loading sequence ids from {}...", file_path);

    let file = File::open(file_path)?;
    let reader = BufReader::new(file);

    // First non-comment line is the header
    for line in reader.lines() {
        let line = line?;
        if !line.starts_with('#') {
            let ids: HashSet<String> = line
                .split(['\t', ','])
                .skip(1) // Skip the "Sequence" column
                .map(|s| s.to_string())
                .collect();
            println!("✅ Found {} sequences in matrix", ids.len());
            return Ok(ids);
        }
    }

    Err("No header found in matrix file".into())
}

/// Alignment ids absent from the matrix header, sorted
fn missing_ids<'a>(alignment: &'a Alignment, matrix_ids: &HashSet<String>) -> Vec<&'a str> {
    let mut missing: Vec<&str> = alignment
        .sequences
        .iter()
        .map(|s| s.id.as_str())
        .filter(|id| !matrix_ids.contains(*id))
        .collect();
    missing.sort();
    missing
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <alignment.afa> [matrix.tsv]", args[0]);
        std::process::exit(1);
    }

    let alignment = Alignment::from_fasta_file(Path::new(&args[1]))?;
    println!("🔍 Checking {} ({} sequences)", args[1], alignment.len());

    // Bucket sequences by width
    let mut widths: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    for seq in &alignment.sequences {
        widths.entry(seq.len()).or_default().push(&seq.id);
    }

    println!("\n=== ALIGNMENT WIDTHS ===");
    for (width, ids) in &widths {
        println!("📏 {} columns: {} sequences", width, ids.len());
    }

    let gapped = alignment.gapped_columns().iter().filter(|&&g| g).count();
    println!("🕳️  Columns with gaps: {} of {}", gapped, alignment.width());
    println!("🧬 Distinct sequences: {}", alignment.identical_groups().len());

    let mut ok = true;
    if let Err(e) = alignment.check_shape() {
        println!("\n❌ {}", e);
        if let Some((_, ids)) = widths.iter().min_by_key(|(_, ids)| ids.len()) {
            println!("   Sequences with the least common width:");
            for id in ids.iter().take(20) {
                println!("   - {}", id);
            }
        }
        ok = false;
    }

    if let Some(matrix_file) = args.get(2) {
        let matrix_ids = load_matrix_ids(matrix_file)?;
        let missing = missing_ids(&alignment, &matrix_ids);

        println!("\n=== MATRIX COVERAGE ===");
        println!("✅ Common sequences: {}", alignment.len() - missing.len());
        println!("❌ Missing from matrix: {}", missing.len());
        for (i, id) in missing.iter().take(20).enumerate() {
            println!("  {}: {}", i + 1, id);
        }
        if missing.len() > 20 {
            println!("  ... and {} more", missing.len() - 20);
        }
        if !missing.is_empty() {
            println!("⚠️  The matrix might have been generated with different id filtering");
            ok = false;
        }
    }

    if !ok {
        std::process::exit(1);
    }
    println!("\n✅ Alignment is consistent");
    Ok(())
}
