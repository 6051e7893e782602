// main.rs - CLI entry point

use std::path::{Path, PathBuf};
use std::time::Instant;
use msadist::cli::Config;
use msadist::core::{
    cluster, conservation_scores, highly_conserved, key_residues, mean_conservation,
    process_folder, write_batch_summary, BatchConfig, DistanceMatrix,
};
use msadist::output::{write_clusters, write_conservation_profile};
use msadist::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    // Validate all arguments
    let validation = validate_args(&args)?;

    println!("🧬 msadist v{}", env!("CARGO_PKG_VERSION"));

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let total_start = Instant::now();

    if let Some(alignment_path) = &args.alignment {
        run_alignment(Path::new(alignment_path), &args, &validation, &command_line)?;
    }

    if !args.conservation_dir.is_empty() && !args.dry_run {
        run_batch(&args, &validation)?;
    }

    println!(
        "\n🏁 Total time: {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn run_alignment(
    path: &Path,
    args: &Args,
    validation: &ValidationResult,
    command_line: &str,
) -> Result<(), String> {
    println!("📥 Loading alignment: {}", path.display());
    let mut alignment = Alignment::from_fasta_file(path)?;
    println!("✅ Loaded {} sequences", alignment.len());

    alignment.apply_id_filter(&validation.id_filter);
    let width = alignment.check_shape().map_err(|e| e.to_string())?;

    println!(
        "🎯 Metric: {} ({}), gaps: {}",
        validation.metric.name(),
        validation.metric.description(),
        validation.gap_policy.description()
    );
    if args.min_sites > 1 {
        println!("📏 Minimum comparable sites: {}", args.min_sites);
    }

    if args.dry_run {
        let groups = alignment.identical_groups();
        println!("✅ Dry run completed successfully");
        println!(
            "📊 Alignment: {} sequences × {} columns ({} distinct)",
            alignment.len(),
            width,
            groups.len()
        );
        return Ok(());
    }

    let config = DistanceConfig {
        gap_policy: validation.gap_policy,
        min_sites: args.min_sites,
        collapse_identical: !args.no_collapse,
        verbose: !args.quiet,
    };
    let computer = PairwiseDistanceComputer::new(validation.metric.clone(), config);
    let matrix = computer.compute(&alignment).map_err(|e| e.to_string())?;

    if args.stats_only || (args.output.is_none() && args.clusters.is_none() && args.conservation.is_none()) {
        print_matrix_stats(&alignment, &matrix);
        if args.stats_only {
            println!("\n✅ Statistics analysis completed");
            return Ok(());
        }
    }

    if let Some(output) = &args.output {
        write_matrix(output, &args.format, &matrix, args.similarity, command_line)?;
    }

    if let Some(cut) = validation.cluster_cut {
        let assignment = cluster(&matrix, validation.linkage, cut).map_err(|e| e.to_string())?;
        println!(
            "🌳 {} linkage: {} clusters (largest: {})",
            validation.linkage.as_str(),
            assignment.n_clusters,
            assignment.sizes().iter().max().copied().unwrap_or(0)
        );
        if let Some(path) = &args.clusters {
            write_clusters(path, &assignment)?;
        }
    }

    if let Some(path) = &args.conservation {
        let profile = conservation_scores(&alignment).map_err(|e| e.to_string())?;
        write_conservation_profile(path, &profile)?;
        println!("✅ Conservation profile written to: {}", path);
        let conserved = highly_conserved(&profile, args.conserved_threshold);
        println!(
            "   {} positions with score > {} (mean {:.3})",
            conserved.len(),
            args.conserved_threshold,
            mean_conservation(&profile).unwrap_or(0.0)
        );
        for (pos, score) in key_residues(&profile, &validation.key_positions) {
            println!("   🔑 Position {}: {:.3}", pos, score);
        }
    }

    Ok(())
}

fn print_matrix_stats(alignment: &Alignment, matrix: &DistanceMatrix) {
    println!("\n📈 === DISTANCE MATRIX STATISTICS ===");
    println!("  • Sequences: {}", matrix.n());
    println!("  • Distinct sequences: {}", alignment.identical_groups().len());
    println!("  • Metric: {} (gaps: {})", matrix.metric, matrix.gap_policy);
    match matrix.summary() {
        Some((min, mean, max)) => {
            println!("  • Distance min/mean/max: {:.4} / {:.4} / {:.4}", min, mean, max);
        }
        None => println!("  • No defined pairwise distances"),
    }
    // Sequence whose closest neighbour is farthest away
    let isolated = (0..matrix.n())
        .filter_map(|i| matrix.nearest(i).map(|(j, d)| (i, j, d)))
        .fold(None, |best: Option<(usize, usize, f64)>, cur| match best {
            Some((_, _, bd)) if bd >= cur.2 => best,
            _ => Some(cur),
        });
    if let Some((i, j, d)) = isolated {
        let ids = matrix.ids();
        println!("  • Most isolated: {} (nearest {} at {:.4})", ids[i], ids[j], d);
    }
    let undefined = matrix.undefined_pairs();
    if undefined > 0 {
        println!("  ⚠️  Undefined pairs (NA): {}", undefined);
    }
}

fn run_batch(args: &Args, validation: &ValidationResult) -> Result<(), String> {
    let config = BatchConfig {
        results_dir: PathBuf::from(&args.results),
        key_positions: validation.key_positions.clone(),
        threshold: args.conserved_threshold,
    };

    let mut all_reports = Vec::new();
    for dir in &args.conservation_dir {
        let folder = Path::new(dir);
        if !folder.is_dir() {
            eprintln!("⚠️  Skipping {}: not a directory", dir);
            continue;
        }
        all_reports.extend(process_folder(folder, &config)?);
    }

    match write_batch_summary(&config, &all_reports)? {
        Some(_) => println!("✅ Batch analysis complete: {} files analysed", all_reports.len()),
        None => eprintln!("⚠️  No alignment files were analysed; combined summary not written"),
    }
    Ok(())
}
