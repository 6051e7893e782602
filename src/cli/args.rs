// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// msadist - Pairwise distance matrices and conservation profiles for protein alignments
pub struct Args {
    /// aligned FASTA file to compute distances for
    #[argh(option)]
    pub alignment: Option<String>,

    /// folder of *.afa alignments for batch conservation analysis (repeatable)
    #[argh(option)]
    pub conservation_dir: Vec<String>,

    /// results directory for batch conservation reports (default: results)
    #[argh(option, default = "String::from(\"results\")")]
    pub results: String,

    /// output distance matrix file
    #[argh(option)]
    pub output: Option<String>,

    /// output format: tsv, csv, phylip, nexus, json (default: tsv)
    #[argh(option, default = "String::from(\"tsv\")")]
    pub format: String,

    /// distance function: p-distance, poisson, kimura, identity (default: p-distance)
    #[argh(option, default = "String::from(\"p-distance\")")]
    pub metric: String,

    /// gap handling: include, pairwise, complete (default: pairwise)
    #[argh(option, default = "String::from(\"pairwise\")")]
    pub gap_policy: String,

    /// minimum number of comparable columns for a defined distance (default: 1)
    #[argh(option, default = "1")]
    pub min_sites: usize,

    /// compute every pair even when sequences are identical
    #[argh(switch)]
    pub no_collapse: bool,

    /// write similarity (1 - distance) instead of distance
    #[argh(switch)]
    pub similarity: bool,

    /// write cluster assignments to file (TSV: Sequence, Cluster)
    #[argh(option)]
    pub clusters: Option<String>,

    /// cluster linkage: single, complete, average (default: average)
    #[argh(option, default = "String::from(\"average\")")]
    pub linkage: String,

    /// merge clusters while the closest pair is at most this distance
    #[argh(option)]
    pub cluster_threshold: Option<f64>,

    /// merge clusters until this many remain
    #[argh(option)]
    pub cluster_count: Option<usize>,

    /// write the conservation profile of --alignment to file (TSV)
    #[argh(option)]
    pub conservation: Option<String>,

    /// comma separated 1-based key residue positions (default: 285,417,447)
    #[argh(option)]
    pub key_residues: Option<String>,

    /// conservation score above which a position is highly conserved (default: 0.95)
    #[argh(option, default = "0.95")]
    pub conserved_threshold: f64,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// include only sequences whose id matches regex pattern
    #[argh(option)]
    pub include_ids: Option<String>,

    /// exclude sequences whose id matches regex pattern
    #[argh(option)]
    pub exclude_ids: Option<String>,

    /// include only sequences listed in a file (one id per line)
    #[argh(option)]
    pub include_ids_list: Option<String>,

    /// exclude sequences listed in a file (one id per line)
    #[argh(option)]
    pub exclude_ids_list: Option<String>,

    /// show alignment and matrix statistics only, without writing the matrix
    #[argh(switch)]
    pub stats_only: bool,

    /// validate inputs without computation (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// hide progress bars
    #[argh(switch)]
    pub quiet: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

impl Args {
    /// Arguments as they were before any option was given
    pub fn defaults() -> Self {
        Self {
            alignment: None,
            conservation_dir: Vec::new(),
            results: String::from("results"),
            output: None,
            format: String::from("tsv"),
            metric: String::from("p-distance"),
            gap_policy: String::from("pairwise"),
            min_sites: 1,
            no_collapse: false,
            similarity: false,
            clusters: None,
            linkage: String::from("average"),
            cluster_threshold: None,
            cluster_count: None,
            conservation: None,
            key_residues: None,
            conserved_threshold: 0.95,
            threads: None,
            include_ids: None,
            exclude_ids: None,
            include_ids_list: None,
            exclude_ids_list: None,
            stats_only: false,
            dry_run: false,
            quiet: false,
            config: None,
            generate_config: false,
        }
    }
}
