use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use msadist::core::{cluster, conservation_scores, highly_conserved, process_folder, BatchConfig};
use msadist::metrics::{DistanceFunction, SiteComparison};
use msadist::output::write_combined_summary;
use msadist::prelude::*;

const FALCIPAINS: &str = "\
>FP2_3D7 falcipain-2
MDYNMDYAPHEVISQQGERFVDKYVDRKILKNKKSLLVIISLSVLSVVGFVLFYFTPNSRKSDLFKNSSVENNNDDYIINSLLKSPNGKKFIVSKIDEALSFYDSKKNDINKYNEGNNNNNADFKGLSLFKENTPSNNFIHNKDYFINFFDNKFLMNNAEHINQFYMFIKTNNKQYNSPNEMKERFQVFLQNAHKVNMHNNNKNSLYKKELNRFADLTYHEFKNKYLSLRSSKPLKNSKYLLDQMNYEEVIKKYRGEENFDHAAYDWRLHSGVTPVKDQKNCGSCWAFSSIGSVESQYAIRKNKLITLSEQELVDCSFKNYGCNGGLINNAFEDMIELGGICPDGDYPYVSDAPNLCNIDRCTEKYGIKNYLSVPDNKLKEALRFLGPISISVAVSDDFAFYKEGIFDGECGDQLNHAVMLVGFGMKEIVNPLTKKGEKHYYYIIKNSWGQQWGERGFINIETDESGLMRKCGLGTDAFIPLIE
>FP2_HB3
MDYNMDYAPHEVISQQGERFVDKYVDRKILKNKKSLLVIISLSVLSVVGFVLFYFTPNSRKSDLFKNSSVENNNDDYIINSLLKSPNGKKFIVSKIDEALSFYDSKKNDINKYNEGNNNNNADFKGLSLFKENTPSNNFIHNKDYFINFFDNKFLMNNAEHINQFYMFIKTNNKQYNSPNEMKERFQVFLQNAHKVNMHNNNKNSLYKKELNRFADLTYHEFKNKYLSLRSSKPLKNSKYLLDQMNYEEVIKKYRGEENFDHAAYDWRLHSGVTPVKDQKNCGSCWAFSSIGSVESQYAIRKNKLITLSEQELVDCSFKNYGCNGGLINNAFEDMIELGGICPDGDYPYVSDAPNLCNIDRCTEKYGIKNYLSVPDNKLKEALRFLGPISISVAVSDDFAFYKEGIFDGECGDQLNHAVMLVGFGMKEIVNPLTKKGEKHYYYIIKNSWGQQWGERGFINIETDESGLMRKCGLGTDAFIPLIE
";

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("msadist_it_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn small_alignment() -> Alignment {
    let fasta = b">a\nACDEFGHIKL\n>b\nACDEFGHIKM\n>c\nACD-FGHIKL\n>d\nWCDEFGHPKM\n>e\nACDEFGHIKL\n";
    Alignment::from_fasta_reader(&fasta[..]).unwrap()
}

#[test]
fn matrix_invariants_hold_for_every_metric() {
    let alignment = small_alignment();
    let registry = MetricRegistry::new();
    for name in registry.get_metric_names() {
        let metric = registry.get_metric(name).unwrap();
        for policy in [GapPolicy::Include, GapPolicy::Pairwise, GapPolicy::Complete] {
            let config = DistanceConfig { gap_policy: policy, ..Default::default() };
            let matrix = calculate_distance_matrix(&alignment, metric.clone(), config).unwrap();
            for i in 0..matrix.n() {
                assert_eq!(matrix.get(i, i), Some(0.0), "{} {:?}", name, policy);
                for j in 0..matrix.n() {
                    assert_eq!(matrix.get(i, j), matrix.get(j, i));
                    let d = matrix.get(i, j).unwrap();
                    assert!(d >= 0.0);
                    if metric.is_bounded() {
                        assert!(d <= 1.0);
                    }
                }
            }
            assert_eq!(matrix.get_by_id("a", "e"), Some(0.0));
        }
    }
}

#[test]
fn identical_isolates_have_zero_distance() {
    let alignment = Alignment::from_fasta_reader(FALCIPAINS.as_bytes()).unwrap();
    let matrix = PairwiseDistanceComputer::default().compute(&alignment).unwrap();
    assert_eq!(matrix.get_by_id("FP2_3D7", "FP2_HB3"), Some(0.0));

    let profile = conservation_scores(&alignment).unwrap();
    assert!(profile.iter().all(|&s| s == 1.0));
    assert_eq!(highly_conserved(&profile, 0.95).len(), alignment.width());
}

#[test]
fn custom_metric_plugs_into_the_computer() {
    #[derive(Debug)]
    struct MismatchCount;

    impl DistanceFunction for MismatchCount {
        fn evaluate(&self, sites: &SiteComparison) -> Option<f64> {
            Some(sites.mismatches as f64)
        }
        fn name(&self) -> &'static str {
            "mismatches"
        }
        fn description(&self) -> &'static str {
            "Raw mismatch count"
        }
        fn is_bounded(&self) -> bool {
            false
        }
    }

    let mut registry = MetricRegistry::new();
    registry.register_metric("mismatches", Arc::new(MismatchCount));
    let metric = registry.get_metric("mismatches").unwrap();
    let computer = PairwiseDistanceComputer::new(metric, DistanceConfig::default());
    let matrix = computer.compute(&small_alignment()).unwrap();
    assert_eq!(matrix.get_by_id("a", "d"), Some(3.0));
    assert_eq!(matrix.metric, "mismatches");
}

#[test]
fn clusters_follow_distances() {
    let matrix = PairwiseDistanceComputer::default().compute(&small_alignment()).unwrap();
    let assignment = cluster(&matrix, Linkage::Average, ClusterCut::Threshold(0.0)).unwrap();
    // c differs from a only at its gap, so pairwise deletion puts them together
    assert_eq!(assignment.label_of("a"), assignment.label_of("e"));
    assert_eq!(assignment.label_of("a"), assignment.label_of("c"));
    assert_ne!(assignment.label_of("a"), assignment.label_of("b"));
    assert_eq!(assignment.n_clusters, 3);

    let one = cluster(&matrix, Linkage::Complete, ClusterCut::Count(1)).unwrap();
    assert_eq!(one.members(1).len(), 5);
}

#[test]
fn matrix_file_round_trip_through_writer() {
    let dir = scratch("matrix");
    let path = dir.join("nested/distances.tsv");
    let matrix = PairwiseDistanceComputer::default().compute(&small_alignment()).unwrap();
    write_matrix(path.to_str().unwrap(), "tsv", &matrix, false, "msadist --alignment x").unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let rows: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(rows[0], "Sequence\ta\tb\tc\td\te");
    assert_eq!(rows.len(), 6);
    assert!(rows[1].starts_with("a\t0.000000\t0.100000"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn batch_mode_writes_reports_and_summary() {
    let root = scratch("batch");
    for version in ["v1", "v2"] {
        let folder = root.join(version);
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("FP2.afa"), FALCIPAINS).unwrap();
    }
    fs::write(root.join("v2/broken.afa"), ">x\nACDE\n>y\nAC\n").unwrap();

    let config = BatchConfig {
        results_dir: root.join("results"),
        key_positions: vec![285, 417, 447],
        threshold: 0.95,
    };
    let mut reports = Vec::new();
    for version in ["v1", "v2"] {
        reports.extend(process_folder(&root.join(version), &config).unwrap());
    }
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].key_residues, vec![(285, 1.0), (417, 1.0), (447, 1.0)]);

    let summary = root.join("results/combined_analysis.tsv");
    write_combined_summary(summary.to_str().unwrap(), &reports).unwrap();
    let text = fs::read_to_string(&summary).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Version\tMSA_file\tKey_Residues\tHighly_Conserved");
    assert!(lines[1].starts_with("v1\tFP2.afa\t285:1.000;417:1.000;447:1.000\t1:1.000;"));
    assert!(lines[2].starts_with("v2\tFP2.afa\t"));

    let report = fs::read_to_string(root.join("results/v2/FP2_conserved.txt")).unwrap();
    assert!(report.starts_with("Highly conserved residues (score > 0.95) in FP2.afa:\nPosition\tConservation Score\n1\t1.000\n"));
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn errors_are_typed() {
    let ragged = Alignment::from_fasta_reader(&b">a\nACDE\n>b\nACD\n"[..]).unwrap();
    assert!(matches!(
        PairwiseDistanceComputer::default().compute(&ragged),
        Err(DistanceError::ShapeMismatch { expected: 4, found: 3, .. })
    ));
    assert_eq!(
        PairwiseDistanceComputer::default().compute(&Alignment::default()),
        Err(DistanceError::EmptyInput)
    );
}
