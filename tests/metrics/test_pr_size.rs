//! Tests for pull request size tiers.

use super::fake_source::file;
use delivery_metrics::metrics::{FileFilter, PrSize, Rating, SizeThresholds, classify_pr_size};

#[test]
fn test_default_tier_bounds() {
    let thresholds = SizeThresholds::default();

    assert_eq!(thresholds.classify(0), PrSize::S);
    assert_eq!(thresholds.classify(99), PrSize::S);
    assert_eq!(thresholds.classify(100), PrSize::M);
    assert_eq!(thresholds.classify(299), PrSize::M);
    assert_eq!(thresholds.classify(300), PrSize::L);
    assert_eq!(thresholds.classify(599), PrSize::L);
    assert_eq!(thresholds.classify(600), PrSize::Xl);
}

#[test]
fn test_classify_sums_filtered_files() {
    let files = vec![
        file("src/main.rs", 150, 30),
        file("Cargo.lock", 2000, 1500),
    ];
    let filter = FileFilter::new(["Cargo.lock"], false, false).unwrap();

    let result = classify_pr_size(&files, &filter, &SizeThresholds::default());

    assert_eq!(result.size, PrSize::M);
    assert_eq!(result.category, "Medium");
    assert_eq!(result.rating, Rating::Good);
    assert_eq!(result.details.total_changes, 180);
    assert_eq!(result.details.files_changed, 1);
}

#[test]
fn test_empty_pr_is_small() {
    let result = classify_pr_size(&[], &FileFilter::default(), &SizeThresholds::default());

    assert_eq!(result.size, PrSize::S);
    assert_eq!(result.rating, Rating::Elite);
    assert_eq!(result.details.total_changes, 0);
}

#[test]
fn test_custom_thresholds() {
    let thresholds = SizeThresholds {
        medium: 10,
        large: 20,
        extra_large: 30,
    };

    let result = classify_pr_size(&[file("a", 25, 10)], &FileFilter::default(), &thresholds);

    assert_eq!(result.size, PrSize::Xl);
    assert_eq!(result.category, "Extra Large");
    assert_eq!(result.rating, Rating::NeedsFocus);
}

#[test]
fn test_size_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&PrSize::Xl).unwrap(), "\"xl\"");
    assert_eq!(PrSize::L.as_str(), "l");
}
