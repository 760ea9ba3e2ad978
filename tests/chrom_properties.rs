//! Property-based tests for chromosome normalization
//!
//! **Feature: ancestral-recode, Property 1: chromosome normalization is idempotent**

use ancestral_recode::core::normalize_chrom;
use proptest::prelude::*;

/// Generate a chromosome label with or without a single "chr" prefix
fn arb_chrom_label() -> impl Strategy<Value = String> {
    let base = prop_oneof![
        (1u8..=22).prop_map(|n| n.to_string()),
        Just("X".to_string()),
        Just("Y".to_string()),
        Just("MT".to_string()),
        "[A-Za-z0-9_]{1,8}".prop_filter("label repeats the prefix", |s| !s.starts_with("chr")),
    ];
    (base, prop::bool::ANY).prop_map(|(b, prefixed)| if prefixed { format!("chr{}", b) } else { b })
}

proptest! {
    /// Normalizing twice is the same as normalizing once
    #[test]
    fn prop_normalize_idempotent(label in arb_chrom_label()) {
        let once = normalize_chrom(&label);
        prop_assert_eq!(normalize_chrom(once), once);
    }

    /// "chrN" and "N" normalize to the same label
    #[test]
    fn prop_prefixed_and_bare_equivalent(n in 1u8..=22) {
        let bare = n.to_string();
        let prefixed = format!("chr{}", n);
        prop_assert_eq!(normalize_chrom(&prefixed), bare.as_str());
        prop_assert_eq!(normalize_chrom(&prefixed), normalize_chrom(&bare));
    }

    /// Labels without the lowercase prefix are returned unchanged
    #[test]
    fn prop_unprefixed_unchanged(label in "[A-Z0-9][A-Za-z0-9_]{0,8}") {
        prop_assert_eq!(normalize_chrom(&label), label.as_str());
    }
}

#[test]
fn test_chr7_example() {
    assert_eq!(normalize_chrom("chr7"), "7");
    assert_eq!(normalize_chrom("7"), "7");
    assert_eq!(normalize_chrom("chr7"), normalize_chrom("7"));
}
