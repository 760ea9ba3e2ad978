//! Property-based tests for genotype relabeling
//!
//! **Feature: ancestral-recode, Property 2: flip is an involution on binary calls**
//! **Feature: ancestral-recode, Property 3: missing alleles are preserved**

use ancestral_recode::core::{flip_genotype, CompatMode, GenotypeError};
use proptest::prelude::*;

/// Generate a fully present binary genotype with either separator
fn arb_binary_genotype() -> impl Strategy<Value = String> {
    (0u8..=1, prop::sample::select(vec!['/', '|']), 0u8..=1)
        .prop_map(|(a, sep, b)| format!("{}{}{}", a, sep, b))
}

/// Generate a genotype with exactly one missing allele
fn arb_half_missing_genotype() -> impl Strategy<Value = (String, u8, bool)> {
    (0u8..=1, prop::sample::select(vec!['/', '|']), prop::bool::ANY).prop_map(
        |(allele, sep, missing_first)| {
            let gt = if missing_first {
                format!(".{}{}", sep, allele)
            } else {
                format!("{}{}.", allele, sep)
            };
            (gt, allele, missing_first)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// flip(flip(g)) == g for binary, fully present genotypes
    #[test]
    fn prop_flip_involution(gt in arb_binary_genotype()) {
        for mode in [CompatMode::Improved, CompatMode::Strict] {
            let once = flip_genotype(&gt, mode).unwrap();
            let twice = flip_genotype(&once, mode).unwrap();
            prop_assert_eq!(&twice, &gt);
        }
    }

    /// Flipping preserves the separator and complements both alleles
    #[test]
    fn prop_flip_complements_alleles(gt in arb_binary_genotype()) {
        let flipped = flip_genotype(&gt, CompatMode::Improved).unwrap();
        let original: Vec<char> = gt.chars().collect();
        let result: Vec<char> = flipped.chars().collect();
        prop_assert_eq!(result.len(), 3);
        prop_assert_eq!(result[1], original[1]);
        prop_assert_ne!(result[0], original[0]);
        prop_assert_ne!(result[2], original[2]);
    }

    /// Half-missing calls flip the present allele, keep the missing marker's
    /// position and always use the unphased separator
    #[test]
    fn prop_half_missing((gt, allele, missing_first) in arb_half_missing_genotype()) {
        let flipped = flip_genotype(&gt, CompatMode::Improved).unwrap();
        let expected = if missing_first {
            format!("./{}", 1 - allele)
        } else {
            format!("{}/.", 1 - allele)
        };
        prop_assert_eq!(flipped, expected);
    }

    /// Alleles beyond 1 are rejected unless strict arithmetic is requested
    #[test]
    fn prop_non_binary_rejected(a in 2u8..10, b in 0u8..10) {
        let gt = format!("{}/{}", a, b);
        let improved = flip_genotype(&gt, CompatMode::Improved);
        let is_non_binary = matches!(improved, Err(GenotypeError::NonBinaryAllele { .. }));
        prop_assert!(is_non_binary);

        let strict = flip_genotype(&gt, CompatMode::Strict).unwrap();
        prop_assert_eq!(strict, format!("{}/{}", 1 - a as i64, 1 - b as i64));
    }
}

#[test]
fn test_fully_missing_fixed_points() {
    for mode in [CompatMode::Improved, CompatMode::Strict] {
        assert_eq!(flip_genotype("./.", mode).unwrap(), "./.");
        assert_eq!(flip_genotype(".|.", mode).unwrap(), ".|.");
    }
}

#[test]
fn test_half_missing_examples() {
    assert_eq!(flip_genotype("./1", CompatMode::Improved).unwrap(), "./0");
    assert_eq!(flip_genotype("0|.", CompatMode::Improved).unwrap(), "1/.");
}
