//! AncestralRecode - polarize VCF files by ancestral allele
//!
//! Recodes variant records so that REF always carries the ancestral allele,
//! flipping sample genotypes where REF and ALT have to be swapped.
//!
//! # Features
//!
//! - Single streaming pass; only the ancestral allele table is held in memory
//! - Transparent gzip/BGZF and bzip2 input
//! - Per-record status report and run summary
//! - Phase-preserving genotype relabeling
//!
//! # Example
//!
//! ```ignore
//! use ancestral_recode::{AncestralIndex, CompatMode, DuplicatePolicy, OutputPaths};
//! use ancestral_recode::formats::recode_vcf;
//!
//! let index = AncestralIndex::from_file("chr22_AA.txt.gz", DuplicatePolicy::LastWins)?;
//! let paths = OutputPaths::from_input("chr22.vcf.gz");
//! let stats = recode_vcf("chr22.vcf.gz", &paths, &index, CompatMode::Improved)?;
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use core::{
    flip_genotype, normalize_chrom, AlleleRecord, AncestralIndex, AncestralParseError,
    CompatMode, DuplicatePolicy, GenotypeError, GenotypeFlipper, RecodeError, SiteKey,
};
pub use formats::{OutputPaths, RecodeOutcome, RecodeStats, VariantRecoder};
