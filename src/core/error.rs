//! Error types for AncestralRecode
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for AncestralRecode operations
#[derive(Debug, Error)]
pub enum RecodeError {
    /// Ancestral allele table errors
    #[error("Ancestral allele table error: {0}")]
    Ancestral(#[from] AncestralParseError),

    /// Variant record errors
    #[error("VCF error: {0}")]
    Vcf(#[from] VcfParseError),

    /// Genotype relabeling errors
    #[error("Genotype error: {0}")]
    Genotype(#[from] GenotypeError),

    /// External compression errors
    #[error("bgzip error: {0}")]
    Bgzip(#[from] BgzipError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while building the ancestral allele index
#[derive(Debug, Error)]
pub enum AncestralParseError {
    /// Data line has fewer columns than the table requires
    #[error("Malformed reference record at line {line}: expected at least {expected} columns, found {found} ('{content}')")]
    MalformedRecord {
        line: usize,
        expected: usize,
        found: usize,
        content: String,
    },

    /// A (chromosome, position) key appeared twice and duplicates are not allowed
    #[error("Duplicate ancestral allele site {chrom}:{pos} at line {line}")]
    DuplicateSite {
        line: usize,
        chrom: String,
        pos: String,
    },

    /// File not found
    #[error("Ancestral allele file not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised for a single variant line
#[derive(Debug, Error)]
pub enum VcfParseError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Too few fields: expected at least {expected}, found {found}")]
    TooFewFields { expected: usize, found: usize },
}

/// Errors raised while relabeling a genotype field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenotypeError {
    /// Not a two-allele call (haploid, polyploid, empty token)
    #[error("Malformed genotype '{0}': expected two alleles")]
    MalformedGenotype(String),

    /// Allele token is not 0 or 1 and arithmetic relabeling was not requested
    #[error("Non-binary allele '{allele}' in genotype '{genotype}'")]
    NonBinaryAllele { genotype: String, allele: String },

    /// Sample column carries subfields beyond the GT call
    #[error("Unsupported sample field '{0}': only bare GT calls can be flipped")]
    UnsupportedSampleField(String),
}

/// Errors from the external bgzip step
#[derive(Debug, Error)]
pub enum BgzipError {
    /// bgzip could not be launched
    #[error("bgzip executable not found on PATH")]
    NotFound,

    /// bgzip ran but reported failure
    #[error("bgzip failed on {path} ({status}): {stderr}")]
    Failed {
        path: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// I/O error while launching bgzip
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for AncestralRecode operations
pub type Result<T> = std::result::Result<T, RecodeError>;

/// Result type alias for ancestral table parsing
pub type AncestralResult<T> = std::result::Result<T, AncestralParseError>;

/// Result type alias for genotype relabeling
pub type GenotypeResult<T> = std::result::Result<T, GenotypeError>;
