//! Core recoding primitives
//!
//! This module contains the chromosome normalizer, the ancestral allele
//! index, genotype relabeling and the I/O plumbing shared by all formats.

pub mod ancestral;
pub mod bgzip;
mod chrom;
pub mod error;
mod genotype;
pub mod io;

pub use ancestral::{AlleleRecord, AncestralIndex, DuplicatePolicy, SiteKey};
pub use bgzip::{bgzip_file, bgzip_file_with};
pub use chrom::normalize_chrom;
pub use error::{
    AncestralParseError, AncestralResult, BgzipError, GenotypeError, GenotypeResult,
    RecodeError, Result, VcfParseError,
};
pub use genotype::{flip_genotype, is_fully_missing, CompatMode, GenotypeFlipper};
pub use io::{
    detect_compression, open_input, CompressionFormat, LineIterator, SmartReader,
    SmartWriter, DEFAULT_BUFFER_SIZE, LARGE_BUFFER_SIZE, MMAP_THRESHOLD,
};
