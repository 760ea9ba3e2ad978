//! Ancestral allele reference table
//!
//! Loads a whitespace-delimited table of ancestral allele calls into a hash
//! index keyed by (normalized chromosome, position).
//!
//! # Table Format
//!
//! ```text
//! CHROM  POS   ID   REF  ALT  AA
//! chr1   1000  rs1  A    G    G
//! 1      2000  .    C    T    C
//! ```
//!
//! - Lines whose first column starts with "CHR" are headers and are skipped
//! - Blank lines are skipped
//! - Columns: chromosome(0), position(1), id(2, ignored), ref(3), alt(4), ancestral(5)
//! - Columns beyond the sixth are ignored
//! - Row order does not matter

use crate::core::chrom::normalize_chrom;
use crate::core::error::{AncestralParseError, AncestralResult};
use crate::core::io::{open_input, LineIterator};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

/// Minimum number of whitespace-separated columns in a data line
pub const MIN_COLUMNS: usize = 6;

/// Prefix of the first column that marks a header line
pub const HEADER_PREFIX: &str = "CHR";

/// Composite lookup key: normalized chromosome plus the position token
///
/// Positions are compared as text, so `"1000"` and `"01000"` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteKey {
    pub chrom: String,
    pub pos: String,
}

impl SiteKey {
    /// Build a key, normalizing the chromosome label
    pub fn new(chrom: &str, pos: &str) -> Self {
        Self {
            chrom: normalize_chrom(chrom).to_string(),
            pos: pos.to_string(),
        }
    }
}

/// One ancestral allele reference entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlleleRecord {
    /// Normalized chromosome
    pub chrom: String,
    /// Position token as it appears in the table
    pub pos: String,
    pub ref_allele: String,
    pub alt_allele: String,
    /// Ancestral allele
    pub ancestral: String,
}

impl AlleleRecord {
    /// Parse a data line
    pub fn parse(line: &str, line_number: usize) -> AncestralResult<Self> {
        let cols: Vec<&str> = line.split_whitespace().take(MIN_COLUMNS).collect();
        if cols.len() < MIN_COLUMNS {
            return Err(AncestralParseError::MalformedRecord {
                line: line_number,
                expected: MIN_COLUMNS,
                found: cols.len(),
                content: line.chars().take(100).collect(),
            });
        }

        Ok(Self {
            chrom: normalize_chrom(cols[0]).to_string(),
            pos: cols[1].to_string(),
            ref_allele: cols[3].to_string(),
            alt_allele: cols[4].to_string(),
            ancestral: cols[5].to_string(),
        })
    }

    pub fn key(&self) -> SiteKey {
        SiteKey {
            chrom: self.chrom.clone(),
            pos: self.pos.clone(),
        }
    }
}

/// Check whether a table line is a header (first column starts with "CHR")
pub fn is_header_line(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|first| first.starts_with(HEADER_PREFIX))
}

/// What to do when two table rows share a (chromosome, position) key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The later row silently replaces the earlier one
    #[default]
    LastWins,
    /// Abort index construction
    Error,
}

/// Ancestral allele index keyed by (normalized chromosome, position)
///
/// Fully resident; O(1) expected lookup.
#[derive(Debug, Default)]
pub struct AncestralIndex {
    sites: HashMap<SiteKey, AlleleRecord>,
    duplicates: usize,
}

impl AncestralIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build index from a table file
    ///
    /// Automatically handles gzip and bzip2 compression.
    ///
    /// # Example
    /// ```ignore
    /// let index = AncestralIndex::from_file("chr1_AA.txt.gz", DuplicatePolicy::LastWins)?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P, policy: DuplicatePolicy) -> AncestralResult<Self> {
        let path = path.as_ref();
        let start = Instant::now();
        let reader = open_input(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AncestralParseError::FileNotFound(path.to_path_buf()),
            _ => AncestralParseError::Io(e),
        })?;
        let index = Self::from_reader(reader, policy)?;
        log::info!(
            "Loaded {} ancestral allele sites from {} in {:.2}s",
            index.len(),
            path.display(),
            start.elapsed().as_secs_f64()
        );
        Ok(index)
    }

    /// Build index from any `BufRead` source
    pub fn from_reader<R: BufRead>(reader: R, policy: DuplicatePolicy) -> AncestralResult<Self> {
        let mut index = Self::new();
        let mut lines = LineIterator::new(reader);
        let mut line_number: usize = 0;

        while let Some(line) = lines.next_line() {
            line_number += 1;
            let line = line?;
            if line.trim().is_empty() || is_header_line(line) {
                continue;
            }
            let record = AlleleRecord::parse(line, line_number)?;
            index.insert(record, policy, line_number)?;
        }

        if index.duplicates > 0 {
            log::warn!(
                "{} duplicate ancestral allele sites were overwritten by later rows",
                index.duplicates
            );
        }
        Ok(index)
    }

    /// Build index from bytes (for testing)
    pub fn from_bytes(data: &[u8], policy: DuplicatePolicy) -> AncestralResult<Self> {
        Self::from_reader(data, policy)
    }

    /// Insert a record, applying the duplicate policy
    pub fn insert(
        &mut self,
        record: AlleleRecord,
        policy: DuplicatePolicy,
        line_number: usize,
    ) -> AncestralResult<()> {
        let key = record.key();
        if self.sites.contains_key(&key) {
            if policy == DuplicatePolicy::Error {
                return Err(AncestralParseError::DuplicateSite {
                    line: line_number,
                    chrom: key.chrom,
                    pos: key.pos,
                });
            }
            log::debug!("Overwriting ancestral allele site {}:{} at line {}", key.chrom, key.pos, line_number);
            self.duplicates += 1;
        }
        self.sites.insert(key, record);
        Ok(())
    }

    /// Look up a site; the chromosome is normalized before matching
    pub fn lookup(&self, chrom: &str, pos: &str) -> Option<&AlleleRecord> {
        self.sites.get(&SiteKey::new(chrom, pos))
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Number of rows that replaced an earlier row with the same key
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}
