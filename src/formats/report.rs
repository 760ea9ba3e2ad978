//! Status and summary reports
//!
//! The status report has one tab-delimited line per data record:
//! `CHROM POS REF ALT LABEL`, with the chromosome normalized and REF/ALT as
//! they appeared in the input. The summary report is a handful of labeled
//! counts written once at the end of the pass.

use crate::formats::vcf::RecodeOutcome;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Input suffixes stripped when deriving output names, longest first
const VCF_SUFFIXES: [&str; 4] = [".vcf.gz", ".vcf.bgz", ".vcf.bz2", ".vcf"];

pub const RECODED_SUFFIX: &str = "_recodedAA.vcf";
pub const STATUS_SUFFIX: &str = "_status.txt";
pub const SUMMARY_SUFFIX: &str = "_summary.txt";

/// Recoding statistics
///
/// Every processed variant lands in exactly one outcome bucket, so
/// `total == kept + flipped + removed_no_aa + removed_no_match`. Malformed
/// records are skipped before classification and tallied separately.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecodeStats {
    pub total: usize,
    pub kept: usize,
    pub flipped: usize,
    pub removed_no_aa: usize,
    pub removed_no_match: usize,
    pub malformed: usize,
}

impl RecodeStats {
    /// Count one classified variant
    pub fn record(&mut self, outcome: RecodeOutcome) {
        self.total += 1;
        match outcome {
            RecodeOutcome::Kept => self.kept += 1,
            RecodeOutcome::Flipped => self.flipped += 1,
            RecodeOutcome::RemovedNoAA => self.removed_no_aa += 1,
            RecodeOutcome::RemovedNoMatch => self.removed_no_match += 1,
        }
    }

    /// Variants dropped for either removal reason
    pub fn removed(&self) -> usize {
        self.removed_no_aa + self.removed_no_match
    }

    pub fn is_consistent(&self) -> bool {
        self.total == self.kept + self.flipped + self.removed()
    }
}

/// Write one status line
pub fn write_status_line<W: Write>(
    out: &mut W,
    chrom: &str,
    pos: &str,
    ref_allele: &str,
    alt_allele: &str,
    label: &str,
) -> io::Result<()> {
    writeln!(out, "{}\t{}\t{}\t{}\t{}", chrom, pos, ref_allele, alt_allele, label)
}

/// Render the summary report
pub fn render_summary(stats: &RecodeStats) -> String {
    let mut summary = format!(
        "Total number variants input: {}\n\
         Total Variants Removed: {}\n\
         Total Variants Flipped: {}\n\
         Total Variants same REF as AA: {}\n",
        stats.total,
        stats.removed(),
        stats.flipped,
        stats.kept
    );
    if stats.malformed > 0 {
        summary.push_str(&format!(
            "Total Malformed Records Skipped: {}\n",
            stats.malformed
        ));
    }
    summary
}

/// Write the summary report
pub fn write_summary<W: Write>(out: &mut W, stats: &RecodeStats) -> io::Result<()> {
    out.write_all(render_summary(stats).as_bytes())
}

/// Paths of the three files produced for one input VCF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Recoded VCF (plain text, compressed afterwards by bgzip)
    pub recoded: PathBuf,
    pub status: PathBuf,
    pub summary: PathBuf,
}

impl OutputPaths {
    /// Derive output paths next to the input file
    ///
    /// `dir/sample.vcf.gz` gives `dir/sample_recodedAA.vcf`,
    /// `dir/sample_status.txt` and `dir/sample_summary.txt`. A name without a
    /// VCF suffix is used whole as the stem.
    pub fn from_input<P: AsRef<Path>>(input: P) -> Self {
        let input = input.as_ref();
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = VCF_SUFFIXES
            .iter()
            .find_map(|suffix| name.strip_suffix(suffix))
            .unwrap_or(name.as_str());
        let prefix = match input.parent() {
            Some(parent) => parent.join(stem),
            None => PathBuf::from(stem),
        };
        Self::with_prefix(prefix)
    }

    /// Build output paths from an explicit stem
    pub fn with_prefix<P: AsRef<Path>>(prefix: P) -> Self {
        let prefix = prefix.as_ref();
        let suffixed = |suffix: &str| {
            let mut path = OsString::from(prefix.as_os_str());
            path.push(suffix);
            PathBuf::from(path)
        };
        Self {
            recoded: suffixed(RECODED_SUFFIX),
            status: suffixed(STATUS_SUFFIX),
            summary: suffixed(SUMMARY_SUFFIX),
        }
    }
}
