//! VCF ancestral allele recoding
//!
//! Streams a VCF once, joining every data line against the ancestral allele
//! index by (chromosome, position):
//!
//! | index entry | output line                  | status                 |
//! |-------------|------------------------------|------------------------|
//! | missing     | dropped                      | `Removed: No AA data`  |
//! | REF == AA   | copied byte for byte         | `Kept: Matches AA`     |
//! | ALT == AA   | REF/ALT swapped, GT flipped  | `Flipped`              |
//! | neither     | dropped                      | `Removed: No AA match` |
//!
//! Header lines pass through untouched and are never counted. Data lines that
//! cannot be parsed or flipped are skipped, reported in the status stream and
//! counted as malformed.

use crate::core::error::{GenotypeResult, RecodeError, VcfParseError};
use crate::core::io::{open_input, SmartWriter};
use crate::core::{normalize_chrom, AlleleRecord, AncestralIndex, CompatMode, GenotypeFlipper};
use crate::formats::report::{write_status_line, write_summary, OutputPaths, RecodeStats};
use memchr::memchr;
use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

/// Minimum number of tab-delimited fields in a data line
/// (CHROM, POS, ID, REF, ALT, QUAL, FILTER, INFO)
pub const MIN_FIELDS: usize = 8;

/// Index of the first sample column
pub const FIRST_SAMPLE_FIELD: usize = 9;

/// Comment marker introducing header lines
pub const HEADER_MARKER: char = '#';

/// Zero-copy VCF record view for parsing
/// Only splits the line into fields; nothing is converted
pub struct VcfRecordView<'a> {
    /// Original line, without its terminator
    line: &'a str,
    /// Chromosome name as written
    pub chrom: &'a str,
    /// Position token as written
    pub pos: &'a str,
    /// Field boundaries (start, end) for lazy access
    field_bounds: Vec<(usize, usize)>,
}

impl<'a> VcfRecordView<'a> {
    /// Parse a VCF data line
    pub fn parse(line: &'a str) -> Result<Self, VcfParseError> {
        if line.is_empty() {
            return Err(VcfParseError::EmptyLine);
        }

        // Find field boundaries using memchr for tab characters
        let bytes = line.as_bytes();
        let mut field_bounds = Vec::with_capacity(10);
        let mut start_pos = 0;
        while let Some(tab_pos) = memchr(b'\t', &bytes[start_pos..]) {
            let end_pos = start_pos + tab_pos;
            field_bounds.push((start_pos, end_pos));
            start_pos = end_pos + 1;
        }
        // Last field
        field_bounds.push((start_pos, bytes.len()));

        if field_bounds.len() < MIN_FIELDS {
            return Err(VcfParseError::TooFewFields {
                expected: MIN_FIELDS,
                found: field_bounds.len(),
            });
        }

        let (chrom_start, chrom_end) = field_bounds[0];
        let (pos_start, pos_end) = field_bounds[1];
        Ok(Self {
            line,
            chrom: &line[chrom_start..chrom_end],
            pos: &line[pos_start..pos_end],
            field_bounds,
        })
    }

    /// Get the original line
    pub fn line(&self) -> &'a str {
        self.line
    }

    /// Get the number of fields
    pub fn field_count(&self) -> usize {
        self.field_bounds.len()
    }

    /// Get field as string slice (lazy access)
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.field_bounds
            .get(index)
            .map(|&(start, end)| &self.line[start..end])
    }

    /// Get ID field (field 2)
    pub fn id(&self) -> &'a str {
        self.field(2).unwrap_or(".")
    }

    /// Get REF field (field 3)
    pub fn ref_allele(&self) -> &'a str {
        self.field(3).unwrap_or(".")
    }

    /// Get ALT field (field 4)
    pub fn alt_allele(&self) -> &'a str {
        self.field(4).unwrap_or(".")
    }

    /// Get sample fields (fields 9+)
    pub fn samples(&self) -> impl Iterator<Item = &'a str> + '_ {
        (FIRST_SAMPLE_FIELD..self.field_count()).filter_map(move |i| self.field(i))
    }
}

/// Per-variant recoding decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecodeOutcome {
    /// REF already matches the ancestral allele
    Kept,
    /// ALT matches the ancestral allele; alleles swapped and genotypes relabeled
    Flipped,
    /// No ancestral allele entry for this site
    RemovedNoAA,
    /// Entry exists but neither REF nor ALT is the ancestral allele
    RemovedNoMatch,
}

impl RecodeOutcome {
    /// Status report label
    pub fn label(&self) -> &'static str {
        match self {
            RecodeOutcome::Kept => "Kept: Matches AA",
            RecodeOutcome::Flipped => "Flipped",
            RecodeOutcome::RemovedNoAA => "Removed: No AA data",
            RecodeOutcome::RemovedNoMatch => "Removed: No AA match",
        }
    }

    /// Decide the outcome from the REF/ALT alleles and the index entry
    pub fn classify(ref_allele: &str, alt_allele: &str, entry: Option<&AlleleRecord>) -> Self {
        match entry {
            None => RecodeOutcome::RemovedNoAA,
            Some(aa) if aa.ancestral == ref_allele => RecodeOutcome::Kept,
            Some(aa) if aa.ancestral == alt_allele => RecodeOutcome::Flipped,
            Some(_) => RecodeOutcome::RemovedNoMatch,
        }
    }
}

/// Result of recoding one data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recoded<'a> {
    pub outcome: RecodeOutcome,
    /// Line for the recoded VCF, absent for removed variants
    pub line: Option<Cow<'a, str>>,
}

/// Build the output line for a flipped variant
///
/// REF and ALT swap places, QUAL/FILTER/INFO/FORMAT are copied, and every
/// sample genotype is relabeled. Column order is preserved.
pub fn format_flipped_line(view: &VcfRecordView, flipper: &GenotypeFlipper) -> GenotypeResult<String> {
    let mut output = String::with_capacity(view.line().len() + 8);

    output.push_str(view.chrom);
    output.push('\t');
    output.push_str(view.pos);
    output.push('\t');
    output.push_str(view.id());
    output.push('\t');
    output.push_str(view.alt_allele());
    output.push('\t');
    output.push_str(view.ref_allele());

    // QUAL, FILTER, INFO and FORMAT when present
    for i in 5..FIRST_SAMPLE_FIELD.min(view.field_count()) {
        output.push('\t');
        output.push_str(view.field(i).unwrap_or("."));
    }

    for sample in view.samples() {
        output.push('\t');
        flipper.flip_into(sample, &mut output)?;
    }

    Ok(output)
}

/// Streaming orchestrator joining variants against the ancestral index
pub struct VariantRecoder<'i> {
    index: &'i AncestralIndex,
    flipper: GenotypeFlipper,
}

impl<'i> VariantRecoder<'i> {
    pub fn new(index: &'i AncestralIndex, mode: CompatMode) -> Self {
        Self {
            index,
            flipper: GenotypeFlipper::new(mode),
        }
    }

    /// Recode a single parsed record
    pub fn recode<'a>(&self, view: &VcfRecordView<'a>) -> GenotypeResult<Recoded<'a>> {
        let entry = self.index.lookup(view.chrom, view.pos);
        let outcome = RecodeOutcome::classify(view.ref_allele(), view.alt_allele(), entry);
        let line = match outcome {
            RecodeOutcome::Kept => Some(Cow::Borrowed(view.line())),
            RecodeOutcome::Flipped => Some(Cow::Owned(format_flipped_line(view, &self.flipper)?)),
            RecodeOutcome::RemovedNoAA | RecodeOutcome::RemovedNoMatch => None,
        };
        Ok(Recoded { outcome, line })
    }

    /// Recode a whole VCF stream
    ///
    /// Header lines go to `output` unchanged; each data line produces exactly
    /// one status line. Output order mirrors input order. Headers and kept
    /// records are written as read, except that a `\r\n` terminator becomes
    /// `\n`; a final line without a terminator is written without one.
    /// Trailing whitespace is ignored when a data line is split into columns.
    pub fn recode_stream<R, W, S>(
        &self,
        mut reader: R,
        output: &mut W,
        status: &mut S,
    ) -> io::Result<RecodeStats>
    where
        R: BufRead,
        W: Write,
        S: Write,
    {
        let mut stats = RecodeStats::default();
        let mut line_buf = String::with_capacity(4096);
        let mut line_number: usize = 0;

        loop {
            line_buf.clear();
            let bytes_read = reader.read_line(&mut line_buf)?;
            if bytes_read == 0 {
                break;
            }
            line_number += 1;

            let (line, terminator) = match line_buf.strip_suffix('\n') {
                Some(l) => (l.strip_suffix('\r').unwrap_or(l), "\n"),
                None => (line_buf.as_str(), ""),
            };

            if line.starts_with(HEADER_MARKER) {
                write!(output, "{}{}", line, terminator)?;
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            self.process_data_line(line, terminator, line_number, output, status, &mut stats)?;
        }

        Ok(stats)
    }

    fn process_data_line<W: Write, S: Write>(
        &self,
        line: &str,
        terminator: &str,
        line_number: usize,
        output: &mut W,
        status: &mut S,
        stats: &mut RecodeStats,
    ) -> io::Result<()> {
        // A trailing tab must not turn into an empty sample column
        let view = match VcfRecordView::parse(line.trim_end()) {
            Ok(view) => view,
            Err(e) => return report_malformed(line, line_number, &e.to_string(), status, stats),
        };

        match self.recode(&view) {
            Ok(recoded) => {
                match &recoded.line {
                    Some(_) if recoded.outcome == RecodeOutcome::Kept => {
                        write!(output, "{}{}", line, terminator)?;
                    }
                    Some(out_line) => writeln!(output, "{}", out_line)?,
                    None => {}
                }
                write_status_line(
                    status,
                    normalize_chrom(view.chrom),
                    view.pos,
                    view.ref_allele(),
                    view.alt_allele(),
                    recoded.outcome.label(),
                )?;
                log::debug!("{}:{} {}", view.chrom, view.pos, recoded.outcome.label());
                stats.record(recoded.outcome);
                Ok(())
            }
            Err(e) => report_malformed(line, line_number, &e.to_string(), status, stats),
        }
    }
}

/// Skip a data line that could not be recoded, leaving a trace in the status report
fn report_malformed<S: Write>(
    line: &str,
    line_number: usize,
    reason: &str,
    status: &mut S,
    stats: &mut RecodeStats,
) -> io::Result<()> {
    log::warn!("Skipping malformed VCF record at line {}: {}", line_number, reason);
    let fields: Vec<&str> = line.split('\t').take(5).collect();
    let field = |i: usize| fields.get(i).copied().unwrap_or(".");
    write_status_line(
        status,
        normalize_chrom(field(0)),
        field(1),
        field(3),
        field(4),
        &format!("Skipped: Malformed record ({})", reason),
    )?;
    stats.malformed += 1;
    Ok(())
}

/// Recode a VCF file into the recoded VCF, status and summary files
///
/// Input compression is detected automatically. All three outputs are fully
/// written and closed before returning; on error, files already opened are
/// released as the writers are dropped.
pub fn recode_vcf<P: AsRef<Path>>(
    input: P,
    paths: &OutputPaths,
    index: &AncestralIndex,
    mode: CompatMode,
) -> Result<RecodeStats, RecodeError> {
    let start = Instant::now();
    let reader = open_input(input.as_ref())?;
    let mut output = SmartWriter::create(&paths.recoded)?;
    let mut status = SmartWriter::create(&paths.status)?;

    log::info!(
        "Recoding {} -> {}",
        input.as_ref().display(),
        paths.recoded.display()
    );
    let recoder = VariantRecoder::new(index, mode);
    let stats = recoder.recode_stream(reader, &mut output, &mut status)?;
    output.finish()?;
    status.finish()?;

    let mut summary = SmartWriter::create(&paths.summary)?;
    write_summary(&mut summary, &stats)?;
    summary.finish()?;

    log::info!(
        "Recoded {} variants in {:.2}s",
        stats.total,
        start.elapsed().as_secs_f64()
    );
    Ok(stats)
}
