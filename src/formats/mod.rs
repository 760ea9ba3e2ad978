//! File format adapters
//!
//! Streaming VCF recoder and the status/summary reports it produces.

pub mod report;
pub mod vcf;

pub use report::{render_summary, write_summary, OutputPaths, RecodeStats};
pub use vcf::{recode_vcf, RecodeOutcome, Recoded, VariantRecoder, VcfRecordView};
