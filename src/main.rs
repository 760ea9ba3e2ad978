//! AncestralRecode CLI entry point
//!
//! Recodes a VCF so that REF matches the ancestral allele, then block-compresses
//! the result with bgzip.

use ancestral_recode::core::{bgzip_file, AncestralIndex, CompatMode, DuplicatePolicy};
use ancestral_recode::formats::{recode_vcf, OutputPaths};
use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

/// Non-binary allele handling (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CompatModeArg {
    /// Reject genotype alleles other than 0 and 1
    #[default]
    #[value(name = "improved")]
    Improved,
    /// Relabel every allele as 1 - n, even outside {0,1}
    #[value(name = "strict")]
    Strict,
}

impl From<CompatModeArg> for CompatMode {
    fn from(arg: CompatModeArg) -> Self {
        match arg {
            CompatModeArg::Improved => CompatMode::Improved,
            CompatModeArg::Strict => CompatMode::Strict,
        }
    }
}

/// Duplicate ancestral site handling (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum DuplicatePolicyArg {
    /// Later rows replace earlier rows with the same site
    #[default]
    #[value(name = "last-wins")]
    LastWins,
    /// Abort when a site appears twice
    #[value(name = "error")]
    Error,
}

impl From<DuplicatePolicyArg> for DuplicatePolicy {
    fn from(arg: DuplicatePolicyArg) -> Self {
        match arg {
            DuplicatePolicyArg::LastWins => DuplicatePolicy::LastWins,
            DuplicatePolicyArg::Error => DuplicatePolicy::Error,
        }
    }
}

#[derive(Parser)]
#[command(name = "ancestral-recode")]
#[command(about = "Recode a VCF file so the reference allele is the ancestral allele")]
#[command(version)]
#[command(author = "AncestralRecode Contributors")]
struct Cli {
    /// Ancestral allele table (CHROM POS ID REF ALT AA; plain, .gz or .bz2)
    ancestral: PathBuf,
    /// Input VCF file (plain, .gz or .bz2)
    vcf: PathBuf,
    /// Output stem (default: input name without its .vcf[.gz] suffix)
    #[arg(short = 'o', long = "output-prefix")]
    output_prefix: Option<PathBuf>,
    /// Leave the recoded VCF uncompressed instead of running bgzip
    #[arg(long = "no-bgzip")]
    no_bgzip: bool,
    /// What to do when the ancestral table lists a site twice
    #[arg(long = "duplicates", default_value = "last-wins")]
    duplicates: DuplicatePolicyArg,
    /// Genotype alleles outside {0,1}: 'improved' rejects the record, 'strict' applies 1 - n
    #[arg(long = "compat-mode", default_value = "improved")]
    compat_mode: CompatModeArg,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    eprintln!("Loading ancestral allele table: {:?}", cli.ancestral);
    let index = AncestralIndex::from_file(&cli.ancestral, cli.duplicates.into())
        .with_context(|| format!("Failed to load ancestral allele table {:?}", cli.ancestral))?;
    eprintln!(
        "Ancestral allele table loaded: {} sites in {:.2}s",
        index.len(),
        start.elapsed().as_secs_f64()
    );

    let paths = match &cli.output_prefix {
        Some(prefix) => OutputPaths::with_prefix(prefix),
        None => OutputPaths::from_input(&cli.vcf),
    };
    if paths.recoded == cli.vcf {
        bail!("Recoded output {:?} would overwrite the input VCF", paths.recoded);
    }

    eprintln!("Recoding VCF file: {:?} -> {:?}", cli.vcf, paths.recoded);
    let stats = recode_vcf(&cli.vcf, &paths, &index, cli.compat_mode.into())
        .with_context(|| format!("Failed to recode {:?}", cli.vcf))?;

    let final_vcf = if cli.no_bgzip {
        paths.recoded.clone()
    } else {
        bgzip_file(&paths.recoded)
            .with_context(|| format!("Failed to compress {:?}", paths.recoded))?
    };

    eprintln!("\n=== Recoding Statistics ===");
    eprintln!("Total variants:   {}", stats.total);
    eprintln!("Kept (REF = AA):  {}", stats.kept);
    eprintln!("Flipped:          {}", stats.flipped);
    eprintln!("Removed:          {}", stats.removed());
    if stats.malformed > 0 {
        eprintln!("Malformed:        {}", stats.malformed);
    }
    eprintln!("Output:           {:?}", final_vcf);
    eprintln!("Status report:    {:?}", paths.status);
    eprintln!("Summary report:   {:?}", paths.summary);
    eprintln!("Time elapsed:     {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
