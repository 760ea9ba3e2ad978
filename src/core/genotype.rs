//! Genotype relabeling
//!
//! When a variant is flipped the reference and alternate alleles swap places,
//! so every sample call has to be rewritten under the relabeling `0 <-> 1`.
//!
//! The rules are:
//! 1. Fully missing calls (`./.`, `.|.`) are returned unchanged
//! 2. The phased separator `|` takes precedence over the unphased `/`
//! 3. Half-missing calls relabel only the present allele and are always
//!    written with the unphased separator (`0|.` becomes `1/.`)
//! 4. Fully present calls relabel both alleles and keep their separator

use crate::core::error::{GenotypeError, GenotypeResult};

/// Missing allele marker
pub const MISSING_ALLELE: &str = ".";

/// Phased genotype separator
pub const PHASED_SEP: char = '|';

/// Unphased genotype separator
pub const UNPHASED_SEP: char = '/';

/// Policy for allele indices outside `{0, 1}`
///
/// Controls how non-binary genotype calls are handled during relabeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompatMode {
    /// Default mode: reject alleles other than 0 and 1
    /// - A non-binary call is reported as an error instead of being rewritten
    #[default]
    Improved,
    /// Strict mode: apply `1 - n` to every integer allele
    /// - Output may contain negative or out-of-range allele indices
    /// - `2/0` becomes `-1/1`
    Strict,
}

/// Check whether a genotype is missing on both alleles
pub fn is_fully_missing(gt: &str) -> bool {
    gt == "./." || gt == ".|."
}

/// Rewrites sample genotype calls under the `0 <-> 1` relabeling
#[derive(Debug, Clone, Copy, Default)]
pub struct GenotypeFlipper {
    mode: CompatMode,
}

impl GenotypeFlipper {
    pub fn new(mode: CompatMode) -> Self {
        Self { mode }
    }

    /// Flip a single genotype field
    ///
    /// # Examples
    /// ```
    /// use ancestral_recode::core::{CompatMode, GenotypeFlipper};
    ///
    /// let flipper = GenotypeFlipper::new(CompatMode::Improved);
    /// assert_eq!(flipper.flip("0|1").unwrap(), "1|0");
    /// assert_eq!(flipper.flip("./1").unwrap(), "./0");
    /// assert_eq!(flipper.flip("./.").unwrap(), "./.");
    /// ```
    pub fn flip(&self, gt: &str) -> GenotypeResult<String> {
        let mut out = String::with_capacity(gt.len() + 1);
        self.flip_into(gt, &mut out)?;
        Ok(out)
    }

    /// Flip a genotype field, appending the result to `out`
    ///
    /// On error `out` may contain a partial write.
    pub fn flip_into(&self, gt: &str, out: &mut String) -> GenotypeResult<()> {
        if is_fully_missing(gt) {
            out.push_str(gt);
            return Ok(());
        }
        if gt.contains(':') {
            return Err(GenotypeError::UnsupportedSampleField(gt.to_string()));
        }

        let sep = if gt.contains(PHASED_SEP) { PHASED_SEP } else { UNPHASED_SEP };
        let (first, second) = gt
            .split_once(sep)
            .filter(|(_, rest)| !rest.contains(sep))
            .ok_or_else(|| GenotypeError::MalformedGenotype(gt.to_string()))?;

        match (first == MISSING_ALLELE, second == MISSING_ALLELE) {
            (true, _) => {
                out.push_str(MISSING_ALLELE);
                out.push(UNPHASED_SEP);
                self.relabel(second, gt, out)?;
            }
            (false, true) => {
                self.relabel(first, gt, out)?;
                out.push(UNPHASED_SEP);
                out.push_str(MISSING_ALLELE);
            }
            (false, false) => {
                self.relabel(first, gt, out)?;
                out.push(sep);
                self.relabel(second, gt, out)?;
            }
        }
        Ok(())
    }

    fn relabel(&self, allele: &str, gt: &str, out: &mut String) -> GenotypeResult<()> {
        match (allele, self.mode) {
            ("0", _) => out.push('1'),
            ("1", _) => out.push('0'),
            (_, CompatMode::Strict) => {
                let n: i64 = allele
                    .parse()
                    .map_err(|_| GenotypeError::MalformedGenotype(gt.to_string()))?;
                out.push_str(&(1 - n).to_string());
            }
            (_, CompatMode::Improved) => {
                if allele.parse::<i64>().is_ok() {
                    return Err(GenotypeError::NonBinaryAllele {
                        genotype: gt.to_string(),
                        allele: allele.to_string(),
                    });
                }
                return Err(GenotypeError::MalformedGenotype(gt.to_string()));
            }
        }
        Ok(())
    }
}

/// Flip a single genotype field with the given compatibility mode
pub fn flip_genotype(gt: &str, mode: CompatMode) -> GenotypeResult<String> {
    GenotypeFlipper::new(mode).flip(gt)
}
