//! Chromosome name normalization
//!
//! Reference tables and VCF files disagree on whether chromosomes carry a
//! "chr" prefix. Both sides are passed through [`normalize_chrom`] before any
//! key comparison so that `chr1` and `1` address the same site.

/// Prefix stripped from chromosome labels (case-sensitive)
pub const CHROM_PREFIX: &str = "chr";

/// Normalize a chromosome label to its canonical form
///
/// Strips a leading lowercase `chr` and returns the remainder; any other label
/// is returned unchanged. The match is case-sensitive, so `CHR1` and `Chr1`
/// are left alone. Only one prefix is removed: `chrchr1` becomes `chr1`.
///
/// # Examples
/// ```
/// use ancestral_recode::core::normalize_chrom;
///
/// assert_eq!(normalize_chrom("chr7"), "7");
/// assert_eq!(normalize_chrom("7"), "7");
/// assert_eq!(normalize_chrom("chrX"), "X");
/// assert_eq!(normalize_chrom("CHR7"), "CHR7");
/// ```
pub fn normalize_chrom(chrom: &str) -> &str {
    chrom.strip_prefix(CHROM_PREFIX).unwrap_or(chrom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefix() {
        assert_eq!(normalize_chrom("chr1"), "1");
        assert_eq!(normalize_chrom("chr22"), "22");
        assert_eq!(normalize_chrom("chrMT"), "MT");
    }

    #[test]
    fn test_no_prefix_unchanged() {
        assert_eq!(normalize_chrom("1"), "1");
        assert_eq!(normalize_chrom("X"), "X");
        assert_eq!(normalize_chrom(""), "");
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(normalize_chrom("Chr1"), "Chr1");
        assert_eq!(normalize_chrom("CHR1"), "CHR1");
    }

    #[test]
    fn test_bare_prefix() {
        // "chr" alone normalizes to the empty label
        assert_eq!(normalize_chrom("chr"), "");
    }

    #[test]
    fn test_repeated_prefix_stripped_once() {
        assert_eq!(normalize_chrom("chrchr1"), "chr1");
        assert_ne!(normalize_chrom("chrchr1"), normalize_chrom("chr1"));
    }
}
