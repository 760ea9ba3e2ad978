//! Property-based tests for the ancestral allele index
//!
//! **Feature: ancestral-recode, Property 4: every table row is retrievable by site**

use ancestral_recode::core::{AncestralIndex, AncestralParseError, DuplicatePolicy};
use proptest::prelude::*;
use std::collections::HashMap;
use std::io::Write;

/// Generate a nucleotide
fn arb_base() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["A", "C", "G", "T"]).prop_map(|s| s.to_string())
}

/// Generate table rows as (chrom, pos, ref, alt, aa)
fn arb_rows() -> impl Strategy<Value = Vec<(String, u32, String, String, String)>> {
    prop::collection::vec(
        (
            prop_oneof![
                (1u8..=22).prop_map(|n| n.to_string()),
                (1u8..=22).prop_map(|n| format!("chr{}", n)),
            ],
            1u32..5000,
            arb_base(),
            arb_base(),
            arb_base(),
        ),
        0..50,
    )
}

fn render(rows: &[(String, u32, String, String, String)]) -> String {
    let mut table = String::from("CHROM\tPOS\tID\tREF\tALT\tAA\n");
    for (chrom, pos, r, a, aa) in rows {
        table.push_str(&format!("{}\t{}\t.\t{}\t{}\t{}\n", chrom, pos, r, a, aa));
    }
    table
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// With last-wins, every site maps to the ancestral allele of its last row
    #[test]
    fn prop_last_row_wins(rows in arb_rows()) {
        let index = AncestralIndex::from_bytes(render(&rows).as_bytes(), DuplicatePolicy::LastWins).unwrap();

        let mut expected: HashMap<(String, String), String> = HashMap::new();
        for (chrom, pos, _, _, aa) in &rows {
            let chrom = chrom.strip_prefix("chr").unwrap_or(chrom.as_str()).to_string();
            expected.insert((chrom, pos.to_string()), aa.clone());
        }

        prop_assert_eq!(index.len(), expected.len());
        prop_assert_eq!(index.duplicates(), rows.len() - expected.len());
        for ((chrom, pos), aa) in &expected {
            let record = index.lookup(chrom, pos).unwrap();
            prop_assert_eq!(&record.ancestral, aa);
            // Prefixed lookups resolve to the same entry
            let prefixed = index.lookup(&format!("chr{}", chrom), pos).unwrap();
            prop_assert_eq!(prefixed, record);
        }
    }

    /// The error policy fails exactly when a site repeats
    #[test]
    fn prop_error_policy_detects_duplicates(rows in arb_rows()) {
        let distinct: std::collections::HashSet<(String, u32)> = rows
            .iter()
            .map(|(c, p, ..)| (c.strip_prefix("chr").unwrap_or(c.as_str()).to_string(), *p))
            .collect();
        let result = AncestralIndex::from_bytes(render(&rows).as_bytes(), DuplicatePolicy::Error);
        if distinct.len() == rows.len() {
            prop_assert!(result.is_ok());
        } else {
            let is_duplicate = matches!(result, Err(AncestralParseError::DuplicateSite { .. }));
            prop_assert!(is_duplicate);
        }
    }
}

#[test]
fn test_short_row_aborts_build() {
    let table = b"1 100 . A G A\n1 200 . A\n1 300 . A G A\n";
    let err = AncestralIndex::from_bytes(table, DuplicatePolicy::LastWins).unwrap_err();
    assert!(matches!(err, AncestralParseError::MalformedRecord { line: 2, found: 4, .. }));
}

#[test]
fn test_gzip_table_matches_plain() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let table = "CHR POS ID REF ALT AA\nchr2 500 rs9 C T T\n2 600 . G A G\n";
    let dir = tempfile::tempdir().unwrap();

    let plain_path = dir.path().join("aa.txt");
    std::fs::write(&plain_path, table).unwrap();

    let gz_path = dir.path().join("aa.txt.gz");
    let mut encoder = GzEncoder::new(std::fs::File::create(&gz_path).unwrap(), Compression::default());
    encoder.write_all(table.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let plain = AncestralIndex::from_file(&plain_path, DuplicatePolicy::LastWins).unwrap();
    let gz = AncestralIndex::from_file(&gz_path, DuplicatePolicy::LastWins).unwrap();

    assert_eq!(plain.len(), 2);
    assert_eq!(gz.len(), 2);
    for (chrom, pos) in [("2", "500"), ("chr2", "600")] {
        assert_eq!(plain.lookup(chrom, pos), gz.lookup(chrom, pos));
    }
}
