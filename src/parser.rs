use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::types::{Position, SnpRecord, NO_CALL};

/// Column header of the marker-identifier column; marks the header line
const HEADER_FIRST_FIELD: &str = "rsid";

/// Aggregated result of one pass over a raw genotype report
#[derive(Debug, Default)]
pub struct GenomeScan {
    /// Every parsed record, in file order
    pub records: Vec<SnpRecord>,
    /// Markers seen per chromosome label
    pub chromosome_counts: HashMap<String, u64>,
    /// Occurrences per genotype call
    pub genotype_counts: HashMap<String, u64>,
    /// Genotypes in the order they were first observed, for deterministic
    /// tie-breaking when ranking by frequency
    pub genotype_order: Vec<String>,
    pub total_snps: u64,
    pub no_calls: u64,
    /// Lines dropped for not having exactly four fields; diagnostic only,
    /// never part of any statistic
    pub skipped_lines: u64,
}

impl GenomeScan {
    /// Markers with an actual genotype call
    pub fn genotyped(&self) -> u64 {
        self.total_snps - self.no_calls
    }

    fn add_record(&mut self, record: SnpRecord) {
        *self
            .chromosome_counts
            .entry(record.chromosome.clone())
            .or_insert(0) += 1;

        if let Some(count) = self.genotype_counts.get_mut(&record.genotype) {
            *count += 1;
        } else {
            self.genotype_counts.insert(record.genotype.clone(), 1);
            self.genotype_order.push(record.genotype.clone());
        }

        self.total_snps += 1;
        if record.genotype == NO_CALL {
            self.no_calls += 1;
        }

        self.records.push(record);
    }
}

/// Parser for four-column tab-separated raw genotype reports
pub struct GenomeParser;

impl GenomeParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a genotype file from disk. Missing or unreadable files are
    /// fatal and surface to the caller unchanged.
    pub fn parse(&self, path: &Path) -> Result<GenomeScan> {
        let reader = open_genome_file(path)?;
        self.parse_reader(reader)
    }

    /// Parse an already-open line source.
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> Result<GenomeScan> {
        let mut scan = GenomeScan::default();

        let mut line = String::new();
        while reader.read_line(&mut line)? > 0 {
            self.parse_line(line.trim(), &mut scan);
            line.clear();
        }

        Ok(scan)
    }

    fn parse_line(&self, line: &str, scan: &mut GenomeScan) {
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields[0] == HEADER_FIRST_FIELD {
            return;
        }
        if fields.len() != 4 {
            // Permissive parse: malformed rows are dropped, not reported
            scan.skipped_lines += 1;
            debug!("Skipping malformed line with {} fields", fields.len());
            return;
        }

        scan.add_record(SnpRecord {
            rsid: fields[0].to_string(),
            chromosome: fields[1].to_string(),
            position: Position::parse(fields[2]),
            genotype: fields[3].to_string(),
        });
    }
}

/// Open a genotype file for line-wise reading, transparently decompressing
/// gzipped downloads.
pub fn open_genome_file(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open genome file: {}", path.display()))?;

    let reader: Box<dyn Read> = if path.extension().map(|e| e == "gz").unwrap_or(false) {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    Ok(Box::new(BufReader::new(reader)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# This data file generated by 23andMe at: Mon Jan 01 00:00:00 2024
rsid\tchromosome\tposition\tgenotype
rs548049170\t1\t69869\tTT
rs9283150\t1\t565508\tAA
rs116587930\t2\t727841\tGG
rs3131972\t2\t752721\tAG
rs12184325\tX\t743968\t--
broken\tline
rs4477212\tMT\tUn_gl000211\tAT
";

    fn scan_of(input: &str) -> GenomeScan {
        GenomeParser::new()
            .parse_reader(input.as_bytes())
            .expect("sample input parses")
    }

    #[test]
    fn test_counts_and_invariants() {
        let scan = scan_of(SAMPLE);

        assert_eq!(scan.total_snps, 6);
        assert_eq!(scan.no_calls, 1);
        assert_eq!(scan.genotyped(), 5);
        assert_eq!(scan.skipped_lines, 1);

        let chromosome_total: u64 = scan.chromosome_counts.values().sum();
        let genotype_total: u64 = scan.genotype_counts.values().sum();
        assert_eq!(chromosome_total, scan.total_snps);
        assert_eq!(genotype_total, scan.total_snps);
        assert!(scan.no_calls <= scan.total_snps);
    }

    #[test]
    fn test_short_line_is_dropped_silently() {
        let scan = scan_of("rs1\t1\t100\n");
        assert_eq!(scan.total_snps, 0);
        assert_eq!(scan.skipped_lines, 1);
        assert!(scan.records.is_empty());
        assert!(scan.chromosome_counts.is_empty());
    }

    #[test]
    fn test_position_fields() {
        let scan = scan_of("rs1\t1\t12345\tAA\nrs2\t1\tUn_gl000211\tCC\n");
        assert_eq!(scan.records[0].position, Position::Base(12345));
        assert_eq!(
            scan.records[1].position,
            Position::Label("Un_gl000211".to_string())
        );
    }

    #[test]
    fn test_header_comments_and_blanks_skipped() {
        let scan = scan_of("# comment\nrsid\tchromosome\tposition\tgenotype\n\n");
        assert_eq!(scan.total_snps, 0);
        assert_eq!(scan.skipped_lines, 0);
    }

    #[test]
    fn test_empty_input() {
        let scan = scan_of("");
        assert_eq!(scan.total_snps, 0);
        assert_eq!(scan.genotyped(), 0);
    }

    #[test]
    fn test_genotype_first_seen_order() {
        let scan = scan_of("rs1\t1\t1\tAA\nrs2\t1\t2\tCC\nrs3\t1\t3\tAA\n");
        assert_eq!(scan.genotype_order, vec!["AA", "CC"]);
        assert_eq!(scan.genotype_counts["AA"], 2);
    }
}
