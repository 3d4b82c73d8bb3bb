//! # Genome Decoder
//!
//! Decodes raw genotype reports (four-column tab-separated marker files, as
//! downloaded from consumer genotyping services) into summary statistics and
//! a small panel of hardcoded variant interpretations.
//!
//! ## Features
//!
//! - Single-pass parsing with per-chromosome and per-genotype tallies
//! - Permissive handling of comments, headers, and malformed rows
//! - Transparent reading of gzipped downloads
//! - Karyotype-ordered chromosome distribution with proportional bars
//! - Homozygous/heterozygous split and top-genotype ranking
//! - Notable-marker lookup including joint APOE haplotype resolution
//! - Plain-text or JSON export of condensed statistics

pub mod analysis;
pub mod interpret;
pub mod output;
pub mod parser;
pub mod types;

// Re-export key types
pub use analysis::{percent, sorted_chromosomes, top_genotypes, zygosity_split, ZygositySplit};
pub use interpret::{ApoeStatus, InterpretationReport, MarkerFinding, VariantInterpreter};
pub use output::{ExportFormat, ReportGenerator};
pub use parser::{GenomeParser, GenomeScan};
pub use types::{Position, SnpRecord, Zygosity, NO_CALL};
