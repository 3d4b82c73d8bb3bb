use serde::{Deserialize, Serialize};
use std::fmt;

/// Genotype sentinel for markers the assay could not call
pub const NO_CALL: &str = "--";

/// Genomic coordinate as it appears in the source file
///
/// Positions are plain base-pair integers on ordinary chromosomes, but
/// unplaced contigs put labels like "Un_gl000211" in the position column,
/// so the raw string is kept whenever the field is not purely numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Base(u64),
    Label(String),
}

impl Position {
    pub fn parse(field: &str) -> Self {
        if !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(bp) = field.parse::<u64>() {
                return Position::Base(bp);
            }
        }
        Position::Label(field.to_string())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Base(bp) => write!(f, "{}", bp),
            Position::Label(label) => f.write_str(label),
        }
    }
}

/// A single parsed marker row from a raw genotype report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnpRecord {
    pub rsid: String,
    pub chromosome: String,
    pub position: Position,
    pub genotype: String,
}

/// Zygosity of a called two-allele genotype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zygosity {
    Homozygous,
    Heterozygous,
}

impl Zygosity {
    /// Classify a genotype call. No-calls and calls that are not exactly
    /// two characters long are left unclassified.
    pub fn classify(genotype: &str) -> Option<Self> {
        if genotype == NO_CALL {
            return None;
        }

        let mut chars = genotype.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) => {
                if a == b {
                    Some(Zygosity::Homozygous)
                } else {
                    Some(Zygosity::Heterozygous)
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parse() {
        assert_eq!(Position::parse("12345"), Position::Base(12345));
        assert_eq!(
            Position::parse("Un_gl000211"),
            Position::Label("Un_gl000211".to_string())
        );
        assert_eq!(Position::parse(""), Position::Label(String::new()));
    }

    #[test]
    fn test_zygosity_classification() {
        assert_eq!(Zygosity::classify("AA"), Some(Zygosity::Homozygous));
        assert_eq!(Zygosity::classify("AG"), Some(Zygosity::Heterozygous));
        assert_eq!(Zygosity::classify(NO_CALL), None);
        assert_eq!(Zygosity::classify("A"), None);
        assert_eq!(Zygosity::classify("AAT"), None);
    }
}
