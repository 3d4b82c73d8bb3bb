use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

use crate::types::{Position, SnpRecord};

/// rsid of the APOE marker carrying the ε4-defining substitution
pub const APOE_RS429358: &str = "rs429358";
/// rsid of the APOE marker carrying the ε2-defining substitution
pub const APOE_RS7412: &str = "rs7412";

lazy_static! {
    /// Gene/trait labels for the markers worth calling out in a report
    static ref NOTABLE_MARKERS: HashMap<&'static str, &'static str> = {
        let mut markers = HashMap::new();
        markers.insert("rs1815739", "ACTN3 gene (muscle performance)");
        markers.insert("rs1800497", "DRD2 gene (dopamine receptor)");
        markers.insert("rs4680", "COMT gene (dopamine metabolism)");
        markers.insert("rs1799971", "OPRM1 gene (opioid receptor)");
        markers.insert("rs9939609", "FTO gene (obesity risk)");
        markers.insert("rs7903146", "TCF7L2 gene (diabetes risk)");
        markers.insert(APOE_RS429358, "APOE gene variant (Alzheimer's risk)");
        markers.insert(APOE_RS7412, "APOE gene variant (Alzheimer's risk)");
        markers
    };

    /// Per-genotype readings for each notable marker outside the APOE pair
    static ref GENOTYPE_READINGS: HashMap<&'static str, HashMap<&'static str, &'static str>> = {
        let mut readings = HashMap::new();

        let mut actn3 = HashMap::new();
        actn3.insert(
            "CC",
            "RR genotype - Enhanced power/sprint performance, fast-twitch muscle fibers",
        );
        actn3.insert(
            "CT",
            "RX genotype - Mixed muscle fiber type, intermediate performance",
        );
        actn3.insert(
            "TT",
            "XX genotype - Enhanced endurance, higher injury risk, slower sprint performance",
        );
        readings.insert("rs1815739", actn3);

        let mut drd2 = HashMap::new();
        drd2.insert("GG", "Normal dopamine receptor (DRD2) density");
        drd2.insert("AG", "Slightly reduced dopamine receptor density");
        drd2.insert(
            "AA",
            "Reduced dopamine receptor density, may affect reward processing",
        );
        readings.insert("rs1800497", drd2);

        let mut comt = HashMap::new();
        comt.insert(
            "GG",
            "Val/Val - High COMT activity, faster dopamine breakdown (\"warrior\" variant)",
        );
        comt.insert("AG", "Val/Met - Intermediate COMT activity");
        comt.insert(
            "AA",
            "Met/Met - Low COMT activity (~75% reduced), slower dopamine breakdown, higher prefrontal dopamine (\"worrier\" variant)",
        );
        readings.insert("rs4680", comt);

        let mut oprm1 = HashMap::new();
        oprm1.insert("AA", "Normal opioid receptor (OPRM1) function");
        oprm1.insert(
            "AG",
            "Altered opioid receptor function, may affect pain sensitivity",
        );
        oprm1.insert(
            "GG",
            "Significantly altered opioid receptor function, higher pain medication requirements",
        );
        readings.insert("rs1799971", oprm1);

        let mut fto = HashMap::new();
        fto.insert("TT", "Lower obesity risk, protective variant");
        fto.insert("AT", "Intermediate obesity risk");
        fto.insert(
            "AA",
            "Higher obesity risk, increased tendency for high sugar/fat intake",
        );
        readings.insert("rs9939609", fto);

        let mut tcf7l2 = HashMap::new();
        tcf7l2.insert("CC", "Lower type 2 diabetes risk");
        tcf7l2.insert("CT", "Moderate type 2 diabetes risk (~1.4x)");
        tcf7l2.insert("TT", "Higher type 2 diabetes risk (~2x)");
        readings.insert("rs7903146", tcf7l2);

        readings
    };
}

/// The six genotype pairings with an established haplotype assignment
fn apoe_haplotype(rs429358: &str, rs7412: &str) -> Option<(&'static str, &'static str)> {
    match (rs429358, rs7412) {
        ("TT", "TT") => Some(("ε2/ε2", "Lower Alzheimer's risk (protective)")),
        ("TT", "CT") => Some(("ε2/ε3", "Lower than average Alzheimer's risk")),
        ("TT", "CC") => Some(("ε3/ε3", "Average Alzheimer's risk (most common)")),
        ("CT", "CC") => Some(("ε3/ε4", "Moderately increased Alzheimer's risk (~3x)")),
        ("CC", "CC") => Some(("ε4/ε4", "Significantly increased Alzheimer's risk (~12-15x)")),
        ("CT", "CT") => Some(("ε2/ε4", "Variable Alzheimer's risk")),
        _ => None,
    }
}

/// One notable marker located in the scanned records
#[derive(Debug, Clone, Serialize)]
pub struct MarkerFinding {
    pub rsid: String,
    pub label: &'static str,
    pub chromosome: String,
    pub position: Position,
    pub genotype: String,
    /// Absent when the observed genotype has no table entry; that is not
    /// an error condition
    pub interpretation: Option<&'static str>,
}

/// Outcome of the joint APOE lookup over rs429358 and rs7412
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ApoeStatus {
    /// Both markers present and the genotype pair is in the haplotype table
    Typed {
        rs429358: String,
        rs7412: String,
        haplotype: &'static str,
        summary: &'static str,
    },
    /// Both markers present but the pair has no table entry
    Undetermined { rs429358: String, rs7412: String },
    /// Only one of the two markers was in the dataset
    Incomplete,
    /// Neither marker was in the dataset
    Absent,
}

/// Everything the interpreter found in one dataset
#[derive(Debug, Clone, Serialize)]
pub struct InterpretationReport {
    pub findings: Vec<MarkerFinding>,
    pub apoe: ApoeStatus,
}

impl InterpretationReport {
    /// True when none of the notable markers appeared at all
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty() && matches!(self.apoe, ApoeStatus::Absent)
    }
}

/// Looks up a fixed panel of biologically notable markers in a scanned
/// record set
pub struct VariantInterpreter;

impl VariantInterpreter {
    pub fn new() -> Self {
        Self
    }

    /// Collect findings for every notable marker present, in order of first
    /// appearance. A later record for the same rsid replaces the earlier
    /// one. The two APOE markers are held back for joint resolution.
    pub fn interpret(&self, records: &[SnpRecord]) -> InterpretationReport {
        let mut findings: Vec<MarkerFinding> = Vec::new();
        let mut finding_index: HashMap<String, usize> = HashMap::new();
        let mut apoe_calls: HashMap<&'static str, String> = HashMap::new();

        for record in records {
            let label = match NOTABLE_MARKERS.get(record.rsid.as_str()) {
                Some(label) => *label,
                None => continue,
            };

            if record.rsid == APOE_RS429358 {
                apoe_calls.insert(APOE_RS429358, record.genotype.clone());
                continue;
            }
            if record.rsid == APOE_RS7412 {
                apoe_calls.insert(APOE_RS7412, record.genotype.clone());
                continue;
            }

            let finding = MarkerFinding {
                rsid: record.rsid.clone(),
                label,
                chromosome: record.chromosome.clone(),
                position: record.position.clone(),
                genotype: record.genotype.clone(),
                interpretation: GENOTYPE_READINGS
                    .get(record.rsid.as_str())
                    .and_then(|per_genotype| per_genotype.get(record.genotype.as_str()))
                    .copied(),
            };

            match finding_index.get(&record.rsid) {
                Some(&index) => findings[index] = finding,
                None => {
                    finding_index.insert(record.rsid.clone(), findings.len());
                    findings.push(finding);
                }
            }
        }

        InterpretationReport {
            findings,
            apoe: resolve_apoe(&apoe_calls),
        }
    }
}

fn resolve_apoe(calls: &HashMap<&'static str, String>) -> ApoeStatus {
    match (calls.get(APOE_RS429358), calls.get(APOE_RS7412)) {
        (Some(rs429358), Some(rs7412)) => match apoe_haplotype(rs429358, rs7412) {
            Some((haplotype, summary)) => ApoeStatus::Typed {
                rs429358: rs429358.clone(),
                rs7412: rs7412.clone(),
                haplotype,
                summary,
            },
            None => ApoeStatus::Undetermined {
                rs429358: rs429358.clone(),
                rs7412: rs7412.clone(),
            },
        },
        (None, None) => ApoeStatus::Absent,
        _ => ApoeStatus::Incomplete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rsid: &str, chromosome: &str, position: u64, genotype: &str) -> SnpRecord {
        SnpRecord {
            rsid: rsid.to_string(),
            chromosome: chromosome.to_string(),
            position: Position::Base(position),
            genotype: genotype.to_string(),
        }
    }

    #[test]
    fn test_marker_lookup_with_interpretation() {
        let records = vec![
            record("rs1815739", "11", 66560624, "CT"),
            record("rs0000001", "1", 1, "AA"),
        ];
        let report = VariantInterpreter::new().interpret(&records);

        assert_eq!(report.findings.len(), 1);
        let finding = &report.findings[0];
        assert_eq!(finding.rsid, "rs1815739");
        assert_eq!(finding.label, "ACTN3 gene (muscle performance)");
        assert!(finding.interpretation.is_some());
        assert_eq!(report.apoe, ApoeStatus::Absent);
    }

    #[test]
    fn test_unknown_genotype_has_no_interpretation() {
        let records = vec![record("rs4680", "22", 19963748, "--")];
        let report = VariantInterpreter::new().interpret(&records);

        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].interpretation, None);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_apoe_e2_e2() {
        let records = vec![
            record(APOE_RS429358, "19", 45411941, "TT"),
            record(APOE_RS7412, "19", 45412079, "TT"),
        ];
        let report = VariantInterpreter::new().interpret(&records);

        match &report.apoe {
            ApoeStatus::Typed { haplotype, .. } => assert_eq!(*haplotype, "ε2/ε2"),
            other => panic!("unexpected APOE status: {:?}", other),
        }
        // APOE markers are resolved jointly, never listed as findings
        assert!(report.findings.is_empty());
        assert!(!report.is_empty());
    }

    #[test]
    fn test_apoe_e3_e4() {
        let records = vec![
            record(APOE_RS429358, "19", 45411941, "CT"),
            record(APOE_RS7412, "19", 45412079, "CC"),
        ];
        let report = VariantInterpreter::new().interpret(&records);

        match &report.apoe {
            ApoeStatus::Typed { haplotype, .. } => assert_eq!(*haplotype, "ε3/ε4"),
            other => panic!("unexpected APOE status: {:?}", other),
        }
    }

    #[test]
    fn test_apoe_pair_outside_table_is_undetermined() {
        let records = vec![
            record(APOE_RS429358, "19", 45411941, "CC"),
            record(APOE_RS7412, "19", 45412079, "CT"),
        ];
        let report = VariantInterpreter::new().interpret(&records);

        assert_eq!(
            report.apoe,
            ApoeStatus::Undetermined {
                rs429358: "CC".to_string(),
                rs7412: "CT".to_string(),
            }
        );
    }

    #[test]
    fn test_apoe_single_marker_is_incomplete() {
        let records = vec![record(APOE_RS429358, "19", 45411941, "TT")];
        let report = VariantInterpreter::new().interpret(&records);

        assert_eq!(report.apoe, ApoeStatus::Incomplete);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn test_no_notable_markers_found() {
        let records = vec![record("rs0000001", "1", 1, "AA")];
        let report = VariantInterpreter::new().interpret(&records);

        assert!(report.is_empty());
    }

    #[test]
    fn test_later_record_replaces_earlier() {
        let records = vec![
            record("rs9939609", "16", 53786615, "AT"),
            record("rs9939609", "16", 53786615, "TT"),
        ];
        let report = VariantInterpreter::new().interpret(&records);

        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].genotype, "TT");
    }
}
