use super::Outcome;
use crate::mappings::{Divisions, SecurityFinding};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionFindings {
    pub division: String,
    /// Most severe first; scanner order is kept within a severity.
    pub findings: Vec<SecurityFinding>,
}

/// One findings table per scanned division, in source order.
///
/// An empty extract means the scan did not run. A division that is present
/// with no findings was scanned clean and keeps its (empty) table.
pub fn aggregate(scan: &Divisions<Vec<SecurityFinding>>) -> Outcome<Vec<DivisionFindings>> {
    if scan.is_empty() {
        return Outcome::NotRun;
    }

    let divisions: Vec<DivisionFindings> = scan
        .iter()
        .map(|(division, findings)| {
            let mut findings = findings.clone();
            findings.sort_by_key(|finding| finding.severity);
            DivisionFindings {
                division: division.to_string(),
                findings,
            }
        })
        .collect();

    tracing::debug!(
        divisions = divisions.len(),
        findings = divisions.iter().map(|d| d.findings.len()).sum::<usize>(),
        "security findings grouped"
    );

    Outcome::RanWithData(divisions)
}
