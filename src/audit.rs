use crate::iban::{validate_iban, IbanDefect};
use crate::registry::{BankRegistry, UNKNOWN_BANK};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueLevel {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct AuditIssue {
    pub level: IssueLevel,
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct AuditReport {
    pub total_records: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    pub unknown_bank_records: usize,
    pub length_defects: usize,
    pub prefix_defects: usize,
    pub character_defects: usize,
    pub checksum_defects: usize,
    pub issues: Vec<AuditIssue>,
}

impl AuditReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.level == IssueLevel::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.level == IssueLevel::Warning)
            .count()
    }
}

/// Audit input only needs the `iban` column, so hand-written single-column
/// files audit the same way as generator output.
#[derive(Debug, Deserialize)]
struct AuditRow {
    iban: String,
}

pub fn audit_csv(path: &Path, registry: &BankRegistry) -> Result<AuditReport, String> {
    let mut reader = csv::Reader::from_path(path).map_err(|err| err.to_string())?;
    let mut ibans = Vec::new();
    for result in reader.deserialize() {
        let row: AuditRow = result.map_err(|err| err.to_string())?;
        ibans.push(row.iban);
    }
    Ok(audit_records(&ibans, registry))
}

pub fn audit_records(ibans: &[String], registry: &BankRegistry) -> AuditReport {
    let mut report = AuditReport {
        total_records: 0,
        valid_records: 0,
        invalid_records: 0,
        unknown_bank_records: 0,
        length_defects: 0,
        prefix_defects: 0,
        character_defects: 0,
        checksum_defects: 0,
        issues: Vec::new(),
    };

    for (idx, candidate) in ibans.iter().enumerate() {
        let row = idx + 1;
        report.total_records += 1;
        let result = validate_iban(candidate, registry);

        if result.bank_name == UNKNOWN_BANK {
            report.unknown_bank_records += 1;
            report.issues.push(AuditIssue {
                level: IssueLevel::Warning,
                row,
                message: "bank code is not in the registry".to_string(),
            });
        }

        if result.is_valid {
            report.valid_records += 1;
            continue;
        }

        report.invalid_records += 1;
        match result.defect {
            Some(IbanDefect::InvalidLength) => report.length_defects += 1,
            Some(IbanDefect::InvalidPrefix) => report.prefix_defects += 1,
            Some(IbanDefect::InvalidCharacters) => report.character_defects += 1,
            Some(IbanDefect::ChecksumMismatch) => report.checksum_defects += 1,
            None => {}
        }
        report.issues.push(AuditIssue {
            level: IssueLevel::Error,
            row,
            message: result.message,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corrupt::corrupt_records;
    use crate::generator::{generate_records, GeneratorConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn fresh_batch_audits_clean() {
        let registry = BankRegistry::builtin();
        let config = GeneratorConfig {
            count: 20,
            bank_code: None,
        };
        let records = generate_records(&config, &registry, 13).unwrap();
        let ibans: Vec<String> = records.iter().map(|r| r.iban.clone()).collect();

        let report = audit_records(&ibans, &registry);
        assert_eq!(report.total_records, 20);
        assert_eq!(report.valid_records, 20);
        assert_eq!(report.invalid_records, 0);
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn corrupted_batch_is_reported_per_defect() {
        let registry = BankRegistry::builtin();
        let config = GeneratorConfig {
            count: 25,
            bank_code: None,
        };
        let mut records = generate_records(&config, &registry, 17).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let summary = corrupt_records(&mut records, 1.0, &mut rng);
        let ibans: Vec<String> = records.iter().map(|r| r.iban.clone()).collect();

        let report = audit_records(&ibans, &registry);
        assert_eq!(report.invalid_records, summary.corrupted_records);
        assert_eq!(report.valid_records, 0);
        assert_eq!(
            report.length_defects
                + report.prefix_defects
                + report.character_defects
                + report.checksum_defects,
            report.invalid_records
        );
        assert_eq!(report.error_count(), report.invalid_records);
    }

    #[test]
    fn unknown_bank_is_a_warning_not_an_error() {
        let registry = BankRegistry::builtin();
        let check = crate::iban::compute_check_digits("99", "000000000000000001").unwrap();
        let ibans = vec![format!("SA{}99000000000000000001", check)];

        let report = audit_records(&ibans, &registry);
        assert_eq!(report.valid_records, 1);
        assert_eq!(report.unknown_bank_records, 1);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 1);
    }
}
