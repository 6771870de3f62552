use crate::registry::{BankRegistry, UNKNOWN_BANK};
use crate::util::random_digits;
use rand::Rng;

pub const COUNTRY_CODE: &str = "SA";
pub const IBAN_LENGTH: usize = 24;
pub const BANK_CODE_LENGTH: usize = 2;
pub const ACCOUNT_NUMBER_LENGTH: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IbanDefect {
    InvalidLength,
    InvalidPrefix,
    InvalidCharacters,
    ChecksumMismatch,
}

/// Outcome of a validation call. `bank_name` is empty while the candidate
/// is still structurally broken and holds the registry answer (possibly the
/// unknown-bank sentinel) once the bank code can be extracted.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
    pub bank_name: String,
    pub defect: Option<IbanDefect>,
}

/// Check digits for `bank_code + account_number` under ISO 7064 mod-97-10.
///
/// The rearranged string is reduced digit-by-digit, so the ~30-digit
/// intermediate never has to exist as an integer.
pub fn compute_check_digits(bank_code: &str, account_number: &str) -> Result<String, String> {
    if bank_code.len() != BANK_CODE_LENGTH
        || !bank_code.chars().all(|ch| ch.is_ascii_digit())
    {
        return Err(format!(
            "bank code must be {} digits",
            BANK_CODE_LENGTH
        ));
    }
    if account_number.len() != ACCOUNT_NUMBER_LENGTH
        || !account_number.chars().all(|ch| ch.is_ascii_digit())
    {
        return Err(format!(
            "account number must be {} digits",
            ACCOUNT_NUMBER_LENGTH
        ));
    }

    let combined = format!("{}{}{}00", bank_code, account_number, COUNTRY_CODE);
    let remainder = mod97(&combined)?;
    Ok(format!("{:02}", 98 - remainder))
}

/// Draws an 18-digit account number and assembles a checksum-valid IBAN.
/// Not cryptographically secure; the output is test data.
pub fn generate_iban<R: Rng + ?Sized>(rng: &mut R, bank_code: &str) -> Result<String, String> {
    let account_number = random_digits(rng, ACCOUNT_NUMBER_LENGTH);
    let check_digits = compute_check_digits(bank_code, &account_number)?;
    Ok(format!(
        "{}{}{}{}",
        COUNTRY_CODE, check_digits, bank_code, account_number
    ))
}

/// Validates a candidate IBAN. Total over arbitrary input; malformed
/// candidates come back as typed outcomes, never as errors or panics.
pub fn validate_iban(candidate: &str, registry: &BankRegistry) -> ValidationResult {
    let stripped: Vec<char> = candidate.chars().filter(|ch| !ch.is_whitespace()).collect();

    if stripped.len() != IBAN_LENGTH {
        return rejection(
            IbanDefect::InvalidLength,
            format!(
                "IBAN must be {} characters, got {}",
                IBAN_LENGTH,
                stripped.len()
            ),
        );
    }

    let prefix: String = stripped[..2].iter().map(|ch| ch.to_ascii_uppercase()).collect();
    if prefix != COUNTRY_CODE {
        return rejection(
            IbanDefect::InvalidPrefix,
            format!("IBAN must start with country code {}", COUNTRY_CODE),
        );
    }

    if !stripped[2..]
        .iter()
        .all(|ch| ch.is_ascii_digit() || ch.is_ascii_uppercase())
    {
        return rejection(
            IbanDefect::InvalidCharacters,
            "IBAN contains characters outside A-Z0-9 after the prefix".to_string(),
        );
    }

    let body: String = stripped[2..].iter().collect();
    let normalized = format!("{}{}", COUNTRY_CODE, body);
    let bank_code = &normalized[4..6];
    let bank_name = registry.name_for(bank_code).to_string();

    // Move country code + check digits to the end, then reduce mod 97.
    let rearranged = format!("{}{}", &normalized[4..], &normalized[..4]);
    let remainder = match mod97(&rearranged) {
        Ok(remainder) => remainder,
        Err(message) => return rejection(IbanDefect::InvalidCharacters, message),
    };

    if remainder != 1 {
        return ValidationResult {
            is_valid: false,
            message: "IBAN check digits are invalid".to_string(),
            bank_name,
            defect: Some(IbanDefect::ChecksumMismatch),
        };
    }

    let message = if bank_name == UNKNOWN_BANK {
        "IBAN is valid (bank code not recognised)".to_string()
    } else {
        "IBAN is valid".to_string()
    };
    ValidationResult {
        is_valid: true,
        message,
        bank_name,
        defect: None,
    }
}

fn rejection(defect: IbanDefect, message: String) -> ValidationResult {
    ValidationResult {
        is_valid: false,
        message,
        bank_name: String::new(),
        defect: Some(defect),
    }
}

/// Streaming mod 97 over the transliterated form: digits pass through,
/// letters expand to 10..35 before being folded into the remainder.
fn mod97(input: &str) -> Result<u32, String> {
    let mut remainder: u32 = 0;
    for ch in input.chars() {
        let chunk = if ch.is_ascii_digit() {
            ch.to_string()
        } else if ch.is_ascii_alphabetic() {
            let value = ch.to_ascii_uppercase() as u32 - 'A' as u32 + 10;
            value.to_string()
        } else {
            return Err("IBAN contains invalid character".to_string());
        };
        for digit in chunk.chars() {
            let d = digit
                .to_digit(10)
                .ok_or_else(|| "invalid digit".to_string())?;
            remainder = (remainder * 10 + d) % 97;
        }
    }
    Ok(remainder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn check_digits_match_hand_computed_vectors() {
        // 80 + 000000000000000001 + SA00 -> 80000000000000000001281000,
        // mod 97 = 4, check digits 98 - 4 = 94.
        assert_eq!(
            compute_check_digits("80", "000000000000000001").unwrap(),
            "94"
        );
        assert_eq!(
            compute_check_digits("30", "123456789012345678").unwrap(),
            "95"
        );
        assert_eq!(
            compute_check_digits("80", "000000000000000000").unwrap(),
            "24"
        );
    }

    #[test]
    fn check_digits_are_deterministic() {
        let first = compute_check_digits("50", "111222333444555666").unwrap();
        let second = compute_check_digits("50", "111222333444555666").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn check_digits_reject_malformed_inputs() {
        assert!(compute_check_digits("8", "000000000000000001").is_err());
        assert!(compute_check_digits("8A", "000000000000000001").is_err());
        assert!(compute_check_digits("80", "123").is_err());
        assert!(compute_check_digits("80", "00000000000000000X").is_err());
    }

    #[test]
    fn generated_iban_round_trips_for_every_bank() {
        let registry = BankRegistry::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for (name, code) in registry.entries() {
            let iban = generate_iban(&mut rng, code).unwrap();
            assert_eq!(iban.len(), IBAN_LENGTH);
            let result = validate_iban(&iban, &registry);
            assert!(result.is_valid, "{} failed: {}", iban, result.message);
            assert_eq!(result.bank_name, *name);
            assert_eq!(result.defect, None);
        }
    }

    #[test]
    fn known_iban_validates() {
        let registry = BankRegistry::builtin();
        let result = validate_iban("SA9480000000000000000001", &registry);
        assert!(result.is_valid);
        assert_eq!(result.bank_name, "Saudi National Bank");
    }

    #[test]
    fn whitespace_and_prefix_case_are_normalized() {
        let registry = BankRegistry::builtin();
        let grouped = "sa94 8000 0000 0000 0000 0001";
        let result = validate_iban(grouped, &registry);
        assert!(result.is_valid, "{}", result.message);
        assert_eq!(result.bank_name, "Saudi National Bank");
    }

    #[test]
    fn boundary_candidates_are_rejected_with_typed_defects() {
        let registry = BankRegistry::builtin();

        let empty = validate_iban("", &registry);
        assert_eq!(empty.defect, Some(IbanDefect::InvalidLength));
        assert!(empty.bank_name.is_empty());

        let short = validate_iban("SA948000000000000000000", &registry);
        assert_eq!(short.defect, Some(IbanDefect::InvalidLength));

        let long = validate_iban("SA94800000000000000000011", &registry);
        assert_eq!(long.defect, Some(IbanDefect::InvalidLength));

        let wrong_country = validate_iban("QA9480000000000000000001", &registry);
        assert_eq!(wrong_country.defect, Some(IbanDefect::InvalidPrefix));

        let lowercase_body = validate_iban("sa94aa000000000000000001", &registry);
        assert_eq!(lowercase_body.defect, Some(IbanDefect::InvalidCharacters));

        let symbol = validate_iban("SA94-800000000000000001#", &registry);
        assert!(!symbol.is_valid);
    }

    #[test]
    fn altered_digit_breaks_the_checksum() {
        let registry = BankRegistry::builtin();
        let result = validate_iban("SA9480000000000000000002", &registry);
        assert!(!result.is_valid);
        assert_eq!(result.defect, Some(IbanDefect::ChecksumMismatch));
        // Structure was fine, so the bank is still reported.
        assert_eq!(result.bank_name, "Saudi National Bank");
    }

    #[test]
    fn unknown_bank_code_is_informational_not_fatal() {
        let registry = BankRegistry::builtin();
        let check = compute_check_digits("99", "000000000000000001").unwrap();
        let iban = format!("SA{}99000000000000000001", check);
        let result = validate_iban(&iban, &registry);
        assert!(result.is_valid);
        assert_eq!(result.bank_name, UNKNOWN_BANK);
    }
}
