use crate::iban::IBAN_LENGTH;
use crate::models::IbanRecord;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct CorruptSummary {
    pub total_records: usize,
    pub corrupted_records: usize,
    pub truncated_tail: usize,
    pub appended_digit: usize,
    pub swapped_country: usize,
    pub injected_symbol: usize,
    pub altered_account_digit: usize,
    pub bumped_check_digits: usize,
}

impl CorruptSummary {
    pub fn new() -> Self {
        Self {
            total_records: 0,
            corrupted_records: 0,
            truncated_tail: 0,
            appended_digit: 0,
            swapped_country: 0,
            injected_symbol: 0,
            altered_account_digit: 0,
            bumped_check_digits: 0,
        }
    }
}

/// Defect classes. Each one is guaranteed to make the row fail validation:
/// the length edits break the length check, the prefix/symbol edits break
/// the structural checks, and a single-digit edit always shifts the mod-97
/// residue because 97 never divides d * 10^k for d in 1..=9.
#[derive(Debug, Clone, Copy)]
enum Corruption {
    TruncateTail,
    AppendDigit,
    SwapCountry,
    InjectSymbol,
    AlterAccountDigit,
    BumpCheckDigits,
}

pub fn corrupt_csv(
    input: &Path,
    output: &Path,
    error_rate: f64,
    seed: u64,
) -> Result<CorruptSummary, String> {
    if !(0.0..=1.0).contains(&error_rate) {
        return Err("error_rate must be 0..1".to_string());
    }

    let mut reader = csv::Reader::from_path(input).map_err(|err| err.to_string())?;
    let mut records: Vec<IbanRecord> = Vec::new();
    for result in reader.deserialize() {
        let record: IbanRecord = result.map_err(|err| err.to_string())?;
        records.push(record);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let summary = corrupt_records(&mut records, error_rate, &mut rng);

    let mut writer = csv::Writer::from_path(output).map_err(|err| err.to_string())?;
    for record in records {
        writer.serialize(record).map_err(|err| err.to_string())?;
    }
    writer.flush().map_err(|err| err.to_string())?;

    Ok(summary)
}

pub fn corrupt_records<R: Rng + ?Sized>(
    records: &mut [IbanRecord],
    error_rate: f64,
    rng: &mut R,
) -> CorruptSummary {
    let mut summary = CorruptSummary::new();
    for record in records.iter_mut() {
        summary.total_records += 1;
        if !is_corruptible(&record.iban) {
            continue;
        }
        if !rng.gen_bool(error_rate) {
            continue;
        }
        let corruption = pick_corruption(rng);
        apply_corruption(&mut record.iban, corruption, rng, &mut summary);
        summary.corrupted_records += 1;
    }
    summary
}

// The edits below index into the string, so only touch rows that still
// have the expected 24-character digit-body shape.
fn is_corruptible(iban: &str) -> bool {
    iban.len() == IBAN_LENGTH
        && iban.is_ascii()
        && iban[2..].chars().all(|ch| ch.is_ascii_digit())
}

fn pick_corruption<R: Rng + ?Sized>(rng: &mut R) -> Corruption {
    let options = [
        Corruption::TruncateTail,
        Corruption::AppendDigit,
        Corruption::SwapCountry,
        Corruption::InjectSymbol,
        Corruption::AlterAccountDigit,
        Corruption::BumpCheckDigits,
    ];
    *options.choose(rng).unwrap_or(&Corruption::TruncateTail)
}

fn apply_corruption<R: Rng + ?Sized>(
    iban: &mut String,
    corruption: Corruption,
    rng: &mut R,
    summary: &mut CorruptSummary,
) {
    match corruption {
        Corruption::TruncateTail => {
            iban.pop();
            summary.truncated_tail += 1;
        }
        Corruption::AppendDigit => {
            iban.push(char::from(b'0' + rng.gen_range(0..10u8)));
            summary.appended_digit += 1;
        }
        Corruption::SwapCountry => {
            iban.replace_range(0..2, "ZZ");
            summary.swapped_country += 1;
        }
        Corruption::InjectSymbol => {
            let idx = rng.gen_range(2..IBAN_LENGTH);
            iban.replace_range(idx..idx + 1, "-");
            summary.injected_symbol += 1;
        }
        Corruption::AlterAccountDigit => {
            let idx = rng.gen_range(6..IBAN_LENGTH);
            let old = iban.as_bytes()[idx] - b'0';
            let bumped = (old + rng.gen_range(1..10u8)) % 10;
            let replacement = char::from(b'0' + bumped);
            iban.replace_range(idx..idx + 1, &replacement.to_string());
            summary.altered_account_digit += 1;
        }
        Corruption::BumpCheckDigits => {
            let current: u32 = iban[2..4].parse().unwrap_or(0);
            let bumped = format!("{:02}", (current + 1) % 100);
            iban.replace_range(2..4, &bumped);
            summary.bumped_check_digits += 1;
        }
    }
}
