use serde::{Deserialize, Serialize};

/// One generated IBAN sample as written to the batch CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbanRecord {
    pub sample_id: String,
    pub bank_code: String,
    pub bank_name: String,
    pub iban: String,
    pub generated_at: String,
}
