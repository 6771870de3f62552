use std::collections::HashMap;

pub const UNKNOWN_BANK: &str = "Unknown bank";

/// Canonical bank-code table. Codes are arbitrary identifiers, not
/// checksummed; uniqueness per bank name keeps the reverse map well-defined.
const BUILTIN_BANKS: &[(&str, &str)] = &[
    ("Saudi National Bank", "80"),
    ("Al Rajhi Bank", "30"),
    ("Riyad Bank", "50"),
    ("Banque Saudi Fransi", "55"),
    ("Saudi Awwal Bank", "60"),
    ("Arab National Bank", "65"),
    ("Bank AlJazira", "35"),
    ("Bank Albilad", "70"),
    ("Saudi Investment Bank", "45"),
    ("Alinma Bank", "75"),
];

/// Immutable name <-> code mapping, built once and passed to callers.
/// Duplicate codes resolve to the entry inserted last.
#[derive(Debug, Clone)]
pub struct BankRegistry {
    entries: Vec<(String, String)>,
    code_by_name: HashMap<String, String>,
    name_by_code: HashMap<String, String>,
}

impl BankRegistry {
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_BANKS)
    }

    pub fn from_entries(entries: &[(&str, &str)]) -> Self {
        let mut code_by_name = HashMap::with_capacity(entries.len());
        let mut name_by_code = HashMap::with_capacity(entries.len());
        let mut ordered = Vec::with_capacity(entries.len());
        for (name, code) in entries {
            code_by_name.insert(name.to_string(), code.to_string());
            name_by_code.insert(code.to_string(), name.to_string());
            ordered.push((name.to_string(), code.to_string()));
        }
        Self {
            entries: ordered,
            code_by_name,
            name_by_code,
        }
    }

    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.code_by_name.get(name).map(String::as_str)
    }

    /// Reverse lookup; unknown codes resolve to the sentinel name.
    pub fn name_for(&self, code: &str) -> &str {
        self.name_by_code
            .get(code)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_BANK)
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.name_by_code.contains_key(code)
    }

    /// Entries in table order, for listing and for random bank selection.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
