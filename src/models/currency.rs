//! Currency models

use std::fmt;
use serde::{Deserialize, Serialize};

const MIN_CODE_LEN: usize = 3;
const MAX_CODE_LEN: usize = 8;

/// Upper-cased currency code such as `USD` or `XAU`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse user or API input into a code.
    /// Input is trimmed and upper-cased; it must be 3-8 ASCII alphanumerics.
    pub fn parse(input: &str) -> Result<Self, String> {
        let code = input.trim().to_uppercase();

        if code.len() < MIN_CODE_LEN || code.len() > MAX_CODE_LEN {
            return Err(format!(
                "Currency code must be {}-{} characters long, but got '{}' ({} chars)",
                MIN_CODE_LEN, MAX_CODE_LEN, code, code.len()
            ));
        }

        if code.chars().any(|c| !c.is_ascii_alphanumeric()) {
            return Err(format!(
                "Currency code must only contain letters and digits, but got '{}'",
                code
            ));
        }

        Ok(CurrencyCode(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CurrencyCode::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// A currency as listed in the catalog. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: CurrencyCode,
    pub name: String,
}

impl Currency {
    pub fn new(code: CurrencyCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.name)
    }
}
