use serde::Serialize;

/// An amount of some token or currency, kept as the decimal string the
/// backend sent so display code can format it without float rounding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenAmount {
    #[serde(rename = "value")]
    raw_value: String,
    pub currency: String,
}

impl TokenAmount {
    pub fn new(value: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            raw_value: value.into(),
            currency: currency.into(),
        }
    }

    /// Parsed value. Non-numeric strings yield `NaN`.
    pub fn value(&self) -> f64 {
        self.raw_value.trim().parse().unwrap_or(f64::NAN)
    }

    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }
}

impl Default for TokenAmount {
    fn default() -> Self {
        Self::new("0.0", "")
    }
}
