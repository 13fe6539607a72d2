use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ReconError;

/// Engine configuration: the static currency rate table and the
/// internal-vendor marker list.
///
/// Both are process-wide constants in practice, but they are carried as
/// explicit values so tests (and unusual deployments) can substitute
/// alternate tables without global state.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Currency all monetary values are normalized to.
    #[serde(default = "default_reference_currency")]
    pub reference_currency: String,
    /// Source currency → reference currency multiplier.
    #[serde(default = "default_rates")]
    pub rates: BTreeMap<String, f64>,
    /// Case-insensitive vendor-name substrings marking internal-group vendors.
    #[serde(default = "default_markers")]
    pub internal_vendor_markers: Vec<String>,
}

fn default_name() -> String {
    "Open PO Analysis".into()
}

fn default_reference_currency() -> String {
    "EUR".into()
}

fn default_rates() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("USD".into(), 0.93),
        ("GBP".into(), 1.2),
        ("INR".into(), 0.011),
        ("JPY".into(), 0.0061),
    ])
}

fn default_markers() -> Vec<String> {
    vec!["SCHNEIDER".into(), "WUXI".into()]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            reference_currency: default_reference_currency(),
            rates: default_rates(),
            internal_vendor_markers: default_markers(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: EngineConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.reference_currency.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "reference_currency must not be empty".into(),
            ));
        }

        for (code, rate) in &self.rates {
            if code.trim().is_empty() {
                return Err(ReconError::ConfigValidation(
                    "rate table contains an empty currency code".into(),
                ));
            }
            if !rate.is_finite() || *rate <= 0.0 {
                return Err(ReconError::ConfigValidation(format!(
                    "rate for '{code}' must be a positive number, got {rate}"
                )));
            }
            if code == &self.reference_currency {
                return Err(ReconError::ConfigValidation(format!(
                    "rate table must not contain the reference currency '{code}'"
                )));
            }
        }

        if self.internal_vendor_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(ReconError::ConfigValidation(
                "internal_vendor_markers contains an empty marker".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
