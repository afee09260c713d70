use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Pallet, limit and lumber settings for one packing run. Units are inches
/// and pounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pallet_length: f64,
    pub pallet_width: f64,
    pub max_height: f64,
    pub max_weight: f64,
    /// Clearance kept free along every pallet edge.
    pub safety_gap: f64,
    /// Distance between cradle points along an item.
    pub framing_spacing: f64,
    pub lumber_width: f64,
    pub lumber_thick: f64,
    pub add_bracing: bool,
    pub allow_vertical: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pallet_length: 250.0,
            pallet_width: 84.0,
            max_height: 80.0,
            max_weight: 2500.0,
            safety_gap: 1.0,
            framing_spacing: 48.0,
            // Actual section of a nominal 2x4.
            lumber_width: 3.5,
            lumber_thick: 1.5,
            add_bracing: true,
            allow_vertical: true,
        }
    }
}

impl Config {
    pub fn effective_width(&self) -> f64 {
        self.pallet_width - 2.0 * self.safety_gap
    }

    pub fn effective_length(&self) -> f64 {
        self.pallet_length - 2.0 * self.safety_gap
    }

    /// Top surface of the base runners, where the first layer starts.
    pub fn base_height(&self) -> f64 {
        self.lumber_thick
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("pallet_length", self.pallet_length),
            ("pallet_width", self.pallet_width),
            ("max_height", self.max_height),
            ("max_weight", self.max_weight),
            ("framing_spacing", self.framing_spacing),
            ("lumber_width", self.lumber_width),
            ("lumber_thick", self.lumber_thick),
        ];
        for (field, value) in positive.into_iter().chain([("safety_gap", self.safety_gap)]) {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.safety_gap < 0.0 {
            return Err(ConfigError::Negative {
                field: "safety_gap",
                value: self.safety_gap,
            });
        }
        if self.effective_width() <= 0.0 || self.effective_length() <= 0.0 {
            return Err(ConfigError::GapTooLarge {
                gap: self.safety_gap,
                width: self.pallet_width,
                length: self.pallet_length,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.effective_width(), 82.0);
        assert_eq!(config.effective_length(), 248.0);
        assert_eq!(config.base_height(), 1.5);
    }

    #[test]
    fn test_rejects_zero_lumber() {
        let config = Config {
            lumber_thick: 0.0,
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "lumber_thick",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_nan() {
        let config = Config {
            max_weight: f64::NAN,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite {
                field: "max_weight",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_negative_gap() {
        let config = Config {
            safety_gap: -1.0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Negative { .. })));
    }

    #[test]
    fn test_rejects_gap_swallowing_pallet() {
        let config = Config {
            safety_gap: 42.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapTooLarge { .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"pallet_width": 96, "add_bracing": false}"#).unwrap();
        assert_eq!(config.pallet_width, 96.0);
        assert!(!config.add_bracing);
        assert_eq!(config.pallet_length, 250.0);
    }
}
