//! Session policy configuration.
//!
//! One parameter set covers every supported quiz variant. The named presets
//! reproduce the common combinations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Policy knobs for the review state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Review is considered only while accuracy (percent) is below this.
    #[serde(default = "default_review_threshold")]
    pub review_threshold: f64,
    /// Review starts once the pending wrong answers exceed this count.
    #[serde(default = "default_wrong_answer_trigger")]
    pub wrong_answer_trigger: usize,
    /// Total passes through one review pool before giving up on it.
    #[serde(default = "default_max_review_cycles")]
    pub max_review_cycles: u32,
    /// Pause once the session has left review more often than this
    /// (None = never pause).
    #[serde(default)]
    pub repeated_review_limit: Option<u32>,
    /// Reshuffle the bank on exhaustion instead of finishing.
    #[serde(default = "default_cyclic")]
    pub cyclic: bool,
}

fn default_review_threshold() -> f64 {
    80.0
}

fn default_wrong_answer_trigger() -> usize {
    5
}

fn default_max_review_cycles() -> u32 {
    3
}

fn default_cyclic() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Preset::Classic.config()
    }
}

impl SessionConfig {
    /// Check the values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.review_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.review_threshold));
        }
        if self.max_review_cycles == 0 {
            return Err(ConfigError::ZeroReviewCycles);
        }
        Ok(())
    }

    /// Human-readable description of the exhaustion policy.
    pub fn exhaustion_policy(&self) -> &'static str {
        if self.cyclic {
            "reshuffle when every question has been served"
        } else {
            "finish when every question has been served"
        }
    }
}

/// Named policy presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Review below 80 % after more than 5 misses, up to three passes,
    /// endless bank.
    Classic,
    /// Review below 90 % after more than 2 misses, one pass, single-pass
    /// bank, pause after 4 reviews.
    Strict,
    /// Like classic with one pass and a pause after 4 reviews.
    Paced,
    /// Like classic with one pass and no pause.
    Endless,
    /// Random questions with no review at all.
    Drill,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Classic,
        Preset::Strict,
        Preset::Paced,
        Preset::Endless,
        Preset::Drill,
    ];

    pub fn config(self) -> SessionConfig {
        match self {
            Preset::Classic => SessionConfig {
                review_threshold: 80.0,
                wrong_answer_trigger: 5,
                max_review_cycles: 3,
                repeated_review_limit: None,
                cyclic: true,
            },
            Preset::Strict => SessionConfig {
                review_threshold: 90.0,
                wrong_answer_trigger: 2,
                max_review_cycles: 1,
                repeated_review_limit: Some(4),
                cyclic: false,
            },
            Preset::Paced => SessionConfig {
                review_threshold: 80.0,
                wrong_answer_trigger: 5,
                max_review_cycles: 1,
                repeated_review_limit: Some(4),
                cyclic: true,
            },
            Preset::Endless => SessionConfig {
                review_threshold: 80.0,
                wrong_answer_trigger: 5,
                max_review_cycles: 1,
                repeated_review_limit: None,
                cyclic: true,
            },
            // accuracy is never below 0 %, so review never triggers
            Preset::Drill => SessionConfig {
                review_threshold: 0.0,
                wrong_answer_trigger: 0,
                max_review_cycles: 1,
                repeated_review_limit: None,
                cyclic: true,
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Classic => write!(f, "classic"),
            Preset::Strict => write!(f, "strict"),
            Preset::Paced => write!(f, "paced"),
            Preset::Endless => write!(f, "endless"),
            Preset::Drill => write!(f, "drill"),
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(Preset::Classic),
            "strict" => Ok(Preset::Strict),
            "paced" => Ok(Preset::Paced),
            "endless" => Ok(Preset::Endless),
            "drill" => Ok(Preset::Drill),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_classic() {
        let config = SessionConfig::default();
        assert_eq!(config, Preset::Classic.config());
        assert_eq!(config.review_threshold, 80.0);
        assert_eq!(config.wrong_answer_trigger, 5);
        assert!(config.cyclic);
    }

    #[test]
    fn every_preset_validates() {
        for preset in Preset::ALL {
            assert!(preset.config().validate().is_ok(), "{preset} invalid");
        }
    }

    #[test]
    fn preset_display_and_parse() {
        for preset in Preset::ALL {
            assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
        }
        assert_eq!("STRICT".parse::<Preset>().unwrap(), Preset::Strict);
        assert!(matches!(
            "lenient".parse::<Preset>(),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let config = SessionConfig {
            review_threshold: 120.0,
            ..SessionConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange(120.0))
        );

        let config = SessionConfig {
            max_review_cycles: 0,
            ..SessionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroReviewCycles));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"review_threshold": 90.0, "cyclic": false}"#).unwrap();
        assert_eq!(config.review_threshold, 90.0);
        assert_eq!(config.wrong_answer_trigger, 5);
        assert_eq!(config.max_review_cycles, 3);
        assert_eq!(config.repeated_review_limit, None);
        assert!(!config.cyclic);
    }
}
