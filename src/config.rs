use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::Level;

use crate::error::ConfigError;

const DEFAULT_CONFIG_FILE: &str = "wellness";
const ENV_PREFIX: &str = "WELLNESS";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub classifier: ClassifierConfig,
    pub phone: PhoneConfig,
    pub exercise: ExerciseConfig,
    pub volume: VolumeConfig,
    pub session: SessionConfig,
    pub log_level: String,
}

/// Tunable thresholds for the facial state classifier. The defaults are
/// empirical values, not derived ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Mouth aperture above this reads as a yawn.
    pub mar_threshold: f64,
    /// Mean eye aperture below this reads as drowsiness.
    pub ear_threshold: f64,
    /// Normalized inner-brow distance below this reads as a furrowed brow.
    pub brow_threshold: f64,
    /// Horizontal nose-tip spread (normalized units) that counts as shaking.
    pub shake_range: f64,
    pub motion_capacity: usize,
    pub shake_min_samples: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneConfig {
    pub confidence: f32,
    pub class_id: u32,
}

/// Pixel offsets between hip and knee used by the squat counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseConfig {
    pub down_offset: f32,
    pub up_offset: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    pub high_percent: u8,
}

/// Sessions untouched for longer than `idle_secs` are dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub idle_secs: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            phone: PhoneConfig::default(),
            exercise: ExerciseConfig::default(),
            volume: VolumeConfig::default(),
            session: SessionConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            mar_threshold: 0.6,
            ear_threshold: 0.22,
            brow_threshold: 0.21,
            shake_range: 0.08,
            motion_capacity: 5,
            shake_min_samples: 3,
        }
    }
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            confidence: 0.4,
            // COCO "cell phone"
            class_id: 67,
        }
    }
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            down_offset: 50.0,
            up_offset: 100.0,
        }
    }
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self { high_percent: 80 }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { idle_secs: 900 }
    }
}

impl Configuration {
    /// Layers an optional config file and `WELLNESS__*` environment
    /// variables over the built-in defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let file = path.unwrap_or(DEFAULT_CONFIG_FILE);
        let configuration: Configuration = config::Config::builder()
            .add_source(config::Config::try_from(&Configuration::default())?)
            .add_source(config::File::with_name(file).required(path.is_some()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let classifier = &self.classifier;
        if classifier.motion_capacity == 0 {
            return Err(ConfigError::Invalid(
                "classifier.motion_capacity must be greater than 0".to_string(),
            ));
        }
        if classifier.shake_min_samples == 0 {
            return Err(ConfigError::Invalid(
                "classifier.shake_min_samples must be greater than 0".to_string(),
            ));
        }
        if classifier.shake_range < 0.0 || classifier.shake_range > 1.0 {
            return Err(ConfigError::Invalid(
                "classifier.shake_range must be between 0.0 and 1.0".to_string(),
            ));
        }
        if classifier.mar_threshold <= 0.0
            || classifier.ear_threshold <= 0.0
            || classifier.brow_threshold <= 0.0
        {
            return Err(ConfigError::Invalid(
                "classifier thresholds must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.phone.confidence) {
            return Err(ConfigError::Invalid(
                "phone.confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.exercise.up_offset < self.exercise.down_offset {
            return Err(ConfigError::Invalid(
                "exercise.up_offset must not be smaller than exercise.down_offset".to_string(),
            ));
        }
        if self.volume.high_percent > 100 {
            return Err(ConfigError::Invalid(
                "volume.high_percent must be at most 100".to_string(),
            ));
        }
        if self.session.idle_secs == 0 {
            return Err(ConfigError::Invalid(
                "session.idle_secs must be greater than 0".to_string(),
            ));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level).map_err(|_| {
            ConfigError::Invalid(format!(
                "log_level must be one of trace, debug, info, warn, error (got {:?})",
                self.log_level
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_thresholds() {
        let configuration = Configuration::default();
        assert_eq!(configuration.classifier.mar_threshold, 0.6);
        assert_eq!(configuration.classifier.ear_threshold, 0.22);
        assert_eq!(configuration.classifier.brow_threshold, 0.21);
        assert_eq!(configuration.classifier.shake_range, 0.08);
        assert_eq!(configuration.classifier.motion_capacity, 5);
        assert_eq!(configuration.phone.class_id, 67);
        assert!(configuration.validate().is_ok());
    }

    #[test]
    fn load_without_file_falls_back_to_defaults() {
        let configuration = Configuration::load(None).unwrap();
        assert_eq!(configuration.classifier.motion_capacity, 5);
        assert_eq!(configuration.volume.high_percent, 80);
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let result = Configuration::load(Some("does/not/exist/wellness"));
        assert!(result.is_err());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut configuration = Configuration::default();
        configuration.classifier.motion_capacity = 0;
        assert!(configuration.validate().is_err());
    }

    #[test]
    fn misspelled_log_level_is_rejected() {
        let mut configuration = Configuration::default();
        configuration.log_level = "verbose".to_string();
        assert!(configuration.validate().is_err());

        configuration.log_level = "DEBUG".to_string();
        assert_eq!(configuration.log_level().unwrap(), Level::DEBUG);
    }

    #[test]
    fn zero_idle_timeout_is_rejected() {
        let mut configuration = Configuration::default();
        configuration.session.idle_secs = 0;
        assert!(configuration.validate().is_err());
    }

    #[test]
    fn inverted_exercise_offsets_are_rejected() {
        let mut configuration = Configuration::default();
        configuration.exercise.up_offset = 10.0;
        assert!(configuration.validate().is_err());
    }
}
