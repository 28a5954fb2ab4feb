//! Engine configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::HashMap;
use std::env::VarError;

use crate::consts::{DRAG_FACTOR, HINT_ALPHA, INITIAL_SCALE, MAX_SCALE, MIN_SCALE, WHEEL_STEP};

pub const ENV_INITIAL_SCALE: &str = "STITCH_CANVAS_INITIAL_SCALE";
pub const ENV_MIN_SCALE: &str = "STITCH_CANVAS_MIN_SCALE";
pub const ENV_MAX_SCALE: &str = "STITCH_CANVAS_MAX_SCALE";
pub const ENV_DRAG_FACTOR: &str = "STITCH_CANVAS_DRAG_FACTOR";
pub const ENV_WHEEL_STEP: &str = "STITCH_CANVAS_WHEEL_STEP";
pub const ENV_HINT_ALPHA: &str = "STITCH_CANVAS_HINT_ALPHA";

const ENV_VARS: [&str; 6] =
    [ENV_INITIAL_SCALE, ENV_MIN_SCALE, ENV_MAX_SCALE, ENV_DRAG_FACTOR, ENV_WHEEL_STEP, ENV_HINT_ALPHA];

/// Error returned by [`CanvasConfig::from_env`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not valid unicode: {value:?}")]
    NotUnicode { var: &'static str, value: String },
    #[error("{var} is not a number: {value:?}")]
    NotANumber { var: &'static str, value: String },
    #[error("{var} must be positive, got {value}")]
    NotPositive { var: &'static str, value: f64 },
    #[error("zoom range is empty: min {min} > max {max}")]
    EmptyZoomRange { min: f64, max: f64 },
    #[error("initial scale {scale} is outside the zoom range {min}..={max}")]
    InitialScaleOutOfRange { scale: f64, min: f64, max: f64 },
    #[error("hint alpha must be within 0..=1, got {0}")]
    HintAlpha(f64),
}

/// Camera and interaction tuning for one canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    /// Screen pixels per stitch after a full draw.
    pub initial_scale: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Multiplier on pointer movement while drag-panning.
    pub drag_factor: f64,
    /// Relative zoom change per wheel notch.
    pub wheel_step: f64,
    /// Opacity of the hint layer.
    pub hint_alpha: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            initial_scale: INITIAL_SCALE,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            drag_factor: DRAG_FACTOR,
            wheel_step: WHEEL_STEP,
            hint_alpha: HINT_ALPHA,
        }
    }
}

impl CanvasConfig {
    /// Build config from environment variables. All are optional:
    ///
    /// - `STITCH_CANVAS_INITIAL_SCALE`: default 10
    /// - `STITCH_CANVAS_MIN_SCALE`: default 1
    /// - `STITCH_CANVAS_MAX_SCALE`: default 100
    /// - `STITCH_CANVAS_DRAG_FACTOR`: default 2
    /// - `STITCH_CANVAS_WHEEL_STEP`: default 0.1
    /// - `STITCH_CANVAS_HINT_ALPHA`: default 0.5
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for non-unicode, unparseable or out-of-range
    /// values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut vars = HashMap::new();
        for var in ENV_VARS {
            if let Some(value) = env_value(var, std::env::var(var))? {
                vars.insert(var, value);
            }
        }
        Self::from_lookup(|var| vars.get(var).cloned())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for unparseable or out-of-range values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            initial_scale: parse_positive(&lookup, ENV_INITIAL_SCALE, defaults.initial_scale)?,
            min_scale: parse_positive(&lookup, ENV_MIN_SCALE, defaults.min_scale)?,
            max_scale: parse_positive(&lookup, ENV_MAX_SCALE, defaults.max_scale)?,
            drag_factor: parse_positive(&lookup, ENV_DRAG_FACTOR, defaults.drag_factor)?,
            wheel_step: parse_positive(&lookup, ENV_WHEEL_STEP, defaults.wheel_step)?,
            hint_alpha: parse_f64(&lookup, ENV_HINT_ALPHA, defaults.hint_alpha)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_scale > self.max_scale {
            return Err(ConfigError::EmptyZoomRange { min: self.min_scale, max: self.max_scale });
        }
        if !(self.min_scale..=self.max_scale).contains(&self.initial_scale) {
            return Err(ConfigError::InitialScaleOutOfRange {
                scale: self.initial_scale,
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if !(0.0..=1.0).contains(&self.hint_alpha) {
            return Err(ConfigError::HintAlpha(self.hint_alpha));
        }
        Ok(())
    }
}

/// An unset variable falls back to its default; a non-unicode one is an error.
fn env_value(var: &'static str, read: Result<String, VarError>) -> Result<Option<String>, ConfigError> {
    match read {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => {
            Err(ConfigError::NotUnicode { var, value: raw.to_string_lossy().into_owned() })
        }
    }
}

fn parse_f64<F>(lookup: &F, var: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConfigError::NotANumber { var, value: raw }),
    }
}

fn parse_positive<F>(lookup: &F, var: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parse_f64(lookup, var, default)?;
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { var, value });
    }
    Ok(value)
}
