use serde::{Deserialize, Serialize};

use crate::core::interval_classifier::DEFAULT_MAX_WEEKS;
use crate::core::{ScaleAttributes, TimeBasis, Week0Type};
use crate::error::{ScaleError, ScaleResult};

use super::AxisLabelLocale;

/// Largest fixed UTC offset accepted by [`DateScaleEngineConfig::validate`].
pub const MAX_FIXED_OFFSET_SECONDS: i32 = 86_399;

/// Public calendar scale engine configuration.
///
/// This type is serializable so host applications can persist/load axis setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateScaleEngineConfig {
    #[serde(default)]
    pub time_basis: TimeBasis,
    #[serde(default = "default_max_weeks")]
    pub max_weeks: i32,
    #[serde(default)]
    pub week0: Week0Type,
    #[serde(default)]
    pub locale: AxisLabelLocale,
    #[serde(default)]
    pub attributes: ScaleAttributes,
}

impl Default for DateScaleEngineConfig {
    fn default() -> Self {
        Self {
            time_basis: TimeBasis::default(),
            max_weeks: default_max_weeks(),
            week0: Week0Type::default(),
            locale: AxisLabelLocale::default(),
            attributes: ScaleAttributes::default(),
        }
    }
}

impl DateScaleEngineConfig {
    #[must_use]
    pub fn new(time_basis: TimeBasis) -> Self {
        Self {
            time_basis,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_time_basis(mut self, time_basis: TimeBasis) -> Self {
        self.time_basis = time_basis;
        self
    }

    /// Sets the week count above which month ticks are preferred over weeks.
    #[must_use]
    pub fn with_max_weeks(mut self, max_weeks: i32) -> Self {
        self.max_weeks = max_weeks;
        self
    }

    #[must_use]
    pub fn with_week0(mut self, week0: Week0Type) -> Self {
        self.week0 = week0;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: AxisLabelLocale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: ScaleAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn validate(&self) -> ScaleResult<()> {
        if self.max_weeks < 0 {
            return Err(ScaleError::InvalidConfig(format!(
                "max_weeks must be >= 0, got {}",
                self.max_weeks
            )));
        }
        if let TimeBasis::FixedOffset { seconds } = self.time_basis {
            if seconds.abs() > MAX_FIXED_OFFSET_SECONDS {
                return Err(ScaleError::InvalidConfig(format!(
                    "fixed UTC offset must be within +/-{MAX_FIXED_OFFSET_SECONDS} seconds, got {seconds}"
                )));
            }
        }
        self.attributes.validate()
    }

    pub fn to_json_pretty(self) -> ScaleResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ScaleError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ScaleResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ScaleError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_max_weeks() -> i32 {
    DEFAULT_MAX_WEEKS
}
