use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Locale preset used for week boundaries and axis label patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisLabelLocale {
    #[default]
    EnUs,
    EsEs,
}

impl AxisLabelLocale {
    /// Weekday on which a week starts in this locale.
    #[must_use]
    pub fn first_day_of_week(self) -> Weekday {
        match self {
            Self::EnUs => Weekday::Sun,
            Self::EsEs => Weekday::Mon,
        }
    }
}
