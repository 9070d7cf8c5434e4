use crate::core::{AutoScale, LinearScaleEngine, ScaleAttributes, TickTable};

use super::DateScaleEngine;

/// Scale-division strategy selected by axis configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleEngine {
    Linear(LinearScaleEngine),
    Date(DateScaleEngine),
}

impl Default for ScaleEngine {
    fn default() -> Self {
        Self::Linear(LinearScaleEngine::default())
    }
}

impl From<LinearScaleEngine> for ScaleEngine {
    fn from(engine: LinearScaleEngine) -> Self {
        Self::Linear(engine)
    }
}

impl From<DateScaleEngine> for ScaleEngine {
    fn from(engine: DateScaleEngine) -> Self {
        Self::Date(engine)
    }
}

impl ScaleEngine {
    #[must_use]
    pub fn is_calendar(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    #[must_use]
    pub fn attributes(&self) -> ScaleAttributes {
        match self {
            Self::Linear(engine) => engine.attributes(),
            Self::Date(engine) => engine.attributes(),
        }
    }

    pub fn set_attributes(&mut self, attributes: ScaleAttributes) {
        match self {
            Self::Linear(engine) => engine.set_attributes(attributes),
            Self::Date(engine) => engine.set_attributes(attributes),
        }
    }

    #[must_use]
    pub fn divide_scale(
        &self,
        x1: f64,
        x2: f64,
        max_major_steps: i32,
        max_minor_steps: i32,
        step_size: f64,
    ) -> TickTable {
        match self {
            Self::Linear(engine) => {
                engine.divide_scale(x1, x2, max_major_steps, max_minor_steps, step_size)
            }
            Self::Date(engine) => {
                engine.divide_scale(x1, x2, max_major_steps, max_minor_steps, step_size)
            }
        }
    }

    #[must_use]
    pub fn auto_scale(&self, max_num_steps: i32, x1: f64, x2: f64) -> AutoScale {
        match self {
            Self::Linear(engine) => engine.auto_scale(max_num_steps, x1, x2),
            Self::Date(engine) => engine.auto_scale(max_num_steps, x1, x2),
        }
    }
}
