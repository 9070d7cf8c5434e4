pub mod calendar;
pub mod calendar_width;
pub mod interval_classifier;
pub mod scale;
pub mod scale_arithmetic;
pub mod step_size;
pub mod tick_ladder;
pub mod tick_table;
pub mod types;

pub use calendar::{CalendarInstant, TimeBasis, Week0Type};
pub use interval_classifier::IntervalClassifier;
pub use scale::{LinearScaleEngine, ScaleAttributes};
pub use tick_ladder::TickLadderBuilder;
pub use tick_table::TickTable;
pub use types::{AutoScale, Granularity, StepPlan, TickType};
