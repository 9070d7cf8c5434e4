mod axis_config;
mod axis_label_format;
mod date_scale_engine;
mod engine_config;
mod json_contract;
mod scale_engine;

pub use axis_config::AxisLabelLocale;
pub use axis_label_format::{format_tick_label, label_granularity, label_pattern};
pub use date_scale_engine::{DateScaleEngine, ScaleDivision};
pub use engine_config::{DateScaleEngineConfig, MAX_FIXED_OFFSET_SECONDS};
pub use json_contract::{
    DATE_SCALE_ENGINE_CONFIG_JSON_SCHEMA_V1, DateScaleEngineConfigJsonContractV1,
};
pub use scale_engine::ScaleEngine;
