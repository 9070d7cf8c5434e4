use serde::{Deserialize, Serialize};

use crate::error::{ScaleError, ScaleResult};

use super::DateScaleEngineConfig;

pub const DATE_SCALE_ENGINE_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateScaleEngineConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: DateScaleEngineConfig,
}

impl DateScaleEngineConfig {
    pub fn to_json_contract_v1_pretty(self) -> ScaleResult<String> {
        let payload = DateScaleEngineConfigJsonContractV1 {
            schema_version: DATE_SCALE_ENGINE_CONFIG_JSON_SCHEMA_V1,
            config: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ScaleError::InvalidConfig(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Accepts both a bare config object and a versioned v1 contract payload.
    pub fn from_json_compat_str(input: &str) -> ScaleResult<Self> {
        // contract first: every config field has a default, so any object parses as a bare config
        let payload: DateScaleEngineConfigJsonContractV1 = match serde_json::from_str(input) {
            Ok(payload) => payload,
            Err(contract_err) => {
                return serde_json::from_str::<DateScaleEngineConfig>(input).map_err(|e| {
                    ScaleError::InvalidConfig(format!(
                        "failed to parse config json payload: {e} (as contract: {contract_err})"
                    ))
                });
            }
        };
        if payload.schema_version != DATE_SCALE_ENGINE_CONFIG_JSON_SCHEMA_V1 {
            return Err(ScaleError::InvalidConfig(format!(
                "unsupported config schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.config)
    }
}
