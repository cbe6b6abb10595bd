//! Application feature switches

use serde::{Deserialize, Serialize};

/// Feature flags that gate parts of the transfer flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationFeatures {
    /// Allow the native token to be selected for transfer
    pub nam_transfers_enabled: bool,
}
