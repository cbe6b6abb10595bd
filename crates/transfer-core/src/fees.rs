//! Transaction fee calculation
//!
//! Fees are `gas_price × gas_limit` in arbitrary-precision decimal
//! arithmetic. No fee is shown until both an asset is selected and a gas
//! config is known.

use crate::asset::{Asset, AssetWithAmount};
use crate::{Error, Result};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Gas price and limit reported by the signing service for one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawGasConfig")]
pub struct GasConfig {
    /// Price per gas unit
    pub gas_price: BigDecimal,
    /// Gas unit limit
    pub gas_limit: BigDecimal,
}

/// Unvalidated wire form of [`GasConfig`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGasConfig {
    gas_price: BigDecimal,
    gas_limit: BigDecimal,
}

impl TryFrom<RawGasConfig> for GasConfig {
    type Error = Error;

    fn try_from(raw: RawGasConfig) -> Result<Self> {
        GasConfig::new(raw.gas_price, raw.gas_limit)
    }
}

impl GasConfig {
    /// Create a gas config, rejecting negative quantities
    pub fn new(gas_price: BigDecimal, gas_limit: BigDecimal) -> Result<Self> {
        let zero = BigDecimal::from(0);
        if gas_price < zero {
            return Err(Error::InvalidAmount(format!(
                "gas price {} is negative",
                gas_price
            )));
        }
        if gas_limit < zero {
            return Err(Error::InvalidAmount(format!(
                "gas limit {} is negative",
                gas_limit
            )));
        }
        Ok(Self {
            gas_price,
            gas_limit,
        })
    }

    /// Exact `gas_price × gas_limit`
    pub fn total(&self) -> BigDecimal {
        &self.gas_price * &self.gas_limit
    }
}

/// Displayable fee for the current selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFee {
    /// Address of the asset the fee is shown against
    pub original_address: String,
    /// Display descriptor of that asset
    pub asset: Asset,
    /// Fee amount
    pub amount: BigDecimal,
}

/// Derives the fee shown alongside the transfer form
#[derive(Debug, Clone, Copy, Default)]
pub struct FeeCalculator;

impl FeeCalculator {
    /// Create new fee calculator
    pub fn new() -> Self {
        Self
    }

    /// Compute the fee for the selected asset and gas config.
    ///
    /// Returns `None` unless both are present.
    pub fn compute_fee(
        &self,
        selected_asset: Option<&AssetWithAmount>,
        gas_config: Option<&GasConfig>,
    ) -> Option<TransactionFee> {
        let (asset, gas) = selected_asset.zip(gas_config)?;
        let amount = gas.total();

        tracing::debug!(
            asset = %asset.asset.symbol,
            fee = %amount,
            "Computed transaction fee"
        );

        Some(TransactionFee {
            original_address: asset.original_address.clone(),
            asset: asset.asset.clone(),
            amount,
        })
    }
}
