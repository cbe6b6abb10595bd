//! Assets and the asset directory

use bigdecimal::BigDecimal;
use nam_transfer_params::ChainParameters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display descriptor of a fungible token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Ticker symbol (e.g. `NAM`)
    pub symbol: String,
    /// Human-readable name
    pub name: String,
    /// Base denomination
    #[serde(default)]
    pub base: String,
}

impl Asset {
    /// Create a descriptor
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            base: String::new(),
        }
    }

    /// Set base denomination
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }
}

/// An asset together with the balance available to the source account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetWithAmount {
    /// Chain-native token address
    pub original_address: String,
    /// Display descriptor
    pub asset: Asset,
    /// Available balance
    pub amount: BigDecimal,
}

/// Available assets keyed by their original address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetDirectory {
    assets: BTreeMap<String, AssetWithAmount>,
}

impl AssetDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an asset, keyed by its original address
    pub fn insert(&mut self, asset: AssetWithAmount) {
        self.assets.insert(asset.original_address.clone(), asset);
    }

    /// Look up an asset by address
    pub fn get(&self, address: &str) -> Option<&AssetWithAmount> {
        self.assets.get(address)
    }

    /// Number of assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if the directory is empty
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Iterate over assets in address order
    pub fn iter(&self) -> impl Iterator<Item = &AssetWithAmount> {
        self.assets.values()
    }

    /// Copy of this directory without the native token of `chain`
    ///
    /// Only the first asset whose symbol matches is removed.
    pub fn without_native(&self, chain: &ChainParameters) -> Self {
        let mut filtered = self.clone();
        let native = self
            .iter()
            .find(|a| chain.is_native_symbol(&a.asset.symbol))
            .map(|a| a.original_address.clone());
        if let Some(address) = native {
            filtered.assets.remove(&address);
        }
        filtered
    }
}

impl FromIterator<AssetWithAmount> for AssetDirectory {
    fn from_iter<I: IntoIterator<Item = AssetWithAmount>>(iter: I) -> Self {
        let mut directory = Self::new();
        for asset in iter {
            directory.insert(asset);
        }
        directory
    }
}
