//! Transfer form state and the snapshot derived from it
//!
//! The form holds only what the user edits. Everything the submission flow
//! reads (source account, selected asset, chain ID) is resolved once into a
//! [`TransferSnapshot`] against an explicit [`TransferContext`].

use nam_transfer_core::{
    Address, ApplicationFeatures, AssetDirectory, AssetWithAmount, ChainId, ChainParameters,
    BigDecimal, TransferInputs, TransferKind,
};
use serde::{Deserialize, Serialize};

/// How an account's keys are held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountType {
    /// Derived from a mnemonic
    Mnemonic,
    /// Imported private key
    PrivateKey,
    /// Hardware wallet
    Ledger,
    /// Shielded spending keys
    ShieldedKeys,
}

/// Wallet account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Display alias
    pub alias: String,
    /// Account address
    pub address: Address,
    /// Key type
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

impl Account {
    /// Create new account
    pub fn new(alias: impl Into<String>, address: impl Into<Address>, account_type: AccountType) -> Self {
        Self {
            alias: alias.into(),
            address: address.into(),
            account_type,
        }
    }
}

/// Read-only wallet and chain state the form is resolved against
#[derive(Debug, Clone, Default)]
pub struct TransferContext {
    /// Default accounts of the wallet
    pub accounts: Vec<Account>,
    /// Assets with balances, keyed by address
    pub assets: AssetDirectory,
    /// Chain parameters, absent until loaded
    pub chain: Option<ChainParameters>,
    /// Feature flags
    pub features: ApplicationFeatures,
    /// RPC endpoint
    pub rpc_url: String,
}

impl TransferContext {
    /// Assets the user may pick from.
    ///
    /// The native token is hidden unless native transfers are enabled. Until
    /// chain parameters load, the mainnet native symbol is used.
    pub fn available_assets(&self) -> AssetDirectory {
        if self.features.nam_transfers_enabled {
            return self.assets.clone();
        }
        match &self.chain {
            Some(chain) => self.assets.without_native(chain),
            None => self.assets.without_native(&ChainParameters::default()),
        }
    }

    /// Source account address for the shielded toggle
    pub fn source_address(&self, shielded: bool) -> Option<Address> {
        self.accounts
            .iter()
            .find(|account| (account.account_type == AccountType::ShieldedKeys) == shielded)
            .map(|account| account.address.clone())
    }

    /// Chain ID, when chain parameters are loaded
    pub fn chain_id(&self) -> Option<ChainId> {
        self.chain.as_ref().and_then(|chain| chain.chain_id.clone())
    }
}

/// User-editable transfer form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferForm {
    selected_asset_address: Option<String>,
    amount: Option<BigDecimal>,
    shielded: bool,
    custom_address: String,
}

impl TransferForm {
    /// Create new form with the shielded toggle in its initial position
    pub fn new(shielded: bool) -> Self {
        Self {
            selected_asset_address: None,
            amount: None,
            shielded,
            custom_address: String::new(),
        }
    }

    /// Select an asset by address
    pub fn select_asset(&mut self, address: impl Into<String>) {
        self.selected_asset_address = Some(address.into());
    }

    /// Clear the asset selection
    pub fn clear_asset(&mut self) {
        self.selected_asset_address = None;
    }

    /// Set the display amount
    pub fn set_amount(&mut self, amount: Option<BigDecimal>) {
        self.amount = amount;
    }

    /// Set the shielded toggle
    pub fn set_shielded(&mut self, shielded: bool) {
        self.shielded = shielded;
    }

    /// Set the destination address
    pub fn set_custom_address(&mut self, address: impl Into<String>) {
        self.custom_address = address.into();
    }

    /// Selected asset address
    pub fn selected_asset_address(&self) -> Option<&str> {
        self.selected_asset_address.as_deref()
    }

    /// Shielded toggle
    pub fn is_shielded(&self) -> bool {
        self.shielded
    }

    /// Resolve the form against `ctx`
    pub fn snapshot(&self, ctx: &TransferContext) -> TransferSnapshot {
        let selected_asset = self
            .selected_asset_address
            .as_deref()
            .and_then(|address| ctx.available_assets().get(address).cloned());

        TransferSnapshot {
            source_address: ctx.source_address(self.shielded),
            target: Address::new(self.custom_address.trim()),
            selected_asset,
            amount: self.amount.clone(),
            chain_id: ctx.chain_id(),
            rpc_url: ctx.rpc_url.clone(),
        }
    }
}

impl Default for TransferForm {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Explicit input of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSnapshot {
    /// Source account address
    pub source_address: Option<Address>,
    /// Destination address, empty until entered
    pub target: Address,
    /// Selected asset
    pub selected_asset: Option<AssetWithAmount>,
    /// Display amount
    pub amount: Option<BigDecimal>,
    /// Chain ID
    pub chain_id: Option<ChainId>,
    /// RPC endpoint
    pub rpc_url: String,
}

impl TransferSnapshot {
    /// Transfer kind for the current addresses
    pub fn kind(&self) -> TransferKind {
        let source = self.source_address.clone().unwrap_or_default();
        TransferKind::for_addresses(&source, &self.target)
    }

    /// Parameter inputs; missing values fall back to empty/zero
    pub fn inputs(&self) -> TransferInputs {
        TransferInputs {
            source: self.source_address.clone().unwrap_or_default(),
            target: self.target.clone(),
            token: self
                .selected_asset
                .as_ref()
                .map(|asset| asset.original_address.clone())
                .unwrap_or_default(),
            amount: self.amount.clone().unwrap_or_default(),
        }
    }

    /// Whether the source is a shielded address
    pub fn is_source_shielded(&self) -> bool {
        self.source_address
            .as_ref()
            .is_some_and(|address| address.class().is_shielded())
    }

    /// Whether the destination is shielded, once one is entered
    pub fn is_destination_shielded(&self) -> Option<bool> {
        if self.target.is_empty() {
            return None;
        }
        Some(self.target.class().is_shielded())
    }
}
