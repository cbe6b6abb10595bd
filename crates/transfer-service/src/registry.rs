//! Transfer variants
//!
//! One handle per transfer kind, all built up front so that switching kinds
//! never loses a cached gas estimate or a pending flag. The active handle is
//! picked by the resolved kind of the current addresses.

use crate::executor::TransferExecutor;
use futures::future::join_all;
use nam_transfer_core::{
    GasConfig, Memo, Result, TransferInputs, TransferKind, TransferParams, TxResponse,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Notification shown while a transfer is in flight or after it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxNotification {
    /// Title
    pub title: String,
    /// Body text
    pub description: String,
}

impl TxNotification {
    fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Transfer operation handle for one kind
pub struct TransferVariant {
    kind: TransferKind,
    executor: Arc<dyn TransferExecutor>,
    gas_config: RwLock<Option<GasConfig>>,
    pending: AtomicBool,
}

/// Clears the pending flag when an execution ends, even on early return
struct PendingGuard<'a>(&'a AtomicBool);

impl<'a> PendingGuard<'a> {
    fn set(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl TransferVariant {
    /// Create new handle for `kind`
    pub fn new(kind: TransferKind, executor: Arc<dyn TransferExecutor>) -> Self {
        Self {
            kind,
            executor,
            gas_config: RwLock::new(None),
            pending: AtomicBool::new(false),
        }
    }

    /// Transfer kind served by this handle
    pub fn kind(&self) -> TransferKind {
        self.kind
    }

    /// Event type published for this kind
    pub fn event_type(&self) -> &'static str {
        match self.kind {
            TransferKind::TransparentToTransparent => "TransparentTransfer",
            TransferKind::ShieldedToShielded => "ShieldedTransfer",
            TransferKind::TransparentToShielded => "ShieldingTransfer",
            TransferKind::ShieldedToTransparent => "UnshieldingTransfer",
        }
    }

    /// Notification shown while the transfer is processed
    pub fn pending_notification(&self) -> TxNotification {
        TxNotification::new(
            "Transfer transaction in progress",
            "Your transfer transaction is being processed",
        )
    }

    /// Notification shown when the transfer failed
    pub fn error_notification(&self) -> TxNotification {
        TxNotification::new("Transfer transaction failed", "")
    }

    /// Cached gas estimate
    pub fn gas_config(&self) -> Option<GasConfig> {
        self.gas_config.read().clone()
    }

    /// Replace the cached gas estimate
    pub fn set_gas_config(&self, gas_config: Option<GasConfig>) {
        *self.gas_config.write() = gas_config;
    }

    /// Whether an execution is currently running
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Parameters for this kind
    pub fn params(&self, inputs: &TransferInputs) -> TransferParams {
        TransferParams::build(self.kind, inputs)
    }

    /// Ask the executor for a gas estimate and cache the result.
    ///
    /// A failed estimate clears the cache.
    pub async fn estimate_gas(&self, inputs: &TransferInputs) -> Option<GasConfig> {
        let params = self.params(inputs);
        match self.executor.estimate_gas(&params).await {
            Ok(gas) => {
                tracing::debug!(
                    kind = %self.kind,
                    gas_price = %gas.gas_price,
                    gas_limit = %gas.gas_limit,
                    "Gas estimated"
                );
                self.set_gas_config(Some(gas.clone()));
                Some(gas)
            }
            Err(e) => {
                tracing::warn!(kind = %self.kind, "Gas estimation failed: {}", e);
                self.set_gas_config(None);
                None
            }
        }
    }

    /// Build, sign and broadcast through the executor
    pub async fn execute(
        &self,
        inputs: &TransferInputs,
        memo: Option<&Memo>,
    ) -> Result<Option<TxResponse>> {
        let params = self.params(inputs);
        let _pending = PendingGuard::set(&self.pending);
        self.executor.execute(&params, memo).await
    }
}

impl std::fmt::Debug for TransferVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferVariant")
            .field("kind", &self.kind)
            .field("gas_config", &self.gas_config())
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// The four transfer variants
#[derive(Debug, Clone)]
pub struct TransferVariantRegistry {
    transparent: Arc<TransferVariant>,
    shielding: Arc<TransferVariant>,
    unshielding: Arc<TransferVariant>,
    shielded: Arc<TransferVariant>,
}

impl TransferVariantRegistry {
    /// Create registry from one executor per kind
    pub fn new(
        transparent: Arc<dyn TransferExecutor>,
        shielding: Arc<dyn TransferExecutor>,
        unshielding: Arc<dyn TransferExecutor>,
        shielded: Arc<dyn TransferExecutor>,
    ) -> Self {
        Self {
            transparent: Arc::new(TransferVariant::new(
                TransferKind::TransparentToTransparent,
                transparent,
            )),
            shielding: Arc::new(TransferVariant::new(
                TransferKind::TransparentToShielded,
                shielding,
            )),
            unshielding: Arc::new(TransferVariant::new(
                TransferKind::ShieldedToTransparent,
                unshielding,
            )),
            shielded: Arc::new(TransferVariant::new(
                TransferKind::ShieldedToShielded,
                shielded,
            )),
        }
    }

    /// Create registry with an executor chosen per kind
    pub fn from_fn(mut executor_for: impl FnMut(TransferKind) -> Arc<dyn TransferExecutor>) -> Self {
        Self::new(
            executor_for(TransferKind::TransparentToTransparent),
            executor_for(TransferKind::TransparentToShielded),
            executor_for(TransferKind::ShieldedToTransparent),
            executor_for(TransferKind::ShieldedToShielded),
        )
    }

    /// Handle for `kind`
    pub fn variant(&self, kind: TransferKind) -> &Arc<TransferVariant> {
        match kind {
            TransferKind::TransparentToTransparent => &self.transparent,
            TransferKind::TransparentToShielded => &self.shielding,
            TransferKind::ShieldedToTransparent => &self.unshielding,
            TransferKind::ShieldedToShielded => &self.shielded,
        }
    }

    /// All handles, in [`TransferKind::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TransferVariant>> {
        TransferKind::ALL.into_iter().map(move |kind| self.variant(kind))
    }

    /// Re-estimate gas for every variant concurrently
    pub async fn refresh_gas_configs(&self, inputs: &TransferInputs) {
        let estimates = join_all(self.iter().map(|variant| variant.estimate_gas(inputs))).await;
        let available = estimates.iter().filter(|gas| gas.is_some()).count();
        tracing::debug!(available, "Gas configs refreshed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nam_transfer_core::{Address, BigDecimal, Error};

    struct FixedExecutor {
        gas: Option<GasConfig>,
    }

    #[async_trait]
    impl TransferExecutor for FixedExecutor {
        async fn estimate_gas(&self, _params: &TransferParams) -> Result<GasConfig> {
            self.gas
                .clone()
                .ok_or_else(|| Error::Executor("estimate unavailable".to_string()))
        }

        async fn execute(
            &self,
            _params: &TransferParams,
            _memo: Option<&Memo>,
        ) -> Result<Option<TxResponse>> {
            Ok(None)
        }
    }

    fn gas() -> GasConfig {
        GasConfig::new(BigDecimal::new(1.into(), 6), BigDecimal::from(50_000)).unwrap()
    }

    fn inputs() -> TransferInputs {
        TransferInputs {
            source: Address::new("tnam1src"),
            target: Address::new("znam1dst"),
            token: "tnam1token".to_string(),
            amount: BigDecimal::from(1),
        }
    }

    #[test]
    fn test_variant_lookup_matches_kind() {
        let registry = TransferVariantRegistry::from_fn(|_| {
            Arc::new(FixedExecutor { gas: None }) as Arc<dyn TransferExecutor>
        });
        for kind in TransferKind::ALL {
            assert_eq!(registry.variant(kind).kind(), kind);
        }
        assert_eq!(registry.iter().count(), 4);
    }

    #[test]
    fn test_event_types() {
        let registry = TransferVariantRegistry::from_fn(|_| {
            Arc::new(FixedExecutor { gas: None }) as Arc<dyn TransferExecutor>
        });
        let types: Vec<_> = registry.iter().map(|v| v.event_type()).collect();
        assert_eq!(
            types,
            vec![
                "TransparentTransfer",
                "ShieldingTransfer",
                "UnshieldingTransfer",
                "ShieldedTransfer"
            ]
        );
        let variant = registry.variant(TransferKind::ShieldedToShielded);
        assert_eq!(
            variant.pending_notification().title,
            "Transfer transaction in progress"
        );
        assert_eq!(variant.error_notification().description, "");
    }

    #[tokio::test]
    async fn test_refresh_keeps_failures_absent() {
        let registry = TransferVariantRegistry::from_fn(|kind| {
            let gas = match kind {
                TransferKind::ShieldedToShielded => None,
                _ => Some(gas()),
            };
            Arc::new(FixedExecutor { gas }) as Arc<dyn TransferExecutor>
        });

        registry.refresh_gas_configs(&inputs()).await;

        assert_eq!(
            registry.variant(TransferKind::TransparentToShielded).gas_config(),
            Some(gas())
        );
        assert!(registry
            .variant(TransferKind::ShieldedToShielded)
            .gas_config()
            .is_none());
    }

    #[tokio::test]
    async fn test_pending_flag_cleared_after_execute() {
        let variant = TransferVariant::new(
            TransferKind::TransparentToTransparent,
            Arc::new(FixedExecutor { gas: None }),
        );
        assert!(!variant.is_pending());
        let response = variant.execute(&inputs(), None).await.unwrap();
        assert!(response.is_none());
        assert!(!variant.is_pending());
    }
}
