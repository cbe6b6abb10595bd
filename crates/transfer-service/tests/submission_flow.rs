//! End-to-end submission flow with scripted collaborators

use async_trait::async_trait;
use nam_transfer_core::{
    Address, Asset, AssetWithAmount, ChainId, BigDecimal, Error, GasConfig, Memo, Result,
    TransferKind, TransferParams, TransferStatus, TransferStep, TransferTransactionData,
    TxResponse,
};
use nam_transfer_service::{
    ListenerId, MemoryTransactionStore, RecordRequest, ResponseRecordFactory, StoreListener,
    SubmissionController, SubmissionState, TransactionRecordFactory, TransactionStore,
    TransferEvent, TransferExecutor, TransferSnapshot, TransferVariantRegistry,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// What the scripted executor answers on the next call
#[derive(Clone)]
enum Reply {
    Response(Vec<&'static str>),
    Nothing,
    Fail(&'static str),
}

struct ScriptedExecutor {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<TransferParams>>,
}

impl ScriptedExecutor {
    fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransferExecutor for ScriptedExecutor {
    async fn estimate_gas(&self, _params: &TransferParams) -> Result<GasConfig> {
        GasConfig::new(BigDecimal::new(1.into(), 6), BigDecimal::from(1_000_000))
    }

    async fn execute(
        &self,
        params: &TransferParams,
        _memo: Option<&Memo>,
    ) -> Result<Option<TxResponse>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(params.clone());
        let reply = self
            .replies
            .lock()
            .pop_front()
            .unwrap_or(Reply::Response(vec!["DEFAULT"]));
        match reply {
            Reply::Response(hashes) => Ok(Some(TxResponse {
                hash: "WRAPPER".to_string(),
                height: Some(42),
                inner_tx_hashes: hashes.into_iter().map(String::from).collect(),
            })),
            Reply::Nothing => Ok(None),
            Reply::Fail(message) => Err(Error::Executor(message.to_string())),
        }
    }
}

/// Store wrapper counting writes
struct CountingStore {
    inner: MemoryTransactionStore,
    writes: AtomicUsize,
}

impl CountingStore {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryTransactionStore::new(),
            writes: AtomicUsize::new(0),
        })
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl TransactionStore for CountingStore {
    fn find_by_hash(&self, hash: &str) -> Option<TransferTransactionData> {
        self.inner.find_by_hash(hash)
    }

    fn store_transaction(&self, record: TransferTransactionData) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.store_transaction(record)
    }

    fn transactions(&self) -> Vec<TransferTransactionData> {
        self.inner.transactions()
    }

    fn subscribe(&self, listener: StoreListener) -> ListenerId {
        self.inner.subscribe(listener)
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.inner.unsubscribe(id)
    }
}

/// Factory returning a fixed number of copies of the default record
struct RepeatingFactory(usize);

impl TransactionRecordFactory for RepeatingFactory {
    fn create_transfer_data(&self, request: &RecordRequest) -> Vec<TransferTransactionData> {
        let records = ResponseRecordFactory::new().create_transfer_data(request);
        records
            .into_iter()
            .cycle()
            .take(self.0)
            .collect()
    }
}

struct Harness {
    controller: SubmissionController,
    executor: Arc<ScriptedExecutor>,
    store: Arc<CountingStore>,
}

impl Harness {
    fn new(replies: Vec<Reply>) -> Self {
        Self::with_factory(replies, Arc::new(ResponseRecordFactory::new()))
    }

    fn with_factory(replies: Vec<Reply>, factory: Arc<dyn TransactionRecordFactory>) -> Self {
        let executor = ScriptedExecutor::new(replies);
        let store = CountingStore::new();
        let shared = Arc::clone(&executor);
        let registry =
            TransferVariantRegistry::from_fn(move |_| Arc::clone(&shared) as Arc<dyn TransferExecutor>);
        let controller = SubmissionController::new(
            registry,
            factory,
            Arc::clone(&store) as Arc<dyn TransactionStore>,
        );
        Self {
            controller,
            executor,
            store,
        }
    }

    async fn with_gas(self) -> Self {
        self.controller
            .registry()
            .refresh_gas_configs(&snapshot().inputs())
            .await;
        self
    }
}

fn snapshot() -> TransferSnapshot {
    TransferSnapshot {
        source_address: Some(Address::new("znam1source")),
        target: Address::new("tnam1target"),
        selected_asset: Some(AssetWithAmount {
            original_address: "tnam1osmo".to_string(),
            asset: Asset::new("OSMO", "Osmosis"),
            amount: BigDecimal::from(25),
        }),
        amount: Some(BigDecimal::new(125.into(), 2)),
        chain_id: Some(ChainId::new("namada-test.abc").unwrap()),
        rpc_url: "http://127.0.0.1:26657".to_string(),
    }
}

#[tokio::test]
async fn test_undefined_source_fails_without_calling_executor() {
    let mut harness = Harness::new(vec![]).with_gas().await;
    let mut input = snapshot();
    input.source_address = None;

    let err = harness.controller.submit(&input, None).await.unwrap_err();

    assert!(matches!(err, Error::SourceAddressUndefined));
    assert_eq!(harness.controller.error_message(), "Source address is not defined");
    assert!(harness.controller.transaction().is_none());
    assert_eq!(harness.controller.state(), SubmissionState::Idle);
    assert_eq!(harness.executor.calls(), 0);
    assert_eq!(harness.store.writes(), 0);
}

#[tokio::test]
async fn test_single_record_is_completed_and_stored_once() {
    let mut harness = Harness::new(vec![Reply::Response(vec!["H1"])]).with_gas().await;
    let memo = Memo::from_text("rent").unwrap();

    let record = harness.controller.submit(&snapshot(), memo).await.unwrap();

    assert_eq!(harness.controller.state(), SubmissionState::Completed);
    assert_eq!(harness.store.writes(), 1);
    assert_eq!(harness.store.find_by_hash("H1"), Some(record.clone()));

    let displayed = harness.controller.transaction().unwrap();
    assert_eq!(displayed.record(), Some(&record));
    assert_eq!(record.kind, TransferKind::ShieldedToTransparent);
    assert_eq!(record.wrapper_hash, "WRAPPER");
    assert_eq!(record.display_amount, BigDecimal::new(125.into(), 2));
    assert_eq!(record.memo.as_ref().map(|m| m.as_str()), Some("rent"));
    assert!(harness.controller.error_message().is_empty());
}

#[tokio::test]
async fn test_executor_receives_params_for_resolved_kind() {
    let mut harness = Harness::new(vec![Reply::Response(vec!["H1"])]).with_gas().await;

    harness.controller.submit(&snapshot(), None).await.unwrap();

    let seen = harness.executor.seen.lock().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].kind(), TransferKind::ShieldedToTransparent);
    let json = serde_json::to_value(&seen[0]).unwrap();
    assert_eq!(json["source"], "znam1source");
    assert_eq!(json["data"][0]["target"], "tnam1target");
    assert_eq!(json["data"][0]["token"], "tnam1osmo");
}

#[tokio::test]
async fn test_empty_record_list_clears_record_without_storing() {
    let mut harness = Harness::new(vec![Reply::Response(vec![])]).with_gas().await;

    let err = harness.controller.submit(&snapshot(), None).await.unwrap_err();

    assert!(matches!(err, Error::EmptyTransferData));
    assert!(harness.controller.transaction().is_none());
    assert!(!harness.controller.error_message().is_empty());
    assert_eq!(harness.controller.state(), SubmissionState::Failed);
    assert_eq!(harness.store.writes(), 0);
}

#[tokio::test]
async fn test_missing_response_is_invalid() {
    let mut harness = Harness::new(vec![Reply::Nothing]).with_gas().await;

    let err = harness.controller.submit(&snapshot(), None).await.unwrap_err();

    assert!(matches!(err, Error::InvalidTransactionResponse));
    assert_eq!(harness.controller.error_message(), "Invalid transaction response");
    assert_eq!(harness.controller.state(), SubmissionState::Failed);
    assert_eq!(harness.store.writes(), 0);
}

#[tokio::test]
async fn test_batched_records_are_rejected() {
    let mut harness =
        Harness::with_factory(vec![Reply::Response(vec!["H1"])], Arc::new(RepeatingFactory(3)))
            .with_gas()
            .await;

    let err = harness.controller.submit(&snapshot(), None).await.unwrap_err();

    assert!(matches!(err, Error::BatchedTransferData(3)));
    assert!(harness.controller.transaction().is_none());
    assert_eq!(harness.store.writes(), 0);
}

#[tokio::test]
async fn test_executor_error_message_is_surfaced() {
    let mut harness = Harness::new(vec![Reply::Fail("Signature rejected")])
        .with_gas()
        .await;

    let err = harness.controller.submit(&snapshot(), None).await.unwrap_err();

    assert!(matches!(err, Error::Executor(_)));
    assert_eq!(harness.controller.error_message(), "Signature rejected");
    assert_eq!(harness.controller.state(), SubmissionState::Idle);
    assert!(harness.controller.transaction().is_none());
    assert!(!harness.controller.is_pending());

    let events = harness.controller.logger().events();
    assert!(events
        .iter()
        .any(|e| matches!(e, TransferEvent::Failed { category, .. } if category == "Executor")));
}

#[tokio::test]
async fn test_stored_update_replaces_displayed_record() {
    let mut harness = Harness::new(vec![Reply::Response(vec!["H1"])]).with_gas().await;
    let record = harness.controller.submit(&snapshot(), None).await.unwrap();

    let confirmed = record.clone().complete(TransferStatus::Success, None);
    harness.store.store_transaction(confirmed.clone()).unwrap();

    let displayed = harness.controller.transaction().unwrap();
    assert_eq!(displayed.record(), Some(&confirmed));
    assert_eq!(displayed.current_step(), TransferStep::Complete);
    assert_eq!(harness.executor.calls(), 1);

    let replaced = harness
        .controller
        .logger()
        .events()
        .into_iter()
        .filter(|e| matches!(e, TransferEvent::RecordReplaced { .. }))
        .count();
    assert_eq!(replaced, 1);
}

#[tokio::test]
async fn test_unrelated_store_update_is_ignored() {
    let mut harness = Harness::new(vec![Reply::Response(vec!["H1"])]).with_gas().await;
    let record = harness.controller.submit(&snapshot(), None).await.unwrap();

    let mut other = record.clone();
    other.hash = "H2".to_string();
    harness.store.store_transaction(other).unwrap();

    assert_eq!(
        harness.controller.transaction().and_then(|tx| tx.record().cloned()),
        Some(record)
    );
}

#[tokio::test]
async fn test_resubmission_after_failure_uses_current_inputs() {
    let mut harness = Harness::new(vec![
        Reply::Fail("Network unreachable"),
        Reply::Response(vec!["H2"]),
    ])
    .with_gas()
    .await;

    let first = snapshot();
    assert!(harness.controller.submit(&first, None).await.is_err());
    assert_eq!(harness.controller.error_message(), "Network unreachable");

    let mut second = snapshot();
    second.amount = Some(BigDecimal::from(7));
    second.target = Address::new("znam1other");
    let record = harness.controller.submit(&second, None).await.unwrap();

    assert!(harness.controller.error_message().is_empty());
    assert_eq!(record.display_amount, BigDecimal::from(7));
    assert_eq!(record.kind, TransferKind::ShieldedToShielded);
    assert_eq!(record.destination_address.as_str(), "znam1other");

    let seen = harness.executor.seen.lock().clone();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].kind(), TransferKind::ShieldedToShielded);
}

#[tokio::test]
async fn test_gas_refresh_covers_all_kinds() {
    let harness = Harness::new(vec![]).with_gas().await;

    for kind in TransferKind::ALL {
        let gas = harness.controller.registry().variant(kind).gas_config();
        assert!(gas.is_some(), "{} has no gas config", kind);
    }
}

#[tokio::test]
async fn test_fee_follows_snapshot() {
    let harness = Harness::new(vec![]).with_gas().await;
    let mut input = snapshot();

    let fee = harness.controller.transaction_fee(&input).unwrap();
    assert_eq!(fee.amount, BigDecimal::from(1));
    assert_eq!(fee.asset.symbol, "OSMO");

    input.selected_asset = None;
    assert!(harness.controller.transaction_fee(&input).is_none());
}
