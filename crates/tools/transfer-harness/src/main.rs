//! CLI harness for exercising the transfer submission flow
//!
//! Runs a full submission against an in-process simulated signing service
//! and prints the resulting record. Useful for checking kind resolution,
//! fee derivation and the failure paths without a wallet or a node.

use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};
use nam_transfer_core::{
    classify, Address, Asset, AssetWithAmount, BigDecimal, ChainId, Error, GasConfig, Memo,
    TransferKind, TransferParams, TransferStatus, TxResponse,
};
use nam_transfer_service::{
    init_logging, Account, AccountType, MemoryTransactionStore, ResponseRecordFactory,
    ServiceConfig, SubmissionController, TransactionStore, TransferExecutor, TransferSnapshot,
    TransferVariantRegistry,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "transfer-harness")]
#[command(about = "Namada transfer flow harness", long_about = None)]
struct Cli {
    /// Service config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify addresses and print the resulting transfer kind
    Classify {
        /// Source address
        source: String,

        /// Destination address
        #[arg(default_value = "")]
        target: String,
    },

    /// Submit a transfer through a simulated signing service
    Simulate {
        /// Transparent account of the wallet
        #[arg(long, default_value = "tnam1qpr3v6ewc4d3mss9ayg0ewd6vnd9ea0fjqqpg7q5")]
        transparent_account: String,

        /// Shielded account of the wallet
        #[arg(long, default_value = "znam1qzx8yyfwcmqnd4qj2xp6ggwxnaq3ju8zg6zs5lpq")]
        shielded_account: String,

        /// Send from the shielded account (defaults to the config's toggle)
        #[arg(long)]
        shielded: Option<bool>,

        /// Destination address
        #[arg(short, long)]
        target: String,

        /// Token address
        #[arg(long, default_value = "tnam1p5nnjnasjtfwen2kzg78fumwfs0eycqpecuc2jwz")]
        token: String,

        /// Token symbol
        #[arg(long, default_value = "OSMO")]
        symbol: String,

        /// Amount to transfer
        #[arg(short, long, default_value = "1")]
        amount: BigDecimal,

        /// Gas price
        #[arg(long, default_value = "0.000001")]
        gas_price: BigDecimal,

        /// Gas limit
        #[arg(long, default_value = "50000")]
        gas_limit: BigDecimal,

        /// Memo text
        #[arg(short, long)]
        memo: Option<String>,

        /// How the simulated service answers
        #[arg(long, value_enum, default_value = "none")]
        failure: FailureMode,

        /// Mark the transfer as confirmed in the store afterwards
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FailureMode {
    /// Broadcast succeeds
    None,
    /// Broadcast yields no inner transactions
    Empty,
    /// Service returns no response
    Nothing,
    /// Service raises an error
    Error,
}

/// Signing service stand-in with fixed gas and a deterministic hash
struct SimulatedExecutor {
    gas: GasConfig,
    failure: FailureMode,
}

#[async_trait]
impl TransferExecutor for SimulatedExecutor {
    async fn estimate_gas(&self, _params: &TransferParams) -> nam_transfer_core::Result<GasConfig> {
        Ok(self.gas.clone())
    }

    async fn execute(
        &self,
        params: &TransferParams,
        memo: Option<&Memo>,
    ) -> nam_transfer_core::Result<Option<TxResponse>> {
        info!(kind = %params.kind(), memo = memo.is_some(), "Simulating broadcast");
        let digest = serde_json::to_string(params)?.len();
        match self.failure {
            FailureMode::None => Ok(Some(TxResponse {
                hash: format!("{:064X}", digest),
                height: Some(1),
                inner_tx_hashes: vec![format!("{:064X}", digest + 1)],
            })),
            FailureMode::Empty => Ok(Some(TxResponse {
                hash: format!("{:064X}", digest),
                height: None,
                inner_tx_hashes: Vec::new(),
            })),
            FailureMode::Nothing => Ok(None),
            FailureMode::Error => Err(Error::Executor("Simulated broadcast failure".to_string())),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServiceConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServiceConfig::default(),
    };
    init_logging(&config.log);

    match cli.command {
        Commands::Classify { source, target } => {
            let kind =
                TransferKind::for_addresses(&Address::new(source.as_str()), &Address::new(target.as_str()));
            println!("source:      {}", classify(&source));
            println!("destination: {}", classify(&target));
            println!("kind:        {}", kind);
        }
        Commands::Simulate {
            transparent_account,
            shielded_account,
            shielded,
            target,
            token,
            symbol,
            amount,
            gas_price,
            gas_limit,
            memo,
            failure,
            confirm,
        } => {
            let gas = GasConfig::new(gas_price, gas_limit)?;
            let memo = match memo {
                Some(text) => Memo::from_text(text)?,
                None => None,
            };
            if let Some(memo) = memo.as_ref().filter(|m| m.is_near_limit()) {
                warn!(
                    bytes = memo.byte_len(),
                    remaining = memo.remaining_bytes(),
                    "Memo is close to the length limit"
                );
            }

            if config.chain.chain_id.is_none() {
                config.chain.chain_id = ChainId::new("local.harness").ok();
            }
            let accounts = vec![
                Account::new("transparent", transparent_account, AccountType::Mnemonic),
                Account::new("shielded", shielded_account, AccountType::ShieldedKeys),
            ];
            let assets = std::iter::once(AssetWithAmount {
                original_address: token.clone(),
                asset: Asset::new(symbol.clone(), symbol),
                amount: amount.clone(),
            })
            .collect();
            let ctx = config.transfer_context(accounts, assets);

            let mut form = config.transfer_form();
            if let Some(shielded) = shielded {
                form.set_shielded(shielded);
            }
            form.select_asset(token);
            form.set_amount(Some(amount));
            form.set_custom_address(target);
            let snapshot = form.snapshot(&ctx);

            run_simulation(snapshot, gas, memo, failure, confirm).await?;
        }
    }

    Ok(())
}

async fn run_simulation(
    snapshot: TransferSnapshot,
    gas: GasConfig,
    memo: Option<Memo>,
    failure: FailureMode,
    confirm: bool,
) -> anyhow::Result<()> {
    let store = Arc::new(MemoryTransactionStore::new());
    let executor: Arc<dyn TransferExecutor> = Arc::new(SimulatedExecutor { gas, failure });
    let registry = TransferVariantRegistry::from_fn(|_| Arc::clone(&executor));
    let mut controller = SubmissionController::new(
        registry,
        Arc::new(ResponseRecordFactory::new()),
        Arc::clone(&store) as Arc<dyn TransactionStore>,
    );

    controller
        .registry()
        .refresh_gas_configs(&snapshot.inputs())
        .await;

    let kind = snapshot.kind();
    info!(kind = %kind, "Resolved transfer kind");
    if let Some(fee) = controller.transaction_fee(&snapshot) {
        println!("fee: {} {}", fee.amount, fee.asset.symbol);
    }

    match controller.submit(&snapshot, memo).await {
        Ok(record) => {
            if confirm {
                store.store_transaction(record.complete(TransferStatus::Success, None))?;
            }
            if let Some(displayed) = controller.transaction() {
                println!("{}", serde_json::to_string_pretty(&displayed)?);
            }
        }
        Err(e) => {
            println!("state: {:?}", controller.state());
            println!("error: {}", controller.error_message());
            for event in controller.logger().export() {
                println!("{}", event);
            }
            anyhow::bail!("submission failed: {}", e);
        }
    }

    Ok(())
}
