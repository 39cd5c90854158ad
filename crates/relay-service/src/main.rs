//! Main entry point for the relay service.
//!
//! Runs a single submission pass: loads the configuration and a provider
//! snapshot, submits every pending request from its derived wallet and prints
//! the receipts as JSON on stdout.

use clap::Parser;
use relay_account::{implementations::mnemonic::create_account, AccountService};
use relay_config::Config;
use relay_core::{ContextBuilder, TracingLogSink, TransactionSubmitter};
use relay_delivery::implementations::evm::alloy::AlloyContractFactory;
use relay_delivery::{ContractFactory, ContractSubmitter, GasLimits};
use std::path::PathBuf;
use std::sync::Arc;

mod snapshot;

use snapshot::SnapshotFile;

/// Command-line arguments for the relay service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Path to the provider snapshot to submit
	#[arg(short, long, default_value = "snapshot.json")]
	snapshot: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	// Receipts go to stdout, so logs are kept on stderr
	fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();

	tracing::info!("Started relay");

	let config_path = args
		.config
		.to_str()
		.ok_or("Configuration path is not valid UTF-8")?;
	let config = Config::from_file(config_path).await?;
	tracing::info!(
		relay = %config.relay.name,
		chain_id = config.network.chain_id,
		"Loaded configuration"
	);

	let contracts = Arc::new(AlloyContractFactory::new(
		&config.network.rpc_url,
		config.network.chain_id,
	)?);

	let snapshot_file = SnapshotFile::load(&args.snapshot).await?;
	let gas_price = match snapshot_file.gas_price {
		Some(gas_price) => gas_price,
		None => {
			let gas_price = contracts.gas_price().await?;
			tracing::info!(gas_price = %gas_price, "Estimated gas price");
			gas_price
		}
	};
	let snapshot = snapshot_file.into_snapshot(&config, gas_price)?;

	let submitter = build_submitter(&config, contracts)?;
	let receipts = submitter.submit(&snapshot).await;

	println!("{}", serde_json::to_string_pretty(&receipts)?);

	tracing::info!("Stopped relay");
	Ok(())
}

/// Wires the configured collaborators into a transaction submitter.
fn build_submitter(
	config: &Config,
	contracts: Arc<dyn ContractFactory>,
) -> Result<TransactionSubmitter, Box<dyn std::error::Error>> {
	let account = AccountService::new(create_account(&config.account.mnemonic)?);
	let contexts = ContextBuilder::new(Arc::new(account), contracts, config.contracts.clone());

	let gas_limits = GasLimits {
		api_call: config.delivery.api_call_gas_limit,
		withdrawal: config.delivery.withdrawal_gas_limit,
		wallet_designation: config.delivery.wallet_designation_gas_limit,
	};

	Ok(TransactionSubmitter::new(
		contexts,
		Arc::new(ContractSubmitter::new(gas_limits)),
		Arc::new(TracingLogSink),
	))
}
