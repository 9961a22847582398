// src/main.rs
//! Dual chain scanner entry point.
//! Builds the pipeline from config + flags and runs one scan.
use anyhow::{Context, Result};
use clap::Parser;
use dual_chain_scanner::blockchain::{EthereumClient, TronClient};
use dual_chain_scanner::cli::Cli;
use dual_chain_scanner::core::config::ScannerConfig;
use dual_chain_scanner::crypto::derive::Secp256k1Deriver;
use dual_chain_scanner::keyspace::KeySpace;
use dual_chain_scanner::prober::{BalanceProber, RetryPolicy};
use dual_chain_scanner::scanner::{ScanOutcome, Scanner};
use dual_chain_scanner::sink::FileSink;
use dual_chain_scanner::targets::TargetSet;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;

    info!("Starting Dual Chain (ETH + TRON) Key Scanner v{}", env!("CARGO_PKG_VERSION"));

    let mut config = ScannerConfig::load(&cli.config)?;
    cli.apply_to(&mut config);
    config.validate()?;

    let key_space = match config.prefix.as_deref() {
        Some(prefix) => KeySpace::with_prefix(prefix)?,
        None => KeySpace::random(),
    };
    info!(prefix = %key_space.prefix(), "{} private keys to generate", key_space.len());

    let targets = TargetSet::load(&config.output.targets_path)?;

    let eth = EthereumClient::new(&config.networks.eth.rpc_url, config.networks.eth.timeout())
        .context("failed to set up Ethereum client")?;
    let tron = TronClient::new(&config.networks.tron.rpc_url, config.networks.tron.timeout())?
        .with_api_key(config.networks.tron.api_key.clone());
    let prober = BalanceProber::new(
        Box::new(eth),
        Box::new(tron),
        RetryPolicy::linear(config.retry.tron_max_attempts, config.tron_base_delay()),
    );

    let sink = FileSink::new(&config.output.funded_path, &config.output.matches_path);
    let mut scanner =
        Scanner::new(Box::new(Secp256k1Deriver::new()), prober, Box::new(sink.clone()), targets)
            .with_candidate_delay(config.candidate_delay());

    let halt = scanner.halt_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current key");
            halt.cancel();
        }
    });

    let report = match scanner.run(key_space).await {
        Ok(report) => report,
        Err(e) => {
            let counters = scanner.counters();
            error!(
                "Scan aborted. Generated: {}, invalid keys: {}",
                counters.generated, counters.invalid
            );
            return Err(e.into());
        }
    };

    match &report.outcome {
        ScanOutcome::Funded(record) => {
            info!(key = %record.key, "Funded wallet found; scan stopped early");
        }
        ScanOutcome::Exhausted => info!("Key space exhausted without a funded wallet"),
        ScanOutcome::Interrupted => info!("Scan interrupted"),
    }
    info!(
        "Finished. Generated: {}, invalid keys: {}",
        report.counters.generated, report.counters.invalid
    );
    info!(
        "Results saved to {} and {}",
        sink.funded_path().display(),
        sink.matches_path().display()
    );

    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=info,h2=info,reqwest=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
