//! NFT mint CLI.
//!
//! ```text
//!  nft-mint mint --name .. --description .. --image-url .. [--recipient 0x..]
//!      │
//!      ▼
//!  ┌────────┐   ┌────────────┐   ┌──────────┐   ┌───────────────┐
//!  │ config │──▶│ form       │──▶│ workflow │──▶│ wallet bridge │ sign + execute
//!  └────────┘   │ validation │   └────┬─────┘   └───────────────┘
//!               └────────────┘        │
//!                                     ▼
//!                               ┌───────────┐
//!                               │ full node │ wait for finality
//!                               └───────────┘
//! ```
//!
//! The runtime is single-threaded: every network wait is an `.await` point and
//! nothing else touches the attempt while it is suspended.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use nft_mint::chain::wallet::wallet_status_text;
use nft_mint::chain::{BridgeWallet, MintTxBuilder, SuiClient};
use nft_mint::config::validation::validate_config;
use nft_mint::config::{load_config, ConfigError, MintConfig, Network};
use nft_mint::mint::{parse_form, FormError, FormField, MintForm, MintFormValues, MintWorkflow};
use nft_mint::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "nft-mint")]
#[command(about = "Mint NFTs on Sui through a connected wallet", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Network to use (mainnet, testnet, devnet)
    #[arg(long, global = true)]
    network: Option<Network>,

    /// Full node URL, overrides the network default
    #[arg(long, global = true)]
    fullnode_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MetadataArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    description: String,

    #[arg(long)]
    image_url: String,

    /// Recipient address; defaults to the connected account
    #[arg(long)]
    recipient: Option<String>,
}

impl From<MetadataArgs> for MintFormValues {
    fn from(args: MetadataArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            image_url: args.image_url,
            recipient: args.recipient,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate metadata and mint it through the wallet
    Mint(MetadataArgs),
    /// Validate metadata only and print the normalized request
    Check(MetadataArgs),
    /// Show endpoint, node and wallet status
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(
        cli.config.as_deref(),
        |key| std::env::var(key).ok(),
        |config| {
            if let Some(network) = cli.network {
                config.network.network = network;
            }
            if let Some(url) = cli.fullnode_url {
                config.network.fullnode_url = Some(url);
            }
        },
    )?;

    init_logging(&config.observability)?;

    match cli.command {
        Commands::Mint(args) => {
            validate_config(&config).map_err(ConfigError::Validation)?;
            tracing::info!(
                network = %config.network.network,
                rpc_url = %config.network.resolve_rpc_url(),
                "Configuration loaded"
            );
            mint(&config, args.into()).await
        }
        Commands::Check(args) => check(args.into()),
        Commands::Status => status(&config).await,
    }
}

async fn mint(config: &MintConfig, values: MintFormValues) -> Result<(), Box<dyn std::error::Error>> {
    // Fatal configuration problems surface here, before the wallet is involved.
    let builder = MintTxBuilder::new(&config.contract)?;
    let client = Arc::new(SuiClient::new(&config.network)?);
    let wallet = Arc::new(BridgeWallet::new(&config.wallet));

    if let Err(e) = wallet.connect().await {
        tracing::warn!(error = %e, "Could not reach the wallet bridge");
    }
    println!("{}", wallet_status_text(&*wallet));

    let workflow = MintWorkflow::new(builder, wallet, client);
    let mut form = MintForm::new(workflow);
    for field in [FormField::Name, FormField::Description, FormField::ImageUrl] {
        form.set_field(field, values.get(field));
    }
    if let Some(recipient) = values.recipient {
        form.set_field(FormField::Recipient, recipient);
    }

    match form.submit().await {
        Ok(response) => {
            println!("{}", form.helper_text());
            println!("Digest: {}", response.digest);
            println!("Confirmed local execution: {}", response.confirmed_local_execution);
            Ok(())
        }
        Err(FormError::Invalid(errors)) => {
            for (field, message) in &errors {
                eprintln!("{}: {}", field, message);
            }
            Err("metadata is invalid".into())
        }
        Err(FormError::Mint(e)) => {
            eprintln!("Status: {}", form.helper_text());
            Err(e.into())
        }
    }
}

fn check(values: MintFormValues) -> Result<(), Box<dyn std::error::Error>> {
    match parse_form(&values) {
        Ok(request) => {
            println!("{}", serde_json::to_string_pretty(&request)?);
            Ok(())
        }
        Err(errors) => {
            for (field, message) in &errors {
                eprintln!("{}: {}", field, message);
            }
            Err("metadata is invalid".into())
        }
    }
}

async fn status(config: &MintConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = SuiClient::new(&config.network)?;
    println!("Network: {}", config.network.network);
    println!("RPC endpoint: {}", client.rpc_url());
    match client.get_chain_identifier().await {
        Ok(id) => println!("Chain identifier: {}", id),
        Err(e) => println!("RPC unreachable: {}", e),
    }

    let wallet = BridgeWallet::new(&config.wallet);
    if let Err(e) = wallet.connect().await {
        tracing::warn!(error = %e, "Could not reach the wallet bridge");
    }
    println!("{}", wallet_status_text(&wallet));
    Ok(())
}
