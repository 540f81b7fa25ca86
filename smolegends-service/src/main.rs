// Copyright (c) Smolegends Developers
// SPDX-License-Identifier: Apache-2.0

//! The `smolegends` command-line tool, for minting tokens and watching the
//! supply of the collection.

use std::{sync::Arc, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use smolegends_client::{MintController, SupplyPoller};
use smolegends_ethereum::{
    contract::{SmolegendsContract, MAX_SUPPLY},
    session::LocalWalletConnector,
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "smolegends", about = "A command-line tool for the Smolegends mint.")]
struct Options {
    /// The URL of the Ethereum JSON-RPC endpoint.
    #[arg(long, env = "SMOLEGENDS_RPC_URL", default_value = "http://127.0.0.1:8545")]
    rpc_url: String,

    /// The address of the Smolegends contract.
    #[arg(
        long,
        env = "SMOLEGENDS_CONTRACT_ADDRESS",
        default_value = "0x4A679253410272dd5232B3Ff7cF5dbB88f295319"
    )]
    contract_address: String,

    /// How often to refresh the total supply, in seconds.
    #[arg(long, default_value = "100")]
    supply_poll_interval: u64,

    /// How long to wait for a mint transaction to be confirmed, in seconds.
    #[arg(long, default_value = "120")]
    confirmation_timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Print how many tokens have been minted so far.
    Supply,

    /// Mint a token and print its metadata.
    Mint {
        /// The private key of the minting account.
        #[arg(long, env = "SMOLEGENDS_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let options = Options::parse();
    let gateway = Arc::new(
        SmolegendsContract::new(&options.rpc_url, &options.contract_address)
            .context("failed to connect to the Smolegends contract")?,
    );

    match options.command {
        Command::Supply => {
            let supply = gateway.total_supply().await?;
            println!("{supply}/{MAX_SUPPLY} minted");
        }
        Command::Mint { private_key } => {
            let connector = LocalWalletConnector::new(&options.rpc_url, private_key);
            let mut controller = MintController::new(connector, gateway.clone())
                .with_confirmation_timeout(Duration::from_secs(options.confirmation_timeout));
            let poller = SupplyPoller::start(
                gateway,
                Duration::from_secs(options.supply_poll_interval),
            );

            let address = controller.connect().await?;
            info!(address = %smolegends_ethereum::session::shorten_address(
                &format!("{address:?}")
            ), "connected");

            let token_id = controller.mint().await?;
            println!("minted token {token_id}");
            match (controller.metadata(), controller.metadata_error()) {
                (Some(metadata), _) => println!("image: {}", metadata.image),
                (None, Some(error)) => println!("metadata could not be resolved: {error}"),
                (None, None) => (),
            }

            let mut updates = poller.subscribe();
            updates.changed().await.ok();
            println!("{}/{MAX_SUPPLY} minted", poller.latest());
            poller.shutdown().await;
        }
    }
    Ok(())
}
