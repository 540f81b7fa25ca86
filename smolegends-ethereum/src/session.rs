// Copyright (c) Smolegends Developers
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware as _, Provider},
    signers::{LocalWallet, Signer as _},
    types::Address,
};

use crate::common::EthereumServiceError;

/// The middleware stack used for signing mint transactions.
pub type MintClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// An authenticated signer and network provider pair.
///
/// Established once per connection and never persisted.
#[derive(Clone, Debug)]
pub struct Session {
    client: Arc<MintClient>,
    address: Address,
}

impl Session {
    pub fn new(client: Arc<MintClient>, address: Address) -> Self {
        Self { client, address }
    }

    pub fn client(&self) -> Arc<MintClient> {
        self.client.clone()
    }

    /// The account address of the connected signer.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Shortened form of the account address, for display.
    pub fn short_address(&self) -> String {
        shorten_address(&format!("{:?}", self.address))
    }
}

/// Keeps the first 8 and the last 6 characters of an `0x`-prefixed address.
pub fn shorten_address(address: &str) -> String {
    if address.len() <= 14 {
        return address.to_string();
    }
    format!("{}...{}", &address[..8], &address[address.len() - 6..])
}

/// Establishes sessions from a locally held private key, the counterpart of a
/// browser wallet connection.
#[derive(Clone, Debug)]
pub struct LocalWalletConnector {
    rpc_url: String,
    private_key: String,
}

impl LocalWalletConnector {
    pub fn new(rpc_url: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            private_key: private_key.into(),
        }
    }

    /// Connects to the node and derives the signing session.
    ///
    /// Safe to call again after a failure; no partial session is ever
    /// produced.
    pub async fn connect(&self) -> Result<Session, EthereumServiceError> {
        let provider = Provider::<Http>::try_from(self.rpc_url.as_str())?;
        let chain_id = provider.get_chainid().await?;
        let wallet = self
            .private_key
            .parse::<LocalWallet>()?
            .with_chain_id(chain_id.as_u64());
        let address = wallet.address();
        let client = SignerMiddleware::new(provider, wallet);
        Ok(Session::new(Arc::new(client), address))
    }
}
