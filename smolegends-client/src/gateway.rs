// Copyright (c) Smolegends Developers
// SPDX-License-Identifier: Apache-2.0

//! The two collaborators injected into the mint lifecycle controller.
//!
//! Production code uses the concrete `smolegends-ethereum` types; tests
//! substitute fakes.

use async_trait::async_trait;
use smolegends_ethereum::{
    common::EthereumServiceError,
    contract::{MintReceipt, MintSubmission, SmolegendsContract},
    session::{LocalWalletConnector, Session},
};

/// Supplies an authenticated signing session upon user-initiated connection.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Establishes a new session. Must be safe to retry after a failure and
    /// must not leave partial state behind.
    async fn connect(&self) -> Result<Session, EthereumServiceError>;
}

/// Operations of the fixed on-chain Smolegends contract.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Reads the number of tokens minted so far.
    async fn total_supply(&self) -> Result<u64, EthereumServiceError>;

    /// Reads the metadata URI of a token.
    async fn token_uri(&self, token_id: u64) -> Result<String, EthereumServiceError>;

    /// Submits a mint transaction signed by the session; returns once it is
    /// accepted as pending.
    async fn submit_mint(&self, session: &Session) -> Result<MintSubmission, EthereumServiceError>;

    /// Suspends until the submission is mined and returns the receipt.
    async fn confirm_mint(
        &self,
        submission: MintSubmission,
    ) -> Result<MintReceipt, EthereumServiceError>;
}

#[async_trait]
impl WalletConnector for LocalWalletConnector {
    async fn connect(&self) -> Result<Session, EthereumServiceError> {
        LocalWalletConnector::connect(self).await
    }
}

#[async_trait]
impl ContractGateway for SmolegendsContract {
    async fn total_supply(&self) -> Result<u64, EthereumServiceError> {
        SmolegendsContract::total_supply(self).await
    }

    async fn token_uri(&self, token_id: u64) -> Result<String, EthereumServiceError> {
        SmolegendsContract::token_uri(self, token_id).await
    }

    async fn submit_mint(&self, session: &Session) -> Result<MintSubmission, EthereumServiceError> {
        SmolegendsContract::submit_mint(self, session).await
    }

    async fn confirm_mint(
        &self,
        submission: MintSubmission,
    ) -> Result<MintReceipt, EthereumServiceError> {
        SmolegendsContract::confirm_mint(self, submission).await
    }
}
