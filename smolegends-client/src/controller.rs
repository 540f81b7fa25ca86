// Copyright (c) Smolegends Developers
// SPDX-License-Identifier: Apache-2.0

use std::{sync::Arc, time::Duration};

use ethers::types::Address;
use smolegends_ethereum::{contract::find_minted_id, session::Session};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::{
    error::{ConnectionError, MetadataError, MintError, MintFailure},
    gateway::{ContractGateway, WalletConnector},
    metadata::{decode_token_metadata, TokenMetadata},
};

/// How long `mint` waits for the transaction to be mined before giving up.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);

/// The lifecycle state of the mint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MintStatus {
    /// No mint has been submitted.
    Idle,
    /// A mint transaction is pending or awaiting confirmation.
    Minting,
    /// A receipt with a `Minted` event was observed.
    Minted { token_id: u64 },
    /// The last attempt failed; minting may be retried.
    Failed(MintFailure),
}

/// Drives the wallet-connection, mint-submission, confirmation and
/// metadata-resolution sequence against injected collaborators.
pub struct MintController<W, G> {
    connector: W,
    gateway: Arc<G>,
    confirmation_timeout: Duration,
    session: Option<Session>,
    status: MintStatus,
    metadata: Option<Result<TokenMetadata, MetadataError>>,
}

impl<W, G> MintController<W, G>
where
    W: WalletConnector,
    G: ContractGateway,
{
    pub fn new(connector: W, gateway: Arc<G>) -> Self {
        Self {
            connector,
            gateway,
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            session: None,
            status: MintStatus::Idle,
            metadata: None,
        }
    }

    /// Overrides the transaction confirmation timeout.
    pub fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    pub fn status(&self) -> MintStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// The connected account, if any.
    pub fn account(&self) -> Option<Address> {
        self.session.as_ref().map(Session::address)
    }

    /// The resolved metadata of the minted token, once available.
    pub fn metadata(&self) -> Option<&TokenMetadata> {
        match &self.metadata {
            Some(Ok(metadata)) => Some(metadata),
            _ => None,
        }
    }

    /// The error of the last failed metadata resolution, if any.
    pub fn metadata_error(&self) -> Option<&MetadataError> {
        match &self.metadata {
            Some(Err(error)) => Some(error),
            _ => None,
        }
    }

    /// Establishes a wallet session.
    ///
    /// Reconnecting replaces the session; a failed attempt leaves any
    /// existing session untouched.
    pub async fn connect(&mut self) -> Result<Address, ConnectionError> {
        let session = self.connector.connect().await?;
        let address = session.address();
        info!(address = %session.short_address(), "wallet connected");
        self.session = Some(session);
        Ok(address)
    }

    /// Mints one Smolegend: submits the transaction, suspends until it is
    /// mined, and extracts the token id from the emitted `Minted` event.
    ///
    /// Permitted from `Idle` and `Failed`; rejected while `Minting` and once
    /// `Minted`. Every failure after submission is recorded as a distinct
    /// [`MintStatus::Failed`] state.
    pub async fn mint(&mut self) -> Result<u64, MintError> {
        let session = self.session.clone().ok_or(MintError::NotConnected)?;
        match self.status {
            MintStatus::Minting => return Err(MintError::MintInProgress),
            MintStatus::Minted { token_id } => return Err(MintError::AlreadyMinted(token_id)),
            MintStatus::Idle | MintStatus::Failed(_) => (),
        }
        self.status = MintStatus::Minting;
        match self.run_mint(&session).await {
            Ok(token_id) => {
                info!(token_id, "mint confirmed");
                self.status = MintStatus::Minted { token_id };
                self.resolve_metadata(token_id).await;
                Ok(token_id)
            }
            Err(error) => {
                warn!(%error, "mint attempt failed");
                if let Some(failure) = error.failure() {
                    self.status = MintStatus::Failed(failure);
                }
                Err(error)
            }
        }
    }

    async fn run_mint(&self, session: &Session) -> Result<u64, MintError> {
        let submission = self.gateway.submit_mint(session).await?;
        debug!(
            transaction_hash = ?submission.transaction_hash,
            "mint transaction submitted"
        );
        let receipt = timeout(
            self.confirmation_timeout,
            self.gateway.confirm_mint(submission),
        )
        .await
        .map_err(|_| MintError::ConfirmationTimeout)??;
        find_minted_id(&receipt.logs).map_err(|_| MintError::MissingMintedEvent)
    }

    /// Fetches and decodes the metadata of `token_id`, replacing any
    /// previously resolved value.
    ///
    /// Decode failures are recorded and exposed through
    /// [`MintController::metadata_error`] rather than propagated.
    pub async fn resolve_metadata(&mut self, token_id: u64) {
        self.metadata = None;
        let result = self.fetch_metadata(token_id).await;
        if let Err(error) = &result {
            warn!(token_id, %error, "failed to resolve token metadata");
        }
        self.metadata = Some(result);
    }

    async fn fetch_metadata(&self, token_id: u64) -> Result<TokenMetadata, MetadataError> {
        let uri = self.gateway.token_uri(token_id).await?;
        decode_token_metadata(&uri)
    }
}
