// Copyright (c) Smolegends Developers
// SPDX-License-Identifier: Apache-2.0

use smolegends_ethereum::common::EthereumServiceError;
use thiserror::Error;

/// Errors establishing a wallet session: the node is unreachable, the key is
/// rejected, or the user aborted the connection.
pub type ConnectionError = EthereumServiceError;

/// Why a mint attempt ended in [`crate::MintStatus::Failed`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MintFailure {
    /// The transaction was rejected at submission or failed to confirm.
    Transaction,
    /// The node did not mine the transaction within the configured timeout.
    Timeout,
    /// The confirmed receipt carried no `Minted` event.
    MissingMintedEvent,
}

#[derive(Debug, Error)]
pub enum MintError {
    #[error("no wallet session; connect before minting")]
    NotConnected,

    #[error("a mint is already in progress")]
    MintInProgress,

    #[error("this session already minted token {0}")]
    AlreadyMinted(u64),

    #[error("mint transaction failed: {0}")]
    Transaction(#[from] EthereumServiceError),

    #[error("timed out waiting for the mint transaction to be mined")]
    ConfirmationTimeout,

    #[error("the confirmed receipt contains no Minted event")]
    MissingMintedEvent,
}

impl MintError {
    /// The failure kind to record in the lifecycle state.
    ///
    /// Guard violations return `None`: they reject the call before the state
    /// changes, so no attempt actually failed.
    pub(crate) fn failure(&self) -> Option<MintFailure> {
        match self {
            MintError::Transaction(_) => Some(MintFailure::Transaction),
            MintError::ConfirmationTimeout => Some(MintFailure::Timeout),
            MintError::MissingMintedEvent => Some(MintFailure::MissingMintedEvent),
            MintError::NotConnected | MintError::MintInProgress | MintError::AlreadyMinted(_) => {
                None
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("token URI query failed: {0}")]
    Query(#[from] EthereumServiceError),

    #[error("the token URI is not a base64 JSON data URI")]
    NotADataUri,

    #[error("the metadata payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("the metadata payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("the metadata contains no image reference")]
    MissingImage,
}
