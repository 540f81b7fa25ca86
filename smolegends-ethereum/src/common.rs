// Copyright (c) Smolegends Developers
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EthereumServiceError {
    /// URL parsing error
    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),

    /// JSON-RPC provider error
    #[error(transparent)]
    ProviderError(#[from] ethers::providers::ProviderError),

    /// Signing key error
    #[error(transparent)]
    WalletError(#[from] ethers::signers::WalletError),

    #[error("invalid contract or account address: {0}")]
    InvalidAddress(String),

    #[error("contract call failed: {0}")]
    ContractError(String),

    #[error("the transaction was dropped from the mempool before being mined")]
    DroppedTransaction,

    #[error("no Minted event was found in the transaction receipt")]
    MissingMintedEvent,
}
