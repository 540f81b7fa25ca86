// Copyright (c) Smolegends Developers
// SPDX-License-Identifier: Apache-2.0

//! This module provides the client-side lifecycle for minting a Smolegend:
//! wallet connection, transaction submission and confirmation, metadata
//! resolution, and background supply polling.
//!
//! The [`controller::MintController`] drives the lifecycle against the two
//! injected collaborators defined in [`gateway`], so it can be exercised
//! without a node or any rendering harness.

pub mod controller;
pub mod error;
pub mod gateway;
pub mod metadata;
pub mod supply;

#[cfg(test)]
mod test_utils;

pub use self::{
    controller::{MintController, MintStatus, DEFAULT_CONFIRMATION_TIMEOUT},
    error::{ConnectionError, MetadataError, MintError, MintFailure},
    gateway::{ContractGateway, WalletConnector},
    metadata::{decode_token_metadata, encode_token_metadata, TokenMetadata},
    supply::{SupplyPoller, DEFAULT_POLL_INTERVAL},
};
