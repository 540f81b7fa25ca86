// Copyright (c) Smolegends Developers
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use ethers::{
    abi::RawLog,
    contract::{abigen, EthLogDecode},
    providers::{Http, PendingTransaction, Provider},
    types::{Address, Log, H256, U256},
};

use crate::{common::EthereumServiceError, session::Session};

abigen!(
    Smolegends,
    r#"[
        function mintSmolegend()
        function totalSupply() view returns (uint256)
        function tokenURI(uint256 id) view returns (string)
        event Minted(uint256 id)
    ]"#,
    event_derives(serde::Deserialize, serde::Serialize)
);

/// Number of Smolegends that can ever be minted.
pub const MAX_SUPPLY: u64 = 10_000;

/// A mint transaction that has been accepted into the pending pool but not
/// yet mined.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MintSubmission {
    pub transaction_hash: H256,
}

/// The confirmation record of a mined mint transaction.
#[derive(Clone, Debug)]
pub struct MintReceipt {
    pub transaction_hash: H256,
    pub block_number: Option<u64>,
    pub logs: Vec<Log>,
}

/// The Smolegends contract as seen from one Ethereum node.
///
/// Read-only views go through the node's own provider; minting runs through
/// the signer of the given [`Session`].
pub struct SmolegendsContract {
    address: Address,
    reader: Smolegends<Provider<Http>>,
}

impl SmolegendsContract {
    /// Connects to an Ethereum node and binds the contract deployed at
    /// `contract_address`.
    pub fn new(url: &str, contract_address: &str) -> Result<Self, EthereumServiceError> {
        let provider = Provider::<Http>::try_from(url)?;
        let address = contract_address
            .parse::<Address>()
            .map_err(|_| EthereumServiceError::InvalidAddress(contract_address.to_string()))?;
        let reader = Smolegends::new(address, Arc::new(provider));
        Ok(Self { address, reader })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Returns the number of Smolegends minted so far.
    pub async fn total_supply(&self) -> Result<u64, EthereumServiceError> {
        let supply: U256 = self
            .reader
            .total_supply()
            .call()
            .await
            .map_err(|error| EthereumServiceError::ContractError(error.to_string()))?;
        Ok(supply.as_u64())
    }

    /// Returns the metadata URI of the given token.
    pub async fn token_uri(&self, token_id: u64) -> Result<String, EthereumServiceError> {
        self.reader
            .token_uri(U256::from(token_id))
            .call()
            .await
            .map_err(|error| EthereumServiceError::ContractError(error.to_string()))
    }

    /// Submits a mint transaction signed by the session, returning as soon as
    /// the node has accepted it into the pending pool.
    pub async fn submit_mint(
        &self,
        session: &Session,
    ) -> Result<MintSubmission, EthereumServiceError> {
        let contract = Smolegends::new(self.address, session.client());
        let call = contract.mint_smolegend();
        let pending = call
            .send()
            .await
            .map_err(|error| EthereumServiceError::ContractError(error.to_string()))?;
        Ok(MintSubmission {
            transaction_hash: *pending,
        })
    }

    /// Suspends until the submitted transaction is mined and returns its
    /// confirmation record.
    pub async fn confirm_mint(
        &self,
        submission: MintSubmission,
    ) -> Result<MintReceipt, EthereumServiceError> {
        let provider = self.reader.client();
        let receipt = PendingTransaction::new(submission.transaction_hash, provider.as_ref())
            .await?
            .ok_or(EthereumServiceError::DroppedTransaction)?;
        Ok(MintReceipt {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number.map(|number| number.as_u64()),
            logs: receipt.logs,
        })
    }
}

/// Extracts the token id from the first decodable `Minted` event among the
/// receipt's logs.
pub fn find_minted_id(logs: &[Log]) -> Result<u64, EthereumServiceError> {
    logs.iter()
        .find_map(|log| {
            let raw = RawLog {
                topics: log.topics.clone(),
                data: log.data.to_vec(),
            };
            <MintedFilter as EthLogDecode>::decode_log(&raw).ok()
        })
        .map(|event| event.id.as_u64())
        .ok_or(EthereumServiceError::MissingMintedEvent)
}
