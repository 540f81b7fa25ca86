// Copyright (c) Smolegends Developers
// SPDX-License-Identifier: Apache-2.0

//! Fake collaborators for exercising the controller and the supply poller
//! without a node.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Provider},
    signers::{LocalWallet, Signer as _},
    types::H256,
};
use smolegends_ethereum::{
    common::EthereumServiceError,
    contract::{MintReceipt, MintSubmission},
    session::Session,
    test_utils::minted_log,
};

use crate::gateway::{ContractGateway, WalletConnector};

/// Well-known Anvil development key; only used to fabricate sessions.
const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// A session whose provider is never contacted.
pub fn test_session() -> Session {
    let provider = Provider::<Http>::try_from("http://127.0.0.1:8545").unwrap();
    let wallet = TEST_PRIVATE_KEY
        .parse::<LocalWallet>()
        .unwrap()
        .with_chain_id(31337_u64);
    let address = wallet.address();
    Session::new(Arc::new(SignerMiddleware::new(provider, wallet)), address)
}

fn unscripted(operation: &str) -> EthereumServiceError {
    EthereumServiceError::ContractError(format!("unscripted {operation}"))
}

/// A wallet connector that replays scripted outcomes, then keeps succeeding.
pub struct FakeConnector {
    outcomes: Mutex<VecDeque<Result<Session, EthereumServiceError>>>,
}

impl FakeConnector {
    pub fn new(
        outcomes: impl IntoIterator<Item = Result<Session, EthereumServiceError>>,
    ) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
        }
    }

    pub fn succeeding() -> Self {
        Self::new([])
    }
}

#[async_trait]
impl WalletConnector for FakeConnector {
    async fn connect(&self) -> Result<Session, EthereumServiceError> {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(test_session()))
    }
}

pub enum ConfirmOutcome {
    Receipt(MintReceipt),
    Error(EthereumServiceError),
    /// Never resolves, as if the transaction were stuck in the mempool.
    Hang,
}

/// A contract gateway that replays scripted responses and records how its
/// read path is exercised.
#[derive(Default)]
pub struct FakeGateway {
    supplies: Mutex<VecDeque<Result<u64, EthereumServiceError>>>,
    read_delay: Duration,
    pub in_flight_reads: AtomicUsize,
    pub max_in_flight_reads: AtomicUsize,
    pub total_reads: AtomicUsize,
    uris: Mutex<VecDeque<Result<String, EthereumServiceError>>>,
    submissions: Mutex<VecDeque<Result<MintSubmission, EthereumServiceError>>>,
    confirmations: Mutex<VecDeque<ConfirmOutcome>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_supplies(
        self,
        supplies: impl IntoIterator<Item = Result<u64, EthereumServiceError>>,
    ) -> Self {
        *self.supplies.lock().unwrap() = supplies.into_iter().collect();
        self
    }

    /// Makes every supply read take `delay` before responding.
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = delay;
        self
    }

    pub fn with_uri(self, uri: &str) -> Self {
        self.uris.lock().unwrap().push_back(Ok(uri.to_string()));
        self
    }

    pub fn with_submission_ok(self) -> Self {
        self.submissions.lock().unwrap().push_back(Ok(MintSubmission {
            transaction_hash: H256::repeat_byte(1),
        }));
        self
    }

    pub fn with_submission_error(self) -> Self {
        self.submissions
            .lock()
            .unwrap()
            .push_back(Err(EthereumServiceError::ContractError(
                "the node rejected the transaction".to_string(),
            )));
        self
    }

    pub fn with_confirmation(self, outcome: ConfirmOutcome) -> Self {
        self.confirmations.lock().unwrap().push_back(outcome);
        self
    }

    /// A receipt whose logs carry a `Minted(token_id)` event.
    pub fn minted_receipt(token_id: u64) -> MintReceipt {
        MintReceipt {
            transaction_hash: H256::repeat_byte(1),
            block_number: Some(1),
            logs: vec![minted_log(token_id)],
        }
    }

    /// A confirmed receipt without any events.
    pub fn empty_receipt() -> MintReceipt {
        MintReceipt {
            transaction_hash: H256::repeat_byte(1),
            block_number: Some(1),
            logs: Vec::new(),
        }
    }
}

#[async_trait]
impl ContractGateway for FakeGateway {
    async fn total_supply(&self) -> Result<u64, EthereumServiceError> {
        let current = self.in_flight_reads.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight_reads.fetch_max(current, Ordering::SeqCst);
        if !self.read_delay.is_zero() {
            tokio::time::sleep(self.read_delay).await;
        }
        self.in_flight_reads.fetch_sub(1, Ordering::SeqCst);
        self.total_reads.fetch_add(1, Ordering::SeqCst);
        self.supplies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("total_supply")))
    }

    async fn token_uri(&self, _token_id: u64) -> Result<String, EthereumServiceError> {
        self.uris
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("token_uri")))
    }

    async fn submit_mint(&self, _session: &Session) -> Result<MintSubmission, EthereumServiceError> {
        self.submissions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("submit_mint")))
    }

    async fn confirm_mint(
        &self,
        _submission: MintSubmission,
    ) -> Result<MintReceipt, EthereumServiceError> {
        let outcome = self.confirmations.lock().unwrap().pop_front();
        match outcome {
            Some(ConfirmOutcome::Receipt(receipt)) => Ok(receipt),
            Some(ConfirmOutcome::Error(error)) => Err(error),
            Some(ConfirmOutcome::Hang) => std::future::pending().await,
            None => Err(unscripted("confirm_mint")),
        }
    }
}
