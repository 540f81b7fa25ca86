// Copyright (c) Smolegends Developers
// SPDX-License-Identifier: Apache-2.0

//! Periodic refresh of the number of minted tokens.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::gateway::ContractGateway;

/// How often the total supply is refreshed by default.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(100);

/// A background task that keeps the latest known total supply available.
///
/// The poller never issues overlapping reads: if a read outlasts the poll
/// interval, the next one only starts after it has finished.
pub struct SupplyPoller {
    latest: watch::Receiver<u64>,
    cancellation_token: CancellationToken,
    join_handle: JoinHandle<()>,
}

impl SupplyPoller {
    /// Spawns the polling task. The first read happens immediately.
    pub fn start<G>(gateway: Arc<G>, poll_interval: Duration) -> Self
    where
        G: ContractGateway + 'static,
    {
        let (sender, latest) = watch::channel(0);
        let cancellation_token = CancellationToken::new();
        let join_handle = tokio::spawn(Self::run(
            gateway,
            poll_interval,
            sender,
            cancellation_token.clone(),
        ));
        Self {
            latest,
            cancellation_token,
            join_handle,
        }
    }

    async fn run<G>(
        gateway: Arc<G>,
        poll_interval: Duration,
        sender: watch::Sender<u64>,
        cancellation_token: CancellationToken,
    ) where
        G: ContractGateway + 'static,
    {
        let mut timer = interval(poll_interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancellation_token.cancelled() => return,
                _ = timer.tick() => (),
            }
            let supply = tokio::select! {
                _ = cancellation_token.cancelled() => return,
                supply = gateway.total_supply() => supply,
            };
            match supply {
                Ok(supply) => {
                    debug!(supply, "refreshed the total supply");
                    sender.send_replace(supply);
                }
                Err(error) => {
                    warn!(%error, "failed to read the total supply; keeping the last value");
                }
            }
        }
    }

    /// The most recently observed total supply, or 0 before the first
    /// successful read.
    pub fn latest(&self) -> u64 {
        *self.latest.borrow()
    }

    /// A receiver that can be awaited for supply changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.latest.clone()
    }

    /// Stops the polling task and waits for it to finish.
    pub async fn shutdown(self) {
        self.cancellation_token.cancel();
        if let Err(error) = self.join_handle.await {
            warn!(%error, "the supply polling task panicked");
        }
    }
}
