// Copyright (c) Smolegends Developers
// SPDX-License-Identifier: Apache-2.0

use std::{net::TcpListener, path::Path, sync::Arc};

use anyhow::Result;
use ethers::{
    abi::Abi,
    contract::{ContractFactory, EthEvent},
    middleware::SignerMiddleware,
    providers::{Http, Provider},
    signers::{LocalWallet, Signer as _},
    solc::Solc,
    types::{Bytes, Log, U256},
    utils::{hex, Anvil, AnvilInstance},
};

use crate::{
    contract::{MintedFilter, SmolegendsContract},
    session::LocalWalletConnector,
};

/// Returns a TCP port that is currently free on localhost.
pub fn get_free_port() -> Result<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    Ok(listener.local_addr()?.port())
}

pub struct AnvilTest {
    pub anvil_instance: AnvilInstance,
    pub endpoint: String,
}

/// Spawns a local Anvil node on a free port.
pub fn get_anvil() -> Result<AnvilTest> {
    let port = get_free_port()?;
    let anvil_instance = Anvil::new().port(port).spawn();
    let endpoint = anvil_instance.endpoint();
    Ok(AnvilTest {
        anvil_instance,
        endpoint,
    })
}

impl AnvilTest {
    /// A wallet connector for one of the node's funded development accounts.
    pub fn connector(&self, index: usize) -> LocalWalletConnector {
        let key = self.anvil_instance.keys()[index].clone();
        LocalWalletConnector::new(&self.endpoint, hex::encode(key.to_bytes()))
    }

    pub fn get_address(&self, index: usize) -> String {
        format!("{:?}", self.anvil_instance.addresses()[index])
    }
}

fn get_abi_bytecode(contract_file: &str, contract_name: &str) -> (Abi, Bytes) {
    let source = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("contracts")
        .join(contract_file);
    let compiled = Solc::default()
        .compile_source(source)
        .expect("could not compile the contract");
    let (abi, bytecode, _runtime_bytecode) = compiled
        .find(contract_name)
        .expect("could not find the contract")
        .into_parts_or_default();
    (abi, bytecode)
}

/// A Smolegends contract deployed on a local Anvil node.
pub struct SmolegendsDeployment {
    pub contract_address: String,
    pub anvil_test: AnvilTest,
}

impl SmolegendsDeployment {
    pub async fn new(anvil_test: AnvilTest) -> Result<Self> {
        let (abi, bytecode) = get_abi_bytecode("smolegends.sol", "Smolegends");
        let wallet: LocalWallet = anvil_test.anvil_instance.keys()[0].clone().into();
        let wallet = wallet.with_chain_id(anvil_test.anvil_instance.chain_id());
        let provider = Provider::<Http>::try_from(anvil_test.endpoint.as_str())?;
        let client = Arc::new(SignerMiddleware::new(provider, wallet));
        let factory = ContractFactory::new(abi, bytecode, client);
        let contract = factory.deploy(())?.legacy().send().await?;
        let contract_address = format!("{:?}", contract.address());
        Ok(Self {
            contract_address,
            anvil_test,
        })
    }

    /// Binds a [`SmolegendsContract`] to the deployment.
    pub fn gateway(&self) -> Result<SmolegendsContract> {
        Ok(SmolegendsContract::new(
            &self.anvil_test.endpoint,
            &self.contract_address,
        )?)
    }
}

/// Builds a receipt log carrying a `Minted(id)` event, for tests that do not
/// run a node.
pub fn minted_log(token_id: u64) -> Log {
    let mut data = [0_u8; 32];
    U256::from(token_id).to_big_endian(&mut data);
    Log {
        topics: vec![MintedFilter::signature()],
        data: data.to_vec().into(),
        ..Log::default()
    }
}
