use super::error::Web3Error;
use super::rpc::{injected_provider, select_transport, RpcClient};
use crate::shared::config::Web3Config;
use async_trait::async_trait;
use contracts::domain::w001_watch_party::aggregate::{
    AccessRequestReceipt, AccessRequestsPage, PartyId,
};
use contracts::domain::w002_account::aggregate::AccountAddress;
use contracts::shared::web3::{
    is_empty_code, ChainId, ConnectionHandle, ContractAddress, ContractHandle,
};
use serde_json::json;

/// Produces a connection handle to a blockchain node
#[async_trait(?Send)]
pub trait ConnectionProvider: Send + Sync {
    async fn acquire(&self) -> Result<ConnectionHandle, Web3Error>;

    fn release_connection(&self, _connection: &ConnectionHandle) {}
}

/// Produces a contract handle scoped to the connection it is given
#[async_trait(?Send)]
pub trait ContractProvider: Send + Sync {
    async fn acquire(&self, connection: &ConnectionHandle) -> Result<ContractHandle, Web3Error>;

    fn release_contract(&self, _contract: &ContractHandle) {}
}

/// Party access control operations
///
/// Their on-chain semantics live with the contract, not here.
#[async_trait(?Send)]
pub trait AccessControl: Send + Sync {
    /// Submit an access request for `party_id` on behalf of `requester`
    async fn request_access(
        &self,
        contract: &ContractHandle,
        requester: &AccountAddress,
        party_id: &PartyId,
    ) -> Result<AccessRequestReceipt, Web3Error>;

    /// Fetch the pending access requests of `party_id`
    async fn access_requests(
        &self,
        contract: &ContractHandle,
        party_id: &PartyId,
    ) -> Result<AccessRequestsPage, Web3Error>;
}

// ============================================================================
// Connection
// ============================================================================

/// Connects through the injected wallet, or the configured RPC URL when there is none
#[derive(Debug, Clone)]
pub struct BrowserConnectionProvider {
    rpc_url: Option<String>,
    expected_chain: Option<ChainId>,
}

impl BrowserConnectionProvider {
    pub fn from_config(config: &Web3Config) -> Self {
        Self {
            rpc_url: config.rpc_url.clone(),
            expected_chain: config.chain_id.map(ChainId),
        }
    }
}

pub fn check_chain(expected: Option<ChainId>, actual: ChainId) -> Result<(), Web3Error> {
    match expected {
        Some(expected) if expected != actual => Err(Web3Error::ChainMismatch { expected, actual }),
        _ => Ok(()),
    }
}

#[async_trait(?Send)]
impl ConnectionProvider for BrowserConnectionProvider {
    async fn acquire(&self) -> Result<ConnectionHandle, Web3Error> {
        let transport = select_transport(injected_provider().is_some(), self.rpc_url.as_deref())?;
        let client = RpcClient::new(transport.clone());

        let chain_hex: String = client.call("eth_chainId", json!([])).await?;
        let chain_id = ChainId::from_hex(&chain_hex).map_err(Web3Error::Decode)?;
        check_chain(self.expected_chain, chain_id)?;

        log::info!("Connected to chain {} via {}", chain_id, transport.label());
        Ok(ConnectionHandle {
            transport,
            chain_id,
        })
    }

    fn release_connection(&self, connection: &ConnectionHandle) {
        log::info!(
            "Released connection to chain {} via {}",
            connection.chain_id,
            connection.transport.label()
        );
    }
}

// ============================================================================
// Contract
// ============================================================================

/// Binds the configured contract address after checking code is deployed there
#[derive(Debug, Clone)]
pub struct DeployedContractProvider {
    address: String,
}

impl DeployedContractProvider {
    pub fn from_config(config: &Web3Config) -> Self {
        Self {
            address: config.contract_address.clone(),
        }
    }
}

#[async_trait(?Send)]
impl ContractProvider for DeployedContractProvider {
    async fn acquire(&self, connection: &ConnectionHandle) -> Result<ContractHandle, Web3Error> {
        let address = ContractAddress::parse(&self.address).map_err(Web3Error::InvalidAddress)?;
        let client = RpcClient::for_connection(connection);

        let code: String = client
            .call("eth_getCode", json!([address.as_str(), "latest"]))
            .await?;
        if is_empty_code(&code) {
            return Err(Web3Error::ContractNotDeployed(address.to_string()));
        }

        log::info!("Contract {} bound on chain {}", address, connection.chain_id);
        Ok(ContractHandle::bind(address, connection))
    }

    fn release_contract(&self, contract: &ContractHandle) {
        log::info!("Released contract {}", contract.address);
    }
}

// ============================================================================
// Access control
// ============================================================================

/// Placeholder until the contract's access-control ABI is supplied
#[derive(Debug, Clone, Default)]
pub struct PendingAccessControl;

#[async_trait(?Send)]
impl AccessControl for PendingAccessControl {
    async fn request_access(
        &self,
        contract: &ContractHandle,
        requester: &AccountAddress,
        party_id: &PartyId,
    ) -> Result<AccessRequestReceipt, Web3Error> {
        log::warn!(
            "request_access(party={}, requester={}) on {}: no access control bound",
            party_id,
            requester,
            contract.address
        );
        Err(Web3Error::NotImplemented("Request Access"))
    }

    async fn access_requests(
        &self,
        contract: &ContractHandle,
        party_id: &PartyId,
    ) -> Result<AccessRequestsPage, Web3Error> {
        log::warn!(
            "access_requests(party={}) on {}: no access control bound",
            party_id,
            contract.address
        );
        Err(Web3Error::NotImplemented("Get Access Requests"))
    }
}
