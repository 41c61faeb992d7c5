use super::error::Web3Error;
use super::provider::{ConnectionProvider, ContractProvider};
use contracts::shared::web3::{ConnectionHandle, ContractHandle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Progress of the two-step handle bootstrap
///
/// `Unmounted → ConnectionPending → ConnectionReady → ContractPending → ContractReady`,
/// with `Failed` as the terminal state of either step. There is no retry.
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapPhase {
    Unmounted,
    ConnectionPending,
    ConnectionReady(ConnectionHandle),
    ContractPending,
    ContractReady(ContractHandle),
    Failed(String),
}

impl BootstrapPhase {
    pub fn label(&self) -> String {
        match self {
            BootstrapPhase::Unmounted => "Not connected".to_string(),
            BootstrapPhase::ConnectionPending => "Connecting…".to_string(),
            BootstrapPhase::ConnectionReady(c) => format!("Connected to chain {}", c.chain_id),
            BootstrapPhase::ContractPending => "Loading contract…".to_string(),
            BootstrapPhase::ContractReady(c) => {
                format!("Contract {} on chain {}", c.address, c.chain_id)
            }
            BootstrapPhase::Failed(msg) => format!("Connection failed: {}", msg),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, BootstrapPhase::ContractReady(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, BootstrapPhase::Failed(_))
    }
}

/// Shared flag flipped on teardown; a cancelled bootstrap reports nothing
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Acquire a connection, then a contract bound to exactly that connection.
///
/// `on_phase` sees every transition except after cancellation. A handle
/// reported through `on_phase` belongs to the caller from then on; a handle
/// acquired after the token was cancelled and never reported is released here.
pub async fn acquire_handles(
    connections: &dyn ConnectionProvider,
    contracts: &dyn ContractProvider,
    cancel: &CancelToken,
    mut on_phase: impl FnMut(BootstrapPhase),
) -> Result<(ConnectionHandle, ContractHandle), Web3Error> {
    if cancel.is_cancelled() {
        return Err(Web3Error::Cancelled);
    }

    on_phase(BootstrapPhase::ConnectionPending);
    let connection = match connections.acquire().await {
        Ok(connection) => connection,
        Err(e) => return Err(fail(cancel, &mut on_phase, e)),
    };
    if cancel.is_cancelled() {
        connections.release_connection(&connection);
        return Err(Web3Error::Cancelled);
    }
    on_phase(BootstrapPhase::ConnectionReady(connection.clone()));

    on_phase(BootstrapPhase::ContractPending);
    let contract = match contracts.acquire(&connection).await {
        Ok(contract) => contract,
        Err(e) => return Err(fail(cancel, &mut on_phase, e)),
    };
    if cancel.is_cancelled() {
        // the connection went out with ConnectionReady; its owner releases it
        contracts.release_contract(&contract);
        return Err(Web3Error::Cancelled);
    }
    on_phase(BootstrapPhase::ContractReady(contract.clone()));

    Ok((connection, contract))
}

fn fail(
    cancel: &CancelToken,
    on_phase: &mut impl FnMut(BootstrapPhase),
    err: Web3Error,
) -> Web3Error {
    if cancel.is_cancelled() {
        return Web3Error::Cancelled;
    }
    log::error!("Bootstrap failed: {}", err);
    on_phase(BootstrapPhase::Failed(err.to_string()));
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::web3::testing::{
        local_connection, FakeConnectionProvider, FakeContractProvider,
    };
    use futures::executor::block_on;

    #[test]
    fn test_contract_uses_fresh_connection() {
        let connections = FakeConnectionProvider::ok(local_connection(1337));
        let contracts = FakeContractProvider::ok();
        let mut phases = Vec::new();

        let result = block_on(acquire_handles(
            &connections,
            &contracts,
            &CancelToken::new(),
            |phase| phases.push(phase),
        ));

        let (connection, contract) = result.unwrap();
        assert_eq!(connection, local_connection(1337));
        assert_eq!(connections.acquired(), 1);
        assert_eq!(contracts.received(), vec![local_connection(1337)]);
        assert!(contract.belongs_to(&connection));
        assert_eq!(
            phases,
            vec![
                BootstrapPhase::ConnectionPending,
                BootstrapPhase::ConnectionReady(local_connection(1337)),
                BootstrapPhase::ContractPending,
                BootstrapPhase::ContractReady(contract),
            ]
        );
    }

    #[test]
    fn test_connection_failure_skips_contract() {
        let connections = FakeConnectionProvider::failing(Web3Error::NoWallet);
        let contracts = FakeContractProvider::ok();
        let mut phases = Vec::new();

        let result = block_on(acquire_handles(
            &connections,
            &contracts,
            &CancelToken::new(),
            |phase| phases.push(phase),
        ));

        assert_eq!(result, Err(Web3Error::NoWallet));
        assert!(contracts.received().is_empty());
        assert_eq!(phases.last(), Some(&BootstrapPhase::Failed(Web3Error::NoWallet.to_string())));
    }

    #[test]
    fn test_contract_failure_is_terminal() {
        let connections = FakeConnectionProvider::ok(local_connection(1));
        let contracts =
            FakeContractProvider::failing(Web3Error::ContractNotDeployed("0xdead".into()));
        let mut phases = Vec::new();

        let result = block_on(acquire_handles(
            &connections,
            &contracts,
            &CancelToken::new(),
            |phase| phases.push(phase),
        ));

        assert!(matches!(result, Err(Web3Error::ContractNotDeployed(_))));
        assert!(phases.last().map(|p| p.is_failed()).unwrap_or(false));
        assert_eq!(connections.acquired(), 1);
    }

    #[test]
    fn test_cancel_during_connection_releases_handle() {
        let cancel = CancelToken::new();
        let connections =
            FakeConnectionProvider::ok(local_connection(1)).cancelling(cancel.clone());
        let contracts = FakeContractProvider::ok();
        let mut phases = Vec::new();

        let result = block_on(acquire_handles(&connections, &contracts, &cancel, |phase| {
            phases.push(phase)
        }));

        assert_eq!(result, Err(Web3Error::Cancelled));
        assert_eq!(connections.released(), 1);
        assert!(contracts.received().is_empty());
        assert_eq!(phases, vec![BootstrapPhase::ConnectionPending]);
    }

    #[test]
    fn test_cancel_during_contract_releases_only_contract() {
        let cancel = CancelToken::new();
        let connections = FakeConnectionProvider::ok(local_connection(1));
        let contracts = FakeContractProvider::ok();
        let hook = cancel.clone();
        contracts.on_acquire(move || hook.cancel());
        let mut phases = Vec::new();

        let result = block_on(acquire_handles(&connections, &contracts, &cancel, |phase| {
            phases.push(phase)
        }));

        assert_eq!(result, Err(Web3Error::Cancelled));
        assert_eq!(contracts.released(), 1);
        assert_eq!(connections.released(), 0);
        assert_eq!(
            phases,
            vec![
                BootstrapPhase::ConnectionPending,
                BootstrapPhase::ConnectionReady(local_connection(1)),
                BootstrapPhase::ContractPending,
            ]
        );
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let connections = FakeConnectionProvider::ok(local_connection(1));
        let contracts = FakeContractProvider::ok();

        let result = block_on(acquire_handles(&connections, &contracts, &cancel, |_| {}));

        assert_eq!(result, Err(Web3Error::Cancelled));
        assert_eq!(connections.acquired(), 0);
    }

    #[test]
    fn test_phase_labels() {
        assert!(BootstrapPhase::Failed("boom".into()).label().contains("boom"));
        assert!(!BootstrapPhase::ContractPending.is_ready());
        assert_eq!(BootstrapPhase::Unmounted.label(), "Not connected");
    }
}
