//! In-memory providers for exercising the bootstrap and view models natively

use super::bootstrap::CancelToken;
use super::error::Web3Error;
use super::provider::{AccessControl, ConnectionProvider, ContractProvider};
use async_trait::async_trait;
use contracts::domain::w001_watch_party::aggregate::{
    AccessRequestReceipt, AccessRequestsPage, PartyId,
};
use contracts::domain::w002_account::aggregate::AccountAddress;
use contracts::shared::web3::{
    ChainId, ConnectionHandle, ContractAddress, ContractHandle, Transport,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

pub const CONTRACT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

pub fn local_connection(chain: u64) -> ConnectionHandle {
    ConnectionHandle {
        transport: Transport::Http {
            url: "http://127.0.0.1:8545".into(),
        },
        chain_id: ChainId(chain),
    }
}

pub struct FakeConnectionProvider {
    result: Result<ConnectionHandle, Web3Error>,
    cancel_on_acquire: Option<CancelToken>,
    acquired: AtomicU32,
    released: AtomicU32,
}

impl FakeConnectionProvider {
    pub fn ok(connection: ConnectionHandle) -> Self {
        Self::with_result(Ok(connection))
    }

    pub fn failing(err: Web3Error) -> Self {
        Self::with_result(Err(err))
    }

    fn with_result(result: Result<ConnectionHandle, Web3Error>) -> Self {
        Self {
            result,
            cancel_on_acquire: None,
            acquired: AtomicU32::new(0),
            released: AtomicU32::new(0),
        }
    }

    /// Simulates teardown while the acquisition is in flight
    pub fn cancelling(mut self, cancel: CancelToken) -> Self {
        self.cancel_on_acquire = Some(cancel);
        self
    }

    pub fn acquired(&self) -> u32 {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> u32 {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait(?Send)]
impl ConnectionProvider for FakeConnectionProvider {
    async fn acquire(&self) -> Result<ConnectionHandle, Web3Error> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        if let Some(cancel) = &self.cancel_on_acquire {
            cancel.cancel();
        }
        self.result.clone()
    }

    fn release_connection(&self, _connection: &ConnectionHandle) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

type AcquireHook = Box<dyn FnOnce() + Send>;

pub struct FakeContractProvider {
    failure: Option<Web3Error>,
    on_acquire: Mutex<Option<AcquireHook>>,
    received: Mutex<Vec<ConnectionHandle>>,
    released: AtomicU32,
}

impl FakeContractProvider {
    pub fn ok() -> Self {
        Self {
            failure: None,
            on_acquire: Mutex::new(None),
            received: Mutex::new(Vec::new()),
            released: AtomicU32::new(0),
        }
    }

    pub fn failing(err: Web3Error) -> Self {
        Self {
            failure: Some(err),
            ..Self::ok()
        }
    }

    /// Runs once inside the next `acquire`, before it resolves
    pub fn on_acquire(&self, hook: impl FnOnce() + Send + 'static) {
        *self.on_acquire.lock().unwrap() = Some(Box::new(hook));
    }

    /// Every connection handle the provider was asked to bind against
    pub fn received(&self) -> Vec<ConnectionHandle> {
        self.received.lock().unwrap().clone()
    }

    pub fn released(&self) -> u32 {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait(?Send)]
impl ContractProvider for FakeContractProvider {
    async fn acquire(&self, connection: &ConnectionHandle) -> Result<ContractHandle, Web3Error> {
        self.received.lock().unwrap().push(connection.clone());
        let hook = self.on_acquire.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let address = ContractAddress::parse(CONTRACT).map_err(Web3Error::InvalidAddress)?;
        Ok(ContractHandle::bind(address, connection))
    }

    fn release_contract(&self, _contract: &ContractHandle) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Answers with a fixed page and records submitted requests
#[derive(Default)]
pub struct FakeAccessControl {
    pub page: AccessRequestsPage,
    requested: Mutex<Vec<(AccountAddress, PartyId)>>,
}

impl FakeAccessControl {
    pub fn with_page(page: AccessRequestsPage) -> Self {
        Self {
            page,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<(AccountAddress, PartyId)> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait(?Send)]
impl AccessControl for FakeAccessControl {
    async fn request_access(
        &self,
        _contract: &ContractHandle,
        requester: &AccountAddress,
        party_id: &PartyId,
    ) -> Result<AccessRequestReceipt, Web3Error> {
        self.requested
            .lock()
            .unwrap()
            .push((requester.clone(), party_id.clone()));
        Ok(AccessRequestReceipt {
            party_id: party_id.clone(),
            requester: requester.clone(),
            tx_hash: Some("0x01".into()),
        })
    }

    async fn access_requests(
        &self,
        _contract: &ContractHandle,
        _party_id: &PartyId,
    ) -> Result<AccessRequestsPage, Web3Error> {
        Ok(self.page.clone())
    }
}
