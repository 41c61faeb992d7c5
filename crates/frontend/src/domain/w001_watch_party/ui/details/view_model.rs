use super::model::WatchPartyServices;
use crate::shared::web3::{acquire_handles, BootstrapPhase, CancelToken, Web3Error};
use contracts::domain::w001_watch_party::aggregate::{AccessRequest, PartyId};
use contracts::domain::w002_account::aggregate::AccountList;
use contracts::shared::web3::{ConnectionHandle, ContractHandle};
use leptos::prelude::*;

/// ViewModel for the Watch Party screen
///
/// - Handles are filled in by the mount-time bootstrap
/// - `accounts` is owned here and written by the account panel through `accounts_setter`
/// - Commands spawn the async operation; the operation itself is a plain `async fn`
#[derive(Clone)]
pub struct WatchPartyViewModel {
    pub connection: RwSignal<Option<ConnectionHandle>>,
    pub contract: RwSignal<Option<ContractHandle>>,
    pub accounts: RwSignal<AccountList>,
    pub party_id: RwSignal<PartyId>,
    pub access_requests: RwSignal<Vec<AccessRequest>>,
    pub is_party_admin: RwSignal<bool>,
    pub phase: RwSignal<BootstrapPhase>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    pub is_busy: RwSignal<bool>,
    services: WatchPartyServices,
    cancel: CancelToken,
}

impl WatchPartyViewModel {
    pub fn new(services: WatchPartyServices) -> Self {
        Self {
            connection: RwSignal::new(None),
            contract: RwSignal::new(None),
            accounts: RwSignal::new(AccountList::default()),
            party_id: RwSignal::new(PartyId::default()),
            access_requests: RwSignal::new(Vec::new()),
            is_party_admin: RwSignal::new(false),
            phase: RwSignal::new(BootstrapPhase::Unmounted),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
            is_busy: RwSignal::new(false),
            services,
            cancel: CancelToken::new(),
        }
    }

    pub fn set_party_id(&self, text: String) {
        self.party_id.set(PartyId::new(text));
    }

    /// Setter handed to the account panel
    pub fn accounts_setter(&self) -> Callback<AccountList> {
        let accounts = self.accounts;
        Callback::new(move |list: AccountList| {
            log::debug!("Account panel published {} account(s)", list.len());
            accounts.set(list);
        })
    }

    fn apply_phase(&self, phase: BootstrapPhase) {
        log::debug!("Watch party bootstrap: {}", phase.label());
        match &phase {
            BootstrapPhase::ConnectionReady(connection) => {
                self.connection.set(Some(connection.clone()))
            }
            BootstrapPhase::ContractReady(contract) => self.contract.set(Some(contract.clone())),
            _ => {}
        }
        self.phase.set(phase);
    }

    /// Acquire the connection, then the contract bound to it
    pub async fn bootstrap(&self) {
        let result = acquire_handles(
            self.services.connections.as_ref(),
            self.services.contracts.as_ref(),
            &self.cancel,
            |phase| self.apply_phase(phase),
        )
        .await;

        match result {
            Ok(_) => {}
            Err(Web3Error::Cancelled) => log::debug!("Watch party bootstrap cancelled"),
            Err(e) => self.error.set(Some(format!("Failed to connect: {}", e))),
        }
    }

    pub fn bootstrap_command(&self) {
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            vm.bootstrap().await;
        });
    }

    /// Cancel an in-flight bootstrap and release the handles it already reported
    pub fn teardown(&self) {
        self.cancel.cancel();
        if let Some(Some(contract)) = self.contract.try_get_untracked() {
            self.services.contracts.release_contract(&contract);
        }
        if let Some(Some(connection)) = self.connection.try_get_untracked() {
            self.services.connections.release_connection(&connection);
        }
    }

    fn ready_contract(&self) -> Result<ContractHandle, String> {
        self.contract
            .get_untracked()
            .ok_or_else(|| Web3Error::NotReady("Contract").to_string())
    }

    fn begin(&self) {
        self.error.set(None);
        self.notice.set(None);
    }

    /// Submit an access request for the current party id as the primary account
    pub async fn request_access(&self) {
        self.begin();

        let contract = match self.ready_contract() {
            Ok(c) => c,
            Err(e) => return self.error.set(Some(e)),
        };
        let party_id = match self.party_id.get_untracked().normalized() {
            Ok(p) => p,
            Err(e) => return self.error.set(Some(e)),
        };
        let Some(requester) = self.accounts.with_untracked(|a| a.primary().cloned()) else {
            return self
                .error
                .set(Some("Connect a wallet account first".to_string()));
        };

        self.is_busy.set(true);
        let result = self
            .services
            .access
            .request_access(&contract, &requester, &party_id)
            .await;
        self.is_busy.set(false);

        match result {
            Ok(receipt) => {
                log::info!(
                    "Access requested for party {} as {}",
                    receipt.party_id,
                    receipt.requester
                );
                self.notice.set(Some(format!(
                    "Access requested for party {} as {}",
                    receipt.party_id,
                    receipt.requester.short()
                )));
            }
            Err(e) => self.error.set(Some(format!("Request Access failed: {}", e))),
        }
    }

    /// Load the access requests of the current party id
    pub async fn get_access_requests(&self) {
        self.begin();

        let contract = match self.ready_contract() {
            Ok(c) => c,
            Err(e) => return self.error.set(Some(e)),
        };
        let party_id = match self.party_id.get_untracked().normalized() {
            Ok(p) => p,
            Err(e) => return self.error.set(Some(e)),
        };

        self.is_busy.set(true);
        let result = self.services.access.access_requests(&contract, &party_id).await;
        self.is_busy.set(false);

        match result {
            Ok(page) => {
                self.notice.set(Some(format!(
                    "Loaded {} access request(s) for party {}",
                    page.requests.len(),
                    party_id
                )));
                self.is_party_admin.set(page.is_party_admin);
                self.access_requests.set(page.requests);
            }
            Err(e) => self.error.set(Some(format!("Get Access Requests failed: {}", e))),
        }
    }

    pub fn request_access_command(&self) {
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            vm.request_access().await;
        });
    }

    pub fn get_access_requests_command(&self) {
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            vm.get_access_requests().await;
        });
    }
}
