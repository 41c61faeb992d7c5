use crate::shared::config::Web3Config;
use crate::shared::web3::{
    AccessControl, BrowserConnectionProvider, ConnectionProvider, ContractProvider,
    DeployedContractProvider, PendingAccessControl,
};
use std::sync::Arc;

/// External collaborators the screen talks to
#[derive(Clone)]
pub struct WatchPartyServices {
    pub connections: Arc<dyn ConnectionProvider>,
    pub contracts: Arc<dyn ContractProvider>,
    pub access: Arc<dyn AccessControl>,
}

impl WatchPartyServices {
    pub fn from_config(config: &Web3Config) -> Self {
        Self {
            connections: Arc::new(BrowserConnectionProvider::from_config(config)),
            contracts: Arc::new(DeployedContractProvider::from_config(config)),
            access: Arc::new(PendingAccessControl),
        }
    }
}
