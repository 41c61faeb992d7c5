//! Blockchain plumbing for the frontend
//!
//! - error.rs: `Web3Error`
//! - rpc.rs: JSON-RPC client over the injected wallet or HTTP
//! - provider.rs: connection / contract / access-control seams
//! - bootstrap.rs: two-step handle acquisition with cancellation

pub mod bootstrap;
pub mod error;
pub mod provider;
pub mod rpc;

#[cfg(test)]
pub mod testing;

pub use bootstrap::{acquire_handles, BootstrapPhase, CancelToken};
pub use error::Web3Error;
pub use provider::{
    AccessControl, BrowserConnectionProvider, ConnectionProvider, ContractProvider,
    DeployedContractProvider, PendingAccessControl,
};
pub use rpc::RpcClient;
