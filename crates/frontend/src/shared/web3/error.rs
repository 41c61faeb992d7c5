use contracts::shared::web3::{ChainId, JsonRpcError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Web3Error {
    #[error("No browser wallet found and no RPC URL configured")]
    NoWallet,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Connected to chain {actual}, expected {expected}")]
    ChainMismatch { expected: ChainId, actual: ChainId },

    #[error("No contract deployed at {0}")]
    ContractNotDeployed(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("{0} is not ready")]
    NotReady(&'static str),

    #[error("Acquisition cancelled")]
    Cancelled,

    #[error("{0} is not implemented yet")]
    NotImplemented(&'static str),
}

impl From<JsonRpcError> for Web3Error {
    fn from(err: JsonRpcError) -> Self {
        Web3Error::Rpc {
            code: err.code,
            message: err.message,
        }
    }
}
