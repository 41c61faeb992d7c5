use crate::shared::config::Web3Config;
use crate::shared::web3::rpc::{injected_provider, select_transport};
use crate::shared::web3::{RpcClient, Web3Error};
use contracts::domain::w002_account::aggregate::AccountList;
use contracts::shared::web3::Transport;
use serde_json::json;

/// A wallet prompts the user for access; a bare node only lists what it manages
pub fn accounts_method(transport: &Transport) -> &'static str {
    match transport {
        Transport::Injected => "eth_requestAccounts",
        Transport::Http { .. } => "eth_accounts",
    }
}

pub async fn request_accounts(config: &Web3Config) -> Result<AccountList, Web3Error> {
    let transport = select_transport(injected_provider().is_some(), config.rpc_url.as_deref())?;
    let method = accounts_method(&transport);
    let client = RpcClient::new(transport);

    let raw: Vec<String> = client.call(method, json!([])).await?;
    AccountList::parse_all(raw).map_err(Web3Error::InvalidAddress)
}
