use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub web3: Web3Config,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Web3Config {
    /// HTTP JSON-RPC endpoint used when no browser wallet is injected
    #[serde(default)]
    pub rpc_url: Option<String>,
    /// Address of the deployed watch party contract
    pub contract_address: String,
    /// Reject connections to any other chain when set
    #[serde(default)]
    pub chain_id: Option<u64>,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[web3]
rpc_url = "http://127.0.0.1:8545"
contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
"#;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            web3: Web3Config {
                rpc_url: Some("http://127.0.0.1:8545".to_string()),
                contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
                chain_id: None,
            },
        }
    }
}

impl Web3Config {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(url) = &self.rpc_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("rpc_url must start with http:// or https://: {}", url));
            }
        }
        if self.contract_address.trim().is_empty() {
            return Err("contract_address is required".into());
        }
        Ok(())
    }
}

/// Page query parameters that override the embedded config,
/// e.g. `?contract_address=0x...&chain_id=11155111`
#[derive(Debug, Default, Deserialize)]
struct QueryOverrides {
    rpc_url: Option<String>,
    contract_address: Option<String>,
    chain_id: Option<u64>,
}

pub fn parse_config(contents: &str) -> Result<AppConfig, String> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| format!("Invalid config: {}", e))?;
    config.web3.validate()?;
    Ok(config)
}

pub fn apply_query_overrides(mut config: AppConfig, query: &str) -> Result<AppConfig, String> {
    let query = query.trim_start_matches('?');
    if query.is_empty() {
        return Ok(config);
    }
    let overrides: QueryOverrides =
        serde_qs::from_str(query).map_err(|e| format!("Invalid query parameters: {}", e))?;

    if let Some(url) = overrides.rpc_url {
        config.web3.rpc_url = Some(url);
    }
    if let Some(address) = overrides.contract_address {
        config.web3.contract_address = address;
    }
    if overrides.chain_id.is_some() {
        config.web3.chain_id = overrides.chain_id;
    }
    config.web3.validate()?;
    Ok(config)
}

/// Load configuration
///
/// Embedded defaults first, then overrides from the page query string.
pub fn load_config() -> Result<AppConfig, String> {
    let config = parse_config(DEFAULT_CONFIG)?;

    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    let config = apply_query_overrides(config, &search)?;

    log::info!(
        "Web3 config: rpc_url={:?}, contract={}, chain_id={:?}",
        config.web3.rpc_url,
        config.web3.contract_address,
        config.web3.chain_id
    );
    Ok(config)
}
