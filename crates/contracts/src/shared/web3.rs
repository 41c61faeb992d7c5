//! Дескрипторы подключения и контракта, конверт JSON-RPC
//! для кошелька и HTTP-узла.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Hex helpers
// ============================================================================

/// Строка вида `0x` + 20 байт в hex
pub fn is_hex_address(s: &str) -> bool {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Разбор JSON-RPC quantity (`"0x1a"`) в число
pub fn parse_quantity(s: &str) -> Result<u64, String> {
    let hex = s
        .strip_prefix("0x")
        .ok_or_else(|| format!("Quantity must start with 0x: {}", s))?;
    if hex.is_empty() {
        return Err("Quantity has no digits".into());
    }
    u64::from_str_radix(hex, 16).map_err(|e| format!("Invalid quantity {}: {}", s, e))
}

/// `eth_getCode` возвращает `0x` для адреса без кода
pub fn is_empty_code(code: &str) -> bool {
    let trimmed = code.trim();
    trimmed.is_empty() || trimmed == "0x" || trimmed == "0x0"
}

// ============================================================================
// Handles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl ChainId {
    pub fn from_hex(s: &str) -> Result<Self, String> {
        parse_quantity(s).map(ChainId)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Канал, по которому идут JSON-RPC вызовы
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Transport {
    /// EIP-1193 провайдер кошелька в браузере (`window.ethereum`)
    Injected,
    /// HTTP JSON-RPC узел
    Http { url: String },
}

impl Transport {
    pub fn label(&self) -> String {
        match self {
            Transport::Injected => "browser wallet".to_string(),
            Transport::Http { url } => url.clone(),
        }
    }
}

/// Непрозрачная ссылка на активное подключение к узлу
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionHandle {
    pub transport: Transport,
    #[serde(rename = "chainId")]
    pub chain_id: ChainId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractAddress(String);

impl ContractAddress {
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if !is_hex_address(s) {
            return Err(format!("Invalid contract address: {}", s));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Непрозрачная ссылка на развёрнутый контракт в рамках подключения
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractHandle {
    pub address: ContractAddress,
    #[serde(rename = "chainId")]
    pub chain_id: ChainId,
}

impl ContractHandle {
    /// Контракт существует только относительно своего подключения
    pub fn bind(address: ContractAddress, connection: &ConnectionHandle) -> Self {
        Self {
            address,
            chain_id: connection.chain_id,
        }
    }

    pub fn belongs_to(&self, connection: &ConnectionHandle) -> bool {
        self.chain_id == connection.chain_id
    }
}

// ============================================================================
// JSON-RPC 2.0
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Ошибка важнее результата; отсутствующий результат это `null`
    pub fn into_result(self) -> Result<Value, JsonRpcError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x1"), Ok(1));
        assert_eq!(parse_quantity("0xaa36a7"), Ok(11155111));
        assert!(parse_quantity("1").is_err());
        assert!(parse_quantity("0x").is_err());
        assert!(parse_quantity("0xzz").is_err());
    }

    #[test]
    fn test_is_hex_address() {
        assert!(is_hex_address("0x5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert!(!is_hex_address("0x5FbDB2315678afecb367f032d93F642f64180aa"));
        assert!(!is_hex_address("5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert!(!is_hex_address("0xAAA"));
    }

    #[test]
    fn test_empty_code() {
        assert!(is_empty_code("0x"));
        assert!(is_empty_code(""));
        assert!(!is_empty_code("0x6080604052"));
    }

    #[test]
    fn test_contract_handle_binds_to_connection_chain() {
        let connection = ConnectionHandle {
            transport: Transport::Injected,
            chain_id: ChainId(31337),
        };
        let address = ContractAddress::parse("0x5FbDB2315678afecb367f032d93F642f64180aa3").unwrap();
        let contract = ContractHandle::bind(address, &connection);

        assert_eq!(contract.chain_id, ChainId(31337));
        assert_eq!(
            contract.address.as_str(),
            "0x5fbdb2315678afecb367f032d93f642f64180aa3"
        );
        assert!(contract.belongs_to(&connection));
    }

    #[test]
    fn test_response_into_result() {
        let ok: JsonRpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": "0x1"})).unwrap();
        assert_eq!(ok.into_result(), Ok(json!("0x1")));

        let err: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "error": {"code": 4001, "message": "User rejected the request."}
        }))
        .unwrap();
        let err = err.into_result().unwrap_err();
        assert_eq!(err.code, 4001);
        assert_eq!(err.message, "User rejected the request.");
    }

    #[test]
    fn test_transport_serialization() {
        let http = Transport::Http {
            url: "http://127.0.0.1:8545".into(),
        };
        assert_eq!(
            serde_json::to_value(&http).unwrap(),
            json!({"kind": "http", "url": "http://127.0.0.1:8545"})
        );
        assert_eq!(
            serde_json::to_value(Transport::Injected).unwrap(),
            json!({"kind": "injected"})
        );
    }
}
