use super::error::Web3Error;
use contracts::shared::web3::{
    ConnectionHandle, JsonRpcError, JsonRpcRequest, JsonRpcResponse, Transport,
};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use wasm_bindgen::{JsCast, JsValue};

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Pick a transport: the injected wallet wins, the configured RPC URL is the fallback
pub fn select_transport(has_injected: bool, rpc_url: Option<&str>) -> Result<Transport, Web3Error> {
    if has_injected {
        return Ok(Transport::Injected);
    }
    match rpc_url {
        Some(url) if !url.trim().is_empty() => Ok(Transport::Http {
            url: url.trim().to_string(),
        }),
        _ => Err(Web3Error::NoWallet),
    }
}

/// `window.ethereum`, if a browser wallet injected one
pub fn injected_provider() -> Option<JsValue> {
    let window = web_sys::window()?;
    let target: &JsValue = window.as_ref();
    let ethereum = js_sys::Reflect::get(target, &JsValue::from_str("ethereum")).ok()?;
    if ethereum.is_undefined() || ethereum.is_null() {
        None
    } else {
        Some(ethereum)
    }
}

/// JSON-RPC 2.0 client bound to one transport
#[derive(Debug, Clone)]
pub struct RpcClient {
    transport: Transport,
}

impl RpcClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn for_connection(connection: &ConnectionHandle) -> Self {
        Self::new(connection.transport.clone())
    }

    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, Web3Error> {
        let id = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(id, method, params);
        log::debug!("rpc #{} {} via {}", id, method, self.transport.label());

        let value = match &self.transport {
            Transport::Injected => call_injected(&request).await?,
            Transport::Http { url } => call_http(url, &request).await?,
        };

        serde_json::from_value(value).map_err(|e| Web3Error::Decode(format!("{}: {}", method, e)))
    }
}

async fn call_injected(request: &JsonRpcRequest) -> Result<Value, Web3Error> {
    let ethereum = injected_provider().ok_or(Web3Error::NoWallet)?;
    let request_fn: js_sys::Function =
        js_sys::Reflect::get(&ethereum, &JsValue::from_str("request"))
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| Web3Error::Transport("ethereum.request is not a function".into()))?;

    // EIP-1193 takes `{ method, params }` without the envelope
    let args = json!({ "method": request.method, "params": request.params })
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| Web3Error::Transport(format!("Failed to serialize request: {}", e)))?;

    let promise: js_sys::Promise = request_fn
        .call1(&ethereum, &args)
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| Web3Error::Transport("ethereum.request did not return a promise".into()))?;

    let result = wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| Web3Error::Decode(e.to_string()))
}

async fn call_http(url: &str, request: &JsonRpcRequest) -> Result<Value, Web3Error> {
    let response: JsonRpcResponse = Request::post(url)
        .json(request)
        .map_err(|e| Web3Error::Transport(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| Web3Error::Transport(format!("Request failed: {}", e)))?
        .json()
        .await
        .map_err(|e| Web3Error::Decode(format!("Failed to parse response: {}", e)))?;

    response.into_result().map_err(Web3Error::from)
}

/// Wallet rejections arrive as `{ code, message }` objects
fn js_error(err: JsValue) -> Web3Error {
    match serde_wasm_bindgen::from_value::<JsonRpcError>(err.clone()) {
        Ok(rpc) => Web3Error::from(rpc),
        Err(_) => Web3Error::Transport(format!("{:?}", err)),
    }
}
