use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("could not build request: {0}")]
    Request(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("delivery rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl From<gloo_net::Error> for ContactError {
    fn from(err: gloo_net::Error) -> Self {
        ContactError::Network(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no window or document available")]
    NoDocument,
    #[error("invalid selector {0}")]
    Selector(String),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
