//! Setup errors raised while mounting the card into the page.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("invalid card config: {0}")]
    Config(String),
    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for CardError {
    fn from(value: JsValue) -> Self {
        CardError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<CardError> for JsValue {
    fn from(err: CardError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_short_and_lowercase() {
        assert_eq!(CardError::NoWindow.to_string(), "no window");
        assert_eq!(
            CardError::Config("bad".into()).to_string(),
            "invalid card config: bad"
        );
    }
}
