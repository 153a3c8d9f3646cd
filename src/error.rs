use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SiteError {
    #[error("required markup `{selector}` is missing (needed by {owner})")]
    MissingMarkup {
        selector: &'static str,
        owner: &'static str,
    },

    #[error("animation backend unavailable: {0}")]
    MotionUnavailable(String),

    #[error("browser API call failed: {0}")]
    Browser(String),
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Browser(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
