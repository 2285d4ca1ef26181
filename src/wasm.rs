//! WASM bindings for mathhax
//!
//! This module exposes a document session to JavaScript. A page creates
//! one `MathHaxSession`, loads its preamble, then expands every math block
//! in order so counters and toggles carry over between blocks.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::{ExpandOptions, MacroError, Session, DEFAULT_MAX_BUFFER, DEFAULT_MAX_MACROS};

/// Expansion options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasmExpandOptions {
    /// Buffer ceiling per expression, in bytes
    #[serde(default = "default_max_buffer")]
    pub max_buffer: usize,
    /// Macro invocation ceiling per expression
    #[serde(default = "default_max_macros")]
    pub max_macros: usize,
    /// Fail on control words that have no handler
    #[serde(default)]
    pub strict: bool,
}

#[cfg(feature = "wasm")]
impl Default for WasmExpandOptions {
    fn default() -> Self {
        Self {
            max_buffer: DEFAULT_MAX_BUFFER,
            max_macros: DEFAULT_MAX_MACROS,
            strict: false,
        }
    }
}

#[cfg(feature = "wasm")]
impl From<WasmExpandOptions> for ExpandOptions {
    fn from(opts: WasmExpandOptions) -> Self {
        ExpandOptions {
            strict: opts.strict,
            ..ExpandOptions::with_limits(opts.max_buffer, opts.max_macros)
        }
    }
}

#[cfg(feature = "wasm")]
fn default_max_buffer() -> usize {
    DEFAULT_MAX_BUFFER
}

#[cfg(feature = "wasm")]
fn default_max_macros() -> usize {
    DEFAULT_MAX_MACROS
}

/// Error object thrown to JavaScript
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct WasmError {
    pub kind: String,
    pub message: String,
    /// Budget errors abort the whole document
    pub fatal: bool,
}

#[cfg(feature = "wasm")]
fn to_js_error(err: MacroError) -> JsValue {
    let error = WasmError {
        kind: err.kind().to_string(),
        message: err.to_string(),
        fatal: err.is_fatal(),
    };
    serde_wasm_bindgen::to_value(&error).unwrap_or_else(|e| e.into())
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Per-document expansion state
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "MathHaxSession")]
pub struct WasmSession {
    inner: Session,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen(js_class = "MathHaxSession")]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Session::new(),
        }
    }

    /// Expand one math block with default options
    pub fn expand(&mut self, input: &str) -> Result<String, JsValue> {
        self.inner.expand(input).map_err(to_js_error)
    }

    /// Expand one math block with options like `{ maxMacros: 500, strict: true }`
    #[wasm_bindgen(js_name = "expandWithOptions")]
    pub fn expand_with_options(&mut self, input: &str, options: JsValue) -> Result<String, JsValue> {
        let opts: WasmExpandOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();
        self.inner
            .expand_with_options(input, &opts.into())
            .map_err(to_js_error)
    }

    /// Expand a preamble for its side effects
    #[wasm_bindgen(js_name = "loadPreamble")]
    pub fn load_preamble(&mut self, preamble: &str) -> Result<(), JsValue> {
        self.inner.load_preamble(preamble).map_err(to_js_error)
    }

    /// Warnings raised since the last call, as an array of strings
    #[wasm_bindgen(js_name = "takeWarnings")]
    pub fn take_warnings(&mut self) -> JsValue {
        let warnings = self.inner.take_warnings();
        serde_wasm_bindgen::to_value(&warnings).unwrap_or_else(|e| e.into())
    }

    /// Current value of a counter, `undefined` if it does not exist
    pub fn counter(&self, name: &str) -> Option<f64> {
        self.inner.counters().get(name).map(|v| v as f64)
    }

    /// Current value of a toggle, `undefined` if it was never set
    pub fn toggle(&self, name: &str) -> Option<bool> {
        self.inner.toggles().get(name)
    }
}

#[cfg(feature = "wasm")]
impl Default for WasmSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand a single expression against a fresh session
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "expand")]
pub fn expand_wasm(input: &str) -> Result<String, JsValue> {
    crate::expand(input).map_err(to_js_error)
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
