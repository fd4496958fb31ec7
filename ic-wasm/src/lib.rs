//! Utilities for handing canister Wasm modules to tools that expect them as escaped byte
//! strings.

#![warn(missing_docs, missing_debug_implementations)]

/// Rendering module bytes as text.
pub mod dump;
/// Wasm module paths and loading.
pub mod module;

pub use dump::hex_dump;
pub use module::{Encoding, WasmModule, WasmPath, WasmPathError};
