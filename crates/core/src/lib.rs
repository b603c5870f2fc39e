//! Concept Forge Core
//!
//! Foundational types shared by every crate in the Concept Forge workspace.
//! This crate has zero dependencies on the LLM providers, the validation
//! engine, or the generation pipeline.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `extract` - Defensive extraction of JSON fragments from free text
//! - `text` - Char-boundary-safe truncation and word counting
//! - `proxy` - Proxy configuration data types shared by HTTP-using crates
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde/thiserror** - keeps build times minimal
//! 2. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod extract;
pub mod proxy;
pub mod text;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Defensive Extraction ───────────────────────────────────────────────
pub use extract::{extract_json_fragment, extract_typed};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};

// ── Text Helpers ───────────────────────────────────────────────────────
pub use text::{truncate_chars, word_count};
