//! Data Models
//!
//! Contains the data structures that flow through the generation pipeline.

pub mod artifact;
pub mod plan;
pub mod request;
pub mod run;

pub use artifact::*;
pub use plan::*;
pub use request::*;
pub use run::*;
