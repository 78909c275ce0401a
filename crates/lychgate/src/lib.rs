//! Top-level facade crate for lychgate.
//!
//! Re-exports the core contracts and the engine so users can depend on a
//! single crate.

pub mod core {
    pub use lychgate_core::*;
}

pub mod engine {
    pub use lychgate_engine::*;
}
