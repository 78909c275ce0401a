//! lychgate HTTP embedding.
//!
//! Shows the access-control pipeline wired into axum: the error-to-response
//! mapping (the stable external contract), a principal extractor reading
//! request extensions, and a demo router. The surrounding service owns the
//! real routes; this crate is the reference embedding consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod error;
pub mod extract;
pub mod router;

pub use error::ApiError;
pub use extract::VerifiedPrincipal;
pub use router::{build_router, AppState};
