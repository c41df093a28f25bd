//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under short names so the binary, the
//! integration tests and the benchmarks share one import path:
//! `blockfall::{core, input, session, store, term, types}`.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_session as session;
pub use blockfall_store as store;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::Config;
