//! Core of the git-lineblame daemon: per-line blame lookups backed by the
//! system `git` binary, memoized in-process.
//!
//! - [`git`]: subprocess invoker, output parser, cache, and the
//!   [`git::BlameService`] orchestrating them
//! - [`models`]: serializable attribution and cache DTOs
//! - [`routes`]: the local HTTP API editor plugins talk to
//! - [`error`]: surface-level error type with HTTP response mapping
//!
//! The binary in `main.rs` wires this to a CLI and an axum server.

pub mod error;
pub mod git;
pub mod models;
pub mod routes;
