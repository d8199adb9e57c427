//! bamc-lsp: editor intelligence for BAMC/BAMM browser-automation scripts.
//!
//! `lsp` holds the pure language service (catalogs, context classification,
//! completion, unknown-command diagnostics). `server` exposes it over the
//! Language Server Protocol with `tower-lsp`.

pub mod config;
pub mod lsp;
pub mod server;
