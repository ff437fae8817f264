//! # libris-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `HttpClient` — one request/response exchange with the REST API
//!   - `Navigator` — moves the user interface to another view
//! - Define **driving/inbound** use-cases:
//!   - `EntityService` — create, find, query, update, patch, delete a resource
//!   - `resolve` — supply the entity a view needs before it activates
//!   - `Editor` — the save workflow of an edit form
//!   - `DeleteDialog` — the confirm/cancel workflow of a delete prompt
//!
//! ## Dependency rule
//! Depends on `libris-domain` only (plus `serde_json` for payloads).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod resolve;
pub mod services;

#[cfg(test)]
mod testing;
