//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod delete_dialog;
pub mod editor;
pub mod entity_service;
pub mod query;
