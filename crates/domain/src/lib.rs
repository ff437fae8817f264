//! # libris-domain
//!
//! Pure domain model for the libris library administration client.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, wire dates
//! - Define the **Resource** contract every REST-managed entity satisfies
//! - Define **Books**, **Borrowings**, **Spaces** and the referenced
//!   **Categories** and **Users**
//! - Own the identity-based collection merge used by selection lists
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod book;
pub mod borrowing;
pub mod category;
pub mod collection;
pub mod resource;
pub mod spaces;
pub mod user;
