//! Shared utilities and error types for the dead-man vault contract suite.
//!
//! This crate provides:
//! - [`CommonError`]: error codes raised by the shared utilities.
//! - [`reentrancy_guard`]: a scoped, storage-backed lock rejecting nested
//!   entry into transfer-issuing contract functions.
//! - [`ttl`]: ledger TTL extension for instance and persistent entries.
//!
//! Contracts define their own error enums and convert from [`CommonError`]
//! at the call site.

#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::arithmetic_side_effects)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod reentrancy_guard;
pub mod ttl;

pub use reentrancy_guard::*;
pub use ttl::*;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes raised by the shared utilities.
///
/// Codes 40 – 49 are reserved for contract-state failures.
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    /// A guarded function was entered while another guarded call is still
    /// on the stack.
    Reentrant = 41,
}
