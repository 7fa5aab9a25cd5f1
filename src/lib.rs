//! Per-user point balances with an immutable mutation history.
//!
//! Balances can be charged (increased) or used (decreased). Every
//! successful mutation appends one history entry through the storage
//! port. All mutations across all users are serialized through a single
//! fair gate, so concurrent charges and uses can never lose an update.

pub mod adapters;
pub mod commands;
pub mod domain;
pub mod ports;
