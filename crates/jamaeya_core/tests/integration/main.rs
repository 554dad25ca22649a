//! Single integration test binary: all integration tests as modules.
//!
//! Run: `cargo test -p jamaeya_core --test integration`
//! Filter by module: `cargo test -p jamaeya_core --test integration ledger::`

mod common;
mod ledger;
mod reload;
