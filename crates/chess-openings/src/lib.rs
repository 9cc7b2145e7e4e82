//! Chess opening catalog and lookup.
//!
//! This crate stores named openings as sequences of SAN moves and identifies
//! which opening a game followed by longest literal prefix match. A built-in
//! catalog is compiled into the library; larger catalogs can be loaded from JSON.

pub mod builtin;
pub mod database;
pub mod opening;

pub use database::{DatabaseError, OpeningDatabase};
pub use opening::{FamousGame, OpeningEntry, OpeningMatch};
