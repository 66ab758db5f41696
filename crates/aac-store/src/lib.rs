//! Ordered keyed storage for the AAC board.
//!
//! This crate provides [`KeyedStore`], a small associative array that backs
//! every catalog on the board: each category's image → text mapping and the
//! registry of categories by name.
//!
//! # Design Rules
//!
//! 1. No hashing. Entries live in one vector in insertion order and lookups
//!    are linear scans comparing keys by value.
//! 2. Capacity is explicit: it starts at [`DEFAULT_CAPACITY`] and doubles
//!    when an insert finds the store full. It never shrinks.
//! 3. Overwriting a key never moves it; removing a key never reorders the
//!    others.
//! 4. Null keys (see [`StoreKey`]) are rejected on write and never match a
//!    lookup.

pub mod error;
pub mod keyed;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use keyed::{Entry, KeyedStore, DEFAULT_CAPACITY};
pub use traits::StoreKey;
