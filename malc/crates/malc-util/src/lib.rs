//! malc-util — shared foundation types for the mal workspace.
//!
//! This crate holds the handful of things every other `malc-*` crate needs
//! and none of them should define twice: the per-domain error enums (see
//! [`error`]) and a fast hash-map/set re-export used for every binding
//! table in the interpreter (environments, the builtin namespace, and the
//! reader's hash-map literals).
//!
//! Lookup tables here are never exposed to untrusted, adversarially chosen
//! keys from outside the process, so there is no reason to pay for
//! `std::collections::HashMap`'s DoS-resistant (but slower) default hasher.

pub mod error;

pub use error::{LexError, LexResult, ReadError, ReadResult};
pub use rustc_hash::{FxHashMap, FxHashSet};
