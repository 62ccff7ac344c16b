#![forbid(unsafe_code)]

//! # shroud-cache
//!
//! Persistent payload cache for shroud.
//!
//! ## Key mapping (normative)
//!
//! Payloads are addressed by a [`CacheKey`] derived from the source URL:
//!
//! - `<prefix>:<base64url_no_pad(url)>`
//!
//! The encoding is injective: under a fixed prefix, distinct URLs always map
//! to distinct keys, and the encoded part can never contain the `:` delimiter
//! or a path separator. Keys are therefore safe to use directly as file names
//! in [`DiskCacheStore`].
//!
//! ## Store contract
//!
//! [`CacheStore`] is create-if-absent only: entries are written on first
//! fetch and never invalidated by this crate. Racing writers for the same
//! URL write identical content, so last-writer-wins is benign. Eviction is
//! an external concern.

mod disk;
mod error;
mod key;
mod memory;
mod store;

pub use crate::{
    disk::DiskCacheStore,
    error::{CacheError, CacheResult},
    key::{CacheKey, KeyScheme},
    memory::MemCacheStore,
    store::CacheStore,
};
