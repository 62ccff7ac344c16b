#![forbid(unsafe_code)]

//! # shroud
//!
//! Dynamic payload delivery: fetch source text by URL, optionally decrypt it
//! with a password-derived key, gate it behind license/expiration policy,
//! apply a cosmetic obfuscation pass, and hand it to a host-supplied
//! executor.
//!
//! ```no_run
//! use std::sync::Arc;
//! use shroud::{FnExecutor, Loader, LoaderConfig};
//! use url::Url;
//!
//! # async fn demo() -> shroud::LoaderResult<()> {
//! let executor = Arc::new(FnExecutor::new(|source| {
//!     // Hand `source` to the host's script engine.
//!     println!("{source}");
//!     Ok(())
//! }));
//! let config = LoaderConfig::default().with_password("mySecretPassword");
//! let loader = Loader::new(config, executor)?;
//! loader.load(&Url::parse("https://example.com/encrypted.js").unwrap()).await
//! # }
//! ```
//!
//! ## What this is not
//!
//! Executed payloads run with the full ambient privilege of the host.
//! There is no sandbox, and the obfuscation pass is not a confidentiality
//! mechanism. See [`ScriptExecutor`] for the exact boundary.

mod config;
mod error;
mod executor;
mod loader;
mod policy;
mod shaper;

pub use crate::{
    config::{LicenseCheck, LoaderConfig},
    error::{LoaderError, LoaderResult},
    executor::{ExecutionError, FnExecutor, ScriptExecutor},
    loader::Loader,
    policy::PolicyGate,
    shaper::shape,
};

// Re-exports for hosts that assemble their own parts.
pub use shroud_cache::{CacheStore, DiskCacheStore, KeyScheme, MemCacheStore};
pub use shroud_channel::{HostedSurface, InlineSurface, RetrievalSurface};
pub use shroud_crypto::{decrypt, encrypt, Envelope};
pub use shroud_net::{HttpClient, Net, NetOptions};
