#![forbid(unsafe_code)]

//! HTTP retrieval for shroud.
//!
//! A thin typed wrapper over `reqwest` behind the [`Net`] trait so that
//! higher layers (the loader's direct path and the retrieval surfaces)
//! can be exercised against canned responses in tests.

mod client;
mod error;
pub mod testing;
mod traits;
mod types;

pub use crate::{
    client::HttpClient,
    error::{NetError, NetResult},
    traits::Net,
    types::NetOptions,
};
