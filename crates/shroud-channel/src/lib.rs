#![forbid(unsafe_code)]

//! Retrieval channel for shroud.
//!
//! Obtains the raw payload for a URL from an isolated retrieval surface (a
//! background task that independently consults the shared cache store and
//! performs the network fetch) and relays it back to the orchestrator as a
//! tagged message.
//!
//! Protocol, per request:
//!
//! 1. Generate a fresh request token and derive the cache key.
//! 2. Spawn a surface with its own message channel (every pending request
//!    owns a unique surface identity; a shared well-known identity would let
//!    one load's surface satisfy another load's wait).
//! 3. Accept the first message whose token *and* URL match and whose origin
//!    equals the trusted origin; silently ignore anything else, leaving the
//!    request pending.
//! 4. A timeout armed at channel start rejects the request if no matching
//!    message arrives; it disarms implicitly on settlement.
//! 5. Teardown (abort the surface, close the receiver) runs exactly once on
//!    every exit path: success, surface error, or timeout.

mod channel;
mod config;
mod error;
mod message;
mod surface;

pub use crate::{
    channel::RetrievalChannel,
    config::ChannelConfig,
    error::{ChannelError, ChannelResult},
    message::SurfaceMessage,
    surface::{HostedSurface, InlineSurface, RetrievalSurface, SurfaceHandle, SurfaceRequest},
};
