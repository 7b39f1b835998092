//! Murmur Session Layer
//!
//! Stateful composition of the `murmur-crypto` primitives into per-chat
//! sessions. Each [`ChatSession`] owns its own identity key pair and
//! cipher context, so unrelated sessions never share key material.
//!
//! # Exchange Sequence
//!
//! ```text
//! Initiator                                   Responder
//!    │  PUBLISH_PUBLIC_KEY ◄──────────────────── │
//!    │  generate session key                      │
//!    │  wrap under peer public key                │
//!    │  KEY_EXCHANGE ───────────────────────────► │
//!    │                        unwrap with private │
//!    │                       install session key  │
//!    │  MESSAGE ◄───────────────────────────────► │
//! ```
//!
//! The three payload kinds are modeled by [`WirePayload`]; every field is
//! transport-encoded text, never raw bytes. Transport itself (sockets,
//! relays, retries) is someone else's job.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod session;
pub mod wire;

pub use error::SessionError;
pub use session::ChatSession;
pub use wire::WirePayload;
