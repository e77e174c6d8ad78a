//! Cycles Store — backend implementations of the core store traits: the
//! hosted real-time document store and the identity provider over HTTP,
//! plus in-memory doubles for tests and local development.

pub mod client;
pub mod error;
pub mod memory;
pub mod profile;
pub mod room;
pub mod wire;

pub use client::{ClerkConfig, LiveblocksConfig};
pub use error::StoreError;
pub use memory::{MemoryProfileDirectory, MemoryRoomStore, StoreOp};
pub use profile::ClerkProfileDirectory;
pub use room::LiveblocksRoomStore;
