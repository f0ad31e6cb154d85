//! song.link (Odesli) integration
//!
//! Cross-platform link resolution: given an Apple Music id or any platform
//! URL, returns the same entity's links on other platforms.

mod adapter;
mod client;
pub mod dto;

pub use client::SongLinkClient;
