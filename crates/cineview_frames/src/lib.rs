// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame intake for CineView.
//!
//! This crate feeds decoded frames to the viewer:
//! - An LRU frame cache with a memory budget
//! - Forward-biased preload planning for smooth cine playback
//! - A progressive background loader streaming decode progress
//!
//! ## Architecture
//!
//! The decoder itself is external: hosts implement [`FrameDecoder`] and
//! hand it to a [`ProgressiveLoader`], which decodes on a background
//! thread and streams [`LoadEvent`]s over a channel. The host drains
//! events on the UI thread and fans them out to the cache and the
//! playback sequencer.

pub mod cache;
pub mod loader;
pub mod preload;

pub use cache::{CacheConfig, CacheStats, FrameCache, FramePayload};
pub use loader::{FrameDecodeError, FrameDecoder, LoadEvent, ProgressiveLoader};
pub use preload::{plan_preload, PreloadRequest};
