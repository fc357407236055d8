// SPDX-License-Identifier: MIT OR Apache-2.0
//! Input dispatch for CineView.
//!
//! This crate turns raw keyboard/pointer/wheel events into semantic viewer
//! intents:
//! - Rebindable key gestures (key + modifiers)
//! - Active-context filtering for convenience keys
//! - Pointer interactions (windowing drag, panning, double-click shortcuts)
//! - Wheel zoom
//!
//! ## Architecture
//!
//! The dispatcher is a plain value mutated on the UI thread. It never calls
//! into the viewer: intents accumulate in an internal queue drained with
//! [`InputDispatcher::take_intents`] once per frame.

pub mod bindings;
pub mod context;
pub mod dispatcher;
pub mod gesture;
pub mod intent;

pub use bindings::{BindingTable, ViewerAction};
pub use context::{ContextSet, InputContext};
pub use dispatcher::{InputDispatcher, KeyInput, PointerButton, PointerInput, PointerPhase};
pub use gesture::{GestureParseError, KeyGesture, Modifiers};
pub use intent::InputIntent;
