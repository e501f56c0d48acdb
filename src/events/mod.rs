//! Event handling modules.
//!
//! Terminal events (key presses, ticks) are handled synchronously on the
//! main thread; network events are drained by a dedicated thread so backend
//! calls never block rendering.

pub mod network;
pub mod terminal;
