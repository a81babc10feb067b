//! Core algorithms – animation clock, depth camera, spring followers and the
//! content deck.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The clock
//! needs a tokio runtime to tick, and degrades to inert values without one.

pub mod camera;
pub mod clock;
pub mod deck;
pub mod motion;
pub mod path;
pub mod spring;
