//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* scene and clock state and turns them into
//! cells on the terminal.  No state is mutated here.

pub mod layout;
pub mod particles;
pub mod path_widget;
pub mod popup;
pub mod status;
pub mod theme;
