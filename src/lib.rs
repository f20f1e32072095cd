// Library exports for mdtoggle

pub mod action;
pub mod config;
pub mod fullscreen;
pub mod host;
pub mod markers;
pub mod shortcuts;
pub mod sourceedit;
pub mod state;
pub mod style;
pub mod toggle;

pub use action::Action;
pub use host::{CursorEnd, Position, TextHost};
pub use style::{Style, StyleSet};
pub use toggle::{Outcome, Toggler};
