//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame rendering, layout and dialogs
//! - `input`: Keyboard event handling
//! - `styles`: Color scheme and text styling
//! - `tabs`: Tab-specific content (overview, reservations, menu, settings)

pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
