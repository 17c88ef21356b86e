//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, navigation bar and overlays
//! - `input`: keyboard event handling
//! - `styles`: color palette and text styling
//! - `tabs`: content for each page section

pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
