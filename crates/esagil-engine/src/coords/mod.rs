//! Geometry and color types shared by the runtime and the scene model.
//!
//! Canonical space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down, so positive angles turn clockwise on screen

mod color;
mod rect;
mod vec2;

pub use color::Color;
pub use rect::Rect;
pub use vec2::Vec2;
