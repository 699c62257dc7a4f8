//! Layout solvers.
//!
//! Both solvers are pure functions from an immutable description to a list of
//! placements. Components call them from
//! [`Component::compute_layout`](crate::component::Component::compute_layout)
//! and write the results back through the item capability tables.

mod error;
mod grid;
mod path;

use std::fmt;

use crate::item::LayoutInfo;

pub use error::LayoutError;
pub use grid::{solve_grid_layout, solve_tracks, GridCell, GridLayout};
pub use path::{solve_path_layout, PathItem, PathLayout, PathPlacement, PathSpacing};

// ── Axis ──────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        })
    }
}

// ── LayoutConstraint ──────────────────────────────────────────────────────

/// Size preferences along one axis.
///
/// `max` may be infinite. `stretch` is the relative share of leftover space;
/// `0` means the size never grows past its base.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutConstraint {
    pub min: f32,
    pub max: f32,
    pub preferred: f32,
    pub stretch: f32,
}

impl Default for LayoutConstraint {
    fn default() -> Self {
        Self { min: 0.0, max: f32::INFINITY, preferred: 0.0, stretch: 1.0 }
    }
}

impl LayoutConstraint {
    pub fn preferred(preferred: f32) -> Self {
        Self { preferred, ..Self::default() }
    }

    /// Exactly `size`, never stretched or shrunk.
    pub fn fixed(size: f32) -> Self {
        Self { min: size, max: size, preferred: size, stretch: 0.0 }
    }

    pub fn with_min(mut self, min: f32) -> Self {
        self.min = min;
        self
    }

    pub fn with_max(mut self, max: f32) -> Self {
        self.max = max;
        self
    }

    pub fn with_stretch(mut self, stretch: f32) -> Self {
        self.stretch = stretch;
        self
    }

    /// Projects an item's [`LayoutInfo`] onto `axis`.
    pub fn from_layout_info(info: LayoutInfo, axis: Axis) -> Self {
        let pick = |v: esagil_engine::coords::Vec2| match axis {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        };
        Self {
            min: pick(info.min),
            max: pick(info.max),
            preferred: pick(info.preferred),
            stretch: pick(info.stretch),
        }
    }

    /// `preferred` clamped into `[min, max]`.
    #[inline]
    pub fn base(&self) -> f32 {
        self.preferred.clamp(self.min, self.max)
    }

    pub(crate) fn validate(&self, what: impl FnOnce() -> String) -> Result<(), LayoutError> {
        let reason = if !(self.min.is_finite() && self.preferred.is_finite() && self.stretch.is_finite()) {
            Some("min, preferred and stretch must be finite")
        } else if self.max.is_nan() {
            Some("max is NaN")
        } else if self.min < 0.0 || self.preferred < 0.0 || self.max < 0.0 {
            Some("sizes must not be negative")
        } else if self.stretch < 0.0 {
            Some("stretch must not be negative")
        } else if self.min > self.max {
            Some("min exceeds max")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(LayoutError::InvalidConstraint { what: what(), reason }),
            None => Ok(()),
        }
    }
}
