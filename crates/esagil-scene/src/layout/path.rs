use esagil_engine::coords::{Rect, Vec2};

use super::LayoutError;

/// How items are distributed along the path.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PathSpacing {
    /// Equal arc length between neighbouring centers.
    #[default]
    Even,
    /// Gaps follow the items' extents along the path (`size.x`), so wider
    /// items get more room.
    Weighted,
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PathItem {
    pub size: Vec2,
}

/// Polyline description consumed by [`solve_path_layout`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathLayout {
    pub items: Vec<PathItem>,
    pub points: Vec<Vec2>,
    pub spacing: PathSpacing,
    /// Arc length available to the items. `None` uses the whole path.
    pub length: Option<f32>,
    /// Shifts every item along the path. Wraps on closed paths, clamps on
    /// open ones.
    pub offset: f32,
    pub closed: bool,
}

impl PathLayout {
    pub fn new(points: impl Into<Vec<Vec2>>) -> Self {
        Self { points: points.into(), ..Self::default() }
    }

    pub fn item(mut self, size: Vec2) -> Self {
        self.items.push(PathItem { size });
        self
    }

    pub fn items(mut self, sizes: impl IntoIterator<Item = Vec2>) -> Self {
        self.items.extend(sizes.into_iter().map(|size| PathItem { size }));
        self
    }

    pub fn spacing(mut self, spacing: PathSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn length(mut self, length: f32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }
}

/// Where one item lands: its center and the path direction there, in radians.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PathPlacement {
    pub center: Vec2,
    pub angle: f32,
}

impl PathPlacement {
    /// Unrotated rect of `size` centered on the placement.
    pub fn rect(self, size: Vec2) -> Rect {
        Rect::from_center_size(self.center, size)
    }
}

// ── solving ───────────────────────────────────────────────────────────────

/// Places each item along the polyline, in item order.
pub fn solve_path_layout(layout: &PathLayout) -> Result<Vec<PathPlacement>, LayoutError> {
    validate(layout)?;
    let Some(&start) = layout.points.first() else {
        return Err(LayoutError::EmptyPath);
    };
    if layout.items.is_empty() {
        return Ok(Vec::new());
    }

    let segments = segments(&layout.points, layout.closed);
    let total: f32 = segments.iter().map(Segment::length).sum();
    if total <= 0.0 {
        return Ok(vec![PathPlacement { center: start, angle: 0.0 }; layout.items.len()]);
    }

    let usable = layout.length.map_or(total, |l| l.min(total));
    let placements: Vec<PathPlacement> = fractions(layout)
        .into_iter()
        .map(|f| {
            let arc = f * usable + layout.offset;
            let arc = if layout.closed { arc.rem_euclid(total) } else { arc.clamp(0.0, total) };
            point_at(&segments, arc)
        })
        .collect();

    log::trace!(
        "path of {} segments, length {total} (using {usable}): {} items",
        segments.len(),
        placements.len()
    );
    Ok(placements)
}

fn validate(layout: &PathLayout) -> Result<(), LayoutError> {
    let invalid = |what: &str, reason| Err(LayoutError::InvalidConstraint { what: what.to_string(), reason });

    if let Some(index) = layout.points.iter().position(|p| !p.is_finite()) {
        return invalid(&format!("path point {index}"), "must be finite");
    }
    if let Some(length) = layout.length {
        if !(length.is_finite() && length >= 0.0) {
            return invalid("path length", "must be finite and not negative");
        }
    }
    if !layout.offset.is_finite() {
        return invalid("path offset", "must be finite");
    }
    if let Some(index) = layout
        .items
        .iter()
        .position(|i| !(i.size.is_finite() && i.size.x >= 0.0 && i.size.y >= 0.0))
    {
        return invalid(&format!("size of path item {index}"), "must be finite and not negative");
    }
    Ok(())
}

/// Position of each item as a fraction of the usable length.
///
/// Open paths run from `0` to `1` inclusive; closed paths stop short of `1`,
/// which would land back on the first item.
fn fractions(layout: &PathLayout) -> Vec<f32> {
    let n = layout.items.len();
    let even = |i: usize| match (layout.closed, n) {
        (_, 1) => 0.0,
        (true, _) => i as f32 / n as f32,
        (false, _) => i as f32 / (n - 1) as f32,
    };

    if layout.spacing == PathSpacing::Even {
        return (0..n).map(even).collect();
    }

    // Center of each item when laid end to end.
    let mut centers = Vec::with_capacity(n);
    let mut cursor = 0.0;
    for item in &layout.items {
        centers.push(cursor + item.size.x * 0.5);
        cursor += item.size.x;
    }
    let span = if layout.closed { cursor } else { centers[n - 1] - centers[0] };
    if span <= 0.0 {
        return (0..n).map(even).collect();
    }
    centers.iter().map(|c| (c - centers[0]) / span).collect()
}

#[derive(Debug, Copy, Clone)]
struct Segment {
    from: Vec2,
    to: Vec2,
}

impl Segment {
    fn length(&self) -> f32 {
        self.from.distance(self.to)
    }
}

fn segments(points: &[Vec2], closed: bool) -> Vec<Segment> {
    let mut out: Vec<Segment> = points.windows(2).map(|w| Segment { from: w[0], to: w[1] }).collect();
    if closed && points.len() > 1 {
        out.push(Segment { from: points[points.len() - 1], to: points[0] });
    }
    out
}

/// Interpolates the point at `arc`. Zero-length segments are never picked.
fn point_at(segments: &[Segment], arc: f32) -> PathPlacement {
    let mut walked = 0.0;
    let mut last = None;
    for segment in segments {
        let length = segment.length();
        if length <= 0.0 {
            continue;
        }
        if arc <= walked + length {
            let t = ((arc - walked) / length).clamp(0.0, 1.0);
            return PathPlacement {
                center: segment.from.lerp(segment.to, t),
                angle: (segment.to - segment.from).angle(),
            };
        }
        walked += length;
        last = Some(segment);
    }

    // Rounding pushed `arc` past the end: stay on the final segment.
    match last {
        Some(segment) => PathPlacement { center: segment.to, angle: (segment.to - segment.from).angle() },
        None => PathPlacement { center: segments.first().map_or(Vec2::zero(), |s| s.from), angle: 0.0 },
    }
}
