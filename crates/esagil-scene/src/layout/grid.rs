use esagil_engine::coords::{Rect, Vec2};

use crate::item::LayoutInfo;

use super::{Axis, LayoutConstraint, LayoutError};

/// Leftover below this is treated as fully distributed.
const EPSILON: f32 = 1e-4;

// ── GridCell ──────────────────────────────────────────────────────────────

/// One occupant of a [`GridLayout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
    pub horizontal: LayoutConstraint,
    pub vertical: LayoutConstraint,
}

impl GridCell {
    /// Single-track cell at (`row`, `col`) with unconstrained sizes.
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            row_span: 1,
            col_span: 1,
            horizontal: LayoutConstraint::default(),
            vertical: LayoutConstraint::default(),
        }
    }

    pub fn span(mut self, row_span: usize, col_span: usize) -> Self {
        self.row_span = row_span;
        self.col_span = col_span;
        self
    }

    pub fn horizontal(mut self, c: LayoutConstraint) -> Self {
        self.horizontal = c;
        self
    }

    pub fn vertical(mut self, c: LayoutConstraint) -> Self {
        self.vertical = c;
        self
    }

    /// Takes both constraints from an item's layout info.
    pub fn with_layout_info(self, info: LayoutInfo) -> Self {
        self.horizontal(LayoutConstraint::from_layout_info(info, Axis::Horizontal))
            .vertical(LayoutConstraint::from_layout_info(info, Axis::Vertical))
    }

    fn placement(&self, axis: Axis) -> (usize, usize, &LayoutConstraint) {
        match axis {
            Axis::Horizontal => (self.col, self.col_span, &self.horizontal),
            Axis::Vertical => (self.row, self.row_span, &self.vertical),
        }
    }
}

// ── GridLayout ────────────────────────────────────────────────────────────

/// Grid description consumed by [`solve_grid_layout`].
///
/// Track counts default to what the cells occupy. Declaring them adds empty
/// tracks and turns cells that reach past the end into an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLayout {
    pub cells: Vec<GridCell>,
    pub size: Vec2,
    pub spacing: f32,
    pub origin: Vec2,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
}

impl GridLayout {
    pub fn new(size: Vec2) -> Self {
        Self { size, ..Self::default() }
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn cols(mut self, cols: usize) -> Self {
        self.cols = Some(cols);
        self
    }

    pub fn cell(mut self, cell: GridCell) -> Self {
        self.cells.push(cell);
        self
    }

    fn declared(&self, axis: Axis) -> Option<usize> {
        match axis {
            Axis::Horizontal => self.cols,
            Axis::Vertical => self.rows,
        }
    }

    fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.size.x,
            Axis::Vertical => self.size.y,
        }
    }
}

// ── solving ───────────────────────────────────────────────────────────────

/// Computes one rectangle per cell, in cell order.
pub fn solve_grid_layout(layout: &GridLayout) -> Result<Vec<Rect>, LayoutError> {
    if !(layout.size.is_finite() && layout.size.x >= 0.0 && layout.size.y >= 0.0) {
        return Err(LayoutError::InvalidConstraint {
            what: "grid size".into(),
            reason: "must be finite and not negative",
        });
    }
    if !(layout.spacing.is_finite() && layout.spacing >= 0.0) {
        return Err(LayoutError::InvalidConstraint {
            what: "grid spacing".into(),
            reason: "must be finite and not negative",
        });
    }
    if !layout.origin.is_finite() {
        return Err(LayoutError::InvalidConstraint {
            what: "grid origin".into(),
            reason: "must be finite",
        });
    }
    if layout.cells.is_empty() {
        return Ok(Vec::new());
    }

    let columns = AxisTracks::solve(layout, Axis::Horizontal)?;
    let rows = AxisTracks::solve(layout, Axis::Vertical)?;

    log::trace!(
        "grid {}x{} in {:?}: cols {:?} rows {:?}",
        columns.sizes.len(),
        rows.sizes.len(),
        layout.size,
        columns.sizes,
        rows.sizes
    );

    Ok(layout
        .cells
        .iter()
        .map(|cell| {
            let (x, w) = columns.span(cell.col, cell.col_span);
            let (y, h) = rows.span(cell.row, cell.row_span);
            Rect::new(layout.origin.x + x, layout.origin.y + y, w, h)
        })
        .collect())
}

/// Solved track sizes of one axis plus their start offsets.
struct AxisTracks {
    sizes: Vec<f32>,
    offsets: Vec<f32>,
    spacing: f32,
}

impl AxisTracks {
    fn solve(layout: &GridLayout, axis: Axis) -> Result<Self, LayoutError> {
        let constraints = track_constraints(layout, axis)?;
        let gaps = constraints.len().saturating_sub(1) as f32;
        let available = (layout.extent(axis) - layout.spacing * gaps).max(0.0);
        let sizes = solve_tracks(&constraints, available);

        let mut offsets = Vec::with_capacity(sizes.len());
        let mut cursor = 0.0;
        for size in &sizes {
            offsets.push(cursor);
            cursor += size + layout.spacing;
        }
        Ok(Self { sizes, offsets, spacing: layout.spacing })
    }

    /// Offset and extent of `span` tracks starting at `start`, inner gaps included.
    fn span(&self, start: usize, span: usize) -> (f32, f32) {
        let sizes = &self.sizes[start..start + span];
        let extent = sizes.iter().sum::<f32>() + self.spacing * (span - 1) as f32;
        (self.offsets[start], extent)
    }
}

/// Merges the constraints of single-track cells into one per track.
///
/// Cells spanning several tracks are placed but do not influence track sizes.
/// Tracks no single-track cell covers take [`LayoutConstraint::default`].
fn track_constraints(layout: &GridLayout, axis: Axis) -> Result<Vec<LayoutConstraint>, LayoutError> {
    let declared = layout.declared(axis);
    let mut count = declared.unwrap_or(0);

    for (index, cell) in layout.cells.iter().enumerate() {
        let (start, span, constraint) = cell.placement(axis);
        if span == 0 {
            return Err(LayoutError::EmptySpan { cell: index, axis });
        }
        let end = start.checked_add(span).ok_or(LayoutError::SpanOutOfBounds {
            cell: index,
            axis,
            start,
            end: usize::MAX,
            declared: declared.unwrap_or(usize::MAX),
        })?;
        match declared {
            Some(declared) if end > declared => {
                return Err(LayoutError::SpanOutOfBounds { cell: index, axis, start, end, declared });
            }
            Some(_) => {}
            None => count = count.max(end),
        }
        constraint.validate(|| format!("{axis} constraint of cell {index}"))?;
    }

    let mut merged: Vec<Option<LayoutConstraint>> = vec![None; count];
    for cell in &layout.cells {
        let (start, span, c) = cell.placement(axis);
        if span != 1 {
            continue;
        }
        merged[start] = Some(match merged[start] {
            None => *c,
            Some(m) => LayoutConstraint {
                min: m.min.max(c.min),
                max: m.max.min(c.max),
                preferred: m.preferred.max(c.preferred),
                stretch: m.stretch.max(c.stretch),
            },
        });
    }

    Ok(merged
        .into_iter()
        .map(|m| {
            let mut c = m.unwrap_or_default();
            c.max = c.max.max(c.min);
            c
        })
        .collect())
}

/// Sizes a row of tracks to fill `available`.
///
/// Each track starts at its base size (`preferred` clamped into
/// `[min, max]`). Surplus goes to stretchable tracks in proportion to their
/// stretch, deficit is taken from tracks in proportion to their base size.
/// Tracks that hit a bound drop out and their share is redistributed in the
/// next round. When every track is at its min, the result overflows.
///
/// Float rounding can leave a sliver undistributed; it goes to the
/// lowest-index track that still has room, so ties favour earlier tracks.
pub fn solve_tracks(constraints: &[LayoutConstraint], available: f32) -> Vec<f32> {
    let mut sizes: Vec<f32> = constraints.iter().map(LayoutConstraint::base).collect();
    let slack = available - sizes.iter().sum::<f32>();

    if slack > EPSILON {
        grow(constraints, &mut sizes, slack);
    } else if slack < -EPSILON {
        shrink(constraints, &mut sizes, -slack);
    }
    sizes
}

fn grow(constraints: &[LayoutConstraint], sizes: &mut [f32], mut slack: f32) {
    let growable = |sizes: &[f32], i: usize| constraints[i].stretch > 0.0 && sizes[i] < constraints[i].max;

    // A round either caps at least one track or hands out everything, so
    // there are at most `len + 1` rounds.
    loop {
        let active: Vec<usize> = (0..sizes.len()).filter(|&i| growable(sizes, i)).collect();
        let total_stretch: f32 = active.iter().map(|&i| constraints[i].stretch).sum();
        if active.is_empty() || total_stretch <= 0.0 {
            return;
        }

        let round = slack;
        let mut capped = false;
        for &i in &active {
            let target = sizes[i] + round * constraints[i].stretch / total_stretch;
            let grown = if target >= constraints[i].max {
                capped = true;
                constraints[i].max
            } else {
                target
            };
            slack -= grown - sizes[i];
            sizes[i] = grown;
        }
        if !capped || slack <= EPSILON {
            break;
        }
    }

    // Rounding residue goes to the first track that can take it.
    if slack > 0.0 {
        if let Some(i) = (0..sizes.len()).find(|&i| growable(sizes, i)) {
            sizes[i] = (sizes[i] + slack).min(constraints[i].max);
        }
    }
}

fn shrink(constraints: &[LayoutConstraint], sizes: &mut [f32], mut deficit: f32) {
    let weights: Vec<f32> = constraints.iter().map(LayoutConstraint::base).collect();
    let shrinkable = |sizes: &[f32], i: usize| sizes[i] > constraints[i].min && weights[i] > 0.0;

    // Same round bound as `grow`: each repeat floors at least one track.
    loop {
        let active: Vec<usize> = (0..sizes.len()).filter(|&i| shrinkable(sizes, i)).collect();
        let total_weight: f32 = active.iter().map(|&i| weights[i]).sum();
        if active.is_empty() || total_weight <= 0.0 {
            return;
        }

        let round = deficit;
        let mut floored = false;
        for &i in &active {
            let target = sizes[i] - round * weights[i] / total_weight;
            let shrunk = if target <= constraints[i].min {
                floored = true;
                constraints[i].min
            } else {
                target
            };
            deficit -= sizes[i] - shrunk;
            sizes[i] = shrunk;
        }
        if !floored || deficit <= EPSILON {
            break;
        }
    }

    if deficit > 0.0 {
        if let Some(i) = (0..sizes.len()).find(|&i| shrinkable(sizes, i)) {
            sizes[i] = (sizes[i] - deficit).max(constraints[i].min);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn approx_all(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!(approx(*a, *e), "{actual:?} vs {expected:?}");
        }
    }

    fn pref(p: f32) -> LayoutConstraint {
        LayoutConstraint::preferred(p)
    }

    // ── solve_tracks ──────────────────────────────────────────────────────

    #[test]
    fn surplus_split_by_stretch() {
        approx_all(&solve_tracks(&[pref(100.0), pref(200.0)], 400.0), &[150.0, 250.0]);
    }

    #[test]
    fn surplus_respects_stretch_ratio() {
        let tracks = [pref(0.0).with_stretch(1.0), pref(0.0).with_stretch(3.0)];
        approx_all(&solve_tracks(&tracks, 100.0), &[25.0, 75.0]);
    }

    #[test]
    fn zero_stretch_keeps_base() {
        let tracks = [pref(50.0).with_stretch(0.0), pref(50.0)];
        approx_all(&solve_tracks(&tracks, 200.0), &[50.0, 150.0]);
    }

    #[test]
    fn clamped_track_hands_surplus_to_others() {
        let tracks = [pref(100.0).with_max(120.0), pref(100.0)];
        let sizes = solve_tracks(&tracks, 400.0);
        approx_all(&sizes, &[120.0, 280.0]);
        assert!(approx(sizes.iter().sum(), 400.0));
    }

    #[test]
    fn surplus_left_over_when_everything_is_capped() {
        let tracks = [LayoutConstraint::fixed(10.0), pref(10.0).with_max(20.0)];
        approx_all(&solve_tracks(&tracks, 100.0), &[10.0, 20.0]);
    }

    #[test]
    fn deficit_taken_in_proportion_to_base() {
        approx_all(&solve_tracks(&[pref(100.0), pref(300.0)], 200.0), &[50.0, 150.0]);
    }

    #[test]
    fn shrink_stops_at_min_and_redistributes() {
        let tracks = [pref(100.0).with_min(90.0), pref(100.0)];
        let sizes = solve_tracks(&tracks, 100.0);
        approx_all(&sizes, &[90.0, 10.0]);
    }

    #[test]
    fn overflow_when_all_at_min() {
        let tracks = [pref(100.0).with_min(100.0), pref(100.0).with_min(100.0)];
        approx_all(&solve_tracks(&tracks, 100.0), &[100.0, 100.0]);
    }

    #[test]
    fn exact_fit_is_untouched() {
        approx_all(&solve_tracks(&[pref(40.0), pref(60.0)], 100.0), &[40.0, 60.0]);
    }

    // ── rounding ──────────────────────────────────────────────────────────

    /// `magnitude` is the largest value involved; f32 error scales with it.
    fn assert_fills(sizes: &[f32], available: f32, magnitude: f32) {
        let sum: f32 = sizes.iter().sum();
        let tolerance = magnitude.max(1.0) * 1e-5;
        assert!((sum - available).abs() <= tolerance, "{sizes:?} sum {sum} != {available}");
    }

    #[test]
    fn fractional_shrink_terminates_and_fills() {
        let tracks = [
            pref(524.54443),
            pref(1127.7046),
            pref(2169.2813),
            pref(278.1553),
            pref(2861.4),
        ];
        let sizes = solve_tracks(&tracks, 3553.6392);
        assert_fills(&sizes, 3553.6392, 6961.09);
        assert!(sizes.iter().all(|s| *s > 0.0));
    }

    #[test]
    fn fractional_grow_terminates_and_fills() {
        let tracks = [pref(13.37), pref(271.828).with_stretch(2.5), pref(0.1).with_max(33.3)];
        let sizes = solve_tracks(&tracks, 1234.567);
        assert_fills(&sizes, 1234.567, 1234.567);
        assert!(sizes[2] <= 33.3);
    }

    #[test]
    fn huge_tracks_terminate() {
        let tracks = [pref(1.5e7), pref(1.5e7), pref(1.5e7)];
        assert_fills(&solve_tracks(&tracks, 44_999_996.0), 44_999_996.0, 4.5e7);
        assert_fills(&solve_tracks(&tracks, 45_000_004.0), 45_000_004.0, 4.5e7);
    }

    #[test]
    fn huge_grid_shrink_terminates() {
        let mut layout = GridLayout::new(Vec2::new(44_999_996.0, 10.0));
        for col in 0..3 {
            layout = layout.cell(GridCell::new(0, col).horizontal(pref(1.5e7)));
        }
        let rects = solve_grid_layout(&layout).unwrap();
        let width: f32 = rects.iter().map(|r| r.size.x).sum();
        assert!((width - 44_999_996.0).abs() <= 450.0);
    }

    #[test]
    fn seeded_sweep_always_fills() {
        // Small LCG so the sweep is reproducible without extra crates.
        let mut state = 0x2545_F491_u32;
        let mut next = move |scale: f32| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 8) as f32 / (1u32 << 24) as f32 * scale
        };

        for _ in 0..2000 {
            let count = 2 + (next(6.0) as usize).min(5);
            let tracks: Vec<LayoutConstraint> = (0..count).map(|_| pref(next(3000.0))).collect();
            let available = next(6000.0);
            let total: f32 = tracks.iter().map(|t| t.preferred).sum();
            let sizes = solve_tracks(&tracks, available);
            assert_fills(&sizes, available, total.max(available));
        }
    }

    #[test]
    fn residue_goes_to_the_lowest_index() {
        let sizes = solve_tracks(&[pref(0.0), pref(0.0), pref(0.0)], 100.0);
        assert_fills(&sizes, 100.0, 100.0);
        assert!(sizes[0] >= sizes[1]);
        assert_eq!(sizes[1], sizes[2]);
    }

    #[test]
    fn equal_constraints_get_equal_sizes() {
        let tracks = [pref(10.0), pref(10.0).with_max(30.0), pref(10.0), pref(10.0).with_max(30.0)];
        let sizes = solve_tracks(&tracks, 200.0);
        approx_all(&sizes, &[70.0, 30.0, 70.0, 30.0]);
    }

    // ── solve_grid_layout ─────────────────────────────────────────────────

    #[test]
    fn two_columns_fill_width() {
        let layout = GridLayout::new(Vec2::new(400.0, 50.0))
            .cell(GridCell::new(0, 0).horizontal(pref(100.0)))
            .cell(GridCell::new(0, 1).horizontal(pref(200.0)));
        let rects = solve_grid_layout(&layout).unwrap();
        assert_eq!(rects.len(), 2);
        assert!(approx(rects[0].size.x, 150.0));
        assert!(approx(rects[1].origin.x, 150.0));
        assert!(approx(rects[1].size.x, 250.0));
        assert!(approx(rects[1].size.y, 50.0));
    }

    #[test]
    fn spacing_and_origin_offset_cells() {
        let layout = GridLayout::new(Vec2::new(210.0, 100.0))
            .spacing(10.0)
            .origin(Vec2::new(5.0, 7.0))
            .cell(GridCell::new(0, 0))
            .cell(GridCell::new(1, 1));
        let rects = solve_grid_layout(&layout).unwrap();
        assert_eq!(rects[0], Rect::new(5.0, 7.0, 100.0, 45.0));
        assert_eq!(rects[1], Rect::new(115.0, 62.0, 100.0, 45.0));
    }

    #[test]
    fn spanning_cell_covers_tracks_and_gap() {
        let layout = GridLayout::new(Vec2::new(210.0, 40.0))
            .spacing(10.0)
            .cell(GridCell::new(0, 0))
            .cell(GridCell::new(0, 1))
            .cell(GridCell::new(1, 0).span(1, 2).horizontal(pref(1000.0)));
        let rects = solve_grid_layout(&layout).unwrap();
        // The wide preference of the spanning cell does not skew the columns.
        assert!(approx(rects[0].size.x, 100.0));
        assert!(approx(rects[2].size.x, 210.0));
    }

    #[test]
    fn cells_in_one_track_merge_constraints() {
        let layout = GridLayout::new(Vec2::new(100.0, 100.0))
            .cell(GridCell::new(0, 0).horizontal(pref(30.0).with_stretch(0.0)))
            .cell(GridCell::new(1, 0).horizontal(pref(60.0).with_stretch(0.0)))
            .cell(GridCell::new(0, 1).horizontal(LayoutConstraint::fixed(10.0)));
        let rects = solve_grid_layout(&layout).unwrap();
        assert!(approx(rects[0].size.x, 60.0));
        assert!(approx(rects[1].size.x, 60.0));
        assert!(approx(rects[2].size.x, 10.0));
    }

    #[test]
    fn declared_tracks_add_empty_space() {
        let layout = GridLayout::new(Vec2::new(300.0, 10.0))
            .cols(3)
            .cell(GridCell::new(0, 0));
        let rects = solve_grid_layout(&layout).unwrap();
        assert!(approx(rects[0].size.x, 100.0));
    }

    #[test]
    fn no_cells_yield_no_rects() {
        let rects = solve_grid_layout(&GridLayout::new(Vec2::new(10.0, 10.0))).unwrap();
        assert!(rects.is_empty());
    }

    #[test]
    fn item_layout_info_feeds_cells() {
        let info = LayoutInfo {
            preferred: Vec2::new(40.0, 20.0),
            stretch: Vec2::zero(),
            ..LayoutInfo::default()
        };
        let layout = GridLayout::new(Vec2::new(100.0, 100.0))
            .cell(GridCell::new(0, 0).with_layout_info(info))
            .cell(GridCell::new(0, 1));
        let rects = solve_grid_layout(&layout).unwrap();
        assert!(approx(rects[0].size.x, 40.0));
        assert!(approx(rects[1].size.x, 60.0));
    }

    // ── errors ────────────────────────────────────────────────────────────

    #[test]
    fn zero_span_is_rejected() {
        let layout = GridLayout::new(Vec2::new(10.0, 10.0)).cell(GridCell::new(0, 0).span(1, 0));
        assert_eq!(
            solve_grid_layout(&layout),
            Err(LayoutError::EmptySpan { cell: 0, axis: Axis::Horizontal })
        );
    }

    #[test]
    fn span_past_declared_rows_is_rejected() {
        let layout = GridLayout::new(Vec2::new(10.0, 10.0))
            .rows(2)
            .cell(GridCell::new(0, 0))
            .cell(GridCell::new(1, 0).span(2, 1));
        assert_eq!(
            solve_grid_layout(&layout),
            Err(LayoutError::SpanOutOfBounds {
                cell: 1,
                axis: Axis::Vertical,
                start: 1,
                end: 3,
                declared: 2
            })
        );
    }

    #[test]
    fn invalid_constraint_names_the_cell() {
        let layout = GridLayout::new(Vec2::new(10.0, 10.0))
            .cell(GridCell::new(0, 0).vertical(pref(5.0).with_min(6.0).with_max(4.0)));
        let err = solve_grid_layout(&layout).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidConstraint { .. }));
        assert!(err.to_string().contains("cell 0"));
    }

    #[test]
    fn negative_size_is_rejected() {
        let layout = GridLayout::new(Vec2::new(-1.0, 10.0)).cell(GridCell::new(0, 0));
        assert!(solve_grid_layout(&layout).is_err());
    }
}
