use myrmex_data::Vec2;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "rayon")]
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

/// Upper bound on grid cells, roughly; `ceil` may add one row and column.
pub const MAX_CELLS: usize = 1 << 20;

#[derive(Clone, Debug, Default)]
/// Uniform grid over the world for neighbor queries.
///
/// Entries are stored as indices into the caller's position slice, grouped by
/// cell with the "offset array" layout (like compressed sparse rows):
/// `cell_offsets[i]..cell_offsets[i + 1]` spans the entries of cell `i` inside
/// `entity_indices`.
///
/// The cell size is normally the perception radius, so a perception query
/// touches at most a 3x3 block of cells.
///
/// Positions outside the world are filed under the nearest edge cell and
/// query ranges are clamped the same way, so nothing indexed is ever missed.
/// Non-finite positions are not indexed. Queries return candidates only; the
/// caller applies the exact distance test.
///
/// # Examples
/// ```
/// use myrmex_core::spatial_hash::SpatialHash;
/// use myrmex_data::Vec2;
///
/// let mut spatial = SpatialHash::new(10.0, 100.0, 100.0);
/// let positions = vec![Vec2::new(15.0, 15.0), Vec2::new(25.0, 25.0), Vec2::new(85.0, 85.0)];
/// spatial.build(&positions);
///
/// let mut nearby = Vec::new();
/// spatial.query_into(15.0, 15.0, 20.0, &mut nearby);
/// assert!(nearby.contains(&0));
/// assert!(!nearby.contains(&2));
/// ```
pub struct SpatialHash {
    pub cell_size: f64,
    pub width: f64,
    pub height: f64,
    pub cols: usize,
    pub rows: usize,
    pub cell_offsets: Vec<usize>,
    pub entity_indices: Vec<usize>,
}

impl SpatialHash {
    /// Creates an empty grid of `cell_size` cells covering `width` x `height`.
    ///
    /// Cells are never smaller than needed to keep the grid within
    /// [`MAX_CELLS`]; a tiny radius just means more candidates per cell.
    pub fn new(cell_size: f64, width: f64, height: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        let min_cell = (width.abs() * height.abs() / MAX_CELLS as f64).sqrt();
        let cell_size = if min_cell.is_finite() {
            cell_size.max(min_cell)
        } else {
            cell_size
        };
        let cols = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);
        Self {
            cell_size,
            width,
            height,
            cols,
            rows,
            cell_offsets: vec![0; cols * rows + 1],
            entity_indices: Vec::new(),
        }
    }

    /// Cell index with out-of-range coordinates pulled onto the edge.
    #[inline]
    pub fn clamped_cell_idx(&self, x: f64, y: f64) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let cx = self.clamp_col((x / self.cell_size).floor());
        let cy = self.clamp_row((y / self.cell_size).floor());
        Some(cy * self.cols + cx)
    }

    #[inline]
    fn clamp_col(&self, c: f64) -> usize {
        c.clamp(0.0, (self.cols - 1) as f64) as usize
    }

    #[inline]
    fn clamp_row(&self, r: f64) -> usize {
        r.clamp(0.0, (self.rows - 1) as f64) as usize
    }

    /// Clamped inclusive cell window touched by a query, or `None` for an
    /// unusable query.
    fn cell_window(&self, x: f64, y: f64, radius: f64) -> Option<(usize, usize, usize, usize)> {
        if !x.is_finite() || !y.is_finite() || !radius.is_finite() || radius < 0.0 {
            return None;
        }
        let min_cx = self.clamp_col(((x - radius) / self.cell_size).floor());
        let max_cx = self.clamp_col(((x + radius) / self.cell_size).floor());
        let min_cy = self.clamp_row(((y - radius) / self.cell_size).floor());
        let max_cy = self.clamp_row(((y + radius) / self.cell_size).floor());
        Some((min_cx, max_cx, min_cy, max_cy))
    }

    /// Rebuilds the grid from `positions`; entry `i` refers to `positions[i]`.
    pub fn build(&mut self, positions: &[Vec2]) {
        let cell_count = self.cols * self.rows;
        let entity_count = positions.len();

        let counts = self.count_per_cell(positions, cell_count);

        self.cell_offsets.resize(cell_count + 1, 0);
        let mut total = 0;
        for (i, &count) in counts.iter().enumerate().take(cell_count) {
            self.cell_offsets[i] = total;
            total += count;
        }
        self.cell_offsets[cell_count] = total;

        self.entity_indices.clear();
        self.entity_indices.resize(total, 0);
        debug_assert!(total <= entity_count);

        let mut current_offsets = self.cell_offsets[..cell_count].to_vec();
        for (entity_idx, p) in positions.iter().enumerate() {
            if let Some(cell_idx) = self.clamped_cell_idx(p.x, p.y) {
                let write_idx = current_offsets[cell_idx];
                self.entity_indices[write_idx] = entity_idx;
                current_offsets[cell_idx] += 1;
            }
        }
    }

    #[cfg(feature = "rayon")]
    fn count_per_cell(&self, positions: &[Vec2], cell_count: usize) -> Vec<usize> {
        let atomic_counts: Vec<AtomicUsize> =
            (0..cell_count).map(|_| AtomicUsize::new(0)).collect();
        positions.par_iter().for_each(|p| {
            if let Some(idx) = self.clamped_cell_idx(p.x, p.y) {
                atomic_counts[idx].fetch_add(1, AtomicOrdering::Relaxed);
            }
        });
        atomic_counts.into_iter().map(|a| a.into_inner()).collect()
    }

    #[cfg(not(feature = "rayon"))]
    fn count_per_cell(&self, positions: &[Vec2], cell_count: usize) -> Vec<usize> {
        let mut counts = vec![0; cell_count];
        for p in positions {
            if let Some(idx) = self.clamped_cell_idx(p.x, p.y) {
                counts[idx] += 1;
            }
        }
        counts
    }

    pub fn query_callback<F>(&self, x: f64, y: f64, radius: f64, mut callback: F)
    where
        F: FnMut(usize),
    {
        for idx in self.query_iter(x, y, radius) {
            callback(idx);
        }
    }

    /// Lazily yields candidate indices from every cell the query touches.
    pub fn query_iter(&self, x: f64, y: f64, radius: f64) -> impl Iterator<Item = usize> + '_ {
        let cols = self.cols;
        self.cell_window(x, y, radius)
            .into_iter()
            .flat_map(move |(min_cx, max_cx, min_cy, max_cy)| {
                (min_cy..=max_cy)
                    .flat_map(move |cy| (min_cx..=max_cx).map(move |cx| cy * cols + cx))
            })
            .flat_map(move |cell_idx| {
                let start = self.cell_offsets[cell_idx];
                let end = self.cell_offsets[cell_idx + 1];
                self.entity_indices[start..end].iter().copied()
            })
    }

    pub fn count_nearby(&self, x: f64, y: f64, radius: f64) -> usize {
        let Some((min_cx, max_cx, min_cy, max_cy)) = self.cell_window(x, y, radius) else {
            return 0;
        };
        let mut count = 0;
        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                let cell_idx = cy * self.cols + cx;
                count += self.cell_offsets[cell_idx + 1] - self.cell_offsets[cell_idx];
            }
        }
        count
    }

    #[inline]
    pub fn query_into(&self, x: f64, y: f64, radius: f64, result: &mut Vec<usize>) {
        result.clear();
        result.extend(self.query_iter(x, y, radius));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entity_indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entity_indices.is_empty()
    }
}
