// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived cell geometry: per-track bounds, flow mapping, and real size.
//!
//! A [`GridDescriptor`] is recomputed on demand from measured child bounds
//! and cached on the container until a structural or property change
//! invalidates it. Both the placement pass and the hit-test routine consume
//! the same descriptor, so a ray always lands in exactly the cell a child
//! was placed in.

use alloc::vec::Vec;
use canopy_geometry::{Bounds, Padding};
use kurbo::Size;
use smallvec::SmallVec;

use crate::error::{Axis, LayoutError};
use crate::params::{GridParams, LinearParams, Orientation, WRAP_CONTENT};

/// How sequential child indices map onto cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flow {
    /// A row fills across its columns before the next row starts
    /// (`columns` is the authoritative driver).
    Rows,
    /// A column fills down its rows before the next column starts
    /// (`rows` is the authoritative driver).
    Columns,
}

impl Flow {
    /// Column index of the flat child index `i`.
    #[must_use]
    pub const fn column_of(self, i: usize, columns: usize, rows: usize) -> usize {
        match self {
            Self::Rows => i % columns,
            Self::Columns => i / rows,
        }
    }

    /// Row index of the flat child index `i`.
    #[must_use]
    pub const fn row_of(self, i: usize, columns: usize, rows: usize) -> usize {
        match self {
            Self::Rows => i / columns,
            Self::Columns => i % rows,
        }
    }

    /// Flat child index of cell `(row, column)`.
    #[must_use]
    pub const fn index_of(self, row: usize, column: usize, columns: usize, rows: usize) -> usize {
        match self {
            Self::Rows => row * columns + column,
            Self::Columns => column * rows + row,
        }
    }
}

/// One column or row of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Track {
    /// Distance of the track's leading edge from the layout origin
    /// (rightward for columns, downward for rows).
    pub offset: f64,
    /// Full extent of the track, padding included.
    pub extent: f64,
    /// The padding component of the extent. Fixed-size rescaling shrinks
    /// only `extent - padding`; padding is never scaled.
    pub padding: f64,
}

impl Track {
    /// The content component of the extent.
    #[must_use]
    pub fn content(&self) -> f64 {
        self.extent - self.padding
    }

    /// The trailing edge of the track.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.offset + self.extent
    }
}

/// Measured input for one cell: the child's bounds size plus its effective
/// padding.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct CellMetrics {
    pub(crate) size: Size,
    pub(crate) padding: Padding,
}

impl CellMetrics {
    pub(crate) fn new(bounds: &Bounds, padding: Padding) -> Self {
        Self {
            size: bounds.size(),
            padding,
        }
    }
}

/// Cell geometry derived from measured children and layout parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct GridDescriptor {
    /// Number of columns.
    pub columns: usize,
    /// Number of rows.
    pub rows: usize,
    /// Index-to-cell mapping direction.
    pub flow: Flow,
    /// Column bounds, left to right.
    pub column_tracks: SmallVec<[Track; 8]>,
    /// Row bounds, top to bottom.
    pub row_tracks: SmallVec<[Track; 8]>,
    /// Number of occupied cells (the child count that was laid out).
    pub cell_count: usize,
    /// Overall content size.
    pub size: Size,
}

impl GridDescriptor {
    fn empty(flow: Flow) -> Self {
        Self {
            columns: 0,
            rows: 0,
            flow,
            column_tracks: SmallVec::new(),
            row_tracks: SmallVec::new(),
            cell_count: 0,
            size: Size::ZERO,
        }
    }

    /// Builds the descriptor for a grid layout.
    pub(crate) fn grid(params: &GridParams, cells: &[CellMetrics]) -> Result<Self, LayoutError> {
        let n = cells.len();
        let (flow, columns, rows) = derive_grid_shape(params.columns, params.rows, n);
        if n == 0 {
            return Ok(Self::empty(flow));
        }

        let mut column_tracks: SmallVec<[Track; 8]> = SmallVec::from_elem(Track::default(), columns);
        let mut row_tracks: SmallVec<[Track; 8]> = SmallVec::from_elem(Track::default(), rows);
        for (i, cell) in cells.iter().enumerate() {
            let col = &mut column_tracks[flow.column_of(i, columns, rows)];
            col.extent = col.extent.max(cell.size.width + cell.padding.horizontal());
            col.padding = col.padding.max(cell.padding.horizontal());
            let row = &mut row_tracks[flow.row_of(i, columns, rows)];
            row.extent = row.extent.max(cell.size.height + cell.padding.vertical());
            row.padding = row.padding.max(cell.padding.vertical());
        }

        if params.common.has_fixed_width() {
            rescale_tracks(&mut column_tracks, params.common.width, Axis::Horizontal)?;
        }
        if params.common.has_fixed_height() {
            rescale_tracks(&mut row_tracks, params.common.height, Axis::Vertical)?;
        }
        accumulate_offsets(&mut column_tracks);
        accumulate_offsets(&mut row_tracks);

        let size = Size::new(
            column_tracks.iter().map(|t| t.extent).sum(),
            row_tracks.iter().map(|t| t.extent).sum(),
        );
        Ok(Self {
            columns,
            rows,
            flow,
            column_tracks,
            row_tracks,
            cell_count: n,
            size,
        })
    }

    /// Builds the descriptor for a linear layout: a single cross-axis track
    /// and one main-axis track per child.
    ///
    /// Unlike grids, a fixed main-axis dimension does not rescale tracks; it
    /// only introduces a leading gap (block alignment) when it is larger
    /// than the content, and overflow rescaling is handled per child.
    pub(crate) fn linear(params: &LinearParams, cells: &[CellMetrics]) -> Result<Self, LayoutError> {
        let vertical = params.orientation == Orientation::Vertical;
        let flow = if vertical { Flow::Rows } else { Flow::Columns };
        if cells.is_empty() {
            return Ok(Self::empty(flow));
        }

        let (main, cross): (Vec<(f64, f64)>, Vec<(f64, f64)>) = cells
            .iter()
            .map(|c| {
                let horizontal = (c.size.width + c.padding.horizontal(), c.padding.horizontal());
                let vertical_ = (c.size.height + c.padding.vertical(), c.padding.vertical());
                if vertical {
                    (vertical_, horizontal)
                } else {
                    (horizontal, vertical_)
                }
            })
            .unzip();

        let span_extent = cross.iter().map(|&(e, _)| e).fold(0.0_f64, f64::max);
        let span_padding = cross.iter().map(|&(_, p)| p).fold(0.0_f64, f64::max);
        let (fixed_cross, fixed_main) = if vertical {
            (params.common.width, params.common.height)
        } else {
            (params.common.height, params.common.width)
        };
        let span = if fixed_cross > WRAP_CONTENT {
            fixed_cross
        } else {
            span_extent
        };
        let span_track = Track {
            offset: 0.0,
            extent: span,
            padding: span_padding,
        };

        let content_main: f64 = main.iter().map(|&(e, _)| e).sum();
        let align = params.common.item_alignment;
        let leading = if fixed_main > content_main {
            let fraction = if vertical {
                align.vertical.fraction()
            } else {
                align.horizontal.fraction()
            };
            (fixed_main - content_main) * fraction
        } else {
            0.0
        };

        let mut offset = leading;
        let mut main_tracks: SmallVec<[Track; 8]> = SmallVec::with_capacity(main.len());
        for &(extent, padding) in &main {
            main_tracks.push(Track {
                offset,
                extent,
                padding,
            });
            offset += extent;
        }

        let main_size = if fixed_main > WRAP_CONTENT {
            fixed_main
        } else {
            content_main
        };
        let (column_tracks, row_tracks, columns, rows, size) = if vertical {
            let n = main_tracks.len();
            (
                SmallVec::from_elem(span_track, 1),
                main_tracks,
                1,
                n,
                Size::new(span, main_size),
            )
        } else {
            let n = main_tracks.len();
            (
                main_tracks,
                SmallVec::from_elem(span_track, 1),
                n,
                1,
                Size::new(main_size, span),
            )
        };
        Ok(Self {
            columns,
            rows,
            flow,
            column_tracks,
            row_tracks,
            cell_count: cells.len(),
            size,
        })
    }

    /// Index of the first column whose trailing edge exceeds `x`, clamped to
    /// the last column. `None` when the descriptor is empty.
    #[must_use]
    pub fn column_at(&self, x: f64) -> Option<usize> {
        if self.column_tracks.is_empty() {
            return None;
        }
        Some(
            self.column_tracks
                .iter()
                .position(|t| x < t.end())
                .unwrap_or(self.column_tracks.len() - 1),
        )
    }

    /// Index of the first row whose trailing edge exceeds `distance_from_top`,
    /// clamped to the last row. `None` when the descriptor is empty.
    #[must_use]
    pub fn row_at(&self, distance_from_top: f64) -> Option<usize> {
        if self.row_tracks.is_empty() {
            return None;
        }
        Some(
            self.row_tracks
                .iter()
                .position(|t| distance_from_top < t.end())
                .unwrap_or(self.row_tracks.len() - 1),
        )
    }

    /// The flat child index occupying cell `(row, column)`, if any.
    #[must_use]
    pub fn cell_index(&self, row: usize, column: usize) -> Option<usize> {
        let index = self.flow.index_of(row, column, self.columns, self.rows);
        (index < self.cell_count).then_some(index)
    }
}

/// Derives `(flow, columns, rows)` from the requested counts.
///
/// A non-zero `columns` wins over `rows`; both zero means a single column.
fn derive_grid_shape(columns: usize, rows: usize, n: usize) -> (Flow, usize, usize) {
    if columns > 0 {
        (Flow::Rows, columns, n.div_ceil(columns).max(1))
    } else if rows > 0 {
        (Flow::Columns, n.div_ceil(rows).max(1), rows)
    } else {
        (Flow::Rows, 1, n.max(1))
    }
}

/// Rescales track *content* so the extents sum to `fixed`, re-adding the
/// unscaled padding afterwards.
fn rescale_tracks(tracks: &mut [Track], fixed: f64, axis: Axis) -> Result<(), LayoutError> {
    let sum_padding: f64 = tracks.iter().map(|t| t.padding).sum();
    let sum_content: f64 = tracks.iter().map(Track::content).sum();
    if sum_content <= 0.0 {
        // Nothing to scale; padding-only tracks keep their extents.
        return if sum_padding > fixed {
            Err(LayoutError::PaddingExceedsFixedSize { axis })
        } else {
            Ok(())
        };
    }
    let available = fixed - sum_padding;
    if available <= 0.0 {
        return Err(LayoutError::PaddingExceedsFixedSize { axis });
    }
    let scale = available / sum_content;
    for track in tracks {
        track.extent = track.content() * scale + track.padding;
    }
    Ok(())
}

fn accumulate_offsets(tracks: &mut [Track]) {
    let mut offset = 0.0;
    for track in tracks {
        track.offset = offset;
        offset += track.extent;
    }
}
