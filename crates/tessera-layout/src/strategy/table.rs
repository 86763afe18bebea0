//! `table` layout: an explicit grid with row and column spans.
//!
//! Cells are placed in source order into an occupancy grid: each cell takes
//! the next free slot, skipping slots claimed by earlier row spans, and wraps
//! to a new row after the last column. Span totals are never validated, so
//! inconsistent spans give ragged rows rather than errors.

use serde::Serialize;
use tessera_component::{ComponentId, LayoutKind};

use super::{LayoutContext, LayoutStrategy};
use crate::box_model::Rect;
use crate::error::LayoutError;

/// Grid position of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellPlacement {
    /// First row.
    pub row: usize,
    /// First column.
    pub column: usize,
    /// Rows spanned.
    pub rowspan: usize,
    /// Columns spanned, limited to the free slots left in the row.
    pub colspan: usize,
}

/// Largest column count or span honoured; larger values are clamped.
pub const MAX_SPAN: usize = 1_000;

/// Occupancy bitmap, grown a row at a time.
struct Occupancy {
    columns: usize,
    cells: Vec<bool>,
}

impl Occupancy {
    const fn new(columns: usize) -> Self {
        Self {
            columns,
            cells: Vec::new(),
        }
    }

    fn is_taken(&self, row: usize, column: usize) -> bool {
        self.cells
            .get(row * self.columns + column)
            .copied()
            .unwrap_or(false)
    }

    fn take(&mut self, row: usize, column: usize) {
        let index = row * self.columns + column;
        if index >= self.cells.len() {
            self.cells.resize((row + 1) * self.columns, false);
        }
        self.cells[index] = true;
    }

    /// Free slots in `row` from `column` up to the first taken one.
    fn free_run(&self, row: usize, column: usize) -> usize {
        (column..self.columns)
            .take_while(|&c| !self.is_taken(row, c))
            .count()
    }
}

/// Place cells given as `(rowspan, colspan)` pairs into a grid.
///
/// With no column count every cell goes on the first row. Spans of 0 count
/// as 1. Column counts and column spans are clamped to [`MAX_SPAN`]; a row
/// span never exceeds the number of cells.
#[must_use]
pub fn place_cells(spans: &[(usize, usize)], columns: Option<usize>) -> Vec<CellPlacement> {
    let columns = columns
        .filter(|&c| c > 0)
        .unwrap_or_else(|| {
            spans
                .iter()
                .fold(0_usize, |sum, &(_, colspan)| {
                    sum.saturating_add(colspan.clamp(1, MAX_SPAN))
                })
        })
        .clamp(1, MAX_SPAN);
    let max_rowspan = spans.len().clamp(1, MAX_SPAN);

    let mut grid = Occupancy::new(columns);
    let mut placements = Vec::with_capacity(spans.len());
    let (mut row, mut column) = (0, 0);
    for &(rowspan, colspan) in spans {
        loop {
            if column >= columns {
                row += 1;
                column = 0;
            }
            if !grid.is_taken(row, column) {
                break;
            }
            column += 1;
        }

        let rowspan = rowspan.clamp(1, max_rowspan);
        let colspan = colspan.max(1).min(grid.free_run(row, column));
        for r in row..row + rowspan {
            for c in column..column + colspan {
                grid.take(r, c);
            }
        }
        placements.push(CellPlacement {
            row,
            column,
            rowspan,
            colspan,
        });
        column += colspan;
    }
    placements
}

/// Grow `tracks[start..start + span]` so together they hold `needed`.
///
/// Single-track cells set a lower bound directly; the excess of a spanning
/// cell is spread evenly, earlier tracks taking the remainder.
fn grow_tracks(tracks: &mut [i32], start: usize, span: usize, needed: i32) {
    let range = start..(start + span).min(tracks.len());
    let count = range.len() as i32;
    if count == 0 {
        return;
    }
    let current: i32 = tracks[range.clone()].iter().sum();
    let excess = needed - current;
    if excess <= 0 {
        return;
    }
    let (share, remainder) = (excess / count, excess % count);
    for (i, track) in tracks[range].iter_mut().enumerate() {
        *track += share + i32::from((i as i32) < remainder);
    }
}

/// Grid layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableLayout;

impl LayoutStrategy for TableLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Table
    }

    fn on_layout(
        &mut self,
        cx: &mut LayoutContext<'_>,
        container: ComponentId,
    ) -> Result<(), LayoutError> {
        let config = cx.layout_config(container)?;
        let content = cx.content_box(container, &config);
        let cells = cx.tree.visible_children(container);

        let spans: Vec<(usize, usize)> = cells
            .iter()
            .map(|&id| {
                let item = cx.tree.config(id);
                (item.rowspan.unwrap_or(1), item.colspan.unwrap_or(1))
            })
            .collect();
        let placements = place_cells(&spans, config.columns);

        let mut sized = Vec::with_capacity(cells.len());
        for &id in &cells {
            let margins = cx.margins_of(&config, id);
            sized.push((id, margins, cx.natural_size(id)));
        }

        let columns = placements
            .iter()
            .map(|p| p.column + p.colspan)
            .max()
            .unwrap_or(0);
        let rows = placements
            .iter()
            .map(|p| p.row + p.rowspan)
            .max()
            .unwrap_or(0);
        let mut widths = vec![0; columns];
        let mut heights = vec![0; rows];

        // Single-span cells first so spanning cells only add what is missing.
        for single in [true, false] {
            for (placement, (_, margins, size)) in placements.iter().zip(&sized) {
                if (placement.colspan == 1) == single {
                    grow_tracks(
                        &mut widths,
                        placement.column,
                        placement.colspan,
                        size.width + margins.horizontal(),
                    );
                }
                if (placement.rowspan == 1) == single {
                    grow_tracks(
                        &mut heights,
                        placement.row,
                        placement.rowspan,
                        size.height + margins.vertical(),
                    );
                }
            }
        }

        let placed: Vec<_> = placements
            .iter()
            .zip(&sized)
            .map(|(placement, (id, margins, size))| {
                let x = content.x + widths[..placement.column].iter().sum::<i32>();
                let y = content.y + heights[..placement.row].iter().sum::<i32>();
                (
                    *id,
                    Rect::new(x + margins.left, y + margins.top, size.width, size.height),
                )
            })
            .collect();
        log::trace!("table {container:?}: columns={widths:?} rows={heights:?}");

        let _ = cx.apply(&placed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: usize, column: usize, rowspan: usize, colspan: usize) -> CellPlacement {
        CellPlacement {
            row,
            column,
            rowspan,
            colspan,
        }
    }

    #[test]
    fn test_spans_respect_occupancy() {
        let placements = place_cells(&[(2, 1), (1, 2), (1, 1), (1, 1)], Some(3));
        assert_eq!(
            placements,
            vec![cell(0, 0, 2, 1), cell(0, 1, 1, 2), cell(1, 1, 1, 1), cell(1, 2, 1, 1)]
        );
    }

    #[test]
    fn test_wraps_after_last_column() {
        let placements = place_cells(&[(1, 1); 5], Some(2));
        let positions: Vec<_> = placements.iter().map(|p| (p.row, p.column)).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_no_columns_is_one_row() {
        let placements = place_cells(&[(1, 1), (1, 2), (1, 1)], None);
        let positions: Vec<_> = placements.iter().map(|p| (p.row, p.column)).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (0, 3)]);
    }

    #[test]
    fn test_oversized_colspan_is_ragged() {
        let placements = place_cells(&[(1, 1), (1, 5), (1, 1)], Some(3));
        assert_eq!(
            placements,
            vec![cell(0, 0, 1, 1), cell(0, 1, 1, 2), cell(1, 0, 1, 1)]
        );
    }

    #[test]
    fn test_colspan_stops_at_row_spanned_cell() {
        let placements = place_cells(&[(1, 1), (1, 1), (2, 1), (1, 3)], Some(3));
        assert_eq!(placements[2], cell(0, 2, 2, 1));
        assert_eq!(placements[3], cell(1, 0, 1, 2));
    }

    #[test]
    fn test_huge_spans_are_clamped() {
        let placements = place_cells(&[(usize::MAX, 1)], Some(1));
        assert_eq!(placements, vec![cell(0, 0, 1, 1)]);

        let placements = place_cells(&[(2, usize::MAX), (1, 1), (1, 1)], None);
        assert_eq!(placements[0], cell(0, 0, 2, MAX_SPAN));
        // The clamped row is full and the next one is held by the row span.
        assert_eq!(placements[1], cell(2, 0, 1, 1));

        let placements = place_cells(&[(1, 4)], Some(usize::MAX));
        assert_eq!(placements, vec![cell(0, 0, 1, 4)]);
    }

    #[test]
    fn test_zero_spans_count_as_one() {
        assert_eq!(place_cells(&[(0, 0)], Some(2)), vec![cell(0, 0, 1, 1)]);
    }

    #[test]
    fn test_grow_tracks_spreads_excess() {
        let mut tracks = vec![10, 10, 0];
        grow_tracks(&mut tracks, 0, 3, 25);
        assert_eq!(tracks, vec![12, 12, 1]);
        grow_tracks(&mut tracks, 0, 2, 5);
        assert_eq!(tracks, vec![12, 12, 1]);
    }
}
