//! `column` layout: one row of fixed and fractional-width columns.
//!
//! Two passes over the children. The first subtracts every fixed or
//! auto-width column (and its margins) from the content width; the second
//! gives each `columnWidth` child `floor(fraction * remainder)` minus its own
//! margins.

use tessera_component::{ComponentId, LayoutConfig, LayoutKind};

use super::{LayoutContext, LayoutStrategy};
use crate::box_model::{Rect, Sides, Size};
use crate::error::LayoutError;

/// Single-row column layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnLayout;

struct Column {
    id: ComponentId,
    margins: Sides,
    natural: Size,
    fraction: Option<f64>,
}

impl ColumnLayout {
    fn pass(cx: &mut LayoutContext<'_>, container: ComponentId, config: &LayoutConfig) {
        let content = cx.content_box(container, config);
        let columns: Vec<Column> = cx
            .tree
            .visible_children(container)
            .into_iter()
            .map(|id| Column {
                id,
                margins: cx.margins_of(config, id),
                natural: cx.natural_size(id),
                fraction: cx.tree.config(id).column_width.filter(|f| *f > 0.0),
            })
            .collect();

        // Pass 1: fixed and auto widths.
        let fixed: i32 = columns
            .iter()
            .filter(|column| column.fraction.is_none())
            .map(|column| column.natural.width + column.margins.horizontal())
            .sum();
        let remainder = (content.width - fixed).max(0);

        // Pass 2: fractions of what is left.
        let mut placed = Vec::with_capacity(columns.len());
        let mut x = content.x;
        for column in &columns {
            let width = column.fraction.map_or(column.natural.width, |fraction| {
                ((f64::from(remainder) * fraction).floor() as i32 - column.margins.horizontal())
                    .max(0)
            });
            x += column.margins.left;
            placed.push((
                column.id,
                Rect::new(
                    x,
                    content.y + column.margins.top,
                    width,
                    column.natural.height,
                ),
            ));
            x += width + column.margins.right;
        }
        log::trace!("column {container:?}: fixed={fixed} remainder={remainder}");

        let _ = cx.apply(&placed);
    }
}

impl LayoutStrategy for ColumnLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Column
    }

    fn on_layout(
        &mut self,
        cx: &mut LayoutContext<'_>,
        container: ComponentId,
    ) -> Result<(), LayoutError> {
        let config = cx.layout_config(container)?;
        let before = cx.target_size(container);
        Self::pass(cx, container, &config);

        let after = cx.target_size(container);
        if after != before {
            log::debug!("{container:?} target changed {before:?} -> {after:?}; laying out again");
            Self::pass(cx, container, &config);
        }
        Ok(())
    }
}
