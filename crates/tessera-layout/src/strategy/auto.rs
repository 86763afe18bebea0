//! `auto` layout: children keep their own size and stack top to bottom.

use tessera_component::{ComponentId, LayoutKind};

use super::{LayoutContext, LayoutStrategy};
use crate::box_model::Rect;
use crate::error::LayoutError;

/// Pass-through layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoLayout;

impl LayoutStrategy for AutoLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Auto
    }

    fn on_layout(
        &mut self,
        cx: &mut LayoutContext<'_>,
        container: ComponentId,
    ) -> Result<(), LayoutError> {
        let config = cx.layout_config(container)?;
        let content = cx.content_box(container, &config);

        let mut placed = Vec::new();
        let mut y = content.y;
        for child in cx.tree.visible_children(container) {
            let margins = cx.margins_of(&config, child);
            let size = cx.natural_size(child);
            y += margins.top;
            placed.push((
                child,
                Rect::new(content.x + margins.left, y, size.width, size.height),
            ));
            y += size.height + margins.bottom;
        }

        let _ = cx.apply(&placed);
        Ok(())
    }
}
