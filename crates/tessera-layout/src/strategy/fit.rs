//! `fit` layout: the first visible child fills the container.

use tessera_component::{ComponentId, LayoutConfig, LayoutKind};

use super::{inset, LayoutContext, LayoutStrategy};
use crate::error::LayoutError;

/// Single child, full size.
#[derive(Debug, Clone, Copy, Default)]
pub struct FitLayout;

impl LayoutStrategy for FitLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Fit
    }

    fn on_layout(
        &mut self,
        cx: &mut LayoutContext<'_>,
        container: ComponentId,
    ) -> Result<(), LayoutError> {
        let config = cx.layout_config(container)?;
        let Some(child) = cx.tree.visible_children(container).first().copied() else {
            return Ok(());
        };
        fit_child(cx, &config, container, child);
        Ok(())
    }
}

/// Size `child` to the container's content box minus its margins.
pub(crate) fn fit_child(
    cx: &mut LayoutContext<'_>,
    config: &LayoutConfig,
    container: ComponentId,
    child: ComponentId,
) {
    let content = cx.content_box(container, config);
    let rect = inset(content, cx.margins_of(config, child));
    let _ = cx.apply(&[(child, rect)]);
}
