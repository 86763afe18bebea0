//! `hbox` and `vbox` layouts, with optional overflow handling.

use tessera_component::{ComponentId, LayoutConfig, LayoutKind};

use super::{LayoutContext, LayoutStrategy};
use crate::box_model::{BoxRequest, Orientation, Size};
use crate::box_solver::BoxParams;
use crate::error::LayoutError;
use crate::host::LayoutEvent;
use crate::overflow::{handler_for, LayoutRun, OverflowHandler, Reserved};
use crate::sides::parse_sides_or_zero;

/// Linear box layout along one axis.
#[derive(Debug)]
pub struct BoxLayout {
    orientation: Orientation,
    overflow: Option<Box<dyn OverflowHandler>>,
}

impl BoxLayout {
    /// A box layout for an `hbox` or `vbox` config.
    #[must_use]
    pub fn new(config: &LayoutConfig) -> Self {
        let orientation = if config.kind == LayoutKind::VBox {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        Self {
            orientation,
            overflow: config
                .overflow_handler
                .map(|kind| handler_for(kind, config)),
        }
    }

    /// Main axis.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The overflow handler, when configured.
    #[must_use]
    pub fn overflow(&self) -> Option<&dyn OverflowHandler> {
        self.overflow.as_deref()
    }

    pub(crate) fn overflow_mut(&mut self) -> Option<&mut (dyn OverflowHandler + 'static)> {
        self.overflow.as_deref_mut()
    }
}

fn build_run(
    cx: &mut LayoutContext<'_>,
    container: ComponentId,
    config: &LayoutConfig,
    orientation: Orientation,
    available: Size,
) -> LayoutRun {
    let items = cx.tree.visible_children(container);
    let requests: Vec<BoxRequest> = items
        .iter()
        .map(|&child| cx.box_request(config, child))
        .collect();
    let params = BoxParams {
        orientation,
        available,
        pack: config.pack,
        align: config.align,
        padding: parse_sides_or_zero(config.padding.as_ref()),
    };
    LayoutRun::solve(container, items, requests, params)
}

impl LayoutStrategy for BoxLayout {
    fn kind(&self) -> LayoutKind {
        match self.orientation {
            Orientation::Horizontal => LayoutKind::HBox,
            Orientation::Vertical => LayoutKind::VBox,
        }
    }

    fn on_layout(
        &mut self,
        cx: &mut LayoutContext<'_>,
        container: ComponentId,
    ) -> Result<(), LayoutError> {
        let config = cx.layout_config(container)?;
        let o = self.orientation;
        let target = cx.target_size(container);
        let mut run = build_run(cx, container, &config, o, target);
        let mut shift = 0;

        if let Some(handler) = self.overflow.as_deref_mut() {
            let was_overflowing = handler.is_overflowing();
            handler.retain_children(cx.tree.children(container));
            let outcome = if run.is_too_narrow() {
                handler.handle_overflow(&run)
            } else {
                handler.clear_overflow(&run)
            };
            for &id in &outcome.hide {
                cx.tree.set_hidden(id, true);
            }
            for &id in &outcome.show {
                cx.tree.set_hidden(id, false);
            }

            // One re-solve at most.
            let reserved = handler.reserved();
            if outcome.recalculate || outcome.target_size.is_some() || reserved != Reserved::NONE {
                let available = outcome.target_size.unwrap_or(target);
                let available = o.size(
                    (o.main(available) - reserved.total()).max(0),
                    o.cross(available),
                );
                run = build_run(cx, container, &config, o, available);
            }
            shift = reserved.leading - handler.scroll_offset();

            let overflowing = handler.is_overflowing();
            if overflowing != was_overflowing {
                let _ = cx.notify(container, LayoutEvent::OverflowChange { overflowing });
            }
        }

        let placed: Vec<_> = run
            .items
            .iter()
            .zip(&run.solution.results)
            .map(|(&id, result)| {
                let mut rect = result.rect();
                match o {
                    Orientation::Horizontal => rect.x += shift,
                    Orientation::Vertical => rect.y += shift,
                }
                (id, rect)
            })
            .collect();
        let _ = cx.apply(&placed);
        Ok(())
    }
}
