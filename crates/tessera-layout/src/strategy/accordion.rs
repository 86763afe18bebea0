//! `accordion` layout: a vertical stack of panels with one expanded.
//!
//! Collapsed panels shrink to their header; the active panel takes the rest
//! of the height. The stack is solved as a vbox with the active panel flexed.

use tessera_component::{Align, ComponentId, LayoutKind};

use super::card::resolve_item;
use super::{LayoutContext, LayoutStrategy};
use crate::box_model::{BoxRequest, Orientation, Size};
use crate::box_solver::{solve, BoxParams};
use crate::error::LayoutError;
use crate::sides::parse_sides_or_zero;

/// Panels with a single expanded one.
#[derive(Debug, Clone, Default)]
pub struct AccordionLayout {
    active: Option<ComponentId>,
}

impl AccordionLayout {
    /// The expanded panel.
    #[must_use]
    pub const fn active(&self) -> Option<ComponentId> {
        self.active
    }

    pub(crate) fn set_active(&mut self, id: ComponentId) {
        self.active = Some(id);
    }
}

impl LayoutStrategy for AccordionLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Accordion
    }

    fn on_layout(
        &mut self,
        cx: &mut LayoutContext<'_>,
        container: ComponentId,
    ) -> Result<(), LayoutError> {
        let config = cx.layout_config(container)?;
        let panels = cx.tree.visible_children(container);
        let active = self
            .active
            .filter(|id| panels.contains(id))
            .or_else(|| resolve_item(cx.tree, container, config.active_item.as_ref()))
            .or_else(|| panels.first().copied());
        self.active = active;

        let header = config.header_height.max(0);
        let requests: Vec<BoxRequest> = panels
            .iter()
            .map(|&panel| {
                let mut request = cx.box_request(&config, panel);
                if Some(panel) == active {
                    request.height = None;
                    request.natural.height = 0;
                    request.flex = 1.0;
                } else {
                    request.height = Some(header);
                    request.min_height = None;
                    request.max_height = None;
                    request.flex = 0.0;
                }
                request
            })
            .collect();

        let params = BoxParams {
            orientation: Orientation::Vertical,
            available: cx.target_size(container),
            align: Align::Stretch,
            padding: parse_sides_or_zero(config.padding.as_ref()),
            ..BoxParams::default()
        };
        let solution = solve(&requests, &params);
        log::trace!(
            "accordion {container:?}: active={active:?} header={header} {:?}",
            Size::new(params.inner_cross(), params.inner_main())
        );

        let placed: Vec<_> = panels
            .iter()
            .zip(&solution.results)
            .map(|(&panel, result)| (panel, result.rect()))
            .collect();
        let _ = cx.apply(&placed);
        Ok(())
    }
}
