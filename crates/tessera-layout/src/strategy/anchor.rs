//! `anchor`, `absolute` and `form` layouts.
//!
//! Children are sized from their anchor expressions relative to the
//! container's content box. Anchor layouts stack children top to bottom,
//! absolute layouts place them at their configured `x`/`y`, and form layouts
//! stack them with a field label beside or above each one.
//!
//! Anchors are built the first time a child is laid out, against the
//! reference size in effect then: the layout's `anchorSize` when configured,
//! otherwise the container's content size once it has been sized.

use std::collections::HashMap;

use tessera_component::{
    ComponentId, ItemConfig, LabelAlign, LayoutConfig, LayoutKind, Rect,
};

use super::{LayoutContext, LayoutStrategy};
use crate::anchor::{build_anchor, Anchor, AnchorSpec};
use crate::box_model::constrain;
use crate::error::LayoutError;

/// Which anchor layout variant is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMode {
    /// Stacked, anchored children.
    Anchor,
    /// Anchored children at explicit positions.
    Absolute,
    /// Stacked, anchored fields with labels.
    Form,
}

/// Built anchors for one child.
#[derive(Debug, Clone, Default, PartialEq)]
struct ChildAnchors {
    width: Option<Anchor>,
    height: Option<Anchor>,
}

impl ChildAnchors {
    fn build(config: &ItemConfig, reference: (Option<i32>, Option<i32>)) -> Self {
        let Some(expression) = config.anchor.as_deref() else {
            return Self::default();
        };
        let spec = AnchorSpec::parse(expression);
        Self {
            width: spec
                .width
                .and_then(|token| build_anchor(token, config.width, reference.0)),
            height: spec
                .height
                .and_then(|token| build_anchor(token, config.height, reference.1)),
        }
    }
}

/// Space a form label takes from its field.
#[derive(Debug, Clone, Copy, Default)]
struct LabelAllowance {
    /// Taken from the left of the field.
    width: i32,
    /// Taken from above the field.
    height: i32,
    /// Label geometry relative to the field's outer origin.
    rect: Option<Rect>,
}

/// Anchor layout family.
#[derive(Debug, Clone)]
pub struct AnchorLayout {
    mode: AnchorMode,
    observed: Option<(i32, i32)>,
    anchors: HashMap<ComponentId, ChildAnchors>,
}

impl AnchorLayout {
    /// A layout with no anchors built yet.
    #[must_use]
    pub fn new(mode: AnchorMode) -> Self {
        Self {
            mode,
            observed: None,
            anchors: HashMap::new(),
        }
    }

    /// The layout variant.
    #[must_use]
    pub const fn mode(&self) -> AnchorMode {
        self.mode
    }

    /// The built width and height anchors of a child, if laid out before.
    #[must_use]
    pub fn anchors_of(&self, child: ComponentId) -> Option<(Option<&Anchor>, Option<&Anchor>)> {
        self.anchors
            .get(&child)
            .map(|anchors| (anchors.width.as_ref(), anchors.height.as_ref()))
    }

    fn reference(&self, config: &LayoutConfig) -> (Option<i32>, Option<i32>) {
        let (observed_width, observed_height) = self.observed.unzip();
        let (width, height) = config
            .anchor_size
            .map_or((None, None), |size| size.dimensions());
        (width.or(observed_width), height.or(observed_height))
    }

    fn label(&self, item: &ItemConfig, config: &LayoutConfig, field_width: i32) -> LabelAllowance {
        if self.mode != AnchorMode::Form || item.hide_label {
            return LabelAllowance::default();
        }
        let label_width = item.label_width.unwrap_or(config.label_width).max(0);
        match config.label_align {
            LabelAlign::Left | LabelAlign::Right => LabelAllowance {
                width: label_width + config.label_pad.max(0),
                height: 0,
                rect: Some(Rect::new(0, 0, label_width, config.label_height)),
            },
            LabelAlign::Top => LabelAllowance {
                width: 0,
                height: config.label_height,
                rect: Some(Rect::new(0, 0, field_width, config.label_height)),
            },
        }
    }

    fn pass(
        &mut self,
        cx: &mut LayoutContext<'_>,
        container: ComponentId,
        config: &LayoutConfig,
    ) {
        let content = cx.content_box(container, config);
        if self.observed.is_none() && cx.tree.state(container).sized {
            self.observed = Some((content.width, content.height));
            // Anchors built while unsized had no reference; rebuild them.
            self.anchors.clear();
        }
        let reference = self.reference(config);

        let children = cx.tree.visible_children(container);
        self.anchors
            .retain(|id, _| cx.tree.parent(*id) == Some(container));

        // Every rectangle is computed before any is applied.
        let mut placed = Vec::with_capacity(children.len());
        let mut y = content.y;
        for child in children {
            let margins = cx.margins_of(config, child);
            let natural = cx.natural_size(child);
            let item = cx.tree.config(child);
            let anchors = self
                .anchors
                .entry(child)
                .or_insert_with(|| ChildAnchors::build(item, reference));
            let width_anchor = anchors
                .width
                .as_mut()
                .map(|anchor| anchor.evaluate(content.width));
            let height_anchor = anchors
                .height
                .as_mut()
                .map(|anchor| anchor.evaluate(content.height));

            let provisional = self.label(item, config, 0);
            let width = width_anchor.map_or(natural.width, |w| {
                constrain(
                    w - margins.horizontal() - provisional.width,
                    item.min_width,
                    item.max_width,
                )
            });
            let height = height_anchor.map_or(natural.height, |h| {
                constrain(
                    h - margins.vertical() - provisional.height,
                    item.min_height,
                    item.max_height,
                )
            });
            let (width, height) = (width.max(0), height.max(0));
            let label = self.label(item, config, width);

            let (x, top) = match self.mode {
                AnchorMode::Absolute => (
                    content.x + item.x.unwrap_or(0) + margins.left,
                    content.y + item.y.unwrap_or(0) + margins.top,
                ),
                AnchorMode::Anchor | AnchorMode::Form => {
                    (content.x + margins.left, y + margins.top)
                }
            };
            let field = Rect::new(x + label.width, top + label.height, width, height);
            let label_rect = label.rect.map(|r| Rect::new(x + r.x, top + r.y, r.width, r.height));
            if self.mode != AnchorMode::Absolute {
                y = field.bottom() + margins.bottom;
            }
            placed.push((child, field, label_rect));
        }

        for (child, field, label_rect) in placed {
            let _ = cx.tree.apply_rect(child, field);
            cx.tree.state_mut(child).label_rect = label_rect;
        }
    }
}

impl LayoutStrategy for AnchorLayout {
    fn kind(&self) -> LayoutKind {
        match self.mode {
            AnchorMode::Anchor => LayoutKind::Anchor,
            AnchorMode::Absolute => LayoutKind::Absolute,
            AnchorMode::Form => LayoutKind::Form,
        }
    }

    fn on_layout(
        &mut self,
        cx: &mut LayoutContext<'_>,
        container: ComponentId,
    ) -> Result<(), LayoutError> {
        let config = cx.layout_config(container)?;
        let before = cx.target_size(container);
        self.pass(cx, container, &config);

        let after = cx.target_size(container);
        if after != before {
            log::debug!("{container:?} target changed {before:?} -> {after:?}; laying out again");
            self.pass(cx, container, &config);
        }
        Ok(())
    }
}
