//! Layout strategies.
//!
//! Every container declares one [`LayoutKind`]; [`Strategy::for_config`] maps
//! it to the strategy that sizes and positions the container's children. A
//! strategy may keep state between passes (the active card, built anchors,
//! border region states, overflow state), so the coordinator keeps one
//! [`Strategy`] per container.
//!
//! All strategies follow the same shape: read inputs from the tree, compute
//! every child's rectangle, then apply them all at the end of the pass.
//! Rectangles are relative to the container's origin and include its padding.

pub mod accordion;
pub mod anchor;
pub mod auto;
pub mod border;
pub mod boxes;
pub mod card;
pub mod column;
pub mod fit;
pub mod table;

use tessera_component::{ComponentId, ComponentTree, LayoutConfig, LayoutKind};

use crate::box_model::{constrain, BoxRequest, Rect, Sides, Size};
use crate::error::LayoutError;
use crate::host::{LayoutEvent, LayoutHost};
use crate::sides::{parse_sides, parse_sides_or_zero};

pub use accordion::AccordionLayout;
pub use anchor::{AnchorLayout, AnchorMode};
pub use auto::AutoLayout;
pub use border::BorderLayout;
pub use boxes::BoxLayout;
pub use card::CardLayout;
pub use column::ColumnLayout;
pub use fit::FitLayout;
pub use table::{place_cells, CellPlacement, TableLayout};

/// The tree and host a strategy works with during one pass.
pub struct LayoutContext<'a> {
    /// Component arena.
    pub tree: &'a mut ComponentTree,
    /// Rendering layer.
    pub host: &'a mut dyn LayoutHost,
}

impl<'a> LayoutContext<'a> {
    /// Bundle a tree and a host.
    pub fn new(tree: &'a mut ComponentTree, host: &'a mut dyn LayoutHost) -> Self {
        Self { tree, host }
    }

    /// A copy of the container's layout config.
    pub fn layout_config(&self, container: ComponentId) -> Result<LayoutConfig, LayoutError> {
        if !self.tree.contains(container) {
            return Err(LayoutError::UnknownComponent(container));
        }
        self.tree
            .layout_config(container)
            .cloned()
            .ok_or(LayoutError::NotAContainer(container))
    }

    /// The container's target size as reported by the host.
    #[must_use]
    pub fn target_size(&self, container: ComponentId) -> Size {
        self.host.target_size(self.tree, container)
    }

    /// The area inside the container's padding.
    #[must_use]
    pub fn content_box(&self, container: ComponentId, config: &LayoutConfig) -> Rect {
        let target = self.target_size(container);
        let padding = parse_sides_or_zero(config.padding.as_ref());
        Rect::new(
            padding.left,
            padding.top,
            (target.width - padding.horizontal()).max(0),
            (target.height - padding.vertical()).max(0),
        )
    }

    /// Deliver a notification; `false` means vetoed.
    pub fn notify(&mut self, id: ComponentId, event: LayoutEvent) -> bool {
        self.host.notify(self.tree, id, event)
    }

    /// A child's margins: its own, else the layout's default margins.
    #[must_use]
    pub fn margins_of(&self, config: &LayoutConfig, child: ComponentId) -> Sides {
        self.tree
            .config(child)
            .margins
            .as_ref()
            .map_or_else(|| parse_sides_or_zero(config.default_margins.as_ref()), parse_sides)
    }

    /// A child's size when nothing stretches it: configured axes win over the
    /// measured ones, then the result is clamped to its bounds.
    pub fn natural_size(&mut self, child: ComponentId) -> Size {
        let measured = self.host.measure(self.tree, child);
        let config = self.tree.config(child);
        Size::new(
            constrain(
                config.width.unwrap_or(measured.width),
                config.min_width,
                config.max_width,
            ),
            constrain(
                config.height.unwrap_or(measured.height),
                config.min_height,
                config.max_height,
            ),
        )
    }

    /// A box solver request for a child.
    pub fn box_request(&mut self, config: &LayoutConfig, child: ComponentId) -> BoxRequest {
        let natural = self.host.measure(self.tree, child);
        let margins = self.margins_of(config, child);
        let item = self.tree.config(child);
        BoxRequest {
            width: item.width,
            height: item.height,
            natural,
            min_width: item.min_width,
            min_height: item.min_height,
            max_width: item.max_width,
            max_height: item.max_height,
            flex: item.flex_weight(),
            margins,
        }
    }

    /// Apply computed rectangles. Returns how many changed.
    pub fn apply(&mut self, placed: &[(ComponentId, Rect)]) -> usize {
        placed
            .iter()
            .filter(|(id, rect)| self.tree.apply_rect(*id, *rect))
            .count()
    }
}

/// `rect` shrunk by `margins`, never negative.
#[must_use]
pub fn inset(rect: Rect, margins: Sides) -> Rect {
    Rect::new(
        rect.x + margins.left,
        rect.y + margins.top,
        (rect.width - margins.horizontal()).max(0),
        (rect.height - margins.vertical()).max(0),
    )
}

/// Sizes and positions a container's children.
pub trait LayoutStrategy {
    /// The layout kind this strategy implements.
    fn kind(&self) -> LayoutKind;

    /// Lay out the container's children for one pass.
    ///
    /// # Errors
    /// Returns an error for configurations the strategy cannot lay out.
    fn on_layout(
        &mut self,
        cx: &mut LayoutContext<'_>,
        container: ComponentId,
    ) -> Result<(), LayoutError>;
}

/// The closed set of strategies, one per [`LayoutKind`].
#[derive(Debug)]
pub enum Strategy {
    /// `auto`
    Auto(AutoLayout),
    /// `fit`
    Fit(FitLayout),
    /// `card`
    Card(CardLayout),
    /// `anchor`, `absolute`, `form`
    Anchor(AnchorLayout),
    /// `column`
    Column(ColumnLayout),
    /// `table`
    Table(TableLayout),
    /// `border`
    Border(BorderLayout),
    /// `hbox`, `vbox`
    Box(BoxLayout),
    /// `accordion`
    Accordion(AccordionLayout),
}

impl Strategy {
    /// The strategy for a container's layout config.
    #[must_use]
    pub fn for_config(config: &LayoutConfig) -> Self {
        match config.kind {
            LayoutKind::Auto => Self::Auto(AutoLayout),
            LayoutKind::Fit => Self::Fit(FitLayout),
            LayoutKind::Card => Self::Card(CardLayout::default()),
            LayoutKind::Anchor => Self::Anchor(AnchorLayout::new(AnchorMode::Anchor)),
            LayoutKind::Absolute => Self::Anchor(AnchorLayout::new(AnchorMode::Absolute)),
            LayoutKind::Form => Self::Anchor(AnchorLayout::new(AnchorMode::Form)),
            LayoutKind::Column => Self::Column(ColumnLayout),
            LayoutKind::Table => Self::Table(TableLayout),
            LayoutKind::Border => Self::Border(BorderLayout::default()),
            LayoutKind::HBox | LayoutKind::VBox => Self::Box(BoxLayout::new(config)),
            LayoutKind::Accordion => Self::Accordion(AccordionLayout::default()),
        }
    }

    fn as_strategy(&mut self) -> &mut dyn LayoutStrategy {
        match self {
            Self::Auto(s) => s,
            Self::Fit(s) => s,
            Self::Card(s) => s,
            Self::Anchor(s) => s,
            Self::Column(s) => s,
            Self::Table(s) => s,
            Self::Border(s) => s,
            Self::Box(s) => s,
            Self::Accordion(s) => s,
        }
    }
}

impl LayoutStrategy for Strategy {
    fn kind(&self) -> LayoutKind {
        match self {
            Self::Auto(s) => s.kind(),
            Self::Fit(s) => s.kind(),
            Self::Card(s) => s.kind(),
            Self::Anchor(s) => s.kind(),
            Self::Column(s) => s.kind(),
            Self::Table(s) => s.kind(),
            Self::Border(s) => s.kind(),
            Self::Box(s) => s.kind(),
            Self::Accordion(s) => s.kind(),
        }
    }

    fn on_layout(
        &mut self,
        cx: &mut LayoutContext<'_>,
        container: ComponentId,
    ) -> Result<(), LayoutError> {
        log::debug!("{} layout of {container:?}", self.kind());
        self.as_strategy().on_layout(cx, container)
    }
}
