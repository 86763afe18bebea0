//! Declarative component and layout configuration.
//!
//! A layout description is a tree of [`ItemConfig`] values, typically read
//! from JSON with camelCase keys:
//!
//! ```json
//! {
//!   "layout": { "type": "hbox", "align": "stretch" },
//!   "items": [ { "width": 100 }, { "flex": 1, "minWidth": 50 } ]
//! }
//! ```
//!
//! Enum-valued settings are parsed case-insensitively; unknown values are a
//! deserialization error.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Default resize buffer window when `bufferResize` is `true`.
pub const DEFAULT_BUFFER_WINDOW: Duration = Duration::from_millis(50);

/// Implements serde (de)serialization through the enum's strum string form.
macro_rules! string_enum_serde {
    ($($name:ident),* $(,)?) => {
        $(
            impl TryFrom<String> for $name {
                type Error = strum::ParseError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.trim().parse()
                }
            }
        )*
    };
}

/// The closed set of layout strategies a container can declare.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr,
    Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
pub enum LayoutKind {
    /// Children keep their own size and stack vertically.
    #[default]
    #[strum(serialize = "auto")]
    Auto,
    /// A single child fills the container.
    #[strum(serialize = "fit")]
    Fit,
    /// Exactly one child visible at a time, filling the container.
    #[strum(serialize = "card")]
    Card,
    /// Children sized from anchor expressions relative to the container.
    #[strum(serialize = "anchor")]
    Anchor,
    /// Anchor layout with explicit `x`/`y` child positions.
    #[strum(serialize = "absolute")]
    Absolute,
    /// Anchor layout with a label laid out beside or above each field.
    #[strum(serialize = "form")]
    Form,
    /// Single row of fixed and fractional-width columns.
    #[strum(serialize = "column")]
    Column,
    /// Explicit grid with row and column spans.
    #[strum(serialize = "table")]
    Table,
    /// Five fixed regions around a mandatory center.
    #[strum(serialize = "border")]
    Border,
    /// Horizontal linear box layout.
    #[strum(serialize = "hbox")]
    HBox,
    /// Vertical linear box layout.
    #[strum(serialize = "vbox")]
    VBox,
    /// Vertical stack of panels where only the active one is expanded.
    #[strum(serialize = "accordion")]
    Accordion,
}

/// Main-axis packing of a box layout's children.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr,
    Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Pack {
    /// Packed against the leading edge.
    #[default]
    #[strum(serialize = "start")]
    Start,
    /// Centered in the leftover space.
    #[strum(serialize = "center")]
    Center,
    /// Packed against the trailing edge.
    #[strum(serialize = "end")]
    End,
}

/// Cross-axis alignment of a box layout's children.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr,
    Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Align {
    /// Natural size, against the leading cross edge.
    #[default]
    #[strum(to_string = "start", serialize = "top", serialize = "left")]
    Start,
    /// Natural size, centered on the cross axis.
    #[strum(to_string = "middle", serialize = "center")]
    Middle,
    /// Fill the available cross length.
    #[strum(serialize = "stretch")]
    Stretch,
    /// Fill the largest child's cross length.
    #[strum(serialize = "stretchmax")]
    StretchMax,
}

/// The five border layout slots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
pub enum RegionName {
    /// Top edge, full width.
    #[strum(serialize = "north")]
    North,
    /// Bottom edge, full width.
    #[strum(serialize = "south")]
    South,
    /// Right edge, between north and south.
    #[strum(serialize = "east")]
    East,
    /// Left edge, between north and south.
    #[strum(serialize = "west")]
    West,
    /// Remaining space. Mandatory.
    #[strum(serialize = "center")]
    Center,
}

impl RegionName {
    /// Whether the region spans the container horizontally (its size is a height).
    #[must_use]
    pub const fn is_horizontal_band(self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

/// Position of a form field's label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr,
    Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
pub enum LabelAlign {
    /// Label to the left, text left-aligned.
    #[default]
    #[strum(serialize = "left")]
    Left,
    /// Label to the left, text right-aligned.
    #[strum(serialize = "right")]
    Right,
    /// Label above the field.
    #[strum(serialize = "top")]
    Top,
}

/// Overflow strategy for box layouts whose children do not fit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
pub enum OverflowKind {
    /// Hide trailing children into an overflow menu.
    #[strum(serialize = "menu")]
    Menu,
    /// Clip and scroll the children.
    #[strum(serialize = "scroll")]
    Scroll,
}

string_enum_serde!(LayoutKind, Pack, Align, RegionName, LabelAlign, OverflowKind);

/// A margin or padding value: a single number, or 1-4 space separated numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidesSource {
    /// The same value on every side.
    Number(f64),
    /// CSS shorthand, e.g. `"5 10"`.
    Text(String),
}

impl From<i32> for SidesSource {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for SidesSource {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// The card or accordion child shown first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActiveItem {
    /// Position among the container's children.
    Index(usize),
    /// A child's `itemId`.
    Id(String),
}

/// Resize buffering: `true` for the default window or a window in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BufferResize {
    /// Enable or disable with the default window.
    Enabled(bool),
    /// Enable with an explicit window.
    Millis(u64),
}

impl BufferResize {
    /// The debounce window, or `None` when buffering is disabled.
    #[must_use]
    pub const fn window(self) -> Option<Duration> {
        match self {
            Self::Enabled(true) => Some(DEFAULT_BUFFER_WINDOW),
            Self::Enabled(false) | Self::Millis(0) => None,
            Self::Millis(ms) => Some(Duration::from_millis(ms)),
        }
    }
}

/// Fixed reference size for anchor calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnchorSize {
    /// Reference width only; the height reference is the container's.
    Width(i32),
    /// Reference width and/or height.
    Size {
        /// Reference width.
        #[serde(default)]
        width: Option<i32>,
        /// Reference height.
        #[serde(default)]
        height: Option<i32>,
    },
}

impl AnchorSize {
    /// `(width, height)` references, either of which may be absent.
    #[must_use]
    pub const fn dimensions(self) -> (Option<i32>, Option<i32>) {
        match self {
            Self::Width(width) => (Some(width), None),
            Self::Size { width, height } => (width, height),
        }
    }
}

/// A container's layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Strategy used to arrange the children.
    #[serde(rename = "type")]
    pub kind: LayoutKind,
    /// Box layouts: main-axis packing.
    pub pack: Pack,
    /// Box layouts: cross-axis alignment.
    pub align: Align,
    /// Box layouts: padding inside the container.
    pub padding: Option<SidesSource>,
    /// Box layouts: margins for children that declare none.
    pub default_margins: Option<SidesSource>,
    /// Box layouts: overflow strategy.
    pub overflow_handler: Option<OverflowKind>,
    /// Menu overflow: main-axis length reserved for the menu trigger.
    pub trigger_size: i32,
    /// Scroll overflow: main-axis length of each scroller affordance.
    pub scroller_size: i32,
    /// Table layout: number of columns (unbounded when absent).
    pub columns: Option<usize>,
    /// Anchor layouts: fixed reference size.
    pub anchor_size: Option<AnchorSize>,
    /// Form layout: default label width.
    pub label_width: i32,
    /// Form layout: gap between label and field.
    pub label_pad: i32,
    /// Form layout: label position.
    pub label_align: LabelAlign,
    /// Form layout: height taken by top-aligned labels.
    pub label_height: i32,
    /// Card and accordion layouts: initially active child.
    pub active_item: Option<ActiveItem>,
    /// Accordion layout: height of a collapsed panel.
    pub header_height: i32,
    /// Debounce repeated layout requests.
    pub buffer_resize: Option<BufferResize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            kind: LayoutKind::Auto,
            pack: Pack::Start,
            align: Align::Start,
            padding: None,
            default_margins: None,
            overflow_handler: None,
            trigger_size: 0,
            scroller_size: 20,
            columns: None,
            anchor_size: None,
            label_width: 100,
            label_pad: 5,
            label_align: LabelAlign::Left,
            label_height: 20,
            active_item: None,
            header_height: 26,
            buffer_resize: None,
        }
    }
}

impl LayoutConfig {
    /// A default configuration of the given kind.
    #[must_use]
    pub fn of_kind(kind: LayoutKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

/// Configuration of a single component, leaf or container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemConfig {
    /// Registry key, unique within a tree.
    pub item_id: Option<String>,
    /// Absolute layout: left position.
    pub x: Option<i32>,
    /// Absolute layout: top position.
    pub y: Option<i32>,
    /// Configured width.
    pub width: Option<i32>,
    /// Configured height.
    pub height: Option<i32>,
    /// Lower bound on the computed width.
    pub min_width: Option<i32>,
    /// Lower bound on the computed height.
    pub min_height: Option<i32>,
    /// Upper bound on the computed width.
    pub max_width: Option<i32>,
    /// Upper bound on the computed height.
    pub max_height: Option<i32>,
    /// Content width reported by headless measurement.
    pub intrinsic_width: Option<i32>,
    /// Content height reported by headless measurement.
    pub intrinsic_height: Option<i32>,
    /// Box layouts: relative weight for leftover main-axis space.
    pub flex: Option<f64>,
    /// Outer spacing.
    pub margins: Option<SidesSource>,
    /// Border layout: outer spacing while collapsed.
    pub cmargins: Option<SidesSource>,
    /// Anchor layouts: `"<width> [<height>]"` anchor expression.
    pub anchor: Option<String>,
    /// Column layout: fraction of the remaining width.
    pub column_width: Option<f64>,
    /// Table layout: rows spanned.
    pub rowspan: Option<usize>,
    /// Table layout: columns spanned.
    pub colspan: Option<usize>,
    /// Border layout: slot occupied.
    pub region: Option<RegionName>,
    /// Border layout: resizable through a splitter.
    pub split: bool,
    /// Border layout: splitter thickness.
    pub split_size: Option<i32>,
    /// Border layout: smallest splitter size.
    pub min_size: Option<i32>,
    /// Border layout: largest splitter size.
    pub max_size: Option<i32>,
    /// Border layout: region may be collapsed.
    pub collapsible: bool,
    /// Border layout: region starts collapsed.
    pub collapsed: bool,
    /// Border layout: thickness of the collapsed placeholder.
    pub collapsed_size: Option<i32>,
    /// Form layout: label text.
    pub field_label: Option<String>,
    /// Form layout: per-field label width.
    pub label_width: Option<i32>,
    /// Form layout: suppress the label.
    pub hide_label: bool,
    /// Initially hidden.
    pub hidden: bool,
    /// Container layout; leaves have none.
    pub layout: Option<LayoutConfig>,
    /// Child components.
    pub items: Vec<ItemConfig>,
}

impl ItemConfig {
    /// Whether this component arranges children.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        self.layout.is_some()
    }

    /// Flex weight, treating absent and non-positive values as fixed.
    #[must_use]
    pub fn flex_weight(&self) -> f64 {
        self.flex.filter(|flex| *flex > 0.0).unwrap_or(0.0)
    }
}
