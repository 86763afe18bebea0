//! Headless container layout engine for Tessera component trees.
//!
//! # Scope
//!
//! Given a [`ComponentTree`](tessera_component::ComponentTree) whose
//! containers declare a layout, this crate computes the size and position of
//! every child and writes it back into the tree:
//!
//! - **Linear box solver** for `hbox`/`vbox`: flex distribution, min/max
//!   clamping, shortfall shrinking, pack and align
//! - **Anchor solver** for `anchor`, `absolute` and `form` layouts
//! - **Border regions** with collapse, expand, floating overlays and splitters
//! - **Table placement** with row and column spans
//! - `auto`, `fit`, `card`, `column` and `accordion` layouts
//! - **Overflow handling** for box layouts (menu or scroll)
//! - **Resize buffering** driven by a caller-supplied clock
//!
//! The rendering layer is reached only through [`LayoutHost`]: it measures
//! components, reports container sizes, renders elements and receives
//! [`LayoutEvent`] notifications.
//!
//! # Not Yet Implemented
//!
//! - Animation easing (transitions complete when the host says so)
//! - Measuring containers from their content; hosts report container sizes

/// Anchor expressions.
pub mod anchor;
/// Box request and result types.
pub mod box_model;
/// Linear box solver.
pub mod box_solver;
/// Debounced layout requests.
pub mod buffer;
/// Layout passes and per-container state.
pub mod coordinator;
/// Layout errors.
pub mod error;
/// Rendering layer callbacks.
pub mod host;
/// Box layout overflow handlers.
pub mod overflow;
/// Border region state machine.
pub mod region;
/// Margin and padding shorthand.
pub mod sides;
/// Layout strategies.
pub mod strategy;

// Re-exports for convenience
pub use anchor::{build_anchor, Anchor, AnchorFormula, AnchorSpec};
pub use box_model::{constrain, BoxRequest, BoxResult, Orientation, Rect, Sides, Size};
pub use box_solver::{solve, BoxMeta, BoxParams, BoxSolution};
pub use buffer::ResizeBuffer;
pub use coordinator::Coordinator;
pub use error::LayoutError;
pub use host::{measure_from_config, DefaultHost, LayoutEvent, LayoutHost, RecordingHost};
pub use overflow::{LayoutRun, MenuOverflow, OverflowHandler, OverflowOutcome, Reserved, ScrollOverflow};
pub use region::{Region, RegionState, SplitBounds, Transition};
pub use sides::{parse_sides, parse_sides_or_zero, parse_sides_str};
pub use strategy::border::TransitionStep;
pub use strategy::{place_cells, CellPlacement, LayoutContext, LayoutStrategy, Strategy};
