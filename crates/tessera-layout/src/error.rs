//! Layout errors.

use tessera_component::{ComponentId, LayoutKind, RegionName};
use thiserror::Error;

use crate::region::RegionState;

/// Errors raised by the layout coordinator.
///
/// Geometric infeasibility is not an error; see
/// [`BoxMeta::too_narrow`](crate::box_solver::BoxMeta::too_narrow).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A border layout has no visible center region.
    #[error("border layout {container:?} has no center region")]
    MissingCenterRegion {
        /// The border container.
        container: ComponentId,
    },

    /// The id does not belong to the tree.
    #[error("unknown component {0:?}")]
    UnknownComponent(ComponentId),

    /// The component has no layout configuration.
    #[error("component {0:?} is not a container")]
    NotAContainer(ComponentId),

    /// The container's layout does not support the operation.
    #[error("{operation} is not supported by {kind} layouts")]
    UnsupportedOperation {
        /// Operation name.
        operation: &'static str,
        /// The container's layout kind.
        kind: LayoutKind,
    },

    /// The border layout has no component in the region.
    #[error("border layout {container:?} has no {region} region")]
    NoSuchRegion {
        /// The border container.
        container: ComponentId,
        /// Requested region.
        region: RegionName,
    },

    /// The component is not a child of the container.
    #[error("{child:?} is not a child of {container:?}")]
    NotAChild {
        /// The container.
        container: ComponentId,
        /// The offending component.
        child: ComponentId,
    },

    /// The region cannot make the requested transition from its current state.
    #[error("cannot {operation} {region} region while {state:?}")]
    InvalidRegionState {
        /// Region.
        region: RegionName,
        /// Current state.
        state: RegionState,
        /// Operation name.
        operation: &'static str,
    },
}
