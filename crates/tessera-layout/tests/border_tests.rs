//! Border layout tests: region carving, collapse and expand, floating
//! overlays and splitter drags.

use tessera_component::{ComponentId, ComponentTree, ItemConfig, LayoutConfig, LayoutKind, RegionName};
use tessera_layout::{
    Coordinator, DefaultHost, LayoutError, LayoutEvent, RecordingHost, Rect, RegionState, Size,
    Transition, TransitionStep,
};

/// Helper: a region child.
fn region(item_id: &str, name: RegionName) -> ItemConfig {
    ItemConfig {
        item_id: Some(item_id.to_string()),
        region: Some(name),
        ..ItemConfig::default()
    }
}

/// Helper: a border container.
fn border(items: Vec<ItemConfig>) -> ItemConfig {
    ItemConfig {
        layout: Some(LayoutConfig::of_kind(LayoutKind::Border)),
        items,
        ..ItemConfig::default()
    }
}

/// Helper: a 100px collapsible west region beside a center.
fn west_and_center() -> ItemConfig {
    let mut west = region("west", RegionName::West);
    west.width = Some(100);
    west.collapsible = true;
    border(vec![west, region("center", RegionName::Center)])
}

struct Fixture {
    tree: ComponentTree,
    coordinator: Coordinator,
    host: RecordingHost,
}

impl Fixture {
    fn new(config: ItemConfig, width: i32, height: i32) -> Self {
        let mut tree = ComponentTree::from_config(config);
        let mut coordinator = Coordinator::new();
        let mut host = RecordingHost::new();
        let root = tree.root();
        coordinator
            .layout_root(&mut tree, &mut host, root, Size::new(width, height))
            .unwrap();
        host.clear();
        Self {
            tree,
            coordinator,
            host,
        }
    }

    fn id(&self, item_id: &str) -> ComponentId {
        self.tree.lookup(item_id).unwrap()
    }

    fn rect(&self, item_id: &str) -> Rect {
        self.tree.state(self.id(item_id)).rect
    }

    fn collapse(&mut self, name: RegionName, animate: bool) -> Result<TransitionStep, LayoutError> {
        let root = self.tree.root();
        self.coordinator
            .collapse(&mut self.tree, &mut self.host, root, name, animate)
    }

    fn expand(&mut self, name: RegionName, animate: bool) -> Result<TransitionStep, LayoutError> {
        let root = self.tree.root();
        self.coordinator
            .expand(&mut self.tree, &mut self.host, root, name, animate)
    }

    fn state(&self, name: RegionName) -> Option<RegionState> {
        self.coordinator.region_state(self.tree.root(), name)
    }
}

// ---------------------------------------------------------------------------
// Carving
// ---------------------------------------------------------------------------

#[test]
fn test_center_gets_remaining_height() {
    let mut north = region("north", RegionName::North);
    north.height = Some(50);
    let mut south = region("south", RegionName::South);
    south.height = Some(30);
    let fx = Fixture::new(
        border(vec![north, south, region("center", RegionName::Center)]),
        200,
        300,
    );

    assert_eq!(fx.rect("north"), Rect::new(0, 0, 200, 50));
    assert_eq!(fx.rect("south"), Rect::new(0, 270, 200, 30));
    assert_eq!(fx.rect("center"), Rect::new(0, 50, 200, 220));
}

#[test]
fn test_all_edges() {
    let mut north = region("north", RegionName::North);
    north.height = Some(20);
    let mut south = region("south", RegionName::South);
    south.height = Some(20);
    let mut east = region("east", RegionName::East);
    east.width = Some(50);
    let mut west = region("west", RegionName::West);
    west.width = Some(60);
    let fx = Fixture::new(
        border(vec![
            region("center", RegionName::Center),
            east,
            west,
            south,
            north,
        ]),
        400,
        200,
    );

    assert_eq!(fx.rect("north"), Rect::new(0, 0, 400, 20));
    assert_eq!(fx.rect("south"), Rect::new(0, 180, 400, 20));
    assert_eq!(fx.rect("west"), Rect::new(0, 20, 60, 160));
    assert_eq!(fx.rect("east"), Rect::new(350, 20, 50, 160));
    assert_eq!(fx.rect("center"), Rect::new(60, 20, 290, 160));
}

#[test]
fn test_missing_center_is_an_error() {
    let mut north = region("north", RegionName::North);
    north.height = Some(20);
    let mut tree = ComponentTree::from_config(border(vec![north]));
    let root = tree.root();
    let err = Coordinator::new()
        .layout_root(&mut tree, &mut DefaultHost, root, Size::new(100, 100))
        .unwrap_err();
    assert_eq!(err, LayoutError::MissingCenterRegion { container: root });
}

#[test]
fn test_initially_collapsed_region() {
    let mut west = region("west", RegionName::West);
    west.width = Some(100);
    west.collapsed = true;
    let fx = Fixture::new(border(vec![west, region("center", RegionName::Center)]), 400, 300);

    assert_eq!(fx.state(RegionName::West), Some(RegionState::Collapsed));
    assert!(!fx.tree.is_visible(fx.id("west")));
    assert_eq!(fx.rect("center"), Rect::new(35, 0, 365, 300));
}

// ---------------------------------------------------------------------------
// Collapse and expand
// ---------------------------------------------------------------------------

#[test]
fn test_collapse_and_expand() {
    let mut fx = Fixture::new(west_and_center(), 400, 300);
    assert_eq!(fx.rect("center"), Rect::new(100, 0, 300, 300));

    assert_eq!(fx.collapse(RegionName::West, false), Ok(TransitionStep::Applied));
    assert_eq!(fx.state(RegionName::West), Some(RegionState::Collapsed));
    assert!(!fx.tree.is_visible(fx.id("west")));

    let root = fx.tree.root();
    let placeholder = fx
        .coordinator
        .border(root)
        .and_then(|b| b.region(RegionName::West))
        .and_then(|r| r.placeholder);
    assert_eq!(placeholder, Some(Rect::new(5, 0, 25, 300)));
    assert_eq!(fx.rect("center"), Rect::new(35, 0, 365, 300));
    assert_eq!(
        fx.host.events_for(fx.id("west")),
        vec![
            LayoutEvent::BeforeCollapse(RegionName::West),
            LayoutEvent::Collapse(RegionName::West),
        ]
    );

    fx.host.clear();
    assert_eq!(fx.expand(RegionName::West, false), Ok(TransitionStep::Applied));
    assert_eq!(fx.state(RegionName::West), Some(RegionState::Expanded));
    assert_eq!(fx.rect("west"), Rect::new(0, 0, 100, 300));
    assert_eq!(fx.rect("center"), Rect::new(100, 0, 300, 300));
    assert_eq!(
        fx.host.events_for(fx.id("west")),
        vec![
            LayoutEvent::BeforeExpand(RegionName::West),
            LayoutEvent::Expand(RegionName::West),
        ]
    );
}

#[test]
fn test_collapse_veto() {
    let mut fx = Fixture::new(west_and_center(), 400, 300);
    fx.host
        .veto(None, LayoutEvent::BeforeCollapse(RegionName::West));

    assert_eq!(fx.collapse(RegionName::West, false), Ok(TransitionStep::Vetoed));
    assert_eq!(fx.state(RegionName::West), Some(RegionState::Expanded));
    assert_eq!(fx.rect("center"), Rect::new(100, 0, 300, 300));
}

#[test]
fn test_invalid_transitions() {
    let mut fx = Fixture::new(west_and_center(), 400, 300);

    assert!(matches!(
        fx.expand(RegionName::West, false),
        Err(LayoutError::InvalidRegionState {
            region: RegionName::West,
            state: RegionState::Expanded,
            ..
        })
    ));
    assert!(matches!(
        fx.collapse(RegionName::Center, false),
        Err(LayoutError::InvalidRegionState {
            region: RegionName::Center,
            ..
        })
    ));
    assert_eq!(
        fx.collapse(RegionName::East, false),
        Err(LayoutError::NoSuchRegion {
            container: fx.tree.root(),
            region: RegionName::East,
        })
    );
}

#[test]
fn test_collapse_requires_collapsible() {
    let mut west = region("west", RegionName::West);
    west.width = Some(100);
    let mut fx = Fixture::new(border(vec![west, region("center", RegionName::Center)]), 400, 300);

    assert_eq!(
        fx.collapse(RegionName::West, false),
        Err(LayoutError::InvalidRegionState {
            region: RegionName::West,
            state: RegionState::Expanded,
            operation: "collapse",
        })
    );
    assert!(fx.host.events.is_empty());
    assert_eq!(fx.state(RegionName::West), Some(RegionState::Expanded));
    assert_eq!(fx.rect("center"), Rect::new(100, 0, 300, 300));
}

#[test]
fn test_animated_collapse() {
    let mut fx = Fixture::new(west_and_center(), 400, 300);

    assert_eq!(fx.collapse(RegionName::West, true), Ok(TransitionStep::Pending));
    assert_eq!(fx.state(RegionName::West), Some(RegionState::Expanded));
    assert_eq!(fx.rect("center"), Rect::new(100, 0, 300, 300));

    // A second request while the animation runs is rejected.
    assert!(fx.collapse(RegionName::West, true).is_err());

    let root = fx.tree.root();
    let finished = fx
        .coordinator
        .complete_animation(&mut fx.tree, &mut fx.host, root, RegionName::West)
        .unwrap();
    assert_eq!(finished, Some(Transition::Collapse));
    assert_eq!(fx.state(RegionName::West), Some(RegionState::Collapsed));
    assert_eq!(fx.rect("center"), Rect::new(35, 0, 365, 300));

    let again = fx
        .coordinator
        .complete_animation(&mut fx.tree, &mut fx.host, root, RegionName::West)
        .unwrap();
    assert_eq!(again, None);
}

#[test]
fn test_destroy_cancels_animation() {
    let mut fx = Fixture::new(west_and_center(), 400, 300);
    assert_eq!(fx.collapse(RegionName::West, true), Ok(TransitionStep::Pending));

    let root = fx.tree.root();
    fx.coordinator.destroy(&fx.tree, root);
    assert_eq!(fx.state(RegionName::West), None);
    assert!(fx.coordinator.strategy(root).is_none());
}

// ---------------------------------------------------------------------------
// Floating
// ---------------------------------------------------------------------------

#[test]
fn test_slide_out_and_outside_click() {
    let mut fx = Fixture::new(west_and_center(), 400, 300);
    assert_eq!(fx.collapse(RegionName::West, false), Ok(TransitionStep::Applied));

    let root = fx.tree.root();
    fx.coordinator
        .slide_out(&mut fx.tree, &mut fx.host, root, RegionName::West)
        .unwrap();
    assert_eq!(fx.state(RegionName::West), Some(RegionState::Floating));
    assert!(fx.tree.is_visible(fx.id("west")));
    assert_eq!(fx.rect("west"), Rect::new(30, 0, 100, 300));
    // The overlay does not push the center.
    assert_eq!(fx.rect("center"), Rect::new(35, 0, 365, 300));

    let closed = fx
        .coordinator
        .outside_click(&mut fx.tree, &mut fx.host, root)
        .unwrap();
    assert_eq!(closed, vec![RegionName::West]);
    assert_eq!(fx.state(RegionName::West), Some(RegionState::Collapsed));
    assert!(!fx.tree.is_visible(fx.id("west")));

    let closed = fx
        .coordinator
        .outside_click(&mut fx.tree, &mut fx.host, root)
        .unwrap();
    assert!(closed.is_empty());
}

#[test]
fn test_expand_from_floating() {
    let mut fx = Fixture::new(west_and_center(), 400, 300);
    assert_eq!(fx.collapse(RegionName::West, false), Ok(TransitionStep::Applied));
    let root = fx.tree.root();
    fx.coordinator
        .slide_out(&mut fx.tree, &mut fx.host, root, RegionName::West)
        .unwrap();

    assert_eq!(fx.expand(RegionName::West, false), Ok(TransitionStep::Applied));
    assert_eq!(fx.rect("center"), Rect::new(100, 0, 300, 300));
}

#[test]
fn test_slide_out_requires_collapsed() {
    let mut fx = Fixture::new(west_and_center(), 400, 300);
    let root = fx.tree.root();
    let err = fx
        .coordinator
        .slide_out(&mut fx.tree, &mut fx.host, root, RegionName::West)
        .unwrap_err();
    assert!(matches!(err, LayoutError::InvalidRegionState { .. }));
}

// ---------------------------------------------------------------------------
// Splitters
// ---------------------------------------------------------------------------

#[test]
fn test_split_move_keeps_center_minimum() {
    let mut west = region("west", RegionName::West);
    west.width = Some(100);
    west.split = true;
    let mut fx = Fixture::new(border(vec![west, region("center", RegionName::Center)]), 400, 300);

    assert_eq!(fx.rect("west"), Rect::new(0, 0, 100, 300));
    assert_eq!(fx.rect("center"), Rect::new(105, 0, 295, 300));
    let root = fx.tree.root();
    let splitter = fx
        .coordinator
        .border(root)
        .and_then(|b| b.region(RegionName::West))
        .and_then(|r| r.splitter);
    assert_eq!(splitter, Some(Rect::new(100, 0, 5, 300)));

    let applied = fx
        .coordinator
        .split_move(&mut fx.tree, &mut fx.host, root, RegionName::West, 1000)
        .unwrap();
    assert_eq!(applied, 345);
    assert_eq!(fx.rect("west").width, 345);
    assert_eq!(fx.rect("center"), Rect::new(350, 0, 50, 300));

    let applied = fx
        .coordinator
        .split_move(&mut fx.tree, &mut fx.host, root, RegionName::West, 10)
        .unwrap();
    assert_eq!(applied, 50);
    assert_eq!(fx.rect("center"), Rect::new(55, 0, 345, 300));
}

#[test]
fn test_split_move_on_collapsed_region_fails() {
    let mut fx = Fixture::new(west_and_center(), 400, 300);
    assert_eq!(fx.collapse(RegionName::West, false), Ok(TransitionStep::Applied));

    let root = fx.tree.root();
    let err = fx
        .coordinator
        .split_move(&mut fx.tree, &mut fx.host, root, RegionName::West, 200)
        .unwrap_err();
    assert_eq!(
        err,
        LayoutError::InvalidRegionState {
            region: RegionName::West,
            state: RegionState::Collapsed,
            operation: "resize",
        }
    );
}
