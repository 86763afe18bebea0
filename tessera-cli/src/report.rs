//! Printing computed geometry.

use std::collections::HashSet;

use owo_colors::OwoColorize;
use serde::Serialize;
use tessera_component::{ComponentId, ComponentTree, LayoutKind, Rect};
use tessera_layout::{Coordinator, LayoutEvent, RegionState};

/// A component's computed geometry, with its children.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentReport {
    id: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    layout: Option<LayoutKind>,
    rect: Rect,
    hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label_rect: Option<Rect>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<ComponentReport>,
}

impl ComponentReport {
    /// Snapshot `id` and its subtree.
    pub fn build(tree: &ComponentTree, id: ComponentId) -> Self {
        let config = tree.config(id);
        let state = tree.state(id);
        Self {
            id: id.0,
            item_id: config.item_id.clone(),
            layout: config.layout.as_ref().map(|layout| layout.kind),
            rect: state.rect,
            hidden: state.hidden,
            field_label: config.field_label.clone(),
            label_rect: state.label_rect,
            children: tree
                .children(id)
                .iter()
                .map(|&child| Self::build(tree, child))
                .collect(),
        }
    }
}

fn display_name(tree: &ComponentTree, id: ComponentId) -> String {
    tree.config(id)
        .item_id
        .clone()
        .unwrap_or_else(|| format!("#{}", id.0))
}

fn format_rect(rect: Rect) -> String {
    format!(
        "x={} y={} w={} h={}",
        rect.x, rect.y, rect.width, rect.height
    )
}

/// Recursively print a component with its rectangle and markers.
pub fn print_tree(
    tree: &ComponentTree,
    coordinator: &Coordinator,
    dirty: &HashSet<ComponentId>,
    id: ComponentId,
    depth: usize,
) {
    let indent = "  ".repeat(depth);
    let config = tree.config(id);
    let state = tree.state(id);

    let mut line = format!("{indent}{}", display_name(tree, id).bold());
    if let Some(layout) = &config.layout {
        line.push_str(&format!(" [{}]", layout.kind.cyan()));
    }
    if let Some(region) = config.region {
        let parent_state = tree
            .parent(id)
            .and_then(|parent| coordinator.region_state(parent, region));
        match parent_state {
            Some(RegionState::Expanded) | None => line.push_str(&format!(" ({region})")),
            Some(other) => line.push_str(&format!(" ({region}, {other:?})")),
        }
    }
    line.push_str(&format!("  {}", format_rect(state.rect)));
    if state.hidden {
        line.push_str(&format!(" {}", "hidden".dimmed()));
    }
    if dirty.contains(&id) {
        line.push_str(&format!(" {}", "dirty".yellow()));
    }
    println!("{line}");

    if let Some(label) = state.label_rect {
        let text = config.field_label.as_deref().unwrap_or_default();
        println!("{indent}  label {text:?}: {}", format_rect(label).dimmed());
    }
    if let Some(overflow) = coordinator.overflow(id).filter(|h| h.is_overflowing()) {
        let hidden = overflow.hidden_items();
        if hidden.is_empty() {
            println!(
                "{indent}  {} scroll={}",
                "overflow".red(),
                overflow.scroll_offset()
            );
        } else {
            let names: Vec<String> = hidden.iter().map(|&h| display_name(tree, h)).collect();
            println!("{indent}  {} menu: {}", "overflow".red(), names.join(", "));
        }
    }

    for &child in tree.children(id) {
        print_tree(tree, coordinator, dirty, child, depth + 1);
    }
}

/// Print delivered notifications in order.
pub fn print_events(tree: &ComponentTree, events: &[(ComponentId, LayoutEvent)]) {
    for (id, event) in events {
        println!("{:>12}  {event:?}", display_name(tree, *id).green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_component::ItemConfig;
    use tessera_layout::{RecordingHost, Size};

    #[test]
    fn test_report_carries_form_labels() {
        let config: ItemConfig = serde_json::from_str(
            r#"{ "layout": { "type": "form" },
                 "items": [{ "itemId": "name", "fieldLabel": "Name", "anchor": "100%", "height": 22 }] }"#,
        )
        .unwrap();
        let mut tree = ComponentTree::from_config(config);
        let mut coordinator = Coordinator::new();
        let mut host = RecordingHost::new();
        let root = tree.root();
        coordinator
            .layout_root(&mut tree, &mut host, root, Size::new(400, 100))
            .unwrap();

        let json = serde_json::to_value(ComponentReport::build(&tree, root)).unwrap();
        let field = &json["children"][0];
        assert_eq!(field["itemId"], "name");
        assert_eq!(field["fieldLabel"], "Name");
        assert!(field["labelRect"].is_object());
        assert_eq!(json["layout"], "form");
    }
}
