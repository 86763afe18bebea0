//! Tests for reading layout configuration from JSON.

use std::time::Duration;

use tessera_component::{
    ActiveItem, Align, AnchorSize, BufferResize, ItemConfig, LabelAlign, LayoutConfig, LayoutKind,
    OverflowKind, Pack, RegionName, SidesSource,
};

fn layout(json: &str) -> LayoutConfig {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_defaults() {
    let config = layout("{}");
    assert_eq!(config, LayoutConfig::default());
    assert_eq!(config.kind, LayoutKind::Auto);
    assert_eq!(config.scroller_size, 20);
    assert_eq!(config.label_width, 100);
    assert_eq!(config.header_height, 26);
}

#[test]
fn test_camel_case_keys() {
    let config = layout(
        r#"{
            "type": "hbox",
            "pack": "end",
            "align": "stretchmax",
            "padding": "5 10",
            "defaultMargins": 3,
            "overflowHandler": "scroll",
            "scrollerSize": 16,
            "labelAlign": "top",
            "activeItem": "details",
            "bufferResize": 80
        }"#,
    );
    assert_eq!(config.kind, LayoutKind::HBox);
    assert_eq!(config.pack, Pack::End);
    assert_eq!(config.align, Align::StretchMax);
    assert_eq!(config.padding, Some(SidesSource::from("5 10")));
    assert_eq!(config.default_margins, Some(SidesSource::from(3)));
    assert_eq!(config.overflow_handler, Some(OverflowKind::Scroll));
    assert_eq!(config.scroller_size, 16);
    assert_eq!(config.label_align, LabelAlign::Top);
    assert_eq!(
        config.active_item,
        Some(ActiveItem::Id("details".to_string()))
    );
    assert_eq!(config.buffer_resize, Some(BufferResize::Millis(80)));
}

#[test]
fn test_enum_values_ignore_case_and_aliases() {
    assert_eq!(layout(r#"{"type": "VBox"}"#).kind, LayoutKind::VBox);
    assert_eq!(layout(r#"{"align": "center"}"#).align, Align::Middle);
    assert_eq!(layout(r#"{"align": "Top"}"#).align, Align::Start);
    assert_eq!(layout(r#"{"pack": " CENTER "}"#).pack, Pack::Center);
}

#[test]
fn test_unknown_enum_value_is_rejected() {
    assert!(serde_json::from_str::<LayoutConfig>(r#"{"type": "grid"}"#).is_err());
    assert!(serde_json::from_str::<ItemConfig>(r#"{"region": "middle"}"#).is_err());
}

#[test]
fn test_enums_serialize_as_strings() {
    let json = serde_json::to_value(LayoutConfig::of_kind(LayoutKind::Accordion)).unwrap();
    assert_eq!(json["type"], "accordion");
    assert_eq!(json["align"], "start");
    assert_eq!(json["labelAlign"], "left");
}

#[test]
fn test_item_config() {
    let item: ItemConfig = serde_json::from_str(
        r#"{
            "itemId": "nav",
            "region": "west",
            "width": 200,
            "minSize": 100,
            "split": true,
            "collapsible": true,
            "cmargins": "0 5",
            "flex": 2,
            "anchor": "100% -20",
            "columnWidth": 0.25,
            "hideLabel": true
        }"#,
    )
    .unwrap();

    assert_eq!(item.item_id.as_deref(), Some("nav"));
    assert_eq!(item.region, Some(RegionName::West));
    assert_eq!(item.width, Some(200));
    assert_eq!(item.min_size, Some(100));
    assert!(item.split && item.collapsible && item.hide_label);
    assert!(!item.collapsed);
    assert_eq!(item.flex_weight(), 2.0);
    assert_eq!(item.anchor.as_deref(), Some("100% -20"));
    assert_eq!(item.column_width, Some(0.25));
    assert!(!item.is_container());
}

#[test]
fn test_nested_items() {
    let item: ItemConfig = serde_json::from_str(
        r#"{ "layout": { "type": "card", "activeItem": 1 }, "items": [{}, {}] }"#,
    )
    .unwrap();
    assert!(item.is_container());
    assert_eq!(item.items.len(), 2);
    assert_eq!(
        item.layout.and_then(|l| l.active_item),
        Some(ActiveItem::Index(1))
    );
}

#[test]
fn test_flex_weight_ignores_non_positive() {
    let item = ItemConfig {
        flex: Some(-1.0),
        ..ItemConfig::default()
    };
    assert_eq!(item.flex_weight(), 0.0);
    assert_eq!(ItemConfig::default().flex_weight(), 0.0);
}

#[test]
fn test_buffer_window() {
    assert_eq!(
        BufferResize::Enabled(true).window(),
        Some(Duration::from_millis(50))
    );
    assert_eq!(BufferResize::Enabled(false).window(), None);
    assert_eq!(BufferResize::Millis(0).window(), None);
    assert_eq!(
        BufferResize::Millis(120).window(),
        Some(Duration::from_millis(120))
    );
}

#[test]
fn test_anchor_size_forms() {
    let width: AnchorSize = serde_json::from_str("400").unwrap();
    assert_eq!(width.dimensions(), (Some(400), None));
    let both: AnchorSize = serde_json::from_str(r#"{"width": 400, "height": 300}"#).unwrap();
    assert_eq!(both.dimensions(), (Some(400), Some(300)));
}
