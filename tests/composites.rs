//! Composite widget scenarios driven through the public harness.

use aui::components::Carousel;
use aui::testing::Harness;
use aui::{Key, NodeId};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

const TABS: &str = r#"<aui-tabs value="b">
    <aui-tab value="a">Alpha</aui-tab>
    <aui-tab value="b">Beta</aui-tab>
    <aui-tab value="c" disabled>Gamma</aui-tab>
    <aui-tab-panel value="a">Panel A</aui-tab-panel>
    <aui-tab-panel value="b">Panel B</aui-tab-panel>
    <aui-tab-panel value="c">Panel C</aui-tab-panel>
</aui-tabs>"#;

fn selected_tabs(ui: &Harness) -> Vec<NodeId> {
    ui.find_all("aui-tab")
        .into_iter()
        .filter(|&t| ui.has(t, "selected") && ui.attr(t, "aria-selected").as_deref() == Some("true"))
        .collect()
}

fn visible_panels(ui: &Harness) -> Vec<NodeId> {
    ui.find_all("aui-tab-panel")
        .into_iter()
        .filter(|&p| !ui.has(p, "hidden"))
        .collect()
}

#[test]
fn test_tabs_exactly_one_selected_and_shown() {
    let mut ui = Harness::new();
    let tabs = ui.mount(TABS);
    for value in ["a", "b", "c"] {
        ui.set(tabs, "value", value);
        assert_eq!(selected_tabs(&ui).len(), 1, "value {value}");
        assert_eq!(visible_panels(&ui).len(), 1, "value {value}");
        let panel = visible_panels(&ui)[0];
        assert_eq!(ui.attr(panel, "value").as_deref(), Some(value));
    }
}

#[test]
fn test_tabs_unmatched_value_selects_nothing() {
    let mut ui = Harness::new();
    let tabs = ui.mount(TABS);
    ui.set(tabs, "value", "zzz");
    assert!(selected_tabs(&ui).is_empty());
    assert!(visible_panels(&ui).is_empty());
}

#[test]
fn test_tabs_click_and_keyboard_skip_disabled() {
    let mut ui = Harness::new();
    let tabs = ui.mount(TABS);
    let all = ui.find_all("aui-tab");
    ui.click(all[0]);
    assert_eq!(ui.attr(tabs, "value").as_deref(), Some("a"));
    assert_eq!(ui.last_event("change").unwrap()["value"], json!("a"));

    ui.click(all[2]);
    assert_eq!(ui.attr(tabs, "value").as_deref(), Some("a"));

    ui.press(all[0], Key::ArrowLeft);
    assert_eq!(ui.attr(tabs, "value").as_deref(), Some("b"));
}

#[test]
fn test_tabs_added_dynamically_update_indicator() {
    let mut ui = Harness::new();
    let tabs = ui.mount(TABS);
    let before = ui.part(tabs, "indicator").unwrap();
    let first = ui.find_all("aui-tab")[0];
    ui.set(first, "label", "A much longer alpha label");
    let after = ui.part(tabs, "indicator").unwrap();
    assert_ne!(before.get_attr("style"), after.get_attr("style"));
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

const MENU: &str = r#"<aui-menu>
    <button slot="trigger">Actions</button>
    <aui-menu-item value="edit">Edit</aui-menu-item>
    <aui-menu-item value="delete">Delete</aui-menu-item>
</aui-menu>"#;

#[test]
fn test_menu_trigger_opens_and_body_click_closes() {
    let mut ui = Harness::new();
    let menu = ui.mount(MENU);
    let trigger = ui.find("button");
    assert!(!ui.has(menu, "open"));

    ui.click(trigger);
    assert!(ui.has(menu, "open"));

    let body = ui.doc().body();
    ui.click(body);
    assert!(!ui.has(menu, "open"));

    let toggles: Vec<String> = ui
        .doc()
        .events()
        .filter(|e| e.name == "open" || e.name == "close")
        .map(|e| e.name.clone())
        .collect();
    assert_eq!(toggles, vec!["open", "close"]);
}

#[test]
fn test_menu_item_click_selects_before_outside_check() {
    let mut ui = Harness::new();
    let menu = ui.mount(MENU);
    ui.click(ui.find("button"));
    let delete = ui.find_all("aui-menu-item")[1];
    ui.click(delete);
    assert!(!ui.has(menu, "open"));
    let select = ui.last_event("select").unwrap();
    assert_eq!(select["value"], json!("delete"));
    assert_eq!(select["label"], json!("Delete"));
}

#[test]
fn test_menu_programmatic_open_emits_too() {
    let mut ui = Harness::new();
    let menu = ui.mount(MENU);
    ui.set(menu, "open", "");
    assert_eq!(ui.events("open").len(), 1);
    ui.press(menu, Key::Escape);
    assert!(!ui.has(menu, "open"));
    assert_eq!(ui.events("close").len(), 1);
}

#[test]
fn test_two_open_menus_keep_separate_listeners() {
    let mut ui = Harness::new();
    let first = ui.mount(MENU);
    let second = ui.mount(MENU);
    ui.set(first, "open", "");
    ui.set(second, "open", "");
    let second_trigger = ui.find_all("button")[1];
    ui.click(second_trigger);
    assert!(!ui.has(first, "open"), "click outside the first menu closes it");
    assert!(!ui.has(second, "open"), "trigger click toggles the second menu");
    ui.remove(first);
    assert_eq!(ui.doc().listener_count(second), 2);
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

const COLUMNS: &str = r#"[{"key":"name","label":"Name","sortable":true},{"key":"team","label":"Team","sortable":true}]"#;

fn people() -> String {
    let rows: Vec<Value> = (0..25)
        .map(|i| json!({ "name": format!("p{i:02}"), "team": (["red", "blue"][i % 2]) }))
        .collect();
    Value::Array(rows).to_string()
}

fn mount_table(ui: &mut Harness) -> NodeId {
    let table = ui.mount("<aui-table></aui-table>");
    ui.set(table, "columns", COLUMNS);
    ui.set(table, "rows", &people());
    table
}

#[test]
fn test_table_pagination_clamp() {
    let mut ui = Harness::new();
    let table = mount_table(&mut ui);
    ui.set(table, "current-page", "2");
    assert_eq!(
        ui.part(table, "summary").unwrap().text_content(),
        "Showing 11 to 20 of 25"
    );
    ui.set(table, "page-size", "50");
    assert_eq!(ui.attr(table, "current-page").as_deref(), Some("1"));
    assert_eq!(
        ui.part(table, "summary").unwrap().text_content(),
        "Showing 1 to 25 of 25"
    );
}

#[test]
fn test_table_sort_is_stable_and_cycles() {
    let mut ui = Harness::new();
    let table = mount_table(&mut ui);
    ui.set(table, "page-size", "50");

    ui.click_part(table, "sort-team");
    let rows = ui.parts_with_prefix(table, "row-");
    let expected: Vec<String> = (0..25)
        .filter(|i| i % 2 == 1)
        .chain((0..25).filter(|i| i % 2 == 0))
        .map(|i| format!("row-{i}"))
        .collect();
    assert_eq!(rows, expected, "blue before red, original order within a team");

    ui.click_part(table, "sort-team");
    let rows = ui.parts_with_prefix(table, "row-");
    let expected: Vec<String> = (0..25)
        .filter(|i| i % 2 == 0)
        .chain((0..25).filter(|i| i % 2 == 1))
        .map(|i| format!("row-{i}"))
        .collect();
    assert_eq!(rows, expected, "descending keeps ties in original order");

    ui.click_part(table, "sort-team");
    let rows = ui.parts_with_prefix(table, "row-");
    assert_eq!(rows, (0..25).map(|i| format!("row-{i}")).collect::<Vec<_>>());

    let directions: Vec<Value> = ui.events("sort").iter().map(|d| d["direction"].clone()).collect();
    assert_eq!(directions, vec![json!("asc"), json!("desc"), json!("none")]);
}

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

const CAROUSEL: &str = r#"<aui-carousel index="2">
    <aui-slide>One</aui-slide>
    <aui-slide>Two</aui-slide>
    <aui-slide>Three</aui-slide>
</aui-carousel>"#;

fn carousel_next(ui: &mut Harness, node: NodeId) {
    ui.doc_mut()
        .with_component::<Carousel, _>(node, |c, cx| c.next(cx))
        .unwrap();
}

#[test]
fn test_carousel_wraps_only_with_loop() {
    let mut ui = Harness::new();
    let carousel = ui.mount(CAROUSEL);
    carousel_next(&mut ui, carousel);
    assert_eq!(ui.attr(carousel, "index").as_deref(), Some("2"));

    ui.set(carousel, "loop", "");
    carousel_next(&mut ui, carousel);
    assert_eq!(ui.attr(carousel, "index").as_deref(), Some("0"));
    assert_eq!(ui.last_event("change").unwrap()["index"], json!(0));
}

#[test]
fn test_carousel_autoplay_advances_and_stops_on_removal() {
    let mut ui = Harness::new();
    let carousel = ui.mount(
        r#"<aui-carousel autoplay interval="1000">
            <aui-slide>One</aui-slide>
            <aui-slide>Two</aui-slide>
        </aui-carousel>"#,
    );
    ui.advance_ms(1000);
    assert_eq!(ui.attr(carousel, "index").as_deref(), Some("1"));
    ui.advance_ms(1000);
    assert_eq!(ui.attr(carousel, "index").as_deref(), Some("0"));

    ui.remove(carousel);
    assert_eq!(ui.advance_ms(5000), 0);
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

#[test]
fn test_select_and_autocomplete_share_options() {
    let mut ui = Harness::new();
    let select = ui.mount(
        r#"<aui-select><aui-option value="1">One</aui-option><aui-option value="2">Two</aui-option></aui-select>"#,
    );
    let auto = ui.mount(
        r#"<aui-autocomplete><aui-option value="1">One</aui-option><aui-option value="2">Two</aui-option></aui-autocomplete>"#,
    );
    ui.click_part(select, "trigger");
    ui.type_text(auto, "input", "tw");
    assert!(ui.has_part(select, "listbox"), "typing is not a click");
    ui.click_part(auto, "option-0");
    assert!(!ui.has_part(select, "listbox"), "clicking elsewhere closes the select");
    assert_eq!(ui.attr(auto, "value").as_deref(), Some("Two"));
    assert_eq!(ui.attr(select, "value"), None);
}
