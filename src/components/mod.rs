//! Built-in components: leaf controls and composite widgets.
//!
//! Each module holds one component (or one coordinator plus its child
//! elements), its typed attribute props, and its tests. [`define_all`]
//! registers every tag under a caller-chosen prefix.

pub mod support;
pub mod data;

// Leaf components
pub mod button;
pub mod checkbox;
pub mod switch;
pub mod textfield;
pub mod alert;
pub mod badge;
pub mod progress;

// Composite widgets
pub mod tabs;
pub mod menu;
pub mod accordion;
pub mod carousel;
pub mod stepper;
pub mod drawer;
pub mod dialog;
pub mod table;
pub mod data_grid;
pub mod pagination;
pub mod tree_view;
pub mod select;
pub mod autocomplete;
pub mod date_picker;
pub mod time_picker;

pub use accordion::{Accordion, AccordionItem};
pub use alert::Alert;
pub use autocomplete::Autocomplete;
pub use badge::Badge;
pub use button::Button;
pub use carousel::{Carousel, Slide};
pub use checkbox::Checkbox;
pub use data_grid::DataGrid;
pub use date_picker::DatePicker;
pub use dialog::Dialog;
pub use drawer::Drawer;
pub use menu::{Menu, MenuItem};
pub use pagination::Pagination;
pub use progress::Progress;
pub use select::{Select, SelectOption};
pub use stepper::{Step, Stepper};
pub use switch::Switch;
pub use table::Table;
pub use tabs::{Tab, TabPanel, Tabs};
pub use textfield::TextField;
pub use time_picker::TimePicker;
pub use tree_view::{TreeItem, TreeView};

use crate::element::{ComponentRegistry, Factory};

/// Every built-in component: unprefixed name and constructor.
pub const BUILTINS: &[(&str, Factory)] = &[
    ("button", button::factory),
    ("checkbox", checkbox::factory),
    ("switch", switch::factory),
    ("textfield", textfield::factory),
    ("alert", alert::factory),
    ("badge", badge::factory),
    ("progress", progress::factory),
    ("tabs", tabs::factory),
    ("tab", tabs::tab_factory),
    ("tab-panel", tabs::panel_factory),
    ("menu", menu::factory),
    ("menu-item", menu::item_factory),
    ("accordion", accordion::factory),
    ("accordion-item", accordion::item_factory),
    ("carousel", carousel::factory),
    ("slide", carousel::slide_factory),
    ("stepper", stepper::factory),
    ("step", stepper::step_factory),
    ("drawer", drawer::factory),
    ("dialog", dialog::factory),
    ("table", table::factory),
    ("data-grid", data_grid::factory),
    ("pagination", pagination::factory),
    ("tree-view", tree_view::factory),
    ("tree-item", tree_view::item_factory),
    ("select", select::factory),
    ("option", select::option_factory),
    ("autocomplete", autocomplete::factory),
    ("date-picker", date_picker::factory),
    ("time-picker", time_picker::factory),
];

/// Register every built-in component as `{prefix}-{name}`.
///
/// Tags that are already defined keep their existing definition. Returns the
/// number of new definitions.
pub fn define_all(registry: &mut ComponentRegistry, prefix: &str) -> usize {
    let mut defined = 0;
    for &(name, factory) in BUILTINS {
        let tag = format!("{prefix}-{name}");
        match registry.define(&tag, factory) {
            Ok(true) => defined += 1,
            Ok(false) => {}
            Err(err) => tracing::warn!(%err, "skipping built-in component"),
        }
    }
    tracing::debug!(prefix, defined, "defined built-in components");
    defined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defines_every_builtin_once() {
        let mut registry = ComponentRegistry::new();
        assert_eq!(define_all(&mut registry, "aui"), BUILTINS.len());
        assert!(registry.is_defined("aui-tab-panel"));
        assert!(registry.is_defined("aui-option"));
        assert_eq!(registry.tags().next(), Some("aui-button"));
        assert_eq!(define_all(&mut registry, "aui"), 0);
        assert_eq!(registry.len(), BUILTINS.len());
    }

    #[test]
    fn first_definition_wins() {
        let mut registry = ComponentRegistry::new();
        registry.define("aui-badge", button::factory).unwrap();
        define_all(&mut registry, "aui");
        let instance = registry.create("aui-badge").unwrap();
        assert!(instance.as_ref().as_any().is::<Button>());
    }

    #[test]
    fn invalid_prefix_defines_nothing() {
        let mut registry = ComponentRegistry::new();
        assert_eq!(define_all(&mut registry, "AUI"), 0);
        assert!(registry.is_empty());
    }
}
