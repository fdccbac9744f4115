//! Style modules: the static CSS each component renders into its shadow root.
//!
//! Every render emits its stylesheet as the first shadow child, so a shadow
//! subtree is self-contained. Theme values come from `--aui-*` custom
//! properties with fallbacks.

use crate::render::{h, VElement};

/// A `<style>` element holding `css`.
pub fn style(css: &str) -> VElement {
    h("style").text(css)
}

pub const BUTTON: &str = ":host{display:inline-block}:host([full-width]){display:block}\
.btn{display:inline-flex;align-items:center;gap:8px;border-radius:var(--aui-radius,6px);font:inherit;cursor:pointer;border:1px solid transparent}\
:host([full-width]) .btn{width:100%;justify-content:center}\
.btn-sm{padding:4px 10px;font-size:12px}.btn-md{padding:8px 16px;font-size:14px}.btn-lg{padding:12px 22px;font-size:16px}\
.btn-primary{background:var(--aui-primary,#2563eb);color:#fff}\
.btn-secondary{background:var(--aui-secondary,#e5e7eb);color:#111827}\
.btn-outline{background:transparent;border-color:currentColor;color:var(--aui-primary,#2563eb)}\
.btn-ghost{background:transparent;color:inherit}\
.btn-danger{background:var(--aui-danger,#dc2626);color:#fff}\
.btn[disabled]{opacity:.5;cursor:not-allowed}\
.spinner{width:1em;height:1em;border:2px solid currentColor;border-right-color:transparent;border-radius:50%;animation:spin .8s linear infinite}\
@keyframes spin{to{transform:rotate(360deg)}}";

pub const CHECKBOX: &str = ":host{display:inline-flex}\
.checkbox{display:inline-flex;align-items:center;gap:8px;cursor:pointer}\
.box{width:16px;height:16px;border:2px solid var(--aui-border,#6b7280);border-radius:3px;display:grid;place-items:center}\
.checked .box,.indeterminate .box{background:var(--aui-primary,#2563eb);border-color:var(--aui-primary,#2563eb);color:#fff}\
.disabled{opacity:.5;cursor:not-allowed}";

pub const SWITCH: &str = ":host{display:inline-flex}\
.switch{display:inline-flex;align-items:center;gap:8px;cursor:pointer}\
.track{position:relative;border-radius:999px;background:var(--aui-border,#d1d5db);transition:background .2s}\
.switch-sm .track{width:28px;height:16px}.switch-md .track{width:36px;height:20px}.switch-lg .track{width:44px;height:24px}\
.thumb{position:absolute;top:2px;left:2px;border-radius:50%;background:#fff;transition:transform .2s}\
.checked .track{background:var(--aui-primary,#2563eb)}\
.disabled{opacity:.5;cursor:not-allowed}";

pub const TEXTFIELD: &str = ":host{display:block}\
.field{display:flex;flex-direction:column;gap:4px}\
.control{display:flex;align-items:center;border:1px solid var(--aui-border,#d1d5db);border-radius:var(--aui-radius,6px);padding:0 8px}\
.has-error .control{border-color:var(--aui-danger,#dc2626)}\
input{flex:1;border:0;outline:0;padding:8px 0;font:inherit;background:transparent}\
.helper,.counter{font-size:12px;color:var(--aui-muted,#6b7280)}.error{font-size:12px;color:var(--aui-danger,#dc2626)}";

pub const ALERT: &str = ":host{display:block}\
.alert{display:flex;gap:12px;padding:12px 16px;border-radius:var(--aui-radius,6px);border-left:4px solid}\
.alert-info{background:#eff6ff;border-color:#3b82f6}.alert-success{background:#f0fdf4;border-color:#22c55e}\
.alert-warning{background:#fffbeb;border-color:#f59e0b}.alert-error{background:#fef2f2;border-color:#ef4444}\
.title{font-weight:600}.close{margin-left:auto;background:none;border:0;cursor:pointer}";

pub const BADGE: &str = ":host{display:inline-flex;position:relative}\
.badge{display:inline-flex;align-items:center;justify-content:center;min-width:20px;height:20px;padding:0 6px;border-radius:999px;font-size:12px;font-weight:600}\
.badge-default{background:#e5e7eb;color:#111827}.badge-primary{background:#2563eb;color:#fff}\
.badge-success{background:#16a34a;color:#fff}.badge-warning{background:#d97706;color:#fff}.badge-error{background:#dc2626;color:#fff}\
.dot{min-width:8px;width:8px;height:8px;padding:0}";

pub const PROGRESS: &str = ":host{display:block}\
.linear{height:4px;background:#e5e7eb;border-radius:2px;overflow:hidden}\
.bar{height:100%;background:var(--aui-primary,#2563eb);transition:width .2s}\
.indeterminate .bar{width:40%;animation:slide 1.2s ease-in-out infinite}\
.circular circle{fill:none;stroke-width:4}.track{stroke:#e5e7eb}.arc{stroke:var(--aui-primary,#2563eb);transform:rotate(-90deg);transform-origin:center}\
@keyframes slide{from{transform:translateX(-100%)}to{transform:translateX(250%)}}";

pub const TABS: &str = ":host{display:block}\
.tablist{position:relative;display:flex;border-bottom:1px solid var(--aui-border,#e5e7eb)}\
.indicator{position:absolute;bottom:0;left:0;height:2px;background:var(--aui-primary,#2563eb);transition:transform .2s,width .2s}";

pub const TAB: &str = ":host{display:inline-flex}\
.tab{padding:12px 16px;background:none;border:0;font:inherit;cursor:pointer;color:var(--aui-muted,#6b7280)}\
.tab.selected{color:var(--aui-primary,#2563eb)}.tab[disabled]{opacity:.5;cursor:not-allowed}";

pub const TAB_PANEL: &str = ":host{display:block}:host([hidden]){display:none}.panel{padding:16px 0}";

pub const MENU: &str = ":host{display:inline-block;position:relative}\
.menu{position:absolute;z-index:10;min-width:180px;padding:4px 0;background:#fff;border:1px solid var(--aui-border,#e5e7eb);border-radius:var(--aui-radius,6px);box-shadow:0 8px 24px rgba(0,0,0,.12)}\
.menu[hidden]{display:none}\
.bottom-start{top:100%;left:0}.bottom-end{top:100%;right:0}.top-start{bottom:100%;left:0}.top-end{bottom:100%;right:0}";

pub const MENU_ITEM: &str = ":host{display:block}\
.item{display:flex;align-items:center;gap:8px;padding:8px 12px;cursor:pointer}\
.item.highlighted,.item:hover{background:#f3f4f6}.item[disabled]{opacity:.5;cursor:not-allowed}";

pub const ACCORDION: &str = ":host{display:block;border:1px solid var(--aui-border,#e5e7eb);border-radius:var(--aui-radius,6px)}";

pub const ACCORDION_ITEM: &str = ":host{display:block;border-bottom:1px solid var(--aui-border,#e5e7eb)}\
.header{display:flex;width:100%;justify-content:space-between;padding:12px 16px;background:none;border:0;font:inherit;cursor:pointer}\
.content{padding:0 16px 12px}.content[hidden]{display:none}.chevron{transition:transform .2s}.open .chevron{transform:rotate(180deg)}";

pub const CAROUSEL: &str = ":host{display:block;position:relative;overflow:hidden}\
.track{display:flex;transition:transform .4s ease}\
.nav{position:absolute;top:50%;transform:translateY(-50%);background:rgba(0,0,0,.4);color:#fff;border:0;border-radius:50%;width:32px;height:32px;cursor:pointer}\
.prev{left:8px}.next{right:8px}.dots{display:flex;justify-content:center;gap:6px;padding:8px}\
.dot{width:8px;height:8px;border-radius:50%;border:0;background:#d1d5db}.dot.active{background:var(--aui-primary,#2563eb)}";

pub const SLIDE: &str = ":host{flex:0 0 100%;display:block}:host([hidden]){display:none}";

pub const STEPPER: &str = ":host{display:block}\
.stepper{display:flex;gap:8px}.vertical{flex-direction:column}\
.actions{display:flex;gap:8px;margin-top:16px}";

pub const STEP: &str = ":host{display:flex;flex:1}\
.step{display:flex;align-items:center;gap:8px;cursor:pointer}\
.marker{width:24px;height:24px;border-radius:50%;display:grid;place-items:center;background:#e5e7eb}\
.complete .marker,.active .marker{background:var(--aui-primary,#2563eb);color:#fff}";

pub const DRAWER: &str = ":host{position:fixed;inset:0;pointer-events:none;z-index:50}\
:host([open]){pointer-events:auto}\
.backdrop{position:absolute;inset:0;background:rgba(0,0,0,.4)}\
.panel{position:absolute;background:#fff;box-shadow:0 0 24px rgba(0,0,0,.2);overflow:auto}\
.left{top:0;bottom:0;left:0}.right{top:0;bottom:0;right:0}.top{left:0;right:0;top:0}.bottom{left:0;right:0;bottom:0}";

pub const DIALOG: &str = ":host{position:fixed;inset:0;display:none;z-index:60}:host([open]){display:grid;place-items:center}\
.backdrop{position:absolute;inset:0;background:rgba(0,0,0,.5)}\
.dialog{position:relative;background:#fff;border-radius:var(--aui-radius,8px);box-shadow:0 16px 48px rgba(0,0,0,.25);max-height:90vh;overflow:auto}\
.dialog-sm{width:400px}.dialog-md{width:560px}.dialog-lg{width:800px}\
.header{display:flex;justify-content:space-between;padding:16px 20px}.body{padding:0 20px 16px}.actions,.footer{padding:12px 20px;display:flex;justify-content:flex-end;gap:8px}";

pub const TABLE: &str = ":host{display:block;overflow:auto}\
table{width:100%;border-collapse:collapse}th,td{padding:8px 12px;text-align:left;border-bottom:1px solid var(--aui-border,#e5e7eb)}\
th.sortable{cursor:pointer;user-select:none}.striped tbody tr:nth-child(even){background:#f9fafb}\
tr.selected{background:#eff6ff}.footer{display:flex;justify-content:space-between;align-items:center;padding:8px 12px;font-size:14px}";

pub const DATA_GRID: &str = ":host{display:block}\
.toolbar{padding:8px 0}.grid{width:100%;border-collapse:collapse}\
.grid th,.grid td{padding:6px 10px;border:1px solid var(--aui-border,#e5e7eb)}\
.grid th{cursor:pointer;background:#f9fafb}.grid tr.selected{background:#eff6ff}\
.pager{display:flex;gap:8px;align-items:center;padding:8px 0}";

pub const PAGINATION: &str = ":host{display:block}\
.pagination{display:flex;gap:4px;list-style:none;padding:0}\
.page{min-width:32px;height:32px;border:1px solid var(--aui-border,#e5e7eb);background:#fff;border-radius:var(--aui-radius,6px);cursor:pointer}\
.page.current{background:var(--aui-primary,#2563eb);color:#fff}.ellipsis{padding:0 6px}";

pub const TREE_VIEW: &str = ":host{display:block}\
.tree,.group{list-style:none;margin:0;padding:0}.group{padding-left:16px}\
.node{display:flex;align-items:center;gap:4px;padding:4px 8px;cursor:pointer;border-radius:4px}\
.node.selected{background:#eff6ff}.node.focused{outline:2px solid var(--aui-primary,#2563eb)}\
.node[aria-disabled=true]{opacity:.5;cursor:not-allowed}.toggle{width:16px}";

pub const TREE_ITEM: &str = ":host{display:none}";

pub const SELECT: &str = ":host{display:inline-block;position:relative;min-width:200px}\
.trigger{display:flex;justify-content:space-between;width:100%;padding:8px 12px;border:1px solid var(--aui-border,#d1d5db);border-radius:var(--aui-radius,6px);background:#fff;font:inherit;cursor:pointer}\
.placeholder{color:var(--aui-muted,#9ca3af)}\
.listbox{position:absolute;top:100%;left:0;right:0;z-index:10;margin:4px 0 0;padding:4px 0;list-style:none;background:#fff;border:1px solid var(--aui-border,#e5e7eb);border-radius:var(--aui-radius,6px)}\
.option{padding:8px 12px;cursor:pointer}.option.highlighted{background:#f3f4f6}.option.selected{font-weight:600}.option[aria-disabled=true]{opacity:.5}";

pub const OPTION: &str = ":host{display:none}";

pub const AUTOCOMPLETE: &str = ":host{display:inline-block;position:relative;min-width:240px}\
input{width:100%;padding:8px 12px;border:1px solid var(--aui-border,#d1d5db);border-radius:var(--aui-radius,6px);font:inherit}\
.listbox{position:absolute;top:100%;left:0;right:0;z-index:10;margin:4px 0 0;padding:4px 0;list-style:none;background:#fff;border:1px solid var(--aui-border,#e5e7eb)}\
.option{padding:8px 12px;cursor:pointer}.option.highlighted{background:#f3f4f6}mark{background:none;font-weight:600}";

pub const DATE_PICKER: &str = ":host{display:inline-block;position:relative}\
.trigger{padding:8px 12px;border:1px solid var(--aui-border,#d1d5db);border-radius:var(--aui-radius,6px);background:#fff;font:inherit;cursor:pointer}\
.calendar{position:absolute;top:100%;left:0;z-index:10;padding:8px;background:#fff;border:1px solid var(--aui-border,#e5e7eb);border-radius:var(--aui-radius,6px)}\
.header{display:flex;justify-content:space-between;align-items:center}\
.grid{display:grid;grid-template-columns:repeat(7,32px);gap:2px}\
.day{height:32px;border:0;background:none;border-radius:50%;cursor:pointer}.day.outside{color:#9ca3af}\
.day.today{outline:1px solid var(--aui-primary,#2563eb)}.day.selected{background:var(--aui-primary,#2563eb);color:#fff}.day[disabled]{opacity:.3;cursor:not-allowed}";

pub const TIME_PICKER: &str = ":host{display:inline-block;position:relative}\
.trigger{padding:8px 12px;border:1px solid var(--aui-border,#d1d5db);border-radius:var(--aui-radius,6px);background:#fff;font:inherit;cursor:pointer}\
.listbox{position:absolute;top:100%;left:0;z-index:10;max-height:240px;overflow:auto;margin:4px 0 0;padding:4px 0;list-style:none;background:#fff;border:1px solid var(--aui-border,#e5e7eb)}\
.option{padding:6px 12px;cursor:pointer}.option.selected{background:var(--aui-primary,#2563eb);color:#fff}";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{to_html, VNode};

    #[test]
    fn style_element_is_raw() {
        let node: VNode = style(".a>b{color:red}").into();
        assert_eq!(to_html(&node), "<style>.a>b{color:red}</style>");
    }

    #[test]
    fn every_sheet_targets_host() {
        for css in [BUTTON, TABS, MENU, CAROUSEL, DRAWER, TABLE, DATE_PICKER, TREE_ITEM] {
            assert!(css.starts_with(":host"), "{css}");
        }
    }
}
