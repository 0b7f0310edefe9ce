// ============================================================================
// NAV MENU VIEW - Enlaces con marca "active"
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{on_link_click, ElementBuilder};
use crate::router::{is_active, NAV_LINKS};
use crate::state::AppState;

pub const ACTIVE_CLASS: &str = "active";

pub fn render_nav_menu(state: &AppState) -> Result<Element, JsValue> {
    let pathname = state.router.location.with(|l| l.pathname.clone());
    let mut menu = ElementBuilder::new("div")?.class("menu");

    for link in NAV_LINKS.iter() {
        let anchor = ElementBuilder::new("a")?
            .attr("href", link.to)?
            .text(link.view.label())
            .build();
        if is_active(link, &pathname) {
            anchor.set_class_name(ACTIVE_CLASS);
            anchor.set_attribute("aria-current", "page")?;
        }
        on_link_click(&anchor, link.to, |to| crate::navigate_to(to))?;
        menu = menu.child(anchor)?;
    }

    Ok(menu.build())
}
