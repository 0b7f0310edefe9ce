use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::models::RouteProps;
use super::render_value;

/// About cubre también subrutas (`/about/team`); se muestra la parte restante
pub fn render_about(props: &RouteProps) -> Result<Element, JsValue> {
    let mut page = ElementBuilder::new("div")?
        .class("page page-about")
        .child(ElementBuilder::new("h2")?.text("About").build())?
        .child(render_value(props)?)?;

    let rest = props.remaining_path();
    if !rest.is_empty() {
        page = page.child(
            ElementBuilder::new("p")?
                .class("route-rest")
                .text(&format!("section: {}", rest))
                .build(),
        )?;
    }

    Ok(page.build())
}
