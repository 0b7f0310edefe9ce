use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::models::RouteProps;
use super::render_value;

pub fn render_contact(props: &RouteProps) -> Result<Element, JsValue> {
    let mut page = ElementBuilder::new("div")?
        .class("page page-contact")
        .child(ElementBuilder::new("h2")?.text("Contact").build())?
        .child(render_value(props)?)?;

    // Parámetros de la URL, si la ruta los declara
    for (name, value) in &props.route_match.params {
        page = page.child(
            ElementBuilder::new("p")?
                .class("route-param")
                .text(&format!("{}: {}", name, value))
                .build(),
        )?;
    }

    Ok(page.build())
}
