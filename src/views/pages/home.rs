use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::models::RouteProps;
use super::render_value;

pub fn render_home(props: &RouteProps) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("page page-home")
        .child(ElementBuilder::new("h2")?.text("Home").build())?
        .child(render_value(props)?)
        .map(ElementBuilder::build)
}
