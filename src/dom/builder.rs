// ============================================================================
// ELEMENT BUILDER - Builder pattern para crear elementos
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};
use crate::dom::{append_child, create_element, on_click, set_attribute};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Reemplaza todas las clases
    pub fn class(self, class: &str) -> Self {
        self.element.set_class_name(class);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.element.set_text_content(Some(text));
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, name, value)?;
        Ok(self)
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    pub fn on_click<F>(self, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(MouseEvent) + 'static,
    {
        on_click(&self.element, handler)?;
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.element
    }
}
