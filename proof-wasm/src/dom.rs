use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlImageElement};

/// Look up a required element by id. Absence is a fatal precondition, not a
/// recoverable error.
pub fn require_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element: #{id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("unexpected element type: #{id}")))
}

/// Everything the widget needs from the host page. Construction fails before
/// any network request is issued when an element is absent.
pub struct PageElements {
    pub canvas: HtmlCanvasElement,
    pub container: HtmlElement,
    pub sprite: HtmlImageElement,
    pub zoom_in: HtmlElement,
    pub zoom_out: HtmlElement,
    /// Sprite sheet resolution, from the canvas `data-size` attribute.
    pub scale: String,
}

impl PageElements {
    pub fn find(document: &Document) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = require_element(document, "piecemaker-table")?;
        let container = canvas
            .parent_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| JsValue::from_str("canvas has no parent container"))?;
        let sprite: HtmlImageElement =
            require_element(document, "piecemaker-sprite_without_padding")?;
        let zoom_in: HtmlElement = require_element(document, "zoom-in")?;
        let zoom_out: HtmlElement = require_element(document, "zoom-out")?;
        let scale = canvas
            .dataset()
            .get("size")
            .ok_or_else(|| JsValue::from_str("canvas is missing its data-size attribute"))?;
        Ok(PageElements {
            canvas,
            container,
            sprite,
            zoom_in,
            zoom_out,
            scale,
        })
    }
}
