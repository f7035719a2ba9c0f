use proof_core::Viewport;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, HtmlImageElement, Window};

use crate::dom::PageElements;
use crate::render::Piece;

/// Widget state shared behind an `Rc<RefCell<_>>` so the DOM callbacks can
/// reach it.
pub struct State {
    pub window: Window,
    pub container: HtmlElement,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub sprite: HtmlImageElement,
    pub pieces: Vec<Piece>,
    pub viewport: Viewport,
    // at most one pending animation frame per gesture kind
    pub zooming: bool,
    pub panning: bool,
    // cursor-relative origin while a drag-pan is active
    pub drag_origin: Option<(f64, f64)>,
}

impl State {
    pub fn new(
        window: Window,
        page: &PageElements,
        ctx: CanvasRenderingContext2d,
        pieces: Vec<Piece>,
        viewport: Viewport,
    ) -> Self {
        State {
            window,
            container: page.container.clone(),
            canvas: page.canvas.clone(),
            ctx,
            sprite: page.sprite.clone(),
            pieces,
            viewport,
            zooming: false,
            panning: false,
            drag_origin: None,
        }
    }
}
