//! Table proof canvas: draws every puzzle piece at its table position,
//! scaled to fit the canvas's parent container, with wheel/button zoom and
//! wheel/drag pan. Pieces are not interactive.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Window;

use proof_core::{PuzzleIndex, SpriteLayout, Viewport};

mod canvas;
mod constants;
mod dom;
mod events;
mod render;
mod state;
mod utils;

use dom::PageElements;
use events::Listeners;
use state::State;

// Keeps the registered listeners alive for the page session; replacing the
// slot tears the previous set down.
thread_local! {
    static LISTENERS: RefCell<Option<Listeners>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    // element lookup happens before any fetch; a missing element is fatal
    let page = PageElements::find(&document)?;

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = load_and_run(window, page).await {
            utils::log(&format!("table proof failed to start: {err:?}"));
        }
    });
    Ok(())
}

async fn load_and_run(window: Window, page: PageElements) -> Result<(), JsValue> {
    // issue both requests before awaiting either
    let index_req = window.fetch_with_str("index.json");
    let layout_url = format!("size-{}/sprite_without_padding_layout.json", page.scale);
    let layout_req = window.fetch_with_str(&layout_url);

    let index_text = utils::response_text(index_req).await?;
    let layout_text = utils::response_text(layout_req).await?;

    let index = PuzzleIndex::from_json(&index_text)
        .map_err(|e| JsValue::from_str(&format!("index.json: {e}")))?;
    let layout = SpriteLayout::from_json(&layout_text)
        .map_err(|e| JsValue::from_str(&format!("{layout_url}: {e}")))?;

    let ctx = canvas::opaque_context_2d(&page.canvas)?;
    let pieces = render::build_pieces(&index, &layout)?;
    let viewport = Viewport::new(&index);

    let state = Rc::new(RefCell::new(State::new(
        window, &page, ctx, pieces, viewport,
    )));
    render::draw(&mut state.borrow_mut());

    let listeners = Listeners::attach(state, &page)?;
    LISTENERS.with(|slot| slot.replace(Some(listeners)));
    Ok(())
}
