use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use proof_core::{PuzzleIndex, SpriteLayout, SpriteRect, ViewTransform};

use crate::canvas::{set_fill_style, set_stroke_style};
use crate::constants::{OUTLINE_FILL, OUTLINE_LINE_WIDTH, OUTLINE_STROKE};
use crate::state::State;

/// One puzzle piece: a fixed cut rectangle in the sprite sheet and its
/// destination placement on the table. Built once at load, alive until page
/// unload.
pub struct Piece {
    pub id: u32,
    pub src: SpriteRect,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Piece {
    /// Blit the sprite cut into the destination rectangle for the given view.
    ///
    /// TODO: cut pieces out of size-100/sprite_with_padding.jpg using the
    /// inlined svg clip paths instead of blitting the rectangular sprite.
    pub fn render(
        &self,
        ctx: &CanvasRenderingContext2d,
        sprite: &HtmlImageElement,
        view: &ViewTransform,
    ) -> Result<(), JsValue> {
        let [dx, dy, dw, dh] = view.place(self.x, self.y, self.width, self.height);
        ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            sprite,
            self.src[0],
            self.src[1],
            self.src[2],
            self.src[3],
            dx,
            dy,
            dw,
            dh,
        )
    }
}

/// Pair every index entry with its sprite cut. A piece id with no layout
/// entry fails the build; the original silently drew garbage there.
pub fn build_pieces(index: &PuzzleIndex, layout: &SpriteLayout) -> Result<Vec<Piece>, JsValue> {
    index
        .piece_properties
        .iter()
        .map(|p| {
            let src = layout.get(p.id).ok_or_else(|| {
                JsValue::from_str(&format!("no sprite layout entry for piece {}", p.id))
            })?;
            Ok(Piece {
                id: p.id,
                src,
                x: p.x,
                y: p.y,
                width: p.w,
                height: p.h,
            })
        })
        .collect()
}

/// Full redraw: clear, refit to the live container size, outline the source
/// image bounds, then blit every piece in input order. Later pieces occlude
/// earlier ones; there is no other z-order.
pub fn draw(state: &mut State) {
    let width = state.canvas.width() as f64;
    let height = state.canvas.height() as f64;
    state.ctx.clear_rect(0.0, 0.0, width, height);

    let rect = state.container.get_bounding_client_rect();
    let (buf_w, buf_h) = state.viewport.fit(rect.width(), rect.height());
    // resizing the backing buffer clears the bitmap
    if state.canvas.width() != buf_w {
        state.canvas.set_width(buf_w);
    }
    if state.canvas.height() != buf_h {
        state.canvas.set_height(buf_h);
    }

    draw_table_outline(&state.ctx, OUTLINE_LINE_WIDTH, state.viewport.outline_bbox());

    let view = state.viewport.snapshot();
    for piece in &state.pieces {
        let _ = piece.render(&state.ctx, &state.sprite, &view);
    }
}

fn draw_table_outline(ctx: &CanvasRenderingContext2d, line_width: f64, bbox: [f64; 4]) {
    let [min_x, min_y, max_x, max_y] = bbox;
    ctx.save();
    set_fill_style(ctx, OUTLINE_FILL);
    set_stroke_style(ctx, OUTLINE_STROKE);
    ctx.set_line_width(line_width);
    ctx.fill_rect(min_x, min_y, max_x - min_x, max_y - min_y);
    ctx.stroke_rect(min_x, min_y, max_x - min_x, max_y - min_y);
    ctx.restore();
}
