//! Data model and viewport math for the puzzle table proof.
//!
//! Everything here is pure Rust so the scale-to-fit and placement arithmetic
//! can be tested without a browser. The DOM and canvas glue lives in
//! `proof-wasm`.

use std::collections::HashMap;

use serde::Deserialize;

/// Source rectangle within the sprite sheet: `[sx, sy, sw, sh]`.
pub type SpriteRect = [f64; 4];

/// Placement of a single piece on the table, as produced by the cutter.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PieceProperty {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// The `index.json` document: source image and table dimensions plus the
/// table position of every piece. Fetched once and never mutated.
#[derive(Clone, Debug, Deserialize)]
pub struct PuzzleIndex {
    pub image_width: f64,
    pub image_height: f64,
    pub table_width: f64,
    pub table_height: f64,
    #[serde(default)]
    pub piece_properties: Vec<PieceProperty>,
}

impl PuzzleIndex {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Cut coordinates for every piece sprite, keyed by piece id. The JSON keys
/// are strings even though piece ids are numeric.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SpriteLayout(HashMap<String, SpriteRect>);

impl SpriteLayout {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn get(&self, id: u32) -> Option<SpriteRect> {
        self.0.get(&id.to_string()).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Immutable view parameters handed to each draw call, so pieces read a
/// consistent snapshot instead of live shared state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub factor: f64,
    pub zoom: f64,
    pub offset: [f64; 2],
}

impl ViewTransform {
    /// Destination rectangle `[dx, dy, dw, dh]` for a piece placed at
    /// `(x, y)` with size `(w, h)` in table coordinates.
    pub fn place(&self, x: f64, y: f64, w: f64, h: f64) -> [f64; 4] {
        let s = self.factor * self.zoom;
        [
            self.offset[0] + x * s,
            self.offset[1] + y * s,
            w * s,
            h * s,
        ]
    }
}

/// Scale-to-fit viewport over the puzzle table.
///
/// `factor` is the largest scale at which the table fits the container on
/// both axes; it is recomputed on every render so it stays correct across
/// resizes. `zoom` and `offset` are mutated by user input and live for the
/// page session only.
#[derive(Clone, Debug)]
pub struct Viewport {
    image_width: f64,
    image_height: f64,
    table_width: f64,
    table_height: f64,
    factor: f64,
    zoom: f64,
    offset: [f64; 2],
}

impl Viewport {
    pub fn new(index: &PuzzleIndex) -> Self {
        Viewport {
            image_width: index.image_width,
            image_height: index.image_height,
            table_width: index.table_width,
            table_height: index.table_height,
            factor: 1.0,
            zoom: 1.0,
            offset: [0.0, 0.0],
        }
    }

    /// Recompute the scale-to-fit factor for the given container size and
    /// return the canvas buffer dimensions, `ceil(factor * table)` per axis.
    pub fn fit(&mut self, container_width: f64, container_height: f64) -> (u32, u32) {
        let scale_x = container_width / self.table_width;
        let scale_y = container_height / self.table_height;
        self.factor = scale_x.min(scale_y);
        (
            (self.factor * self.table_width).ceil() as u32,
            (self.factor * self.table_height).ceil() as u32,
        )
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Store a new zoom level, shifting the offset so the table's visual
    /// center roughly stays put. The adjustment is an approximation and is
    /// kept that way. The zoom is not clamped: zero or negative values
    /// produce degenerate draws and that is accepted.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.offset[0] -= self.table_width * (zoom - self.zoom) * self.factor * 0.5;
        self.offset[1] -= self.table_height * (zoom - self.zoom) * self.factor * 0.5;
        self.zoom = zoom;
    }

    /// Returns a copy of the pixel offset, never a view into it.
    pub fn offset(&self) -> [f64; 2] {
        self.offset
    }

    pub fn set_offset(&mut self, offset: [f64; 2]) {
        self.offset = offset;
    }

    pub fn snapshot(&self) -> ViewTransform {
        ViewTransform {
            factor: self.factor,
            zoom: self.zoom,
            offset: self.offset,
        }
    }

    /// Bounds of the source image centered on the table, in canvas pixels:
    /// `[min_x, min_y, max_x, max_y]`. The centering term is floored before
    /// scaling.
    pub fn outline_bbox(&self) -> [f64; 4] {
        let left = ((self.table_width - self.image_width) * 0.5).floor();
        let top = ((self.table_height - self.image_height) * 0.5).floor();
        let s = self.zoom * self.factor;
        [
            self.offset[0] + s * left,
            self.offset[1] + s * top,
            self.offset[0] + s * (left + self.image_width),
            self.offset[1] + s * (top + self.image_height),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_JSON: &str = r#"{
        "image_width": 400,
        "image_height": 300,
        "table_width": 800,
        "table_height": 600,
        "puzzle_author": "unknown",
        "piece_properties": [
            {"id": 0, "x": 10, "y": 20, "w": 50, "h": 60, "rotate": 0},
            {"id": 1, "x": 120, "y": 40, "w": 55, "h": 48, "rotate": 0}
        ]
    }"#;

    fn index() -> PuzzleIndex {
        PuzzleIndex::from_json(INDEX_JSON).unwrap()
    }

    #[test]
    fn index_parses_and_ignores_unknown_fields() {
        let idx = index();
        assert_eq!(idx.table_width, 800.0);
        assert_eq!(idx.table_height, 600.0);
        assert_eq!(idx.piece_properties.len(), 2);
        assert_eq!(idx.piece_properties[1].id, 1);
        assert_eq!(idx.piece_properties[1].x, 120.0);
    }

    #[test]
    fn layout_lookup_by_numeric_id() {
        let layout =
            SpriteLayout::from_json(r#"{"0": [0, 0, 64, 64], "7": [64, 0, 60, 58]}"#).unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.get(7), Some([64.0, 0.0, 60.0, 58.0]));
        assert_eq!(layout.get(3), None);
    }

    #[test]
    fn layout_entry_must_have_four_components() {
        assert!(SpriteLayout::from_json(r#"{"0": [12, 34]}"#).is_err());
    }

    #[test]
    fn factor_is_min_of_axis_scales() {
        let mut vp = Viewport::new(&index());
        vp.fit(400.0, 600.0);
        assert_eq!(vp.factor(), 0.5);
        vp.fit(800.0, 150.0);
        assert_eq!(vp.factor(), 0.25);
    }

    #[test]
    fn canvas_buffer_uses_ceil() {
        let mut vp = Viewport::new(&index());
        // factor = min(401/800, 301/600) = 0.50125
        let (w, h) = vp.fit(401.0, 301.0);
        assert_eq!((w, h), (401, 301));
    }

    #[test]
    fn offset_reads_back_as_a_copy() {
        let mut vp = Viewport::new(&index());
        vp.set_offset([17.5, -3.0]);
        let copy = vp.offset();
        assert_eq!(copy, [17.5, -3.0]);
        let mut copy = copy;
        copy[0] = 999.0;
        assert_eq!(vp.offset(), [17.5, -3.0]);
    }

    #[test]
    fn identity_view_places_pieces_at_scaled_positions() {
        let idx = index();
        let mut vp = Viewport::new(&idx);
        vp.fit(400.0, 300.0);
        let view = vp.snapshot();
        assert_eq!(view.zoom, 1.0);
        assert_eq!(view.offset, [0.0, 0.0]);
        for p in &idx.piece_properties {
            let [dx, dy, dw, dh] = view.place(p.x, p.y, p.w, p.h);
            assert_eq!(dx, p.x * 0.5);
            assert_eq!(dy, p.y * 0.5);
            assert_eq!(dw, p.w * 0.5);
            assert_eq!(dh, p.h * 0.5);
        }
    }

    #[test]
    fn half_scale_container_centers_the_outline() {
        let mut vp = Viewport::new(&index());
        let (w, h) = vp.fit(400.0, 300.0);
        assert_eq!(vp.factor(), 0.5);
        assert_eq!((w, h), (400, 300));
        let [min_x, min_y, max_x, max_y] = vp.outline_bbox();
        assert_eq!([min_x, min_y, max_x, max_y], [100.0, 75.0, 300.0, 225.0]);
        // equal margins on both sides of the canvas
        assert_eq!(min_x, w as f64 - max_x);
        assert_eq!(min_y, h as f64 - max_y);
    }

    #[test]
    fn zoom_step_shifts_offset_toward_center() {
        let mut vp = Viewport::new(&index());
        vp.fit(400.0, 300.0);
        vp.set_zoom(1.25);
        // -(table * 0.25 * factor * 0.5) per axis
        assert_eq!(vp.offset(), [-50.0, -37.5]);
        assert_eq!(vp.zoom(), 1.25);
    }

    #[test]
    fn zoom_is_not_clamped() {
        let mut vp = Viewport::new(&index());
        vp.fit(400.0, 300.0);
        vp.set_zoom(-0.5);
        assert_eq!(vp.zoom(), -0.5);
        let [.., dw, dh] = vp.snapshot().place(0.0, 0.0, 50.0, 60.0);
        assert!(dw < 0.0 && dh < 0.0);
    }

    #[test]
    fn refit_preserves_zoom_and_offset() {
        let mut vp = Viewport::new(&index());
        vp.fit(400.0, 300.0);
        vp.set_zoom(1.25);
        vp.set_offset([5.0, 6.0]);
        vp.fit(200.0, 300.0);
        assert_eq!(vp.factor(), 0.25);
        assert_eq!(vp.zoom(), 1.25);
        assert_eq!(vp.offset(), [5.0, 6.0]);
    }
}
