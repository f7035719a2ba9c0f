/// Zoom change per wheel delta unit while Ctrl is held.
pub const WHEEL_ZOOM_STEP: f64 = 0.05;
/// Pan distance multiplier applied to plain wheel deltas.
pub const WHEEL_PAN_STEP: f64 = 5.0;
/// Zoom increment for the zoom-in/zoom-out buttons.
pub const BUTTON_ZOOM_STEP: f64 = 0.25;

/// Outline drawn around the source image bounds on the table.
pub const OUTLINE_LINE_WIDTH: f64 = 2.0;
pub const OUTLINE_FILL: &str = "rgba(255,255,255,0.2)";
pub const OUTLINE_STROKE: &str = "rgba(255,255,255,0.4)";
