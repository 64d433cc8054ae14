//! Shared constants for the card editor.

/// Default card width in pixels (3.5in at 300 DPI).
pub const CARD_WIDTH_PX: f64 = 1050.0;
/// Default card height in pixels (2in at 300 DPI).
pub const CARD_HEIGHT_PX: f64 = 600.0;

/// Side of a square resize handle.
pub const HANDLE_SIZE: f64 = 12.0;
/// Visual radius of the rotate handle.
pub const ROTATE_RADIUS: f64 = 8.0;
/// Extra hit radius around the rotate handle.
pub const ROTATE_TOLERANCE: f64 = 2.0;
/// Distance from the top edge of the box to the rotate handle center.
pub const ROTATE_OFFSET: f64 = 26.0;
/// Added to the pointer angle so that a handle straight above the center reads 0 degrees.
pub const ROTATE_ANGLE_OFFSET: f64 = 90.0;

/// Text box width per character, as a fraction of the font size.
pub const TEXT_WIDTH_FACTOR: f64 = 0.45;
/// Horizontal padding added to the estimated text width.
pub const TEXT_WIDTH_PADDING: f64 = 32.0;
/// Narrowest text box.
pub const TEXT_MIN_WIDTH: f64 = 80.0;
/// Text box height as a multiple of the font size.
pub const TEXT_HEIGHT_FACTOR: f64 = 1.4;
/// Line advance as a multiple of the font size.
pub const TEXT_LINE_HEIGHT: f64 = 1.2;
/// Gap between a barcode symbol and its human-readable line.
pub const BARCODE_TEXT_GAP: f64 = 8.0;

/// Floor applied to width and height while dragging a resize handle.
pub const MIN_DRAG_SIZE: f64 = 20.0;
/// Smallest font size reachable by dragging.
pub const MIN_FONT_SIZE: f64 = 8.0;
/// Smallest image width/height accepted from the inspector.
pub const MIN_IMAGE_SIZE: f64 = 10.0;
/// Smallest barcode width accepted from the inspector.
pub const MIN_BARCODE_WIDTH: f64 = 40.0;
/// Smallest barcode height accepted from the inspector.
pub const MIN_BARCODE_HEIGHT: f64 = 20.0;

/// Degrees applied by a single rotate keystroke.
pub const ROTATE_STEP_DEG: f64 = 5.0;
/// Default grid pitch.
pub const DEFAULT_GRID_SIZE: u32 = 20;
/// Default number of snapshots kept by the history.
pub const HISTORY_DEPTH: usize = 60;
/// Quiet zone around a QR symbol, in modules.
pub const QR_QUIET_ZONE: usize = 4;
/// Largest side of a rendered barcode symbol, in pixels.
pub const MAX_SYMBOL_PX: u32 = 4096;
/// Largest pixel count of any offscreen raster (card, sheet page, text line).
pub const MAX_RASTER_AREA: u64 = 64 * 1024 * 1024;

/// Template format version written to `meta.version`.
pub const TEMPLATE_VERSION: &str = "1.4.0";
