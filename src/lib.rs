//! # CardKit
//!
//! Business card layout editor: place images, text and barcodes on a card,
//! move/resize/rotate them with undo, and render the result to PNG.
//!
//! ## Architecture
//!
//! CardKit is organized as a workspace with multiple crates:
//!
//! 1. **cardkit-core** - Error types, card constants, handle metrics
//! 2. **cardkit-designer** - Element model, hit-testing, history, editor session, renderer
//! 3. **cardkit-settings** - Configuration files and default locations
//! 4. **cardkit** - Command-line binary that integrates all crates
//!
//! ## Features
//!
//! - **Rotated hit-testing**: move, corner resize and rotate handles on rotated elements
//! - **Snapshot undo/redo**: bounded history with autosave
//! - **Barcodes**: CODE128 and QR symbols, QR generated off the edit path
//! - **Bulk output**: per-record substitution and sheet imposition with crop marks

pub use cardkit_designer as designer;
pub use cardkit_settings as settings;

pub use cardkit_core::{CodecError, DocumentError, Error, HandleMetrics, Result};

pub use cardkit_designer::{
    render_card, render_sheets, save_png, BarcodeFormat, CardRecord, EditorSession, Element,
    ElementKind, FileSessionStore, Point, RenderOptions, SessionEvent, SheetLayout, Template,
};

pub use cardkit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so command output on stdout stays clean
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
