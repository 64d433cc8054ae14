//! System font lookup for text rendering.
//!
//! Card templates name fonts the way a stylesheet does ("Arial", "serif").
//! Each name expands to a fallback list that `fontdb` resolves against the
//! installed faces; a resolved face is parsed once and kept for the life of
//! the process. There is no bundled face, so a lookup can fail on a machine
//! without fonts and callers skip glyph drawing in that case.

use fontdb::{Database, Family, Query, Stretch, Style, Weight, ID};
use rusttype::Font;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};
use tracing::debug;

/// Template names resolve to face ids; each face is parsed and leaked once
/// however many names point at it.
#[derive(Default)]
struct FaceCache {
    names: HashMap<(String, bool), Option<ID>>,
    faces: HashMap<ID, Option<&'static Font<'static>>>,
}

/// Metric-compatible stand-ins commonly installed on Linux.
const SANS_STANDINS: [&str; 3] = ["Liberation Sans", "Arimo", "DejaVu Sans"];
const SERIF_STANDINS: [&str; 3] = ["Liberation Serif", "Tinos", "DejaVu Serif"];

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!("Font database loaded with {} faces", db.len());
        db
    })
}

/// Ordered candidates for a template font name, always ending in a generic family.
fn fallbacks(family: &str) -> Vec<Family<'_>> {
    let name = family.trim();
    match name.to_ascii_lowercase().as_str() {
        "" | "sans" | "sans-serif" | "system-ui" => vec![Family::SansSerif],
        "serif" => vec![Family::Serif],
        "monospace" => vec![Family::Monospace],
        "times" | "times new roman" | "georgia" => {
            let mut list = vec![Family::Name(name)];
            list.extend(SERIF_STANDINS.iter().map(|n| Family::Name(n)));
            list.push(Family::Serif);
            list
        }
        _ => {
            let mut list = vec![Family::Name(name)];
            list.extend(SANS_STANDINS.iter().map(|n| Family::Name(n)));
            list.push(Family::SansSerif);
            list
        }
    }
}

fn resolve(family: &str, bold: bool) -> Option<ID> {
    let families = fallbacks(family);
    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    db().query(&query)
}

fn parse(id: ID) -> Option<Font<'static>> {
    db().with_face_data(id, |data, index| {
        Font::try_from_vec_and_index(data.to_vec(), index)
    })
    .flatten()
}

/// Face for a template font name and weight class, if any face is installed.
pub fn get_font_for(family: &str, bold: bool) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<FaceCache>> = OnceLock::new();
    let mut cache = CACHE
        .get_or_init(|| Mutex::new(FaceCache::default()))
        .lock()
        .unwrap_or_else(|p| p.into_inner());

    let key = (family.trim().to_ascii_lowercase(), bold);
    let id = (*cache.names.entry(key).or_insert_with(|| {
        let id = resolve(family, bold);
        if id.is_none() {
            debug!("No installed face for '{}' (bold: {})", family, bold);
        }
        id
    }))?;

    if let Some(font) = cache.faces.get(&id) {
        return *font;
    }
    let font = parse(id).map(|f| &*Box::leak(Box::new(f)));
    cache.faces.insert(id, font);
    font
}
