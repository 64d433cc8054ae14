//! Card style and editor preference edits. Each edit checkpoints.

use cardkit_core::constants::DEFAULT_GRID_SIZE;

use super::properties::{parse_float_prefix, parse_int_prefix};
use super::{EditorSession, SessionEvent};
use crate::template::PatternKind;

const DEFAULT_BORDER_THICKNESS: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum StyleEdit {
    Pattern(PatternKind),
    Color1(String),
    Color2(String),
    BorderOn(bool),
    BorderColor(String),
    /// Raw input; unusable input resets to the default thickness.
    BorderThickness(String),
    DropShadow(bool),
    /// Raw input; unusable input resets to square corners.
    CornerRadius(String),
    /// Raw input; unusable input resets to the default pitch.
    GridSize(String),
    SnapToGrid(bool),
    ShowGrid(bool),
}

impl EditorSession {
    pub fn edit_style(&mut self, edit: StyleEdit) -> Vec<SessionEvent> {
        let style = &mut self.template.style;
        let editor = &mut self.template.editor;
        match edit {
            StyleEdit::Pattern(kind) => style.pattern.kind = kind,
            StyleEdit::Color1(c) => style.pattern.color1 = c,
            StyleEdit::Color2(c) => style.pattern.color2 = c,
            StyleEdit::BorderOn(on) => style.border.on = on,
            StyleEdit::BorderColor(c) => style.border.color = c,
            StyleEdit::BorderThickness(input) => {
                style.border.thickness = parse_float_prefix(&input)
                    .filter(|v| *v > 0.0)
                    .unwrap_or(DEFAULT_BORDER_THICKNESS);
            }
            StyleEdit::DropShadow(on) => style.drop_shadow = on,
            StyleEdit::CornerRadius(input) => {
                style.corner_radius = parse_float_prefix(&input)
                    .filter(|v| *v > 0.0)
                    .unwrap_or(0.0);
            }
            StyleEdit::GridSize(input) => {
                editor.grid_size = parse_int_prefix(&input)
                    .and_then(|v| u32::try_from(v).ok())
                    .filter(|v| *v > 0)
                    .unwrap_or(DEFAULT_GRID_SIZE);
            }
            StyleEdit::SnapToGrid(on) => editor.snap_to_grid = on,
            StyleEdit::ShowGrid(on) => editor.show_grid = on,
        }
        self.checkpoint();
        vec![SessionEvent::RenderNeeded, self.history_event()]
    }
}
