//! Pointer gesture state machine.
//!
//! `Idle` until a pointer-down lands on an element, then `Dragging` until
//! pointer-up (one checkpoint) or cancel (no checkpoint). Pointer-move only
//! ever touches the element captured at pointer-down, addressed by index.

use tracing::debug;

use super::{EditorSession, SessionEvent};
use crate::geometry::{hit_test, to_local, Corner, HitKind};
use crate::model::{Element, ElementKind, Point};

/// Anchor values restored by a cancel or a return to the start point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeAnchor {
    /// Base width/height of an image or barcode.
    Box { w: f64, h: f64 },
    /// Font size of a text element.
    Font { size: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragKind {
    Move { origin: Point },
    Resize { corner: Corner, anchor: SizeAnchor },
    Rotate { origin_rotation: f64 },
}

/// An active gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct Drag {
    /// Id of the element being dragged.
    pub target: String,
    /// Paint-order index captured at pointer-down.
    pub index: usize,
    /// Pointer position at pointer-down.
    pub pointer: Point,
    pub kind: DragKind,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Drag),
}

fn size_anchor(el: &Element) -> SizeAnchor {
    match &el.kind {
        ElementKind::Text(text) => SizeAnchor::Font {
            size: text.font_size,
        },
        ElementKind::Image(img) => SizeAnchor::Box { w: img.w, h: img.h },
        ElementKind::Barcode(bc) => SizeAnchor::Box { w: bc.w, h: bc.h },
    }
}

fn set_size(el: &mut Element, w: f64, h: f64) {
    match &mut el.kind {
        ElementKind::Image(img) => {
            img.w = w;
            img.h = h;
        }
        ElementKind::Barcode(bc) => {
            bc.w = w;
            bc.h = h;
        }
        ElementKind::Text(_) => {}
    }
}

/// Put back whatever the gesture may have changed.
fn restore_anchor(el: &mut Element, kind: &DragKind) {
    match *kind {
        DragKind::Move { origin } => {
            el.x = origin.x;
            el.y = origin.y;
        }
        DragKind::Resize { anchor, .. } => match anchor {
            SizeAnchor::Font { size } => {
                if let Some(text) = el.as_text_mut() {
                    text.font_size = size;
                }
            }
            SizeAnchor::Box { w, h } => set_size(el, w, h),
        },
        DragKind::Rotate { origin_rotation } => el.rotation = origin_rotation,
    }
}

impl EditorSession {
    /// Begin a gesture at a card point.
    ///
    /// A miss clears the selection. A hit selects the element and captures
    /// the anchor for the handle that was hit.
    pub fn pointer_down(&mut self, p: Point) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.is_dragging() {
            // A lost pointer-up; close the old gesture first.
            events.extend(self.pointer_up());
        }

        let Some(hit) = hit_test(&self.template.elements, p, &self.metrics) else {
            self.selected = None;
            events.push(SessionEvent::SelectionChanged(None));
            events.push(SessionEvent::RenderNeeded);
            return events;
        };

        let el = &self.template.elements[hit.index];
        let kind = match hit.kind {
            HitKind::Move => DragKind::Move {
                origin: el.center(),
            },
            HitKind::Resize(corner) => DragKind::Resize {
                corner,
                anchor: size_anchor(el),
            },
            HitKind::Rotate => DragKind::Rotate {
                origin_rotation: el.rotation,
            },
        };
        debug!("Drag start on '{}' ({:?})", hit.id, hit.kind);

        self.selected = Some(hit.id.clone());
        self.drag = DragState::Dragging(Drag {
            target: hit.id.clone(),
            index: hit.index,
            pointer: p,
            kind,
        });
        events.push(SessionEvent::SelectionChanged(Some(hit.id)));
        events.push(SessionEvent::RenderNeeded);
        events
    }

    /// Continue the active gesture. Never checkpoints.
    pub fn pointer_move(&mut self, p: Point) -> Vec<SessionEvent> {
        let DragState::Dragging(drag) = &self.drag else {
            return Vec::new();
        };
        let drag = drag.clone();
        let snap_prefs = self.template.editor.clone();
        let metrics = self.metrics;

        let Some(el) = self
            .template
            .elements
            .get_mut(drag.index)
            .filter(|e| e.id == drag.target)
        else {
            self.drag = DragState::Idle;
            return Vec::new();
        };

        if p == drag.pointer {
            restore_anchor(el, &drag.kind);
            return vec![SessionEvent::RenderNeeded];
        }

        match drag.kind {
            DragKind::Move { origin } => {
                el.x = snap_prefs.snap(origin.x + (p.x - drag.pointer.x));
                el.y = snap_prefs.snap(origin.y + (p.y - drag.pointer.y));
            }
            DragKind::Resize { .. } => {
                let local = to_local(el, p);
                let new_w = (local.x.abs() * 2.0).max(metrics.min_drag_size);
                let new_h = (local.y.abs() * 2.0).max(metrics.min_drag_size);
                if let Some(text) = el.as_text_mut() {
                    text.font_size =
                        (new_h / metrics.text_height_factor).round().max(metrics.min_font_size);
                } else {
                    set_size(el, new_w, new_h);
                }
            }
            DragKind::Rotate { .. } => {
                let angle = (p.y - el.y).atan2(p.x - el.x).to_degrees();
                el.rotation = (angle + metrics.rotate_angle_offset).round();
            }
        }

        vec![SessionEvent::RenderNeeded]
    }

    /// Finish the gesture and record exactly one checkpoint.
    pub fn pointer_up(&mut self) -> Vec<SessionEvent> {
        let DragState::Dragging(drag) = std::mem::take(&mut self.drag) else {
            return Vec::new();
        };
        debug!("Drag end on '{}'", drag.target);
        self.checkpoint();
        vec![SessionEvent::RenderNeeded, self.history_event()]
    }

    /// Abort the gesture, restoring the element as it was at pointer-down.
    pub fn cancel_drag(&mut self) -> Vec<SessionEvent> {
        let DragState::Dragging(drag) = std::mem::take(&mut self.drag) else {
            return Vec::new();
        };
        if let Some(el) = self
            .template
            .elements
            .get_mut(drag.index)
            .filter(|e| e.id == drag.target)
        {
            restore_anchor(el, &drag.kind);
        }
        debug!("Drag cancelled on '{}'", drag.target);
        vec![SessionEvent::RenderNeeded]
    }
}
