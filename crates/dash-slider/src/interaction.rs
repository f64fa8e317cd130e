//! Pointer interaction controller
//!
//! Idle/Dragging state machine shared by mouse and touch input. Offsets are
//! handle-centre positions on the track; pointer coordinates may be in any
//! space as long as press and move use the same one, since only deltas matter.

use crate::layout::Layout;
use crate::nearest::nearest_dash;

/// Which pointer drives an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSource {
    Mouse,
    /// Touch with its finger id
    Touch(u64),
}

/// Live drag, the document-scoped subscription for move/release events
///
/// Exists only between press and release; dropping it is the deregistration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub source: PointerSource,
    /// Pointer x at press
    origin_x: f32,
    /// Handle offset at press
    origin_offset: f32,
    /// Where the handle is currently drawn
    handle_offset: f32,
    /// Dash index under the handle, `None` until the first in-bounds move
    provisional: Option<usize>,
}

impl DragSession {
    pub fn handle_offset(&self) -> f32 {
        self.handle_offset
    }

    pub fn provisional(&self) -> Option<usize> {
        self.provisional
    }
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Effect of a move event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// Not dragging, or the event came from another pointer
    Ignored,
    /// Handle follows the pointer, label highlight moves to `index`
    Preview { offset: f32, index: usize },
    /// Candidate left the track, handle snaps to the dash at `index`
    SnapBack { offset: f32, index: usize },
}

/// Drives press/move/release for one slider
#[derive(Debug, Clone, Default)]
pub struct Controller {
    state: InteractionState,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging(_))
    }

    /// Current drag session, if any
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            InteractionState::Dragging(session) => Some(session),
            InteractionState::Idle => None,
        }
    }

    /// Press on the handle: Idle → Dragging
    ///
    /// Returns false (and changes nothing) if a drag is already running.
    pub fn press(&mut self, source: PointerSource, pointer_x: f32, handle_offset: f32) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.state = InteractionState::Dragging(DragSession {
            source,
            origin_x: pointer_x,
            origin_offset: handle_offset,
            handle_offset,
            provisional: None,
        });
        true
    }

    /// Pointer moved anywhere on screen
    pub fn drag(&mut self, source: PointerSource, pointer_x: f32, layout: &Layout) -> DragUpdate {
        let InteractionState::Dragging(session) = &mut self.state else {
            return DragUpdate::Ignored;
        };
        if session.source != source {
            return DragUpdate::Ignored;
        }

        let candidate = session.origin_offset + (pointer_x - session.origin_x);
        let (lo, hi) = layout.offset_bounds();

        if candidate >= lo && candidate <= hi {
            let Some(dash) = nearest_dash(&layout.dashes, candidate) else {
                return DragUpdate::Ignored;
            };
            session.handle_offset = candidate;
            session.provisional = Some(dash.index);
            DragUpdate::Preview {
                offset: candidate,
                index: dash.index,
            }
        } else {
            // Last valid provisional value, or the committed one before any valid move
            let index = session.provisional.unwrap_or(layout.active_index);
            let offset = layout.offset_of(index).unwrap_or(layout.handle_offset);
            session.handle_offset = offset;
            DragUpdate::SnapBack { offset, index }
        }
    }

    /// Pointer released: Dragging → Idle
    ///
    /// Returns the dash index nearest to the final handle offset, which the
    /// caller commits. `None` if not dragging or the release came from another
    /// pointer.
    pub fn release(&mut self, source: PointerSource, layout: &Layout) -> Option<usize> {
        let InteractionState::Dragging(session) = self.state else {
            return None;
        };
        if session.source != source {
            return None;
        }
        self.state = InteractionState::Idle;
        nearest_dash(&layout.dashes, session.handle_offset).map(|d| d.index)
    }

    /// Click/tap on the track at `track_x` (track coordinates)
    ///
    /// Independent of dragging: resolves immediately to the nearest dash index.
    pub fn click(&self, track_x: f32, layout: &Layout) -> Option<usize> {
        nearest_dash(&layout.dashes, track_x).map(|d| d.index)
    }

    /// Drop any live drag (resize, structural change, component teardown)
    pub fn teardown(&mut self) {
        if self.is_dragging() {
            log::debug!("interaction: dropping live drag session");
        }
        self.state = InteractionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolvedOptions;
    use crate::nearest::nearest_value;
    use crate::values::ValueSet;

    fn layout(selection: f64) -> Layout {
        // 10 values over 900px: one dash every 100px
        Layout::compute(&ValueSet::from_range(8, 17).unwrap(), 900.0, &ResolvedOptions::default(), Some(selection))
            .unwrap()
    }

    #[test]
    fn test_press_move_release_commits_nearest() {
        let layout = layout(12.0);
        let mut controller = Controller::new();

        assert!(controller.press(PointerSource::Mouse, 1000.0, layout.handle_offset));
        assert_eq!(
            controller.drag(PointerSource::Mouse, 1140.0, &layout),
            DragUpdate::Preview { offset: 540.0, index: 5 }
        );
        assert_eq!(
            controller.drag(PointerSource::Mouse, 1160.0, &layout),
            DragUpdate::Preview { offset: 560.0, index: 6 }
        );

        let index = controller.release(PointerSource::Mouse, &layout).unwrap();
        assert_eq!(index, 6);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_out_of_bounds_snaps_to_last_valid() {
        let layout = layout(12.0);
        let mut controller = Controller::new();
        controller.press(PointerSource::Mouse, 0.0, layout.handle_offset);

        // Before any valid move: snap to the committed value
        assert_eq!(
            controller.drag(PointerSource::Mouse, -500.0, &layout),
            DragUpdate::SnapBack { offset: 400.0, index: 4 }
        );

        controller.drag(PointerSource::Mouse, 420.0, &layout);
        assert_eq!(
            controller.drag(PointerSource::Mouse, 600.0, &layout),
            DragUpdate::SnapBack { offset: 800.0, index: 8 }
        );
        assert_eq!(controller.session().unwrap().handle_offset(), 800.0);

        assert_eq!(controller.release(PointerSource::Mouse, &layout), Some(8));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let layout = layout(12.0);
        let mut controller = Controller::new();
        controller.press(PointerSource::Mouse, 0.0, layout.handle_offset);
        assert_eq!(
            controller.drag(PointerSource::Mouse, 500.0, &layout),
            DragUpdate::Preview { offset: 900.0, index: 9 }
        );
        assert_eq!(
            controller.drag(PointerSource::Mouse, -400.0, &layout),
            DragUpdate::Preview { offset: 0.0, index: 0 }
        );
    }

    #[test]
    fn test_release_without_drag_is_ignored() {
        let layout = layout(12.0);
        let mut controller = Controller::new();
        assert_eq!(controller.release(PointerSource::Mouse, &layout), None);
        assert_eq!(controller.drag(PointerSource::Mouse, 10.0, &layout), DragUpdate::Ignored);
    }

    #[test]
    fn test_press_and_release_without_move_keeps_value() {
        let layout = layout(15.0);
        let mut controller = Controller::new();
        controller.press(PointerSource::Touch(3), 50.0, layout.handle_offset);
        assert_eq!(controller.release(PointerSource::Touch(3), &layout), Some(7));
    }

    #[test]
    fn test_other_pointer_is_ignored() {
        let layout = layout(12.0);
        let mut controller = Controller::new();
        controller.press(PointerSource::Touch(1), 0.0, layout.handle_offset);

        assert_eq!(controller.drag(PointerSource::Touch(2), 100.0, &layout), DragUpdate::Ignored);
        assert_eq!(controller.drag(PointerSource::Mouse, 100.0, &layout), DragUpdate::Ignored);
        assert_eq!(controller.release(PointerSource::Mouse, &layout), None);
        assert!(controller.is_dragging());
        assert!(!controller.press(PointerSource::Mouse, 0.0, 0.0));

        assert_eq!(controller.release(PointerSource::Touch(1), &layout), Some(4));
    }

    #[test]
    fn test_teardown_drops_session() {
        let layout = layout(12.0);
        let mut controller = Controller::new();
        controller.press(PointerSource::Mouse, 0.0, layout.handle_offset);
        controller.teardown();
        assert_eq!(controller.state(), &InteractionState::Idle);
        assert_eq!(controller.release(PointerSource::Mouse, &layout), None);
    }

    #[test]
    fn test_release_matches_nearest_of_final_offset() {
        let layout = layout(8.0);
        let moves = [13.0, 77.0, 151.0, 149.0, 1200.0, 333.0, 649.0, 651.0, -3.0, 449.5];
        for &last in &moves {
            let mut controller = Controller::new();
            controller.press(PointerSource::Mouse, 0.0, layout.handle_offset);
            for &x in &moves {
                controller.drag(PointerSource::Mouse, x, &layout);
            }
            controller.drag(PointerSource::Mouse, last, &layout);
            let final_offset = controller.session().unwrap().handle_offset();
            let index = controller.release(PointerSource::Mouse, &layout).unwrap();
            assert_eq!(Some(layout.dashes[index].value), nearest_value(&layout.dashes, final_offset));
        }
    }

    #[test]
    fn test_click_resolves_nearest() {
        let layout = layout(12.0);
        let controller = Controller::new();
        assert_eq!(controller.click(149.0, &layout), Some(1));
        assert_eq!(controller.click(150.0, &layout), Some(1));
        assert_eq!(controller.click(151.0, &layout), Some(2));
    }
}
