// input.rs — 把 winit 的鼠标/触摸/滚轮事件翻译成视角操作

use winit::dpi::{LogicalPosition, PhysicalPosition};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};

/// Browser-style pixels per wheel line.
const PIXELS_PER_LINE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerInput {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    Wheel { delta_y: f32 },
}

/// Tracks the cursor and the active touch between events.
#[derive(Debug, Default)]
pub struct InputTracker {
    cursor: Option<LogicalPosition<f32>>,
    mouse_dragging: bool,
    active_touch: Option<u64>,
}

impl InputTracker {
    /// Positions and wheel deltas come out in logical pixels; `scale_factor`
    /// is the window's current DPI scale.
    ///
    /// `ui_claimed` is true when the UI consumed the event. Presses and wheel
    /// ticks are then dropped, but moves and releases still reach the viewer
    /// so a drag that wanders over a panel keeps tracking and ends cleanly.
    pub fn translate(
        &mut self,
        event: &WindowEvent<'_>,
        scale_factor: f64,
        ui_claimed: bool,
    ) -> Option<ViewerInput> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let pos: LogicalPosition<f32> = position.to_logical(scale_factor);
                self.cursor = Some(pos);
                self.mouse_dragging
                    .then_some(ViewerInput::PointerMove { x: pos.x, y: pos.y })
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed if !ui_claimed && self.active_touch.is_none() => {
                    let pos = self.cursor?;
                    self.mouse_dragging = true;
                    Some(ViewerInput::PointerDown { x: pos.x, y: pos.y })
                }
                ElementState::Released if self.mouse_dragging => {
                    self.mouse_dragging = false;
                    Some(ViewerInput::PointerUp)
                }
                _ => None,
            },
            WindowEvent::MouseWheel { delta, .. } if !ui_claimed => Some(ViewerInput::Wheel {
                delta_y: wheel_delta_y(*delta, scale_factor),
            }),
            WindowEvent::Touch(touch) => {
                let LogicalPosition { x, y } = touch.location.to_logical::<f32>(scale_factor);
                match touch.phase {
                    TouchPhase::Started
                        if !ui_claimed && self.active_touch.is_none() && !self.mouse_dragging =>
                    {
                        self.active_touch = Some(touch.id);
                        Some(ViewerInput::PointerDown { x, y })
                    }
                    TouchPhase::Moved if self.active_touch == Some(touch.id) => {
                        Some(ViewerInput::PointerMove { x, y })
                    }
                    TouchPhase::Ended | TouchPhase::Cancelled if self.active_touch == Some(touch.id) => {
                        self.active_touch = None;
                        Some(ViewerInput::PointerUp)
                    }
                    _ => None,
                }
            }
            // 失去焦点时不会收到松开事件
            WindowEvent::Focused(false) if self.mouse_dragging || self.active_touch.is_some() => {
                self.mouse_dragging = false;
                self.active_touch = None;
                Some(ViewerInput::PointerUp)
            }
            _ => None,
        }
    }

    /// Forgets the cursor, any drag and any active touch.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Converts a winit wheel delta to the browser `deltaY` convention:
/// logical pixels, positive when scrolling down (zoom out).
pub fn wheel_delta_y(delta: MouseScrollDelta, scale_factor: f64) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
        MouseScrollDelta::PixelDelta(pos) => -pos.to_logical::<f32>(scale_factor).y,
    }
}

#[cfg(test)]
#[allow(deprecated)]
pub(crate) mod tests {
    use super::*;
    use winit::event::{DeviceId, ModifiersState, Touch};

    fn device() -> DeviceId {
        unsafe { DeviceId::dummy() }
    }

    pub(crate) fn moved(x: f64, y: f64) -> WindowEvent<'static> {
        WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(x, y),
            modifiers: ModifiersState::empty(),
        }
    }

    pub(crate) fn button(state: ElementState) -> WindowEvent<'static> {
        WindowEvent::MouseInput {
            device_id: device(),
            state,
            button: MouseButton::Left,
            modifiers: ModifiersState::empty(),
        }
    }

    fn touch(id: u64, phase: TouchPhase, x: f64, y: f64) -> WindowEvent<'static> {
        WindowEvent::Touch(Touch {
            device_id: device(),
            phase,
            location: PhysicalPosition::new(x, y),
            force: None,
            id,
        })
    }

    #[test]
    fn test_wheel_direction() {
        assert_eq!(wheel_delta_y(MouseScrollDelta::LineDelta(0.0, -1.0), 1.0), 100.0);
        assert_eq!(wheel_delta_y(MouseScrollDelta::LineDelta(0.0, 2.0), 2.0), -200.0);
        assert_eq!(
            wheel_delta_y(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0)), 1.0),
            40.0
        );
    }

    #[test]
    fn test_mouse_drag_sequence() {
        let mut input = InputTracker::default();
        assert_eq!(input.translate(&moved(10.0, 20.0), 1.0, false), None);
        assert_eq!(
            input.translate(&button(ElementState::Pressed), 1.0, false),
            Some(ViewerInput::PointerDown { x: 10.0, y: 20.0 })
        );
        assert_eq!(
            input.translate(&moved(15.0, 25.0), 1.0, false),
            Some(ViewerInput::PointerMove { x: 15.0, y: 25.0 })
        );
        assert_eq!(
            input.translate(&button(ElementState::Released), 1.0, false),
            Some(ViewerInput::PointerUp)
        );
        assert_eq!(input.translate(&moved(30.0, 30.0), 1.0, false), None);
    }

    #[test]
    fn test_press_on_ui_is_ignored_but_release_is_not() {
        let mut input = InputTracker::default();
        input.translate(&moved(1.0, 1.0), 1.0, false);
        assert_eq!(input.translate(&button(ElementState::Pressed), 1.0, true), None);

        input.translate(&button(ElementState::Pressed), 1.0, false);
        assert_eq!(
            input.translate(&moved(2.0, 2.0), 1.0, true),
            Some(ViewerInput::PointerMove { x: 2.0, y: 2.0 })
        );
        assert_eq!(
            input.translate(&button(ElementState::Released), 1.0, true),
            Some(ViewerInput::PointerUp)
        );
    }

    #[test]
    fn test_first_touch_drives_drag() {
        let mut input = InputTracker::default();
        assert_eq!(
            input.translate(&touch(7, TouchPhase::Started, 5.0, 6.0), 1.0, false),
            Some(ViewerInput::PointerDown { x: 5.0, y: 6.0 })
        );
        // A second finger is ignored.
        assert_eq!(input.translate(&touch(8, TouchPhase::Started, 0.0, 0.0), 1.0, false), None);
        assert_eq!(input.translate(&touch(8, TouchPhase::Moved, 1.0, 1.0), 1.0, false), None);
        assert_eq!(
            input.translate(&touch(7, TouchPhase::Moved, 9.0, 9.0), 1.0, false),
            Some(ViewerInput::PointerMove { x: 9.0, y: 9.0 })
        );
        assert_eq!(
            input.translate(&touch(7, TouchPhase::Ended, 9.0, 9.0), 1.0, false),
            Some(ViewerInput::PointerUp)
        );
    }

    #[test]
    fn test_focus_loss_ends_drag() {
        let mut input = InputTracker::default();
        input.translate(&moved(1.0, 1.0), 1.0, false);
        input.translate(&button(ElementState::Pressed), 1.0, false);
        assert_eq!(
            input.translate(&WindowEvent::Focused(false), 1.0, false),
            Some(ViewerInput::PointerUp)
        );
        assert_eq!(input.translate(&WindowEvent::Focused(false), 1.0, false), None);
    }

    #[test]
    fn test_drag_on_hidpi_uses_logical_pixels() {
        let scale = 2.0;
        let at = |x: f64, y: f64| {
            let p: PhysicalPosition<f64> = LogicalPosition::new(x, y).to_physical(scale);
            moved(p.x, p.y)
        };

        let mut input = InputTracker::default();
        let mut viewer = crate::panorama::PanoramaViewer3D::new();
        for event in [
            at(300.0, 200.0),
            button(ElementState::Pressed),
            at(200.0, 250.0),
            button(ElementState::Released),
        ] {
            match input.translate(&event, scale, false) {
                Some(ViewerInput::PointerDown { x, y }) => viewer.pointer_down(x, y),
                Some(ViewerInput::PointerMove { x, y }) => viewer.pointer_move(x, y),
                Some(ViewerInput::PointerUp) => viewer.pointer_up(),
                _ => {}
            }
        }
        assert!((viewer.orientation.lon - 10.0).abs() < 1e-3);
        assert!((viewer.orientation.lat - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_touch_and_pixel_wheel_on_hidpi() {
        let mut input = InputTracker::default();
        assert_eq!(
            input.translate(&touch(1, TouchPhase::Started, 40.0, 60.0), 2.0, false),
            Some(ViewerInput::PointerDown { x: 20.0, y: 30.0 })
        );
        assert_eq!(
            wheel_delta_y(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0)), 2.0),
            20.0
        );
    }

    #[test]
    fn test_reset_forgets_drag() {
        let mut input = InputTracker::default();
        input.translate(&moved(1.0, 1.0), 1.0, false);
        input.translate(&button(ElementState::Pressed), 1.0, false);
        input.reset();
        assert_eq!(input.translate(&moved(5.0, 5.0), 1.0, false), None);
        // No cursor known yet, so a press has nowhere to anchor.
        assert_eq!(input.translate(&button(ElementState::Pressed), 1.0, false), None);
    }
}
