//! Per-frame input routing for [`FpsCamera`].

use voxview_shared::Vec2;

use super::{FpsCamera, MoveDirection};

/// Input gathered by the windowing collaborator for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous update.
    pub elapsed_secs: f64,
    /// Absolute pointer position, if the pointer is over the window.
    pub pointer: Option<Vec2>,
    /// Directional actions held this frame.
    pub actions: Vec<MoveDirection>,
    /// Whether the window has focus.
    pub focused: bool,
    /// Whether the user asked to close the viewer.
    pub exit_requested: bool,
}

impl FrameInput {
    /// A focused frame with no input.
    #[must_use]
    pub fn idle(elapsed_secs: f64) -> Self {
        Self {
            elapsed_secs,
            focused: true,
            ..Self::default()
        }
    }
}

/// Applies [`FrameInput`] to a camera.
///
/// Unfocused frames are skipped entirely. When focus comes back the pointer
/// guard is re-armed so the jump from wherever the pointer went does not spin
/// the view.
#[derive(Debug, Default)]
pub struct CameraController {
    was_focused: bool,
}

impl CameraController {
    /// Creates a controller that treats the first focused frame as newly focused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one frame of input. Returns false if the frame was skipped.
    pub fn update(&mut self, camera: &mut FpsCamera, input: &FrameInput) -> bool {
        if !input.focused {
            self.was_focused = false;
            return false;
        }
        if !self.was_focused {
            camera.reset_pointer();
            self.was_focused = true;
        }

        let dt = input.elapsed_secs as f32;
        for &direction in &input.actions {
            camera.move_in(direction, dt);
        }

        if let Some(pointer) = input.pointer {
            camera.on_pointer_move(pointer);
        }

        true
    }
}
