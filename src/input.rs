use glam::IVec2;

use crate::grid::Tile;

/// Input for one frame: held keys, pointer and one-shot presses.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Pointer position in screen pixels, if it is over the window.
    pub pointer: Option<IVec2>,
    pub primary_held: bool,
    pub toggle_minimap: bool,
    pub select_material: Option<Tile>,
}

/// Anything that can be polled once per frame for input.
pub trait InputSource {
    fn poll(&mut self) -> InputState;
}

/// Replays a fixed list of frames, then reports no input.
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    frames: std::collections::VecDeque<InputState>,
}

impl Scripted {
    pub fn new(frames: impl IntoIterator<Item = InputState>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for Scripted {
    fn poll(&mut self) -> InputState {
        self.frames.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_drains_then_idles() {
        let held = InputState {
            forward: true,
            ..Default::default()
        };
        let mut source = Scripted::new([held]);
        assert_eq!(source.poll(), held);
        assert_eq!(source.poll(), InputState::default());
    }
}
