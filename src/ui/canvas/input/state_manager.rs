use egui::*;

/// Touch state of the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum TouchState {
    /// Nothing pressed
    Idle,

    /// Primary button held on the canvas; the scene follows the pointer
    Pulling,
}

/// What the canvas should do this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputOutcome {
    /// Screen-space touch position while pulling
    pub touch: Option<Pos2>,

    /// The user asked to restore the undeformed scene
    pub reset: bool,
}

#[derive(Debug)]
pub struct InputStateManager {
    pub current_state: TouchState,
}

impl Default for InputStateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputStateManager {
    pub fn new() -> Self {
        Self {
            current_state: TouchState::Idle,
        }
    }

    pub fn transition_to(&mut self, new_state: TouchState) {
        log::debug!(
            "Input state transition: {:?} -> {:?}",
            self.current_state,
            new_state
        );
        self.current_state = new_state;
    }

    /// Run once per frame after the canvas rect has been allocated.
    pub fn update(&mut self, ui: &Ui, response: &Response) -> InputOutcome {
        let pressed_pos = if response.is_pointer_button_down_on() {
            response.interact_pointer_pos()
        } else {
            None
        };
        let touch = self.handle_pointer(pressed_pos);
        let reset = response.hovered() && ui.input(|i| i.key_pressed(Key::Escape));

        self.handle_state_specific_updates(ui, response);

        InputOutcome { touch, reset }
    }

    /// Advance the state machine given the pressed pointer position, if any.
    pub fn handle_pointer(&mut self, pressed_pos: Option<Pos2>) -> Option<Pos2> {
        match (&self.current_state, pressed_pos) {
            (TouchState::Idle, Some(pos)) => {
                self.transition_to(TouchState::Pulling);
                Some(pos)
            }
            // 拖动中不重复记录状态转换
            (TouchState::Pulling, Some(pos)) => Some(pos),
            (TouchState::Pulling, None) => {
                self.transition_to(TouchState::Idle);
                None
            }
            (TouchState::Idle, None) => None,
        }
    }

    fn handle_state_specific_updates(&self, ui: &Ui, response: &Response) {
        match &self.current_state {
            TouchState::Pulling => {
                ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
            }
            TouchState::Idle if response.hovered() => {
                ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
            }
            TouchState::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_drag_release() {
        let mut manager = InputStateManager::new();
        assert_eq!(manager.handle_pointer(None), None);
        assert_eq!(manager.current_state, TouchState::Idle);

        let down = Pos2::new(5.0, 6.0);
        assert_eq!(manager.handle_pointer(Some(down)), Some(down));
        assert_eq!(manager.current_state, TouchState::Pulling);

        let moved = Pos2::new(7.0, 8.0);
        assert_eq!(manager.handle_pointer(Some(moved)), Some(moved));
        assert_eq!(manager.current_state, TouchState::Pulling);

        assert_eq!(manager.handle_pointer(None), None);
        assert_eq!(manager.current_state, TouchState::Idle);
    }
}
