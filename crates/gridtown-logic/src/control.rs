//! Per-tick control snapshot from a human or AI input source.

use serde::{Deserialize, Serialize};

/// Discrete movement/attack intents for one simulation tick.
///
/// The input collaborator overwrites this each frame; the behavior engine
/// only reads it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ControlState {
    pub turn_left: bool,
    pub turn_right: bool,
    pub walk_forward: bool,
    pub walk_backward: bool,
    pub run: bool,
    pub jump: bool,
    pub shoot: bool,
}

impl ControlState {
    /// Reset all intents.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Any translation intent at all.
    pub fn wants_move(&self) -> bool {
        self.walk_forward || self.walk_backward || self.run
    }

    /// Any turning intent.
    pub fn wants_turn(&self) -> bool {
        self.turn_left || self.turn_right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_resets_all() {
        let mut ctl = ControlState {
            run: true,
            shoot: true,
            ..Default::default()
        };
        ctl.clear();
        assert!(!ctl.wants_move());
        assert!(!ctl.shoot);
    }
}
