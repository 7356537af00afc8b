//! Sprite animation playback.
//!
//! `AnimState` is a frame clock over a clip: it advances on a fixed fps,
//! loops or holds per the loop mode, answers the active/last-frame queries
//! the state machine keys off, and reports frame actions (footstep markers)
//! as they are crossed.

use gridtown_logic::anim::{AnimLoop, PedAnimId};

/// Marker raised when playback crosses an annotated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimAction {
    Footstep,
}

/// Static clip data: length, rate, annotated frames.
#[derive(Debug, Clone, Copy)]
pub struct AnimClip {
    pub frame_count: u32,
    pub fps: f32,
    pub footstep_frames: &'static [u32],
}

const DEFAULT_FPS: f32 = 10.0;

/// Clip data for a pedestrian animation id.
pub fn clip_for(anim: PedAnimId) -> AnimClip {
    let (frame_count, footstep_frames): (u32, &'static [u32]) = match anim {
        PedAnimId::Null => (1, &[]),
        PedAnimId::StandingStill => (1, &[]),
        PedAnimId::Walk => (8, &[1, 5]),
        PedAnimId::Run => (8, &[0, 4]),
        PedAnimId::FallShort => (4, &[]),
        PedAnimId::FallLong => (4, &[]),
        PedAnimId::LiesOnFloor => (1, &[]),
        PedAnimId::LiesOnFloorBones => (1, &[]),
        PedAnimId::Drowning => (4, &[]),
        PedAnimId::Electrocuted => (4, &[]),
        PedAnimId::EnterCar | PedAnimId::ExitCar => (8, &[]),
        PedAnimId::EnterBike | PedAnimId::ExitBike => (4, &[]),
        PedAnimId::SittingInCar | PedAnimId::SittingOnBike => (1, &[]),
        PedAnimId::JumpOntoCar => (6, &[]),
        PedAnimId::SlideOnCar => (4, &[]),
        PedAnimId::DropOffCarSliding => (6, &[]),
        PedAnimId::PunchingWhileStanding | PedAnimId::PunchingWhileRunning => (4, &[]),
        // All shooting poses share a short cycle.
        _ => (3, &[]),
    };
    AnimClip {
        frame_count,
        fps: DEFAULT_FPS,
        footstep_frames,
    }
}

/// Playback state for one animation channel.
#[derive(Debug, Clone)]
pub struct AnimState {
    anim: PedAnimId,
    frame_count: u32,
    fps: f32,
    footstep_frames: &'static [u32],
    loop_mode: AnimLoop,
    cursor: u32,
    timer: f32,
    active: bool,
}

impl Default for AnimState {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimState {
    pub fn new() -> Self {
        Self {
            anim: PedAnimId::Null,
            frame_count: 1,
            fps: DEFAULT_FPS,
            footstep_frames: &[],
            loop_mode: AnimLoop::None,
            cursor: 0,
            timer: 0.0,
            active: false,
        }
    }

    /// Load a clip and start playback from frame zero.
    pub fn play(&mut self, anim: PedAnimId, loop_mode: AnimLoop) {
        let clip = clip_for(anim);
        self.anim = anim;
        self.frame_count = clip.frame_count.max(1);
        self.fps = clip.fps;
        self.footstep_frames = clip.footstep_frames;
        self.restart(loop_mode);
    }

    /// Load raw clip data (non-pedestrian animations, e.g. explosions).
    pub fn play_raw(&mut self, frame_count: u32, fps: f32, loop_mode: AnimLoop) {
        self.anim = PedAnimId::Null;
        self.frame_count = frame_count.max(1);
        self.fps = fps;
        self.footstep_frames = &[];
        self.restart(loop_mode);
    }

    /// Restart the currently loaded clip from frame zero.
    pub fn restart(&mut self, loop_mode: AnimLoop) {
        self.loop_mode = loop_mode;
        self.cursor = 0;
        self.timer = 0.0;
        self.active = true;
    }

    /// Change the loop mode without disturbing playback.
    pub fn set_current_loop(&mut self, loop_mode: AnimLoop) {
        self.loop_mode = loop_mode;
    }

    pub fn current_anim(&self) -> PedAnimId {
        self.anim
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_last_frame(&self) -> bool {
        self.cursor + 1 == self.frame_count
    }

    pub fn frame_cursor(&self) -> u32 {
        self.cursor
    }

    /// Advance playback, pushing a marker for each annotated frame crossed.
    pub fn advance(&mut self, delta: f32, actions: &mut Vec<(u32, AnimAction)>) {
        if !self.active {
            return;
        }

        self.timer += delta;
        let frame_time = 1.0 / self.fps;
        while self.timer >= frame_time {
            self.timer -= frame_time;

            if self.cursor + 1 >= self.frame_count {
                match self.loop_mode {
                    AnimLoop::FromStart => {
                        self.cursor = 0;
                    }
                    AnimLoop::None => {
                        // one-shot: hold the last frame
                        self.active = false;
                        return;
                    }
                }
            } else {
                self.cursor += 1;
            }

            if self.footstep_frames.contains(&self.cursor) {
                actions.push((self.cursor, AnimAction::Footstep));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(state: &mut AnimState, delta: f32) -> Vec<(u32, AnimAction)> {
        let mut actions = Vec::new();
        state.advance(delta, &mut actions);
        actions
    }

    #[test]
    fn test_one_shot_holds_last_frame() {
        let mut state = AnimState::new();
        state.play(PedAnimId::FallShort, AnimLoop::None);
        // 4 frames at 10 fps: done after 0.4s
        drain(&mut state, 1.0);
        assert!(!state.is_active());
        assert!(state.is_last_frame());
    }

    #[test]
    fn test_looping_stays_active() {
        let mut state = AnimState::new();
        state.play(PedAnimId::Walk, AnimLoop::FromStart);
        drain(&mut state, 5.0);
        assert!(state.is_active());
    }

    #[test]
    fn test_footstep_markers_fire() {
        let mut state = AnimState::new();
        state.play(PedAnimId::Walk, AnimLoop::FromStart);
        // one full 8-frame cycle crosses both annotated frames
        let actions = drain(&mut state, 0.8);
        assert!(actions.iter().any(|(_, a)| *a == AnimAction::Footstep));
        assert!(actions.len() >= 2);
    }

    #[test]
    fn test_new_state_is_inactive() {
        let state = AnimState::new();
        assert!(!state.is_active());
        assert_eq!(state.current_anim(), PedAnimId::Null);
    }

    #[test]
    fn test_single_frame_clip_is_immediately_last() {
        let mut state = AnimState::new();
        state.play(PedAnimId::StandingStill, AnimLoop::FromStart);
        assert!(state.is_last_frame());
    }
}
