//! Fire-and-forget audio capability.
//!
//! Playback can fail when no free channel exists; that returns `None` and is
//! never an error — callers proceed without sound.

use std::cell::RefCell;
use std::rc::Rc;

use gridtown_logic::math::Vec3;

/// Sounds the behavior engine triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Punch,
    FootStep1,
    FootStep2,
    PlayerDies,
    HugeExplosion,
}

/// Opaque handle to a playing sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundHandle(pub u32);

/// Audio output capability injected into the engine.
pub trait AudioSink {
    /// Start a sound at a world position. `None` means no free channel.
    fn play(&mut self, sound: SoundId, position: Vec3, looped: bool) -> Option<SoundHandle>;
}

/// Discards everything, reporting channel exhaustion.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _sound: SoundId, _position: Vec3, _looped: bool) -> Option<SoundHandle> {
        None
    }
}

/// Records every request; the engine gets one clone, assertions keep another.
#[derive(Debug, Clone, Default)]
pub struct MemoryAudio {
    inner: Rc<RefCell<Vec<(SoundId, Vec3)>>>,
}

impl MemoryAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything played so far, in order.
    pub fn played(&self) -> Vec<(SoundId, Vec3)> {
        self.inner.borrow().clone()
    }

    pub fn count_of(&self, sound: SoundId) -> usize {
        self.inner.borrow().iter().filter(|(s, _)| *s == sound).count()
    }
}

impl AudioSink for MemoryAudio {
    fn play(&mut self, sound: SoundId, position: Vec3, _looped: bool) -> Option<SoundHandle> {
        let mut inner = self.inner.borrow_mut();
        inner.push((sound, position));
        Some(SoundHandle(inner.len() as u32 - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_audio_reports_no_channel() {
        assert_eq!(NullAudio.play(SoundId::Punch, Vec3::ZERO, false), None);
    }

    #[test]
    fn test_memory_audio_records_through_clone() {
        let observer = MemoryAudio::new();
        let mut sink = observer.clone();
        sink.play(SoundId::FootStep1, Vec3::ZERO, false);
        sink.play(SoundId::FootStep2, Vec3::ZERO, false);
        assert_eq!(observer.count_of(SoundId::FootStep1), 1);
        assert_eq!(observer.played().len(), 2);
    }
}
