//! Sound cue catalogue and fire-and-forget effect dispatch.
//!
//! Cue names are parsed once, when materials are registered. By the time a
//! [`SoundSpec`] reaches [`play_effect`] it can no longer be invalid, so
//! playback has no failure path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pos::BlockPos;

/// Known sound cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    BlockWoodBreak,
    BlockWoodPlace,
    BlockStonePlace,
    BlockGravelPlace,
    BlockGrassPlace,
    BlockSandPlace,
    BlockGlassPlace,
    BlockWoolPlace,
    BlockMetalPlace,
    BlockLeverClick,
}

impl Sound {
    pub const ALL: [Sound; 10] = [
        Sound::BlockWoodBreak,
        Sound::BlockWoodPlace,
        Sound::BlockStonePlace,
        Sound::BlockGravelPlace,
        Sound::BlockGrassPlace,
        Sound::BlockSandPlace,
        Sound::BlockGlassPlace,
        Sound::BlockWoolPlace,
        Sound::BlockMetalPlace,
        Sound::BlockLeverClick,
    ];

    /// Dotted identifier sent to clients.
    pub fn as_str(self) -> &'static str {
        match self {
            Sound::BlockWoodBreak => "block.wood.break",
            Sound::BlockWoodPlace => "block.wood.place",
            Sound::BlockStonePlace => "block.stone.place",
            Sound::BlockGravelPlace => "block.gravel.place",
            Sound::BlockGrassPlace => "block.grass.place",
            Sound::BlockSandPlace => "block.sand.place",
            Sound::BlockGlassPlace => "block.glass.place",
            Sound::BlockWoolPlace => "block.wool.place",
            Sound::BlockMetalPlace => "block.metal.place",
            Sound::BlockLeverClick => "block.lever.click",
        }
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sound identifier that is not in the catalogue.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sound identifier: {0}")]
pub struct SoundError(pub String);

impl FromStr for Sound {
    type Err = SoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sound::ALL
            .into_iter()
            .find(|sound| sound.as_str() == s)
            .ok_or_else(|| SoundError(s.to_string()))
    }
}

/// A cue together with the volume and pitch it is played at.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundSpec {
    pub sound: Sound,
    pub volume: f32,
    pub pitch: f32,
}

impl SoundSpec {
    /// Volume used by [`SoundSpec::new`].
    pub const DEFAULT_VOLUME: f32 = 1.0;
    /// Pitch used by [`SoundSpec::new`].
    pub const DEFAULT_PITCH: f32 = 0.75;

    /// The generic placement cue used by materials that do not set their own.
    pub const DEFAULT_PLACE: SoundSpec = SoundSpec {
        sound: Sound::BlockWoodBreak,
        volume: Self::DEFAULT_VOLUME,
        pitch: Self::DEFAULT_PITCH,
    };

    /// Creates a spec for `sound` at the default placement volume and pitch.
    pub fn new(sound: Sound) -> Self {
        Self {
            sound,
            volume: Self::DEFAULT_VOLUME,
            pitch: Self::DEFAULT_PITCH,
        }
    }

    /// Creates a spec with an explicit volume and pitch.
    pub fn with_levels(sound: Sound, volume: f32, pitch: f32) -> Self {
        Self {
            sound,
            volume,
            pitch,
        }
    }

    /// Volume must be finite and non-negative; pitch finite and positive.
    pub fn is_valid(&self) -> bool {
        self.volume.is_finite() && self.volume >= 0.0 && self.pitch.is_finite() && self.pitch > 0.0
    }
}

impl Default for SoundSpec {
    fn default() -> Self {
        Self::DEFAULT_PLACE
    }
}

/// Audio output provided by the surrounding server.
pub trait SoundBackend {
    /// Plays `sound` at the centre of `location`.
    fn play(&mut self, sound: Sound, volume: f32, pitch: f32, location: BlockPos);
}

/// Backend that discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBackend;

impl SoundBackend for SilentBackend {
    fn play(&mut self, _sound: Sound, _volume: f32, _pitch: f32, _location: BlockPos) {}
}

/// Fires `spec` at `location`.
pub fn play_effect(backend: &mut dyn SoundBackend, spec: SoundSpec, location: BlockPos) {
    tracing::trace!(sound = %spec.sound, ?location, "play effect");
    backend.play(spec.sound, spec.volume, spec.pitch, location);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(Sound, f32, f32, BlockPos)>);

    impl SoundBackend for Recorder {
        fn play(&mut self, sound: Sound, volume: f32, pitch: f32, location: BlockPos) {
            self.0.push((sound, volume, pitch, location));
        }
    }

    #[test]
    fn test_default_place_sound() {
        let spec = SoundSpec::default();
        assert_eq!(spec.sound, Sound::BlockWoodBreak);
        assert_eq!(spec.volume, 1.0);
        assert_eq!(spec.pitch, 0.75);
    }

    #[test]
    fn test_parse_known_names() {
        for sound in Sound::ALL {
            assert_eq!(sound.as_str().parse::<Sound>(), Ok(sound));
        }
    }

    #[test]
    fn test_parse_unknown_name() {
        let err = "block.cheese.place".parse::<Sound>().unwrap_err();
        assert_eq!(err, SoundError("block.cheese.place".to_string()));
    }

    #[test]
    fn test_new_uses_default_levels() {
        let spec = SoundSpec::new(Sound::BlockStonePlace);
        assert_eq!((spec.volume, spec.pitch), (1.0, 0.75));
    }

    #[test]
    fn test_validity() {
        assert!(SoundSpec::default().is_valid());
        assert!(!SoundSpec::with_levels(Sound::BlockWoodPlace, f32::NAN, 1.0).is_valid());
        assert!(!SoundSpec::with_levels(Sound::BlockWoodPlace, 1.0, 0.0).is_valid());
        assert!(!SoundSpec::with_levels(Sound::BlockWoodPlace, -0.5, 1.0).is_valid());
    }

    #[test]
    fn test_play_effect_forwards_to_backend() {
        let mut backend = Recorder::default();
        let at = BlockPos::new(1, 0, 0);
        play_effect(&mut backend, SoundSpec::new(Sound::BlockGlassPlace), at);
        assert_eq!(backend.0, vec![(Sound::BlockGlassPlace, 1.0, 0.75, at)]);
    }
}
