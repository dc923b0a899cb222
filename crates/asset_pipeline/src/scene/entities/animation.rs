//! Animation clips and keyframe tracks

use crate::foundation::math::{Quat, Vec3};
use crate::scene::ids::{AnimationId, TrackId};

/// A keyframe: a time in seconds and a value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyFrame<T> {
    /// Time of the key in seconds
    pub time: f32,
    /// Value at that time
    pub value: T,
}

impl<T> KeyFrame<T> {
    /// Create a keyframe
    pub const fn new(time: f32, value: T) -> Self {
        Self { time, value }
    }
}

/// Translation keyframe
pub type TranslationKey = KeyFrame<Vec3>;
/// Rotation keyframe
pub type RotationKey = KeyFrame<Quat>;
/// Scale keyframe
pub type ScaleKey = KeyFrame<Vec3>;

/// An animation clip referencing one track per animated target
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Animation {
    pub(crate) id: AnimationId,
    /// Display name
    pub name: String,
    /// Length in ticks
    pub duration: f32,
    /// Playback rate
    pub ticks_per_second: f32,
    /// Bone tracks of this clip
    pub track_ids: Vec<TrackId>,
}

impl Animation {
    /// Create an empty clip
    pub fn new(name: impl Into<String>, duration: f32, ticks_per_second: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            ticks_per_second,
            ..Default::default()
        }
    }
}

impl_scene_entity!(Animation, AnimationId, Animation);

/// Keyframe channels for one target, usually a bone matched by name
///
/// Each channel must have strictly increasing key times.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    pub(crate) id: TrackId,
    /// Display name, equal to the animated bone's name
    pub name: String,
    /// Translation channel
    pub translation_keys: Vec<TranslationKey>,
    /// Rotation channel
    pub rotation_keys: Vec<RotationKey>,
    /// Scale channel
    pub scale_keys: Vec<ScaleKey>,
}

impl Track {
    /// Create a track with no keys
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// True if no channel has a key
    pub fn is_empty(&self) -> bool {
        self.translation_keys.is_empty() && self.rotation_keys.is_empty() && self.scale_keys.is_empty()
    }
}

impl_scene_entity!(Track, TrackId, Track);
