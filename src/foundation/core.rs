use crate::foundation::error::{KeyrasterError, KeyrasterResult};

pub use kurbo::{Point, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Integer frame number on the animation timeline.
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Timeline time of this frame. Keyframe times are expressed in frames.
    pub fn as_time(self) -> f64 {
        self.0 as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Half-open frame range `[start, end)`.
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> KeyrasterResult<Self> {
        if start.0 > end.0 {
            return Err(KeyrasterError::validation(
                "FrameRange start must be <= end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered by the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Whether the range contains no frames, including inverted bounds.
    pub fn is_empty(self) -> bool {
        self.end.0 <= self.start.0
    }

    /// Iterate every frame of the range in order.
    pub fn frames(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rational frame rate.
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Build a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> KeyrasterResult<Self> {
        if den == 0 {
            return Err(KeyrasterError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(KeyrasterError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Output resolution in pixels.
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
