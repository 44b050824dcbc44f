use crate::{
    animation::ease::Ease,
    foundation::{
        core::Point,
        error::{KeyrasterError, KeyrasterResult},
    },
};

/// Value returned by [`KeyframeTrack::interpolate`] when the track has no keys.
pub const TRACK_SENTINEL: f64 = -1.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A pinned `(time, value)` pair plus the easing toward the next keyframe.
pub struct Keyframe {
    /// Time on the timeline, in frames.
    pub time: f64,
    /// Channel value at `time`.
    pub value: f64,
    /// Easing applied on the segment from this key to the next one.
    pub ease: Ease,
}

impl Keyframe {
    /// Build a keyframe.
    pub fn new(time: f64, value: f64, ease: Ease) -> Self {
        Self { time, value, ease }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Time-ordered keyframes animating one scalar channel.
pub struct KeyframeTrack {
    keys: Vec<Keyframe>, // sorted by time, ties in insertion order
}

impl KeyframeTrack {
    /// Empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys in ascending time order.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the track has no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Insert a keyframe and restore time order.
    pub fn add(&mut self, key: Keyframe) -> &mut Self {
        self.keys.push(key);
        // Stable, so equal times keep insertion order.
        self.keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        self
    }

    /// Add a key with linear easing toward the next key.
    pub fn add_linear(&mut self, time: f64, value: f64) -> &mut Self {
        self.add(Keyframe::new(time, value, Ease::Linear))
    }

    /// Add a key with a quadratic easing through `control`.
    pub fn add_quadratic(&mut self, time: f64, value: f64, control: Point) -> &mut Self {
        self.add(Keyframe::new(time, value, Ease::quadratic(control)))
    }

    /// Add a key with a quadratic easing built from an influence value.
    pub fn add_quadratic_influence(&mut self, time: f64, value: f64, influence: f64) -> &mut Self {
        self.add(Keyframe::new(
            time,
            value,
            Ease::quadratic_influence(influence),
        ))
    }

    /// Add a key with a cubic easing through `c1` and `c2`.
    pub fn add_cubic(&mut self, time: f64, value: f64, c1: Point, c2: Point) -> &mut Self {
        self.add(Keyframe::new(time, value, Ease::cubic(c1, c2)))
    }

    /// Add a key with a cubic easing built from two influence values.
    pub fn add_cubic_influence(
        &mut self,
        time: f64,
        value: f64,
        influence_in: f64,
        influence_out: f64,
    ) -> &mut Self {
        self.add(Keyframe::new(
            time,
            value,
            Ease::cubic_influence(influence_in, influence_out),
        ))
    }

    /// Value of the channel at `time`.
    ///
    /// Before the first key and after the last key the nearest key's value is
    /// held. An empty track is reported and yields [`TRACK_SENTINEL`].
    pub fn interpolate(&self, time: f64) -> f64 {
        self.sample(time).unwrap_or_else(|err| {
            tracing::warn!(%err, "keyframe interpolation failed");
            TRACK_SENTINEL
        })
    }

    /// Fallible form of [`KeyframeTrack::interpolate`].
    pub fn sample(&self, time: f64) -> KeyrasterResult<f64> {
        let last = self
            .keys
            .len()
            .checked_sub(1)
            .ok_or_else(|| KeyrasterError::animation("can't interpolate with no keyframes"))?;

        let first_after = self
            .keys
            .iter()
            .position(|k| k.time > time)
            .unwrap_or(self.keys.len());
        let next = first_after.min(last);
        let previous = first_after.saturating_sub(1);

        let a = &self.keys[previous];
        let b = &self.keys[next];
        if previous == next {
            return Ok(a.value);
        }

        let percent = (time - a.time) / (b.time - a.time);
        let eased = a.ease.apply(percent);
        Ok(a.value + (b.value - a.value) * eased)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/track.rs"]
mod tests;
