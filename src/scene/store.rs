use crate::{
    animation::track::KeyframeTrack,
    foundation::error::{KeyrasterError, KeyrasterResult},
    raster::grid::PixelGrid,
    scene::layer::{CompositeLayer, Layer, LayerKind},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Stable handle of a [`KeyframeTrack`] owned by a [`Scene`].
pub struct TrackId(pub(crate) usize);

impl TrackId {
    /// Position of the track in its scene.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Stable handle of a [`Layer`] owned by a [`Scene`].
pub struct LayerId(pub(crate) usize);

impl LayerId {
    /// Position of the layer in its scene.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena owning every keyframe track and layer of an animation.
///
/// Layers refer to tracks and to other layers by id, so nothing they
/// reference can be dropped while the scene is alive. Ids are never reused.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    tracks: Vec<KeyframeTrack>,
    layers: Vec<Layer>,
}

impl Scene {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a track.
    pub fn add_track(&mut self, track: KeyframeTrack) -> TrackId {
        self.tracks.push(track);
        TrackId(self.tracks.len() - 1)
    }

    /// Track by id.
    pub fn track(&self, id: TrackId) -> Option<&KeyframeTrack> {
        self.tracks.get(id.0)
    }

    /// Mutable track by id.
    pub fn track_mut(&mut self, id: TrackId) -> Option<&mut KeyframeTrack> {
        self.tracks.get_mut(id.0)
    }

    /// All tracks with their ids.
    pub fn tracks(&self) -> impl Iterator<Item = (TrackId, &KeyframeTrack)> {
        self.tracks.iter().enumerate().map(|(i, t)| (TrackId(i), t))
    }

    /// Take ownership of a layer.
    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        self.layers.push(layer);
        LayerId(self.layers.len() - 1)
    }

    /// Layer by id.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id.0)
    }

    /// Mutable layer by id.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(id.0)
    }

    /// Composite payload of layer `id`.
    pub fn composite(&self, id: LayerId) -> KeyrasterResult<&CompositeLayer> {
        match self.layer(id).map(|l| &l.kind) {
            Some(LayerKind::Composite(comp)) => Ok(comp),
            Some(_) => Err(KeyrasterError::validation(format!(
                "layer {} is not a composite",
                id.0
            ))),
            None => Err(KeyrasterError::validation(format!(
                "unknown layer {}",
                id.0
            ))),
        }
    }

    /// Append `child` to the children of composite `comp`.
    ///
    /// Rejects unknown ids, non-composite parents and any link that would make
    /// a composite (transitively) contain itself.
    pub fn add_child(&mut self, comp: LayerId, child: LayerId) -> KeyrasterResult<()> {
        if self.layer(child).is_none() {
            return Err(KeyrasterError::validation(format!(
                "unknown child layer {}",
                child.0
            )));
        }
        self.composite(comp)?;
        if self.reaches(child, comp) {
            return Err(KeyrasterError::validation(format!(
                "adding layer {} to composite {} would create a cycle",
                child.0, comp.0
            )));
        }

        if let Some(Layer {
            kind: LayerKind::Composite(c),
            ..
        }) = self.layers.get_mut(comp.0)
        {
            c.children.push(child);
        }
        Ok(())
    }

    /// Whether `target` is `from` or one of its descendants.
    fn reaches(&self, from: LayerId, target: LayerId) -> bool {
        let mut stack = vec![from];
        let mut seen = vec![false; self.layers.len()];
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            let Some(visited) = seen.get_mut(id.0) else {
                continue;
            };
            if std::mem::replace(visited, true) {
                continue;
            }
            if let Some(Layer {
                kind: LayerKind::Composite(c),
                ..
            }) = self.layer(id)
            {
                stack.extend(c.children.iter().copied());
            }
        }
        false
    }

    /// Render layer `id` at `time` into `target`. Unknown ids are reported and skipped.
    pub fn render_layer(&self, id: LayerId, target: &mut PixelGrid, time: f64) {
        match self.layer(id) {
            Some(layer) => layer.render(self, target, time),
            None => tracing::warn!(layer = id.0, "can not render unknown layer"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;
