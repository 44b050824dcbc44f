use std::path::Path;

use crate::{
    assets::decode::load_image,
    foundation::{
        core::{Canvas, Fps, Point},
        error::KeyrasterResult,
    },
    raster::{grid::PixelGrid, line::LineSegment, pixel::Rgba},
    scene::store::{LayerId, Scene, TrackId},
    shape::geometry::{Geometry, Quad, TexturedQuad, Triangle},
};

#[derive(Clone, Debug)]
/// Time-bounded renderable unit of a [`Scene`].
pub struct Layer {
    /// Start of the visibility window.
    pub in_point: f64,
    /// End of the visibility window.
    pub out_point: f64,
    /// What the layer draws.
    pub kind: LayerKind,
}

#[derive(Clone, Debug)]
/// Closed set of layer payloads.
pub enum LayerKind {
    /// Static and animated line segments.
    Line(LineLayer),
    /// Triangles and rectangles.
    Shape(ShapeLayer),
    /// Additive composite of child layers.
    Composite(CompositeLayer),
}

impl Layer {
    /// Layer visible over the whole representable time range.
    pub fn new(kind: LayerKind) -> Self {
        Self {
            in_point: f64::MIN,
            out_point: f64::MAX,
            kind,
        }
    }

    /// Restrict the visibility window to `[in_point, out_point)`.
    pub fn with_window(mut self, in_point: f64, out_point: f64) -> Self {
        self.in_point = in_point;
        self.out_point = out_point;
        self
    }

    /// Whether `time` falls inside the visibility window.
    pub fn is_active(&self, time: f64) -> bool {
        self.in_point <= time && time < self.out_point
    }

    /// Draw the layer at `time` into `target`.
    pub fn render(&self, scene: &Scene, target: &mut PixelGrid, time: f64) {
        match &self.kind {
            LayerKind::Line(lines) => lines.render(scene, target, time),
            LayerKind::Shape(shapes) => shapes.render(target),
            LayerKind::Composite(comp) => comp.render(scene, target, time),
        }
    }
}

impl From<LineLayer> for Layer {
    fn from(l: LineLayer) -> Self {
        Self::new(LayerKind::Line(l))
    }
}

impl From<ShapeLayer> for Layer {
    fn from(l: ShapeLayer) -> Self {
        Self::new(LayerKind::Shape(l))
    }
}

impl From<CompositeLayer> for Layer {
    fn from(l: CompositeLayer) -> Self {
        Self::new(LayerKind::Composite(l))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Line whose endpoint coordinates are driven by keyframe tracks.
pub struct AnimatedLineSegment {
    /// Track driving the start x.
    pub x0: TrackId,
    /// Track driving the start y.
    pub y0: TrackId,
    /// Track driving the end x.
    pub x1: TrackId,
    /// Track driving the end y.
    pub y1: TrackId,
}

impl AnimatedLineSegment {
    /// Sample every endpoint track at `time`, truncating toward zero.
    ///
    /// Returns `None` when a track id is not part of `scene`.
    pub fn resolve(&self, scene: &Scene, time: f64) -> Option<LineSegment> {
        let coord = |id: TrackId| scene.track(id).map(|t| t.interpolate(time) as i32);
        Some(LineSegment::new(
            coord(self.x0)?,
            coord(self.y0)?,
            coord(self.x1)?,
            coord(self.y1)?,
        ))
    }
}

#[derive(Clone, Debug)]
/// Layer drawing one-pixel lines.
pub struct LineLayer {
    segments: Vec<LineSegment>,
    animated: Vec<AnimatedLineSegment>,
    color: Rgba,
}

impl Default for LineLayer {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            animated: Vec::new(),
            color: Rgba::RED,
        }
    }
}

impl LineLayer {
    /// Empty layer painting in red.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the paint color.
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Add a static segment.
    pub fn add_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> &mut Self {
        self.segments.push(LineSegment::new(x0, y0, x1, y1));
        self
    }

    /// Add a segment whose endpoints follow four tracks.
    pub fn add_animated_line(
        &mut self,
        x0: TrackId,
        y0: TrackId,
        x1: TrackId,
        y1: TrackId,
    ) -> &mut Self {
        self.animated.push(AnimatedLineSegment { x0, y0, x1, y1 });
        self
    }

    /// Static segments.
    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    /// Animated segments.
    pub fn animated_segments(&self) -> &[AnimatedLineSegment] {
        &self.animated
    }

    fn render(&self, scene: &Scene, target: &mut PixelGrid, time: f64) {
        let animated = self.animated.iter().filter_map(|seg| {
            let resolved = seg.resolve(scene, time);
            if resolved.is_none() {
                tracing::warn!(?seg, "animated line references an unknown track");
            }
            resolved
        });

        for seg in self.segments.iter().copied().chain(animated) {
            for (x, y) in seg.scan() {
                target.paint_flipped(x, y, self.color);
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
/// Layer filling pixels covered by its geometry.
pub struct ShapeLayer {
    geometry: Vec<Geometry>,
}

impl ShapeLayer {
    /// Empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape; later shapes paint over earlier ones.
    pub fn add(&mut self, geometry: impl Into<Geometry>) -> &mut Self {
        self.geometry.push(geometry.into());
        self
    }

    /// Append a flat triangle.
    pub fn add_triangle(&mut self, p0: Point, p1: Point, p2: Point, color: Rgba) -> &mut Self {
        self.add(Triangle::new(p0, p1, p2).with_color(color))
    }

    /// Append a flat rectangle. Invalid corners are reported and the shape is skipped.
    pub fn add_quad(&mut self, p0: Point, p1: Point, color: Rgba) -> &mut Self {
        match Quad::new(p0, p1, color) {
            Ok(quad) => self.add(quad),
            Err(err) => {
                tracing::warn!(%err, "skipping quad");
                self
            }
        }
    }

    /// Append a rectangle textured with the image at `path`.
    ///
    /// Invalid corners are reported and the shape is skipped; a missing or
    /// unreadable image is an error.
    pub fn add_textured_quad(
        &mut self,
        p0: Point,
        p1: Point,
        path: impl AsRef<Path>,
    ) -> KeyrasterResult<&mut Self> {
        let texture = load_image(path)?;
        match TexturedQuad::new(p0, p1, texture) {
            Ok(tq) => Ok(self.add(tq)),
            Err(err) => {
                tracing::warn!(%err, "skipping textured quad");
                Ok(self)
            }
        }
    }

    /// Shapes in paint order.
    pub fn geometry(&self) -> &[Geometry] {
        &self.geometry
    }

    /// Color of pixel `(x, y)` (bottom-left origin): the last covering shape wins.
    pub fn color_at(&self, x: i32, y: i32) -> Option<Rgba> {
        let q = Point::new(f64::from(x), f64::from(y));
        self.geometry.iter().rev().find_map(|g| g.color_at(q))
    }

    fn render(&self, target: &mut PixelGrid) {
        let (w, h) = target.dimensions();
        let (w, h) = (i32::try_from(w).unwrap_or(i32::MAX), i32::try_from(h).unwrap_or(i32::MAX));
        for y in 0..h {
            for x in 0..w {
                if let Some(color) = self.color_at(x, y) {
                    target.paint_flipped(x, y, color);
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Whether a composite consults its children's visibility windows.
pub enum TimeWindowPolicy {
    /// Render every child regardless of its window.
    #[default]
    Ignore,
    /// Skip children whose window does not contain the frame time.
    Enforce,
}

#[derive(Clone, Debug)]
/// Layer summing its children into one frame.
pub struct CompositeLayer {
    canvas: Canvas,
    fps: Fps,
    pub(crate) children: Vec<LayerId>,
    window_policy: TimeWindowPolicy,
}

impl CompositeLayer {
    /// Empty composite with a fixed resolution and frame rate.
    pub fn new(canvas: Canvas, fps: Fps) -> Self {
        Self {
            canvas,
            fps,
            children: Vec::new(),
            window_policy: TimeWindowPolicy::default(),
        }
    }

    /// Set how child visibility windows are treated.
    pub fn with_window_policy(mut self, policy: TimeWindowPolicy) -> Self {
        self.window_policy = policy;
        self
    }

    /// Output resolution.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Child layers in composite order. Children are added through [`Scene::add_child`].
    pub fn children(&self) -> &[LayerId] {
        &self.children
    }

    /// Window handling policy.
    pub fn window_policy(&self) -> TimeWindowPolicy {
        self.window_policy
    }

    /// Render each child into a fresh scratch grid and add it into `target`.
    fn render(&self, scene: &Scene, target: &mut PixelGrid, time: f64) {
        for &child in &self.children {
            let Some(layer) = scene.layer(child) else {
                tracing::warn!(layer = child.index(), "composite child is not in the scene");
                continue;
            };
            if self.window_policy == TimeWindowPolicy::Enforce && !layer.is_active(time) {
                continue;
            }

            let mut scratch = PixelGrid::new(self.canvas.width, self.canvas.height);
            layer.render(scene, &mut scratch, time);
            if let Err(err) = target.accumulate(&scratch) {
                tracing::warn!(%err, layer = child.index(), "skipping composite child");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layer.rs"]
mod tests;
