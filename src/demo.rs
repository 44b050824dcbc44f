//! Built-in animation used by the `keyraster` binary and the integration tests.

use std::path::Path;

use crate::{
    animation::track::KeyframeTrack,
    foundation::{
        core::{Canvas, Fps, FrameIndex, FrameRange, Point},
        error::KeyrasterResult,
    },
    raster::pixel::Rgba,
    scene::{
        layer::{CompositeLayer, Layer, LineLayer, ShapeLayer, TimeWindowPolicy},
        store::{LayerId, Scene},
    },
};

/// Output resolution of the demo.
pub const DEMO_CANVAS: Canvas = Canvas {
    width: 320,
    height: 240,
};

/// Frames the demo animation spans.
pub const DEMO_FRAMES: FrameRange = FrameRange {
    start: FrameIndex(0),
    end: FrameIndex(48),
};

/// Build the demo scene and return it with its root composite.
///
/// Every layer kind is exercised: a static frame border, a line swept by
/// four eased tracks, flat shapes, a late-starting overlay and, when
/// `texture` is given, a textured rectangle.
pub fn demo_scene(texture: Option<&Path>) -> KeyrasterResult<(Scene, LayerId)> {
    let mut scene = Scene::new();
    let (w, h) = (DEMO_CANVAS.width as i32, DEMO_CANVAS.height as i32);
    let end = DEMO_FRAMES.end.as_time();

    let mut x0 = KeyframeTrack::new();
    x0.add_cubic_influence(0.0, 20.0, 0.33, 0.33)
        .add_linear(end, 160.0);
    let mut y0 = KeyframeTrack::new();
    y0.add_quadratic_influence(0.0, 20.0, 1.0)
        .add_linear(end, 200.0);
    let mut x1 = KeyframeTrack::new();
    x1.add_linear(0.0, 300.0).add_linear(end, 160.0);
    let mut y1 = KeyframeTrack::new();
    y1.add_cubic(0.0, 220.0, Point::new(0.42, 0.0), Point::new(0.58, 1.0))
        .add_linear(end / 2.0, 40.0)
        .add_linear(end, 220.0);
    let [x0, y0, x1, y1] = [x0, y0, x1, y1].map(|t| scene.add_track(t));

    let mut border = LineLayer::new().with_color(Rgba::rgb(0.4, 0.4, 0.4));
    border
        .add_line(0, 0, w - 1, 0)
        .add_line(w - 1, 0, w - 1, h - 1)
        .add_line(w - 1, h - 1, 0, h - 1)
        .add_line(0, h - 1, 0, 0);
    let border = scene.add_layer(border.into());

    let mut sweep = LineLayer::new();
    sweep.add_animated_line(x0, y0, x1, y1);
    let sweep = scene.add_layer(sweep.into());

    let mut shapes = ShapeLayer::new();
    shapes
        .add_quad(
            Point::new(200.0, 140.0),
            Point::new(300.0, 220.0),
            Rgba::rgb(0.0, 0.3, 0.6),
        )
        .add_triangle(
            Point::new(30.0, 30.0),
            Point::new(130.0, 30.0),
            Point::new(80.0, 110.0),
            Rgba::rgb(0.0, 0.6, 0.2),
        );
    if let Some(path) = texture {
        shapes.add_textured_quad(Point::new(20.0, 140.0), Point::new(120.0, 220.0), path)?;
    }
    let shapes = scene.add_layer(shapes.into());

    let mut overlay = ShapeLayer::new();
    overlay.add_quad(
        Point::new(140.0, 20.0),
        Point::new(180.0, 60.0),
        Rgba::rgb(0.5, 0.5, 0.0),
    );
    let overlay = scene.add_layer(Layer::from(overlay).with_window(end / 2.0, end));

    let fps = Fps::new(24, 1)?;
    let root = scene.add_layer(
        CompositeLayer::new(DEMO_CANVAS, fps)
            .with_window_policy(TimeWindowPolicy::Enforce)
            .into(),
    );
    for child in [border, shapes, overlay, sweep] {
        scene.add_child(root, child)?;
    }
    Ok((scene, root))
}
