use super::*;
use crate::animation::track::KeyframeTrack;

const HALF_RED: Rgba = Rgba::rgb(0.5, 0.0, 0.0);
const GREEN: Rgba = Rgba::rgb(0.0, 1.0, 0.0);

fn canvas(width: u32, height: u32) -> Canvas {
    Canvas { width, height }
}

fn fps() -> Fps {
    Fps::new(24, 1).unwrap()
}

fn constant(scene: &mut Scene, value: f64) -> TrackId {
    let mut track = KeyframeTrack::new();
    track.add_linear(0.0, value);
    scene.add_track(track)
}

#[test]
fn window_is_half_open() {
    let layer = Layer::from(ShapeLayer::new()).with_window(1.0, 2.0);
    assert!(!layer.is_active(0.5));
    assert!(layer.is_active(1.0));
    assert!(layer.is_active(1.99));
    assert!(!layer.is_active(2.0));
}

#[test]
fn default_window_covers_everything() {
    let layer = Layer::from(LineLayer::new());
    assert!(layer.is_active(-1.0e300));
    assert!(layer.is_active(0.0));
    assert!(layer.is_active(1.0e300));
}

#[test]
fn line_layer_paints_bottom_left_origin() {
    let scene = Scene::new();
    let mut lines = LineLayer::new();
    lines.add_line(0, 0, 3, 0);
    let mut grid = PixelGrid::new(4, 2);
    Layer::from(lines).render(&scene, &mut grid, 0.0);

    // y = 0 is the bottom storage row; the end point is excluded.
    for x in 0..3 {
        assert_eq!(grid.get(x, 1), Some(&Rgba::RED));
    }
    assert_eq!(grid.get(3, 1), Some(&Rgba::BLACK));
    assert!(grid.pixels()[..4].iter().all(|px| *px == Rgba::BLACK));
}

#[test]
fn animated_line_follows_tracks() {
    let mut scene = Scene::new();
    let zero = constant(&mut scene, 0.0);
    let mut grow = KeyframeTrack::new();
    grow.add_linear(0.0, 0.0).add_linear(10.0, 4.0);
    let grow = scene.add_track(grow);

    let mut lines = LineLayer::new().with_color(GREEN);
    lines.add_animated_line(zero, zero, grow, zero);
    let layer = Layer::from(lines);

    let mut grid = PixelGrid::new(4, 1);
    layer.render(&scene, &mut grid, 5.0);
    assert_eq!(
        grid.pixels(),
        &[GREEN, GREEN, Rgba::BLACK, Rgba::BLACK]
    );
}

#[test]
fn animated_endpoints_truncate_toward_zero() {
    let mut scene = Scene::new();
    let x = constant(&mut scene, 2.9);
    let y = constant(&mut scene, -0.7);
    let seg = AnimatedLineSegment { x0: x, y0: y, x1: x, y1: x };
    assert_eq!(seg.resolve(&scene, 0.0), Some(LineSegment::new(2, 0, 2, 2)));
}

#[test]
fn unknown_track_skips_segment() {
    let mut scene = Scene::new();
    let known = constant(&mut scene, 0.0);

    let mut lines = LineLayer::new();
    lines
        .add_animated_line(known, known, TrackId(99), known)
        .add_line(0, 0, 1, 0);
    let mut grid = PixelGrid::new(2, 1);
    Layer::from(lines).render(&scene, &mut grid, 0.0);
    assert_eq!(grid.pixels(), &[Rgba::RED, Rgba::BLACK]);
}

#[test]
fn shape_layer_fills_quad_inclusive() {
    let scene = Scene::new();
    let mut shapes = ShapeLayer::new();
    shapes.add_quad(Point::new(0.0, 0.0), Point::new(2.0, 2.0), GREEN);
    let mut grid = PixelGrid::new(4, 4);
    Layer::from(shapes).render(&scene, &mut grid, 0.0);

    for y in 0..=2 {
        for x in 0..=2 {
            assert_eq!(grid.get(x, 3 - y), Some(&GREEN), "({x}, {y})");
        }
    }
    assert_eq!(grid.get(3, 3), Some(&Rgba::BLACK));
    assert_eq!(grid.get(0, 0), Some(&Rgba::BLACK));
}

#[test]
fn later_shape_wins() {
    let mut shapes = ShapeLayer::new();
    shapes
        .add_quad(Point::new(0.0, 0.0), Point::new(4.0, 4.0), GREEN)
        .add_triangle(
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(0.0, 2.0),
            Rgba::RED,
        );
    assert_eq!(shapes.color_at(0, 0), Some(Rgba::RED));
    assert_eq!(shapes.color_at(3, 3), Some(GREEN));
    assert_eq!(shapes.color_at(5, 5), None);
}

#[test]
fn bad_quad_is_skipped() {
    let mut shapes = ShapeLayer::new();
    shapes.add_quad(Point::new(2.0, 2.0), Point::new(1.0, 3.0), GREEN);
    assert!(shapes.geometry().is_empty());
}

#[test]
fn missing_texture_is_an_error() {
    let mut shapes = ShapeLayer::new();
    let res = shapes.add_textured_quad(
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        "target/does-not-exist/texture.png",
    );
    assert!(res.is_err());
    assert!(shapes.geometry().is_empty());
}

#[test]
fn composite_adds_children() {
    let mut scene = Scene::new();
    let comp = scene.add_layer(CompositeLayer::new(canvas(3, 3), fps()).into());
    for _ in 0..2 {
        let mut lines = LineLayer::new().with_color(HALF_RED);
        lines.add_line(0, 0, 1, 0);
        let id = scene.add_layer(lines.into());
        scene.add_child(comp, id).unwrap();
    }

    let mut grid = PixelGrid::new(3, 3);
    scene.render_layer(comp, &mut grid, 0.0);
    assert_eq!(grid.get(0, 2), Some(&Rgba::rgb(1.0, 0.0, 0.0)));
    assert_eq!(grid.get(1, 2), Some(&Rgba::BLACK));
}

#[test]
fn composite_window_policy() {
    let mut scene = Scene::new();
    let mut lines = LineLayer::new();
    lines.add_line(0, 0, 1, 0);
    let late = scene.add_layer(Layer::from(lines).with_window(5.0, 10.0));

    let ignore = scene.add_layer(CompositeLayer::new(canvas(1, 1), fps()).into());
    let enforce = scene.add_layer(
        CompositeLayer::new(canvas(1, 1), fps())
            .with_window_policy(TimeWindowPolicy::Enforce)
            .into(),
    );
    scene.add_child(ignore, late).unwrap();
    scene.add_child(enforce, late).unwrap();

    let mut grid = PixelGrid::new(1, 1);
    scene.render_layer(ignore, &mut grid, 0.0);
    assert_eq!(grid.pixels(), &[Rgba::RED]);

    grid.clear();
    scene.render_layer(enforce, &mut grid, 0.0);
    assert_eq!(grid.pixels(), &[Rgba::BLACK]);

    scene.render_layer(enforce, &mut grid, 5.0);
    assert_eq!(grid.pixels(), &[Rgba::RED]);
}

#[test]
fn mismatched_target_is_skipped() {
    let mut scene = Scene::new();
    let comp = scene.add_layer(CompositeLayer::new(canvas(2, 2), fps()).into());
    let mut lines = LineLayer::new();
    lines.add_line(0, 0, 1, 0);
    let child = scene.add_layer(lines.into());
    scene.add_child(comp, child).unwrap();

    let mut grid = PixelGrid::new(3, 3);
    scene.render_layer(comp, &mut grid, 0.0);
    assert_eq!(grid, PixelGrid::new(3, 3));
}

#[test]
fn nested_composites_accumulate() {
    let mut scene = Scene::new();
    let outer = scene.add_layer(CompositeLayer::new(canvas(1, 1), fps()).into());
    let inner = scene.add_layer(CompositeLayer::new(canvas(1, 1), fps()).into());
    let mut lines = LineLayer::new().with_color(HALF_RED);
    lines.add_line(0, 0, 1, 0);
    let leaf = scene.add_layer(lines.into());
    scene.add_child(inner, leaf).unwrap();
    scene.add_child(outer, inner).unwrap();
    scene.add_child(outer, leaf).unwrap();

    let mut grid = PixelGrid::new(1, 1);
    scene.render_layer(outer, &mut grid, 0.0);
    assert_eq!(grid.pixels(), &[Rgba::rgb(1.0, 0.0, 0.0)]);
}
