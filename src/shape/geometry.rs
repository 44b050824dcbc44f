use std::path::Path;

use crate::{
    assets::decode::load_image,
    foundation::{
        core::Point,
        error::{KeyrasterError, KeyrasterResult},
        math::tri_area,
    },
    raster::{grid::PixelGrid, pixel::Rgba},
};

/// Barycentric weights `(A, B, C)` of a point relative to a triangle's
/// vertices `P0`, `P1`, `P2`.
pub type Barycentric = [f64; 3];

#[derive(Clone, Copy, Debug, PartialEq)]
/// Flat-colored triangle with per-vertex texture coordinates.
pub struct Triangle {
    /// Vertices `P0`, `P1`, `P2`.
    pub p: [Point; 3],
    /// Texture-space coordinates matching `p`.
    pub tex: [Point; 3],
    /// Fill color.
    pub color: Rgba,
}

impl Triangle {
    /// Red triangle with zeroed texture coordinates.
    pub fn new(p0: Point, p1: Point, p2: Point) -> Self {
        Self {
            p: [p0, p1, p2],
            tex: [Point::ORIGIN; 3],
            color: Rgba::RED,
        }
    }

    /// Replace the fill color.
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Replace the texture coordinates.
    pub fn with_tex_coords(mut self, t0: Point, t1: Point, t2: Point) -> Self {
        self.tex = [t0, t1, t2];
        self
    }

    /// Barycentric weights of `q`: each sub-triangle area divided by the full area.
    pub fn barycentric(&self, q: Point) -> Barycentric {
        let [p0, p1, p2] = self.p;

        let qa = q - p0;
        let qb = q - p1;

        let pa = p2 - p1;
        let pb = p2 - p0;
        let pc = p1 - p0;

        let area = tri_area(pc, pb);
        let a = tri_area(pa, qb);
        let b = tri_area(qa, pb);
        let c = tri_area(pc, qa);

        [a / area, b / area, c / area]
    }

    /// Weights of `q` when it lies inside the triangle (edges included).
    pub fn hit(&self, q: Point) -> Option<Barycentric> {
        let bary = self.barycentric(q);
        bary.iter().all(|w| *w >= 0.0).then_some(bary)
    }

    /// Whether `q` lies inside the triangle (edges included).
    pub fn contains(&self, q: Point) -> bool {
        self.hit(q).is_some()
    }

    /// Texture coordinate interpolated with barycentric weights.
    pub fn uv(&self, bary: Barycentric) -> Point {
        let [t0, t1, t2] = self.tex;
        (t0.to_vec2() * bary[0] + t1.to_vec2() * bary[1] + t2.to_vec2() * bary[2]).to_point()
    }

    /// Fill color when `q` is covered.
    pub fn color_at(&self, q: Point) -> Option<Rgba> {
        self.contains(q).then_some(self.color)
    }
}

/// Split the rectangle `[p0, p1]` along its `p0`-`p1` diagonal.
///
/// Texture space runs from `(0, 0)` at `p0` to `(1, 1)` at `p1`.
fn split_rect(p0: Point, p1: Point, color: Rgba, shape: &str) -> KeyrasterResult<[Triangle; 2]> {
    if p1.x <= p0.x || p1.y <= p0.y {
        return Err(KeyrasterError::validation(format!(
            "{shape} corner P1 ({}, {}) must be greater than P0 ({}, {})",
            p1.x, p1.y, p0.x, p0.y
        )));
    }

    let upper = Triangle::new(p1, p0, Point::new(p0.x, p1.y))
        .with_tex_coords(Point::new(1.0, 1.0), Point::new(0.0, 0.0), Point::new(0.0, 1.0))
        .with_color(color);
    let lower = Triangle::new(p1, Point::new(p1.x, p0.y), p0)
        .with_tex_coords(Point::new(1.0, 1.0), Point::new(1.0, 0.0), Point::new(0.0, 0.0))
        .with_color(color);
    Ok([upper, lower])
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Axis-aligned flat-colored rectangle built from two triangles.
pub struct Quad {
    tris: [Triangle; 2],
}

impl Quad {
    /// Rectangle from the lower-left corner `p0` to the upper-right corner `p1`.
    ///
    /// Fails unless `p1.x > p0.x` and `p1.y > p0.y`.
    pub fn new(p0: Point, p1: Point, color: Rgba) -> KeyrasterResult<Self> {
        Ok(Self {
            tris: split_rect(p0, p1, color, "quad")?,
        })
    }

    /// The two triangles, in hit-test order.
    pub fn triangles(&self) -> &[Triangle; 2] {
        &self.tris
    }

    /// Fill color when `q` is covered.
    pub fn color_at(&self, q: Point) -> Option<Rgba> {
        self.tris.iter().find_map(|t| t.color_at(q))
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Axis-aligned rectangle colored by nearest-pixel texture lookup.
pub struct TexturedQuad {
    tris: [Triangle; 2],
    texture: PixelGrid,
}

impl TexturedQuad {
    /// Rectangle `[p0, p1]` sampling `texture`.
    pub fn new(p0: Point, p1: Point, texture: PixelGrid) -> KeyrasterResult<Self> {
        if texture.width() == 0 || texture.height() == 0 {
            return Err(KeyrasterError::validation("texture must not be empty"));
        }
        Ok(Self {
            tris: split_rect(p0, p1, Rgba::default(), "textured quad")?,
            texture,
        })
    }

    /// Rectangle `[p0, p1]` sampling the image at `path`.
    pub fn open(p0: Point, p1: Point, path: impl AsRef<Path>) -> KeyrasterResult<Self> {
        let texture = load_image(path)?;
        Self::new(p0, p1, texture)
    }

    /// Owned texture.
    pub fn texture(&self) -> &PixelGrid {
        &self.texture
    }

    /// Texture color when `q` is covered.
    pub fn color_at(&self, q: Point) -> Option<Rgba> {
        let (tri, bary) = self
            .tris
            .iter()
            .find_map(|t| t.hit(q).map(|bary| (t, bary)))?;
        let uv = tri.uv(bary);

        // Nearest pixel, v flipped into top-left storage rows.
        let (w, h) = self.texture.dimensions();
        let col = (uv.x * f64::from(w - 1)) as i32;
        let row = (h - 1) as i32 - (uv.y * f64::from(h - 1)) as i32;
        self.texture.get(col, row).map(|px| px.with_alpha(1.0))
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Closed set of renderable shapes.
pub enum Geometry {
    /// Single triangle.
    Triangle(Triangle),
    /// Flat rectangle.
    Quad(Quad),
    /// Textured rectangle.
    TexturedQuad(TexturedQuad),
}

impl Geometry {
    /// Color at `q`, or `None` when the shape does not cover it.
    pub fn color_at(&self, q: Point) -> Option<Rgba> {
        match self {
            Self::Triangle(t) => t.color_at(q),
            Self::Quad(quad) => quad.color_at(q),
            Self::TexturedQuad(tq) => tq.color_at(q),
        }
    }
}

impl From<Triangle> for Geometry {
    fn from(t: Triangle) -> Self {
        Self::Triangle(t)
    }
}

impl From<Quad> for Geometry {
    fn from(q: Quad) -> Self {
        Self::Quad(q)
    }
}

impl From<TexturedQuad> for Geometry {
    fn from(q: TexturedQuad) -> Self {
        Self::TexturedQuad(q)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/geometry.rs"]
mod tests;
