use std::f64::consts::PI;

use crate::foundation::core::Vec2;

const DEGENERATE_EPS: f64 = 1e-12;

/// Signed area of the triangle spanned by two edge vectors.
///
/// The vectors are treated as 3D vectors with `z = 0`; the result is half the
/// `z` component of their cross product, so a counter-clockwise pair is
/// positive and a clockwise pair negative. Barycentric weights depend on every
/// area being computed with this same convention.
pub(crate) fn tri_area(a: Vec2, b: Vec2) -> f64 {
    a.cross(b) / 2.0
}

/// Root set of a real cubic polynomial.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum CubicRoots {
    /// One real root plus a complex-conjugate pair `re ± im·i`.
    OneReal { real: f64, re: f64, im: f64 },
    /// Three real roots (possibly repeated).
    ThreeReal([f64; 3]),
    /// Leading coefficients vanished; the listed real roots of the reduced polynomial.
    Reduced([Option<f64>; 2]),
}

impl CubicRoots {
    fn first_in_unit(&self) -> Option<f64> {
        let in_unit = |r: &f64| (0.0..=1.0).contains(r);
        match self {
            Self::OneReal { real, .. } => Some(*real).filter(in_unit),
            Self::ThreeReal(roots) => roots.iter().copied().find(in_unit),
            Self::Reduced(roots) => roots.iter().flatten().copied().find(in_unit),
        }
    }
}

/// All roots of `a·t³ + b·t² + c·t + d` (Cardano / trigonometric method).
pub(crate) fn cubic_roots(a: f64, b: f64, c: f64, d: f64) -> CubicRoots {
    if a.abs() < DEGENERATE_EPS {
        return CubicRoots::Reduced(quadratic_roots(b, c, d));
    }

    let b = b / a;
    let c = c / a;
    let d = d / a;

    let q = (3.0 * c - b * b) / 9.0;
    let r = (-(27.0 * d) + b * (9.0 * c - 2.0 * (b * b))) / 54.0;
    let disc = q * q * q + r * r;
    let term = b / 3.0;

    if disc > 0.0 {
        let s = (r + disc.sqrt()).cbrt();
        let t = (r - disc.sqrt()).cbrt();
        CubicRoots::OneReal {
            real: -term + s + t,
            re: -(term + (s + t) / 2.0),
            im: 3f64.sqrt() * (s - t) / 2.0,
        }
    } else if disc == 0.0 {
        let r13 = r.cbrt();
        let repeated = -(r13 + term);
        CubicRoots::ThreeReal([-term + 2.0 * r13, repeated, repeated])
    } else {
        let q = -q;
        let angle = (r / (q * q * q).sqrt()).acos();
        let r13 = 2.0 * q.sqrt();
        CubicRoots::ThreeReal([
            -term + r13 * (angle / 3.0).cos(),
            -term + r13 * ((angle + 2.0 * PI) / 3.0).cos(),
            -term + r13 * ((angle + 4.0 * PI) / 3.0).cos(),
        ])
    }
}

fn quadratic_roots(a: f64, b: f64, c: f64) -> [Option<f64>; 2] {
    if a.abs() < DEGENERATE_EPS {
        if b.abs() < DEGENERATE_EPS {
            return [None, None];
        }
        return [Some(-c / b), None];
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return [None, None];
    }
    let sq = disc.sqrt();
    [Some((-b + sq) / (2.0 * a)), Some((-b - sq) / (2.0 * a))]
}

/// First real root of `a·t³ + b·t² + c·t + d` that lies in `[0, 1]`.
///
/// Reports every candidate root through `tracing` when none qualifies.
pub(crate) fn solve_cubic_unit(a: f64, b: f64, c: f64, d: f64) -> Option<f64> {
    let roots = cubic_roots(a, b, c, d);
    let found = roots.first_in_unit();
    if found.is_none() {
        tracing::warn!(?roots, "cubic has no real solution between 0 and 1");
    }
    found
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
