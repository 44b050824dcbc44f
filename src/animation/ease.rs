use kurbo::{CubicBez, ParamCurve, QuadBez};

use crate::foundation::{
    core::Point,
    error::{KeyrasterError, KeyrasterResult},
    math::solve_cubic_unit,
};

/// Fixed number of halving steps used to invert the cubic curve.
const CUBIC_SEARCH_STEPS: i32 = 16;

/// Value returned by the infallible APIs when the input is outside `[0, 1]`
/// or the curve cannot be inverted.
pub const EASE_SENTINEL: f64 = -1.0;

const START: Point = Point::new(0.0, 0.0);
const END: Point = Point::new(1.0, 1.0);

/// Easing curve reshaping linear progress in `[0, 1]` into eased progress.
///
/// Every curve is anchored at `(0, 0)` and `(1, 1)`; only the control points vary.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Identity: `eased(x) = x`.
    Linear,
    /// Quadratic Bezier through one control point.
    Quadratic {
        /// Control point `P1`; `x` is expected in `[0, 1]`.
        control: Point,
    },
    /// Cubic Bezier through two control points.
    Cubic {
        /// First control point `P1`; `x` is expected in `[0, 1]`.
        c1: Point,
        /// Second control point `P2`; `x` is expected in `[0, 1]`.
        c2: Point,
    },
}

impl Ease {
    /// Quadratic curve with the given control point. An out-of-range `x` is reported and kept.
    pub fn quadratic(control: Point) -> Self {
        let ease = Self::Quadratic { control };
        ease.report_invalid();
        ease
    }

    /// Quadratic curve from an influence value: `P1 = (influence, 0)`.
    pub fn quadratic_influence(influence: f64) -> Self {
        Self::quadratic(Point::new(influence, 0.0))
    }

    /// Cubic curve with two control points. Out-of-range `x` values are reported and kept.
    pub fn cubic(c1: Point, c2: Point) -> Self {
        let ease = Self::Cubic { c1, c2 };
        ease.report_invalid();
        ease
    }

    /// Cubic curve from two influence values: `P1 = (in, 0)`, `P2 = (1 - out, 1)`.
    pub fn cubic_influence(influence_in: f64, influence_out: f64) -> Self {
        Self::cubic(
            Point::new(influence_in, 0.0),
            Point::new(1.0 - influence_out, 1.0),
        )
    }

    /// Check that every control point has `x` in `[0, 1]`.
    pub fn validate(&self) -> KeyrasterResult<()> {
        let check = |name: &str, p: Point| {
            if (0.0..=1.0).contains(&p.x) {
                Ok(())
            } else {
                Err(KeyrasterError::validation(format!(
                    "can not set {name} to ({}, {}): x must be in [0, 1]",
                    p.x, p.y
                )))
            }
        };
        match *self {
            Self::Linear => Ok(()),
            Self::Quadratic { control } => check("control", control),
            Self::Cubic { c1, c2 } => {
                check("control_1", c1)?;
                check("control_2", c2)
            }
        }
    }

    fn report_invalid(&self) {
        if let Err(err) = self.validate() {
            tracing::warn!(%err, "easing control point out of range");
        }
    }

    /// Point on the curve at parameter `t`.
    ///
    /// `t` outside `[0, 1]` is reported and yields the origin.
    pub fn point_at(&self, t: f64) -> Point {
        if !(0.0..=1.0).contains(&t) {
            tracing::warn!(t, "curve parameter is not in [0, 1]");
            return START;
        }
        self.eval(t)
    }

    fn eval(&self, t: f64) -> Point {
        match *self {
            Self::Linear => Point::new(t, t),
            Self::Quadratic { control } => QuadBez::new(START, control, END).eval(t),
            Self::Cubic { c1, c2 } => CubicBez::new(START, c1, c2, END).eval(t),
        }
    }

    /// Eased progress for linear progress `x`.
    ///
    /// Returns [`EASE_SENTINEL`] (after reporting) when `x` is outside `[0, 1]`.
    pub fn apply(&self, x: f64) -> f64 {
        self.try_apply(x).unwrap_or_else(|err| {
            tracing::warn!(%err, "easing evaluation failed");
            EASE_SENTINEL
        })
    }

    /// Fallible form of [`Ease::apply`].
    pub fn try_apply(&self, x: f64) -> KeyrasterResult<f64> {
        if !(0.0..=1.0).contains(&x) {
            return Err(KeyrasterError::animation(format!(
                "x = {x} is not in [0, 1]"
            )));
        }
        if x == 0.0 {
            return Ok(0.0);
        }
        if x == 1.0 {
            return Ok(1.0);
        }

        let t = match *self {
            Self::Linear => return Ok(x),
            Self::Quadratic { control } => quadratic_t_for_x(control.x, x),
            Self::Cubic { .. } => self.search_t_for_x(x),
        };
        Ok(self.eval(t).y)
    }

    /// Fixed-schedule halving search: the step is `0.5^(i+1)` on iteration `i`
    /// whichever side the sample lands on.
    fn search_t_for_x(&self, x: f64) -> f64 {
        let mut t = 0.5;
        for i in 1..=CUBIC_SEARCH_STEPS {
            let step = 0.5f64.powi(i + 1);
            if self.eval(t).x > x {
                t -= step;
            } else {
                t += step;
            }
        }
        t
    }

    /// Like [`Ease::apply`], but inverts the cubic curve with the closed-form
    /// cubic root solver instead of the halving search.
    ///
    /// Returns [`EASE_SENTINEL`] when no root lies in `[0, 1]`.
    pub fn apply_exact(&self, x: f64) -> f64 {
        let Self::Cubic { c1, c2 } = *self else {
            return self.apply(x);
        };
        if !(0.0..=1.0).contains(&x) {
            tracing::warn!(x, "x is not in [0, 1]");
            return EASE_SENTINEL;
        }

        // x(t) = (1 + 3a - 3b) t^3 + (3b - 6a) t^2 + 3a t
        let (a, b) = (c1.x, c2.x);
        match solve_cubic_unit(1.0 + 3.0 * a - 3.0 * b, 3.0 * b - 6.0 * a, 3.0 * a, -x) {
            Some(t) => self.eval(t).y,
            None => EASE_SENTINEL,
        }
    }
}

fn quadratic_t_for_x(a: f64, x: f64) -> f64 {
    // The closed form divides by (2 - 4a).
    if a == 0.5 {
        return x;
    }
    (-2.0 * a + (4.0 * a * a + 4.0 * (1.0 - 2.0 * a) * x).sqrt()) / (2.0 - 4.0 * a)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
