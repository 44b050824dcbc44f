//! Incremental (Bresenham-style) line scan.
//!
//! The scan walks `|dx|` steps along the major axis, so the far endpoint is
//! not emitted: `(0, 0) -> (5, 0)` covers `x = 0..=4`.

/// Static line segment between two integer endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LineSegment {
    /// Start x.
    pub x0: i32,
    /// Start y.
    pub y0: i32,
    /// End x.
    pub x1: i32,
    /// End y.
    pub y1: i32,
}

impl LineSegment {
    /// Segment from `(x0, y0)` to `(x1, y1)`.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Pixels covered by the segment.
    pub fn scan(&self) -> LineScan {
        LineScan::new(self.x0, self.y0, self.x1, self.y1)
    }
}

/// Iterator over the pixels of one line, produced by [`LineScan::new`].
#[derive(Clone, Debug)]
pub struct LineScan {
    major: i64,
    minor: i64,
    direction: i64,
    slope: f32,
    error: f32,
    remaining: u64,
    steep: bool,
}

impl LineScan {
    /// Prepare the scan of the line `(x0, y0) -> (x1, y1)`.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (mut x0, mut y0, mut x1, mut y1) = (
            i64::from(x0),
            i64::from(y0),
            i64::from(x1),
            i64::from(y1),
        );

        // Keep |slope| <= 1 by swapping axis roles.
        let mut slope = (y1 - y0) as f32 / (x1 - x0) as f32;
        let steep = slope.abs() > 1.0;
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
            slope = 1.0 / slope;
        }

        if x1 < x0 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        // Falling lines are walked backward from the right endpoint so the
        // minor axis always increases.
        let (major, minor, direction) = if slope < 0.0 {
            slope = -slope;
            (x1, y1, -1)
        } else {
            (x0, y0, 1)
        };

        Self {
            major,
            minor,
            direction,
            slope,
            error: 0.5,
            remaining: (x1 - x0).unsigned_abs(),
            steep,
        }
    }
}

impl Iterator for LineScan {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        if self.error >= 1.0 {
            self.error -= 1.0;
            self.minor += 1;
        }

        // Both coordinates stay between the input endpoints.
        let (x, y) = if self.steep {
            (self.minor as i32, self.major as i32)
        } else {
            (self.major as i32, self.minor as i32)
        };

        self.major += self.direction;
        self.error += self.slope;
        Some((x, y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

/// Pixels of the line `(x0, y0) -> (x1, y1)`.
pub fn rasterize_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    LineScan::new(x0, y0, x1, y1).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/raster/line.rs"]
mod tests;
