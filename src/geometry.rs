//! Radial layout math shared by hit-testing and rendering.
//!
//! Angles follow screen coordinates: 0 points right and angles grow
//! clockwise because the y axis points down.

use std::f32::consts::TAU;

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive on all edges.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// A point relative to the canvas centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub dx: f32,
    pub dy: f32,
    pub radius: f32,
    /// Normalised to `[0, TAU)`.
    pub angle: f32,
}

/// Centre and radii of the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialLayout {
    pub cx: f32,
    pub cy: f32,
    pub outer: f32,
    pub inner: f32,
}

impl RadialLayout {
    /// Ring centred in a `width`x`height` canvas.
    pub fn new(width: f32, height: f32, inner_ratio: f32) -> Self {
        let outer = width.min(height) / 2.0;
        Self {
            cx: width / 2.0,
            cy: height / 2.0,
            outer,
            inner: outer * inner_ratio,
        }
    }

    pub fn polar(&self, x: f32, y: f32) -> Polar {
        let dx = x - self.cx;
        let dy = y - self.cy;
        Polar {
            dx,
            dy,
            radius: dx.hypot(dy),
            angle: normalize_angle(dy.atan2(dx)),
        }
    }

    /// True when `radius` lies on the ring, edges included.
    pub fn in_ring(&self, radius: f32) -> bool {
        radius >= self.inner && radius <= self.outer
    }

    /// Sector under the canvas point, or `None` off the ring.
    pub fn sector_at(&self, x: f32, y: f32, count: usize) -> Option<usize> {
        let polar = self.polar(x, y);
        if !self.in_ring(polar.radius) {
            return None;
        }
        sector_index(polar.angle, count)
    }

    /// Canvas point at `radius` along `angle`.
    pub fn point_at(&self, radius: f32, angle: f32) -> (f32, f32) {
        (
            self.cx + radius * angle.cos(),
            self.cy + radius * angle.sin(),
        )
    }

    /// Middle of the sector, halfway between both rings.
    pub fn sector_midpoint(&self, index: usize, count: usize) -> (f32, f32) {
        let (start, end) = sector_span(index, count);
        self.point_at((self.inner + self.outer) / 2.0, (start + end) / 2.0)
    }

    /// Closed outline of a ring sector: the outer arc forwards, then the
    /// inner arc back, each sampled in `steps` segments.
    ///
    /// With no inner hole the inner arc collapses onto the centre.
    pub fn sector_outline(&self, index: usize, count: usize, steps: usize) -> Vec<(f32, f32)> {
        let (start, end) = sector_span(index, count);
        let steps = steps.max(1);
        let angle = |step: usize| start + (end - start) * step as f32 / steps as f32;

        let mut points: Vec<(f32, f32)> = (0..=steps)
            .map(|step| self.point_at(self.outer, angle(step)))
            .collect();
        if self.inner > 0.0 {
            points.extend((0..=steps).rev().map(|step| self.point_at(self.inner, angle(step))));
        } else {
            points.push((self.cx, self.cy));
        }
        points
    }

    /// Bounding box of a ring sector, sampled along both arcs.
    pub fn sector_bounds(&self, index: usize, count: usize) -> Rect {
        let (start, end) = sector_span(index, count);
        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;

        for step in 0..=4 {
            let angle = start + (end - start) * step as f32 / 4.0;
            for radius in [self.inner, self.outer] {
                let (x, y) = self.point_at(radius, angle);
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// Wraps any angle into `[0, TAU)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Sector containing `angle` when the circle is split into `count` equal parts.
///
/// Each sector owns its start angle; the result is always `< count`.
pub fn sector_index(angle: f32, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let fraction = normalize_angle(angle) / TAU;
    let index = (fraction * count as f32).floor() as usize;
    Some(index.min(count - 1))
}

/// Start and end angle of sector `index` out of `count`.
pub fn sector_span(index: usize, count: usize) -> (f32, f32) {
    let count = count.max(1) as f32;
    (
        TAU * index as f32 / count,
        TAU * (index + 1) as f32 / count,
    )
}
