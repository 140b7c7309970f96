//! Vector geometry for entity outlines and the radar
//!
//! Outlines are stored as raw cartesian points. To draw one, the points are
//! converted to polar form (r normalized to the largest hypotenuse), rotated
//! by the entity's orientation, scaled by its radius and moved to its
//! center. Screen y grows downward, so the final y is subtracted.

use glam::{DVec2, IVec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cartesian_to_polar;

/// A point in polar space with r in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarPoint {
    pub r: f64,
    /// Radians
    pub theta: f64,
}

impl PolarPoint {
    pub fn new(r: f64, theta: f64) -> Self {
        Self { r, theta }
    }

    /// Rotate by an orientation in degrees
    pub fn rotated(self, degrees: i32) -> Self {
        Self::new(self.r, self.theta + f64::from(degrees).to_radians())
    }

    /// Back to cartesian, scaled by `radius`
    ///
    /// Uses the (sin, cos) convention the outlines are authored in: theta 0
    /// points along +y.
    pub fn to_cartesian(self, radius: f64) -> IVec2 {
        IVec2::new(
            (self.r * radius * self.theta.sin()) as i32,
            (self.r * radius * self.theta.cos()) as i32,
        )
    }
}

/// Convert raw cartesian points to polars normalized by the largest hypotenuse
pub fn cartesians_to_polars(points: &[IVec2]) -> Vec<PolarPoint> {
    let largest = points
        .iter()
        .map(|p| p.as_dvec2().length())
        .fold(0.0_f64, f64::max);
    if largest == 0.0 {
        return points.iter().map(|_| PolarPoint::new(0.0, 0.0)).collect();
    }

    points
        .iter()
        .map(|p| {
            let (r, theta) = cartesian_to_polar(p.as_dvec2());
            PolarPoint::new(r / largest, theta)
        })
        .collect()
}

/// Screen-space polygon for an outline at `center` with `radius` and `orientation`
pub fn render_polygon(outline: &[IVec2], center: IVec2, radius: i32, orientation: i32) -> Vec<IVec2> {
    cartesians_to_polars(outline)
        .into_iter()
        .map(|pp| pp.rotated(orientation).to_cartesian(f64::from(radius)))
        .map(|p| IVec2::new(center.x + p.x, center.y - p.y))
        .collect()
}

/// Random jagged asteroid outline: 25-31 vertices sorted by angle
pub fn asteroid_outline(rng: &mut impl Rng) -> Vec<IVec2> {
    const PRECISION: f64 = 1000.0;
    const MAX_RADIANS_X1000: u32 = 6283;

    let vertices: usize = rng.random_range(25..32);
    let mut polars: Vec<PolarPoint> = (0..vertices)
        .map(|_| {
            let r = f64::from(800 + rng.random_range(0..200_u32)) / PRECISION;
            let theta = f64::from(rng.random_range(0..MAX_RADIANS_X1000)) / PRECISION;
            PolarPoint::new(r, theta)
        })
        .collect();
    polars.sort_by(|a, b| a.theta.total_cmp(&b.theta));

    polars.into_iter().map(|pp| pp.to_cartesian(PRECISION)).collect()
}

/// Euclidean distance between two integer points
#[inline]
pub fn distance(a: IVec2, b: IVec2) -> f64 {
    a.as_dvec2().distance(b.as_dvec2())
}

/// Radar scale adjustment for non-square universes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
}

impl AspectRatio {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// Aspect ratio for a universe of `multiplier` screens (width x height)
    pub fn for_universe(multiplier: IVec2) -> Self {
        let w = f64::from(multiplier.x);
        let h = f64::from(multiplier.y);
        if multiplier.x == multiplier.y {
            Self::new(1.0, 1.0)
        } else if multiplier.x > multiplier.y {
            Self::new(w / h, 1.0).scale(0.5)
        } else {
            Self::new(1.0, h / w).scale(0.5)
        }
    }

    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_polars_normalized_to_largest() {
        let polars = cartesians_to_polars(&[IVec2::new(0, 3), IVec2::new(4, 0)]);
        assert!((polars[0].r - 0.75).abs() < 1e-9);
        assert!((polars[1].r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_outline() {
        let polars = cartesians_to_polars(&[IVec2::ZERO, IVec2::ZERO]);
        assert!(polars.iter().all(|p| p.r == 0.0));
    }

    #[test]
    fn test_render_polygon_translates_to_center() {
        // A single point on the +y axis, outline space. With no rotation the
        // (sin, cos) swap maps it onto screen x.
        let poly = render_polygon(&[IVec2::new(0, 10)], IVec2::new(100, 100), 20, 0);
        assert_eq!(poly.len(), 1);
        let d = distance(poly[0], IVec2::new(100, 100));
        assert!((d - 20.0).abs() <= 1.5);
    }

    #[test]
    fn test_rotation_preserves_distance() {
        let outline = [IVec2::new(5, 5), IVec2::new(-4, 0), IVec2::new(0, -4)];
        let center = IVec2::new(300, 200);
        for orientation in [0, 45, 90, 200, 359] {
            for (p, raw) in render_polygon(&outline, center, 50, orientation)
                .into_iter()
                .zip(outline)
            {
                let expected = 50.0 * raw.as_dvec2().length() / 50.0_f64.sqrt();
                assert!((distance(p, center) - expected).abs() <= 1.5);
            }
        }
    }

    #[test]
    fn test_asteroid_outline_sorted_and_sized() {
        let mut rng = Pcg32::seed_from_u64(77);
        let outline = asteroid_outline(&mut rng);
        assert!((25..32).contains(&outline.len()));
        for p in &outline {
            let r = p.as_dvec2().length();
            assert!(r > 790.0 && r <= 1000.0);
        }
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(AspectRatio::for_universe(IVec2::new(2, 2)), AspectRatio::new(1.0, 1.0));
        assert_eq!(AspectRatio::for_universe(IVec2::new(3, 1)), AspectRatio::new(1.5, 0.5));
        assert_eq!(AspectRatio::for_universe(IVec2::new(1, 3)), AspectRatio::new(0.5, 1.5));
    }
}
