//! Axis-aligned walls around the origin

use crate::error::{require_non_negative, require_positive, PhysicsError};
use bounce_math::{Axis, Vec2};
use serde::{Deserialize, Serialize};

/// Rectangular boundary given as distances from the origin to each wall
///
/// With +y pointing down, the top wall sits at `y = -top`, the bottom wall at
/// `y = bottom`, the left wall at `x = -left` and the right wall at `x = right`.
/// All four distances are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundsState")]
pub struct Bounds {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

/// Serialized wall distances before validation
#[derive(Deserialize)]
struct BoundsState {
    top: f32,
    bottom: f32,
    left: f32,
    right: f32,
}

impl TryFrom<BoundsState> for Bounds {
    type Error = PhysicsError;

    fn try_from(state: BoundsState) -> Result<Self, Self::Error> {
        Self::new(state.top, state.bottom, state.left, state.right)
    }
}

impl Bounds {
    /// Create bounds from four wall distances
    pub fn new(top: f32, bottom: f32, left: f32, right: f32) -> Result<Self, PhysicsError> {
        Ok(Self {
            top: require_non_negative("top", top)?,
            bottom: require_non_negative("bottom", bottom)?,
            left: require_non_negative("left", left)?,
            right: require_non_negative("right", right)?,
        })
    }

    /// Bounds centred on the origin with the given half extents
    pub fn symmetric(half_width: f32, half_height: f32) -> Result<Self, PhysicsError> {
        Self::new(half_height, half_height, half_width, half_width)
    }

    /// Derive bounds from a viewport in pixels and a pixels-per-meter zoom
    ///
    /// Each wall sits half the viewport extent away from the centre, divided
    /// by the zoom.
    pub fn from_viewport(width: f32, height: f32, zoom: f32) -> Result<Self, PhysicsError> {
        let width = require_non_negative("viewport_width", width)?;
        let height = require_non_negative("viewport_height", height)?;
        let zoom = require_positive("zoom", zoom)?;
        Self::symmetric(width / 2.0 / zoom, height / 2.0 / zoom)
    }

    /// Coordinate of the wall on the negative side of `axis` (top or left)
    #[inline]
    pub fn min(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => -self.left,
            Axis::Y => -self.top,
        }
    }

    /// Coordinate of the wall on the positive side of `axis` (bottom or right)
    #[inline]
    pub fn max(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.right,
            Axis::Y => self.bottom,
        }
    }

    /// Whether a ball of `radius` at `position` lies fully inside
    pub fn contains(&self, position: Vec2, radius: f32) -> bool {
        Axis::RESOLVE_ORDER.iter().all(|&axis| {
            let p = position.get(axis);
            p - radius >= self.min(axis) && p + radius <= self.max(axis)
        })
    }
}

/// Recompute bounds after the viewport changed size
pub fn recompute_bounds(viewport_width: f32, viewport_height: f32, zoom: f32) -> Result<Bounds, PhysicsError> {
    Bounds::from_viewport(viewport_width, viewport_height, zoom)
}

/// Move a ball position back inside `bounds`
///
/// A coordinate past a wall lands exactly on that wall (offset by the radius).
/// Coordinates already inside are returned untouched. If the bounds are
/// narrower than the ball, the positive wall (bottom/right) is checked first.
pub fn clamp_to_bounds(position: Vec2, radius: f32, bounds: &Bounds) -> Vec2 {
    let mut clamped = position;
    for axis in Axis::RESOLVE_ORDER {
        let p = clamped.get_mut(axis);
        let max = bounds.max(axis) - radius;
        let min = bounds.min(axis) + radius;
        if *p > max {
            *p = max;
        } else if *p < min {
            *p = min;
        }
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recompute_bounds_from_viewport() {
        let bounds = recompute_bounds(800.0, 600.0, 20.0).unwrap();
        assert_eq!(
            bounds,
            Bounds { top: 15.0, bottom: 15.0, left: 20.0, right: 20.0 }
        );
    }

    #[test]
    fn test_zero_viewport_is_allowed() {
        let bounds = recompute_bounds(0.0, 0.0, 20.0).unwrap();
        assert_eq!(bounds, Bounds::symmetric(0.0, 0.0).unwrap());
    }

    #[test]
    fn test_rejects_bad_zoom() {
        assert!(matches!(
            recompute_bounds(800.0, 600.0, 0.0),
            Err(PhysicsError::InvalidParameter { name: "zoom", .. })
        ));
        assert!(recompute_bounds(800.0, 600.0, -2.0).is_err());
    }

    #[test]
    fn test_rejects_negative_extents() {
        assert!(recompute_bounds(-1.0, 600.0, 20.0).is_err());
        assert!(Bounds::new(1.0, -1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_deserialize_rejects_negative_extents() {
        let bounds: Bounds = toml::from_str("top = 1.0\nbottom = 2.0\nleft = 3.0\nright = 4.0").unwrap();
        assert_eq!(bounds, Bounds::new(1.0, 2.0, 3.0, 4.0).unwrap());

        let err = toml::from_str::<Bounds>("top = 1.0\nbottom = -2.0\nleft = 3.0\nright = 4.0")
            .unwrap_err();
        assert!(err.to_string().contains("`bottom`"));
    }

    #[test]
    fn test_wall_coordinates() {
        let bounds = Bounds::new(1.0, 2.0, 3.0, 4.0).unwrap();
        assert_eq!(bounds.min(Axis::Y), -1.0);
        assert_eq!(bounds.max(Axis::Y), 2.0);
        assert_eq!(bounds.min(Axis::X), -3.0);
        assert_eq!(bounds.max(Axis::X), 4.0);
    }

    #[test]
    fn test_contains() {
        let bounds = Bounds::symmetric(10.0, 10.0).unwrap();
        assert!(bounds.contains(Vec2::ZERO, 1.0));
        assert!(bounds.contains(Vec2::new(9.0, -9.0), 1.0));
        assert!(!bounds.contains(Vec2::new(9.5, 0.0), 1.0));
        assert!(!bounds.contains(Vec2::new(0.0, -9.5), 1.0));
    }

    #[test]
    fn test_clamp_inside_is_noop() {
        let bounds = Bounds::symmetric(10.0, 10.0).unwrap();
        let p = Vec2::new(3.0, -4.0);
        assert_eq!(clamp_to_bounds(p, 1.0, &bounds), p);
    }

    #[test]
    fn test_clamp_after_shrink_lands_on_violated_edges() {
        // Viewport shrank from 20x20 to 10x6 half extents
        let bounds = Bounds::symmetric(10.0, 6.0).unwrap();

        let clamped = clamp_to_bounds(Vec2::new(15.0, -8.0), 1.0, &bounds);
        assert_eq!(clamped, Vec2::new(9.0, -5.0));

        let clamped = clamp_to_bounds(Vec2::new(-12.0, 7.0), 1.0, &bounds);
        assert_eq!(clamped, Vec2::new(-9.0, 5.0));
        assert!(bounds.contains(clamped, 1.0));
    }

    #[test]
    fn test_clamp_asymmetric_bounds() {
        let bounds = Bounds::new(2.0, 8.0, 1.0, 5.0).unwrap();
        let clamped = clamp_to_bounds(Vec2::new(-4.0, -4.0), 0.5, &bounds);
        assert_eq!(clamped, Vec2::new(-0.5, -1.5));
    }
}
