use crate::engine::error::RegionError;
use bevy::prelude::*;

/// Axis-aligned bounding region in world coordinates.
/// Used to frame the reference mesh, the whole dataset or a single category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingRegion {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }

    /// Smallest region containing every point, or `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |region, p| Self {
            min: region.min.min(p),
            max: region.max.max(p),
        }))
    }

    /// Calculate center point for camera targeting.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Calculate size dimensions along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Enclosing sphere as `(center, radius)`.
    pub fn bounding_sphere(&self) -> Result<(Vec3, f32), RegionError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(RegionError::NonFinite);
        }

        let radius = self.size().length() * 0.5;
        if radius <= f32::EPSILON {
            return Err(RegionError::Degenerate);
        }

        Ok((self.center(), radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_covers_every_point() {
        let region = BoundingRegion::from_points([
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(-3.0, 4.0, 2.0),
            Vec3::new(0.0, 0.0, -5.0),
        ])
        .unwrap();

        assert_eq!(region.min, Vec3::new(-3.0, -2.0, -5.0));
        assert_eq!(region.max, Vec3::new(1.0, 4.0, 2.0));
        assert_eq!(region.center(), Vec3::new(-1.0, 1.0, -1.5));
    }

    #[test]
    fn from_points_empty_is_none() {
        assert!(BoundingRegion::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn single_point_region_is_degenerate() {
        let region = BoundingRegion::new(Vec3::ONE, Vec3::ONE);
        assert_eq!(region.bounding_sphere(), Err(RegionError::Degenerate));
    }

    #[test]
    fn non_finite_region_is_rejected() {
        let region = BoundingRegion::new(Vec3::ZERO, Vec3::new(f32::INFINITY, 1.0, 1.0));
        assert_eq!(region.bounding_sphere(), Err(RegionError::NonFinite));
    }

    #[test]
    fn sphere_radius_is_half_diagonal() {
        let region = BoundingRegion::new(Vec3::ZERO, Vec3::new(6.0, 0.0, 8.0));
        let (center, radius) = region.bounding_sphere().unwrap();
        assert_eq!(center, Vec3::new(3.0, 0.0, 4.0));
        assert!((radius - 5.0).abs() < 1e-6);
    }

    #[test]
    fn union_grows_to_cover_both() {
        let a = BoundingRegion::new(Vec3::ZERO, Vec3::ONE);
        let b = BoundingRegion::new(Vec3::splat(-1.0), Vec3::splat(0.5));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::splat(-1.0));
        assert_eq!(u.max, Vec3::ONE);
    }
}
