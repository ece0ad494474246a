//! # Bounding Geometry
//!
//! Extent computation and uniform center-and-scale normalization over raw
//! point buffers. Imported models are normalized so they fit a unit box
//! around the origin before any entity sees them.

use cgmath::Vector3;

/// Axis-aligned bounding box given by its two extreme corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    /// Midpoint of the two corners.
    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    /// Componentwise extent (max - min).
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Length of the longest axis.
    pub fn largest_extent(&self) -> f32 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Aabb {
            min: Vector3::new(0.0, 0.0, 0.0),
            max: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

/// Computes the componentwise min/max corners of a point sequence.
///
/// Returns `None` for an empty sequence; callers that require a bounding box
/// must guarantee non-empty input.
pub fn extents(points: &[Vector3<f32>]) -> Option<Aabb> {
    let first = *points.first()?;
    let mut min = first;
    let mut max = first;
    for point in &points[1..] {
        min.x = min.x.min(point.x);
        min.y = min.y.min(point.y);
        min.z = min.z.min(point.z);
        max.x = max.x.max(point.x);
        max.y = max.y.max(point.y);
        max.z = max.z.max(point.z);
    }
    Some(Aabb { min, max })
}

/// Centers a point buffer on the origin and uniformly scales it so the
/// longest extent axis equals `target_size`.
///
/// Degenerate geometry whose longest extent is zero (a single point, or all
/// points coincident) is still centered but the scale step is skipped, so
/// no division by zero can occur. An empty buffer is left untouched.
pub fn center_and_scale(points: &mut [Vector3<f32>], target_size: f32) {
    let Some(bounds) = extents(points) else {
        return;
    };

    let center = bounds.center();
    let extent = bounds.largest_extent();
    let factor = if extent > 0.0 {
        target_size / extent
    } else {
        1.0
    };

    for point in points.iter_mut() {
        *point = (*point - center) * factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5 && (a.z - b.z).abs() < 1e-5
    }

    #[test]
    fn extents_of_empty_buffer_is_none() {
        assert!(extents(&[]).is_none());
    }

    #[test]
    fn extents_finds_corners() {
        let points = [
            Vector3::new(1.0, -2.0, 0.5),
            Vector3::new(-3.0, 4.0, 0.0),
            Vector3::new(2.0, 1.0, -1.0),
        ];
        let bounds = extents(&points).unwrap();
        assert_eq!(bounds.min, Vector3::new(-3.0, -2.0, -1.0));
        assert_eq!(bounds.max, Vector3::new(2.0, 4.0, 0.5));
        assert_eq!(bounds.largest_extent(), 6.0);
    }

    #[test]
    fn center_and_scale_normalizes_to_target() {
        let mut points = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(4.0, 2.0, 2.0),
        ];
        center_and_scale(&mut points, 1.0);
        let bounds = extents(&points).unwrap();
        assert!(close(bounds.center(), Vector3::new(0.0, 0.0, 0.0)));
        assert!((bounds.largest_extent() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn center_and_scale_is_idempotent_on_shape() {
        let mut points = vec![
            Vector3::new(-1.0, 5.0, 2.0),
            Vector3::new(3.0, -2.0, 0.0),
            Vector3::new(7.0, 1.0, -4.0),
        ];
        center_and_scale(&mut points, 2.0);
        let once = points.clone();
        center_and_scale(&mut points, 2.0);
        for (a, b) in once.iter().zip(points.iter()) {
            assert!(close(*a, *b));
        }
    }

    #[test]
    fn degenerate_geometry_is_centered_but_not_scaled() {
        let mut points = vec![Vector3::new(3.0, 3.0, 3.0), Vector3::new(3.0, 3.0, 3.0)];
        center_and_scale(&mut points, 1.0);
        for point in &points {
            assert_eq!(*point, Vector3::new(0.0, 0.0, 0.0));
        }
    }
}
