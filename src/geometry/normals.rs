//! # Normal Synthesis
//!
//! Smooth per-vertex normals from triangle winding alone. Every triangle
//! contributes one unit face normal to each of its three corners; the
//! accumulated sums are normalized at the end. Faces contribute equally per
//! occurrence, so the result is averaging by repetition, not by area.

use cgmath::{InnerSpace, Vector3};

/// Unit normal of the triangle `(a, b, c)`, oriented by winding order.
///
/// Returns `None` for degenerate (zero-area) triangles.
pub fn face_normal(
    a: Vector3<f32>,
    b: Vector3<f32>,
    c: Vector3<f32>,
) -> Option<Vector3<f32>> {
    let cross = (b - a).cross(c - a);
    let length_sq = cross.magnitude2();
    if length_sq > 0.0 {
        Some(cross / length_sq.sqrt())
    } else {
        None
    }
}

/// Computes one smooth normal per entry of `positions` from the union of
/// the given triangle index lists.
///
/// Vertices referenced by no triangle (or only by degenerate ones) keep the
/// zero vector instead of a NaN normal; the renderer treats those as unlit.
pub fn synthesize<'a, I>(positions: &[Vector3<f32>], index_lists: I) -> Vec<Vector3<f32>>
where
    I: IntoIterator<Item = &'a [u32]>,
{
    let mut normals = vec![Vector3::new(0.0, 0.0, 0.0); positions.len()];

    for indices in index_lists {
        debug_assert!(indices.len() % 3 == 0, "triangle list length not a multiple of 3");
        for triangle in indices.chunks_exact(3) {
            let (i0, i1, i2) = (
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            );
            let Some(normal) = face_normal(positions[i0], positions[i1], positions[i2]) else {
                continue;
            };
            normals[i0] += normal;
            normals[i1] += normal;
            normals[i2] += normal;
        }
    }

    for normal in &mut normals {
        let length_sq = normal.magnitude2();
        if length_sq > 0.0 {
            *normal /= length_sq.sqrt();
        }
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude2() < 1e-10
    }

    #[test]
    fn isolated_triangle_shares_one_unit_normal() {
        let positions = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];
        let indices: &[u32] = &[0, 1, 2];
        let normals = synthesize(&positions, [indices]);

        let expected = Vector3::new(0.0, 0.0, 1.0);
        for normal in &normals {
            assert!(close(*normal, expected));
            assert!((normal.magnitude2() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn winding_order_flips_the_normal() {
        let positions = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];
        let indices: &[u32] = &[0, 2, 1];
        let normals = synthesize(&positions, [indices]);
        assert!(close(normals[0], Vector3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn unreferenced_vertex_keeps_zero_normal() {
        let positions = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(9.0, 9.0, 9.0),
        ];
        let indices: &[u32] = &[0, 1, 2];
        let normals = synthesize(&positions, [indices]);
        assert_eq!(normals[3], Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn degenerate_triangle_contributes_nothing() {
        let positions = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0), // collinear
        ];
        let indices: &[u32] = &[0, 1, 2];
        let normals = synthesize(&positions, [indices]);
        for normal in &normals {
            assert_eq!(*normal, Vector3::new(0.0, 0.0, 0.0));
        }
    }

    #[test]
    fn shared_vertex_averages_across_faces() {
        // Two faces of a "tent" meeting along the x axis; the ridge vertices
        // get the average of the two face normals.
        let positions = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 1.0),
            Vector3::new(0.0, -1.0, 1.0),
        ];
        let indices: &[u32] = &[0, 1, 2, 1, 0, 3];
        let normals = synthesize(&positions, [indices]);

        // Both faces tilt away from y symmetrically, so the shared edge
        // normal must have no y component.
        assert!(normals[0].y.abs() < 1e-5);
        assert!(normals[0].z > 0.0);
        assert!((normals[0].magnitude2() - 1.0).abs() < 1e-5);
    }
}
