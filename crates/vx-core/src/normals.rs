//! Face normal computation for triangle meshes.

/// Cross products shorter than this are treated as degenerate.
const NORMAL_EPSILON: f32 = 1e-4;

/// Flat normal of the triangle (v0, v1, v2).
///
/// Returns the normalized cross product of the triangle's two edges.
/// Degenerate triangles (collinear or coincident vertices, cross product
/// length below epsilon) return the zero vector instead of dividing by
/// near-zero, so callers never observe NaN components.
pub fn triangle_normal(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> [f32; 3] {
    let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

    let n = [
        e1[1] * e2[2] - e1[2] * e2[1],
        e1[2] * e2[0] - e1[0] * e2[2],
        e1[0] * e2[1] - e1[1] * e2[0],
    ];

    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > NORMAL_EPSILON {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0; 3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_triangle_normal_unit_z() {
        let n = triangle_normal([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_relative_eq!(n[0], 0.0);
        assert_relative_eq!(n[1], 0.0);
        assert_relative_eq!(n[2], 1.0);
    }

    #[test]
    fn test_triangle_normal_is_normalized() {
        let n = triangle_normal([0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 5.0]);
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert_relative_eq!(len, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_collinear_triangle_yields_zero_normal() {
        let n = triangle_normal([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]);
        assert_eq!(n, [0.0; 3]);
        assert!(n.iter().all(|c| c.is_finite()));
    }
}
