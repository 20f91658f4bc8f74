//! Small planar geometry helpers.

/// A triangle in the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: [f64; 2],
    pub b: [f64; 2],
    pub c: [f64; 2],
}

impl Triangle {
    pub fn new(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Self {
        Triangle { a, b, c }
    }

    /// Whether `p` lies strictly inside the triangle.
    pub fn contains(&self, p: [f64; 2]) -> bool {
        point_in_triangle(self.a, self.b, self.c, p)
    }
}

/// Signed area (times two) of the parallelogram spanned by `b - a` and `p - a`.
#[inline]
fn edge_side(a: [f64; 2], b: [f64; 2], p: [f64; 2]) -> f64 {
    (p[0] - b[0]) * (a[1] - b[1]) - (a[0] - b[0]) * (p[1] - b[1])
}

/// Whether `p` lies strictly inside triangle `abc`.
///
/// `p` is inside iff it is on the same side of all three edges. Points on an
/// edge or vertex are outside. A degenerate triangle contains nothing.
///
/// Unlike the one-sided test that only accepts points where every edge sign
/// is negative (and so only triangles of one winding), either winding order
/// is accepted: `abc` and `cba` contain the same points.
pub fn point_in_triangle(a: [f64; 2], b: [f64; 2], c: [f64; 2], p: [f64; 2]) -> bool {
    let ab = edge_side(a, b, p);
    let bc = edge_side(b, c, p);
    let ca = edge_side(c, a, p);
    (ab < 0.0 && bc < 0.0 && ca < 0.0) || (ab > 0.0 && bc > 0.0 && ca > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_points_in_both_windings() {
        let t = Triangle::new([0.0, 0.0], [4.0, 0.0], [0.0, 4.0]);
        let reversed = Triangle::new(t.c, t.b, t.a);
        for p in [[1.0, 1.0], [0.5, 3.0], [3.0, 0.5]] {
            assert!(t.contains(p), "{p:?}");
            assert!(reversed.contains(p), "{p:?}");
        }
    }

    #[test]
    fn exterior_and_boundary_points() {
        let t = Triangle::new([0.0, 0.0], [4.0, 0.0], [0.0, 4.0]);
        for p in [[3.0, 3.0], [-1.0, 1.0], [2.0, 0.0], [0.0, 0.0], [2.0, 2.0]] {
            assert!(!t.contains(p), "{p:?}");
        }
    }

    #[test]
    fn degenerate_triangle_is_empty() {
        assert!(!point_in_triangle([0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [1.0, 1.0]));
        assert!(!point_in_triangle([0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [1.0, 0.5]));
    }
}
