//! Scattered-data interpolation
//!
//! Linear barycentric interpolation over a Delaunay triangulation of the
//! quote cloud (Bowyer-Watson), plus nearest-neighbor lookup for grid
//! nodes outside the convex hull. Coordinates are rescaled to the unit
//! square internally so the triangulation is not distorted by the very
//! different magnitudes of the expiry and strike axes.

/// One scattered observation: (x, y) location with value z
#[derive(Debug, Clone, Copy)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Interpolator over an immutable point cloud
#[derive(Debug, Clone)]
pub struct ScatteredInterp {
    /// Deduplicated points in unit-square coordinates
    verts: Vec<(f64, f64)>,
    /// Values at the deduplicated points
    values: Vec<f64>,
    /// Delaunay triangles as indices into `verts`
    triangles: Vec<[usize; 3]>,
    x_min: f64,
    x_span: f64,
    y_min: f64,
    y_span: f64,
}

impl ScatteredInterp {
    /// Triangulate a point cloud; returns None for an empty cloud
    pub fn new(points: &[ScatterPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let x_min = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let x_max = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let y_min = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let y_max = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        let x_span = if (x_max - x_min) > 0.0 { x_max - x_min } else { 1.0 };
        let y_span = if (y_max - y_min) > 0.0 { y_max - y_min } else { 1.0 };

        // Coincident locations would break the triangulation; keep the
        // first value seen at each location
        let mut verts: Vec<(f64, f64)> = Vec::with_capacity(points.len());
        let mut values: Vec<f64> = Vec::with_capacity(points.len());
        for p in points {
            let sx = (p.x - x_min) / x_span;
            let sy = (p.y - y_min) / y_span;
            let duplicate = verts
                .iter()
                .any(|&(vx, vy)| (vx - sx).abs() < 1e-9 && (vy - sy).abs() < 1e-9);
            if !duplicate {
                verts.push((sx, sy));
                values.push(p.z);
            }
        }

        let triangles = delaunay(&verts);

        Some(Self {
            verts,
            values,
            triangles,
            x_min,
            x_span,
            y_min,
            y_span,
        })
    }

    fn to_unit(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.x_min) / self.x_span, (y - self.y_min) / self.y_span)
    }

    /// Linear barycentric interpolation; None outside the convex hull
    pub fn linear(&self, x: f64, y: f64) -> Option<f64> {
        let (px, py) = self.to_unit(x, y);

        for tri in &self.triangles {
            let (ax, ay) = self.verts[tri[0]];
            let (bx, by) = self.verts[tri[1]];
            let (cx, cy) = self.verts[tri[2]];

            let denom = (by - cy) * (ax - cx) + (cx - bx) * (ay - cy);
            if denom.abs() < 1e-14 {
                continue;
            }

            let w0 = ((by - cy) * (px - cx) + (cx - bx) * (py - cy)) / denom;
            let w1 = ((cy - ay) * (px - cx) + (ax - cx) * (py - cy)) / denom;
            let w2 = 1.0 - w0 - w1;

            let eps = -1e-9;
            if w0 >= eps && w1 >= eps && w2 >= eps {
                return Some(
                    w0 * self.values[tri[0]] + w1 * self.values[tri[1]] + w2 * self.values[tri[2]],
                );
            }
        }

        None
    }

    /// Value at the nearest point of the cloud; total over the plane
    pub fn nearest(&self, x: f64, y: f64) -> f64 {
        let (px, py) = self.to_unit(x, y);

        let mut best = 0;
        let mut best_d2 = f64::INFINITY;
        for (i, &(vx, vy)) in self.verts.iter().enumerate() {
            let d2 = (vx - px) * (vx - px) + (vy - py) * (vy - py);
            if d2 < best_d2 {
                best_d2 = d2;
                best = i;
            }
        }

        self.values[best]
    }
}

/// Bowyer-Watson incremental Delaunay triangulation
///
/// Returns triangles over the input indices only; a collinear cloud
/// yields no triangles, which the caller covers with `nearest`.
fn delaunay(verts: &[(f64, f64)]) -> Vec<[usize; 3]> {
    let n = verts.len();
    if n < 3 {
        return Vec::new();
    }

    // Working vertex list with a super-triangle far outside the unit square
    let mut all: Vec<(f64, f64)> = verts.to_vec();
    all.push((-50.0, -50.0));
    all.push((50.0, -50.0));
    all.push((0.0, 100.0));

    let mut triangles: Vec<[usize; 3]> = vec![[n, n + 1, n + 2]];

    for p in 0..n {
        // Triangles whose circumcircle contains the new point
        let bad: Vec<usize> = triangles
            .iter()
            .enumerate()
            .filter(|(_, tri)| in_circumcircle(&all, **tri, all[p]))
            .map(|(i, _)| i)
            .collect();

        // Boundary of the cavity: edges owned by exactly one bad triangle
        let mut boundary: Vec<(usize, usize)> = Vec::new();
        for &ti in &bad {
            let t = triangles[ti];
            for edge in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
                if let Some(pos) = boundary
                    .iter()
                    .position(|&(a, b)| (a, b) == edge || (b, a) == edge)
                {
                    boundary.remove(pos);
                } else {
                    boundary.push(edge);
                }
            }
        }

        // `bad` is ascending, so removing in reverse keeps indices valid
        for &ti in bad.iter().rev() {
            triangles.swap_remove(ti);
        }

        for (a, b) in boundary {
            triangles.push([a, b, p]);
        }
    }

    triangles.retain(|tri| tri.iter().all(|&v| v < n));
    triangles
}

/// Does the circumcircle of triangle `tri` contain point `p`?
fn in_circumcircle(all: &[(f64, f64)], tri: [usize; 3], p: (f64, f64)) -> bool {
    let (ax, ay) = all[tri[0]];
    let (mut bx, mut by) = all[tri[1]];
    let (mut cx, mut cy) = all[tri[2]];

    // The incircle determinant assumes counter-clockwise orientation
    let orient = (bx - ax) * (cy - ay) - (by - ay) * (cx - ax);
    if orient.abs() < 1e-14 {
        // Degenerate triangle: treat its circumcircle as unbounded so it
        // gets re-triangulated away
        return true;
    }
    if orient < 0.0 {
        std::mem::swap(&mut bx, &mut cx);
        std::mem::swap(&mut by, &mut cy);
    }

    let (px, py) = p;
    let adx = ax - px;
    let ady = ay - py;
    let bdx = bx - px;
    let bdy = by - py;
    let cdx = cx - px;
    let cdy = cy - py;

    let ad2 = adx * adx + ady * ady;
    let bd2 = bdx * bdx + bdy * bdy;
    let cd2 = cdx * cdx + cdy * cdy;

    let det = adx * (bdy * cd2 - cdy * bd2) - ady * (bdx * cd2 - cdx * bd2)
        + ad2 * (bdx * cdy - cdx * bdy);

    det > 0.0
}
