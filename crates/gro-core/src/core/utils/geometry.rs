use nalgebra::Vector3;

/// Magnitude below which vector components are treated as exactly zero.
pub const TINY: f64 = 1.0e-8;

/// Three lattice vectors `[a, b, c]` describing a periodic box.
pub type BoxVectors = [Vector3<f64>; 3];

fn snap_to_zero(value: f64) -> f64 {
    if value.abs() < TINY { 0.0 } else { value }
}

/// Builds lattice vectors from box lengths and angles (degrees).
///
/// `a` lies along x and `b` in the xy plane, the usual lower-triangular
/// convention. Components smaller than [`TINY`] are set to zero so that
/// right angles produce exact zeros instead of `cos(90°)` noise.
pub fn lengths_and_angles_to_vectors(lengths: &Vector3<f64>, angles: &Vector3<f64>) -> BoxVectors {
    let (a, b, c) = (lengths.x, lengths.y, lengths.z);
    let (alpha, beta, gamma) = (
        angles.x.to_radians(),
        angles.y.to_radians(),
        angles.z.to_radians(),
    );

    let bx = b * gamma.cos();
    let by = b * gamma.sin();
    let cx = c * beta.cos();
    let cy = c * (alpha.cos() - beta.cos() * gamma.cos()) / gamma.sin();
    let cz = (c * c - cx * cx - cy * cy).sqrt();

    [
        Vector3::new(a, 0.0, 0.0),
        Vector3::new(snap_to_zero(bx), snap_to_zero(by), 0.0),
        Vector3::new(snap_to_zero(cx), snap_to_zero(cy), snap_to_zero(cz)),
    ]
}

/// Recovers box lengths and angles (degrees) from lattice vectors.
///
/// # Return
///
/// A `(lengths, angles)` pair where angles are `(alpha, beta, gamma)`.
pub fn vectors_to_lengths_and_angles(vectors: &BoxVectors) -> (Vector3<f64>, Vector3<f64>) {
    let [a, b, c] = vectors;
    let (la, lb, lc) = (a.norm(), b.norm(), c.norm());

    let angle = |u: &Vector3<f64>, v: &Vector3<f64>, lu: f64, lv: f64| {
        (u.dot(v) / (lu * lv)).clamp(-1.0, 1.0).acos().to_degrees()
    };

    (
        Vector3::new(la, lb, lc),
        Vector3::new(angle(b, c, lb, lc), angle(a, c, la, lc), angle(a, b, la, lb)),
    )
}

/// Distance from a half-integer skew ratio within which the ratio counts as a tie.
///
/// Box lines carry five decimals, so a box that is exactly half-skewed (a hexagonal
/// `v2x = a/2`, say) decodes to a ratio like `0.5000002`.
pub const REDUCTION_TIE_TOLERANCE: f64 = 1.0e-4;

/// Rounds a skew ratio half-to-even, treating near-halves as exact halves.
fn round_skew(ratio: f64) -> f64 {
    let fraction = ratio - ratio.trunc();
    if (fraction.abs() - 0.5).abs() < REDUCTION_TIE_TOLERANCE {
        (ratio.trunc() + 0.5_f64.copysign(ratio)).round_ties_even()
    } else {
        ratio.round_ties_even()
    }
}

/// Puts lattice vectors in reduced form, with `a` mostly along x, `b` mostly along y,
/// and `c` mostly along z.
///
/// Expects the lower-triangular layout produced by
/// [`lengths_and_angles_to_vectors`]. Each vector is shifted by integer multiples of
/// the preceding ones, which leaves the lattice unchanged. Rounding is half-to-even, and
/// ratios within [`REDUCTION_TIE_TOLERANCE`] of a half count as halves, so the same
/// box always reduces the same way.
pub fn reduce_box_vectors(vectors: &BoxVectors) -> BoxVectors {
    let [a, b, c] = *vectors;

    let c = c - b * round_skew(c.y / b.y);
    let c = c - a * round_skew(c.x / a.x);
    let b = b - a * round_skew(b.x / a.x);

    [a, b, c]
}
