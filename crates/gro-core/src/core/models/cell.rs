use nalgebra::Vector3;

/// A periodic simulation box in canonical form.
///
/// Lengths are in Angstroms and angles in degrees, following the usual
/// crystallographic convention: `alpha` is the angle between `b` and `c`,
/// `beta` between `a` and `c`, and `gamma` between `a` and `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCell {
    pub lengths: Vector3<f64>,
    pub angles: Vector3<f64>,
}

impl UnitCell {
    pub fn new(lengths: Vector3<f64>, angles: Vector3<f64>) -> Self {
        Self { lengths, angles }
    }

    /// Creates a rectangular box with all angles at 90 degrees.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Self {
        Self {
            lengths: Vector3::new(a, b, c),
            angles: Vector3::new(90.0, 90.0, 90.0),
        }
    }

    /// Returns `true` if every angle lies within `tolerance` degrees of 90.
    pub fn is_orthorhombic(&self, tolerance: f64) -> bool {
        self.angles.iter().all(|angle| (angle - 90.0).abs() < tolerance)
    }

    /// The six box parameters as `[a, b, c, alpha, beta, gamma]`.
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.lengths.x,
            self.lengths.y,
            self.lengths.z,
            self.angles.x,
            self.angles.y,
            self.angles.z,
        ]
    }
}

impl From<[f64; 6]> for UnitCell {
    fn from(p: [f64; 6]) -> Self {
        Self {
            lengths: Vector3::new(p[0], p[1], p[2]),
            angles: Vector3::new(p[3], p[4], p[5]),
        }
    }
}
