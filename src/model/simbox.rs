use thiserror::Error;

/// Edge lengths or angles that do not describe a real periodic cell.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid simulation box: {0}")]
pub struct GeometryError(pub String);

/// Padding in nm added to every extent of a box derived from particle positions.
pub const BOUNDING_BOX_PADDING: f64 = 0.5;

/// Periodic simulation cell described by edge lengths (nm) and angles (degrees).
///
/// The cell is validated on construction, so every `SimBox` admits a real
/// triclinic basis with `a` along x and `b` in the xy-plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimBox {
    lengths: [f64; 3],
    angles: [f64; 3],
    basis: [f64; 6],
}

impl SimBox {
    /// Creates a cell from lengths `[a, b, c]` and angles `[alpha, beta, gamma]`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if a length is not positive, an angle is not
    /// strictly between 0° and 180°, or the three angles cannot close a cell.
    pub fn new(lengths: [f64; 3], angles: [f64; 3]) -> Result<Self, GeometryError> {
        for (axis, &len) in ["a", "b", "c"].iter().zip(&lengths) {
            if !len.is_finite() || len <= 0.0 {
                return Err(GeometryError(format!(
                    "edge length {axis} must be positive, got {len}"
                )));
            }
        }
        for (name, &angle) in ["alpha", "beta", "gamma"].iter().zip(&angles) {
            if !angle.is_finite() || angle <= 0.0 || angle >= 180.0 {
                return Err(GeometryError(format!(
                    "angle {name} must lie strictly between 0 and 180 degrees, got {angle}"
                )));
            }
        }

        let basis = triclinic_basis(lengths, angles)?;
        Ok(Self {
            lengths,
            angles,
            basis,
        })
    }

    pub fn orthorhombic(lengths: [f64; 3]) -> Result<Self, GeometryError> {
        Self::new(lengths, [90.0; 3])
    }

    /// Smallest orthorhombic box enclosing `positions`, each extent grown by
    /// `padding`. Returns `None` when there are no positions.
    pub fn bounding<I>(positions: I, padding: f64) -> Option<Result<Self, GeometryError>>
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let (mut lo, mut hi) = (first, first);
        for p in iter {
            for d in 0..3 {
                lo[d] = lo[d].min(p[d]);
                hi[d] = hi[d].max(p[d]);
            }
        }
        Some(Self::orthorhombic([
            hi[0] - lo[0] + padding,
            hi[1] - lo[1] + padding,
            hi[2] - lo[2] + padding,
        ]))
    }

    #[inline]
    pub fn lengths(&self) -> [f64; 3] {
        self.lengths
    }

    #[inline]
    pub fn angles(&self) -> [f64; 3] {
        self.angles
    }

    pub fn is_orthorhombic(&self) -> bool {
        self.angles.iter().all(|&a| a == 90.0)
    }

    /// Box tensor `(lx, ly, lz, xy, xz, yz)` in native units, each scaled by `scale`.
    ///
    /// `xy`, `xz` and `yz` are the off-diagonal components of the `b` and `c`
    /// cell vectors; they are exactly zero for right angles.
    pub fn tensor(&self, scale: f64) -> [f64; 6] {
        self.basis.map(|v| v * scale)
    }

    /// Cell vectors `a`, `b`, `c` as rows, in native units.
    pub fn vectors(&self) -> [[f64; 3]; 3] {
        let [lx, ly, lz, xy, xz, yz] = self.tensor(1.0);
        [[lx, 0.0, 0.0], [xy, ly, 0.0], [xz, yz, lz]]
    }
}

/// Builds `(lx, ly, lz, xy, xz, yz)` with `a` along x and `b` in the xy-plane.
fn triclinic_basis(lengths: [f64; 3], angles: [f64; 3]) -> Result<[f64; 6], GeometryError> {
    let [a, b, c] = lengths;
    let [alpha, beta, gamma] = angles;

    let xy = b * cos_deg(gamma);
    let ly = (b * b - xy * xy).sqrt();
    let xz = c * cos_deg(beta);
    let yz = (b * c * cos_deg(alpha) - xy * xz) / ly;
    let lz_sq = c * c - xz * xz - yz * yz;
    if lz_sq.is_nan() || lz_sq <= 0.0 {
        return Err(GeometryError(format!(
            "angles ({alpha}, {beta}, {gamma}) do not admit a real triclinic basis"
        )));
    }

    Ok([a, ly, lz_sq.sqrt(), xy, xz, yz])
}

/// Cosine of an angle in degrees, exactly zero at 90°.
fn cos_deg(angle: f64) -> f64 {
    if angle == 90.0 {
        0.0
    } else {
        angle.to_radians().cos()
    }
}
