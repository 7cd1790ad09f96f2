use glam::Vec3;

/// Errors from checked vector operations.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("cannot normalize a zero-length vector")]
    ZeroLengthNormalize,
    #[error("cannot divide a vector by a zero scalar")]
    DivisionByZero,
}

/// Below this length a vector is treated as zero for normalization.
const LENGTH_EPSILON: f32 = 1e-8;

/// Normalize `v`, failing on (near-)zero length instead of returning NaN.
pub fn try_normalize(v: Vec3) -> Result<Vec3, MathError> {
    let len = v.length();
    if len <= LENGTH_EPSILON {
        return Err(MathError::ZeroLengthNormalize);
    }
    Ok(v / len)
}

/// Divide `v` by `scalar`, failing on a zero divisor.
pub fn checked_div(v: Vec3, scalar: f32) -> Result<Vec3, MathError> {
    if scalar == 0.0 {
        return Err(MathError::DivisionByZero);
    }
    Ok(v / scalar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_produces_unit_length() {
        let v = try_normalize(Vec3::new(3.0, 4.0, 0.0)).unwrap();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v.x - 0.6).abs() < 1e-6);
        assert!((v.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_vector_is_an_error() {
        assert_eq!(
            try_normalize(Vec3::ZERO),
            Err(MathError::ZeroLengthNormalize)
        );
    }

    #[test]
    fn div_by_zero_is_an_error() {
        assert_eq!(
            checked_div(Vec3::ONE, 0.0),
            Err(MathError::DivisionByZero)
        );
        assert_eq!(checked_div(Vec3::ONE, 2.0), Ok(Vec3::splat(0.5)));
    }
}
