//! 원맥즙 농도와 잔여 농도로부터 예상 알코올 도수를 추정한다.

use std::fmt;

use crate::interpolation::InterpolationError;
use crate::units::{Gravity, GravityConversion};

/// 알코올 도수 [%].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alcohol {
    pub percent: f64,
}

impl fmt::Display for Alcohol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alcohol: {:.1}%", self.percent)
    }
}

/// 예상 알코올 도수를 계산한다.
///
/// 잔여 농도가 없으면 발효도 75%를 가정해 `°P × 0.75 / 2`,
/// 있으면 `(원맥즙 °P - 잔여 °P) / 2`로 추정한다.
pub fn alcohol(
    original: &Gravity,
    residual: Option<&Gravity>,
    conversion: GravityConversion<'_>,
) -> Result<Alcohol, InterpolationError> {
    let original_plato = original.plato(conversion)?;
    let percent = match residual {
        None => original_plato * 0.75 / 2.0,
        Some(residual) => (original_plato - residual.plato(conversion)?) / 2.0,
    };
    Ok(Alcohol { percent })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ReferenceTables;
    use approx::assert_abs_diff_eq;

    #[test]
    fn assumes_default_attenuation_without_residual() {
        let tables = ReferenceTables::bundled().unwrap();
        let conv = GravityConversion::Table(&tables.gravity);
        let a = alcohol(&Gravity::from_plato(12.0), None, conv).unwrap();
        assert_abs_diff_eq!(a.percent, 4.5, epsilon = 1e-12);
        assert_eq!(a.to_string(), "Alcohol: 4.5%");
    }

    #[test]
    fn uses_residual_gravity_when_given() {
        let tables = ReferenceTables::bundled().unwrap();
        let conv = GravityConversion::Table(&tables.gravity);
        let og = Gravity::from_specific_gravity(1.057);
        let fg = Gravity::from_plato(3.0);
        let a = alcohol(&og, Some(&fg), conv).unwrap();
        assert_abs_diff_eq!(a.percent, 5.5, epsilon = 1e-12);
    }

    #[test]
    fn residual_below_table_uses_polynomial_when_asked() {
        let tables = ReferenceTables::bundled().unwrap();
        let fg = Gravity::from_specific_gravity(1.010);
        let og = Gravity::from_plato(12.0);
        assert!(alcohol(&og, Some(&fg), GravityConversion::Table(&tables.gravity)).is_err());
        let a = alcohol(&og, Some(&fg), GravityConversion::Polynomial).unwrap();
        assert!(a.percent > 4.0 && a.percent < 5.0, "{}", a.percent);
    }
}
