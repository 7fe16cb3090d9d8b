use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interpolation::InterpolationError;
use crate::tables::GravityTable;

/// 맥즙 농도(비중) 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GravityUnit {
    /// 도 플라토(°P). 당분의 질량 백분율 근사.
    Plato,
    /// 물 대비 비중(SG).
    SpecificGravity,
}

impl GravityUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            GravityUnit::Plato => "°P",
            GravityUnit::SpecificGravity => "SG",
        }
    }
}

/// °Plato와 비중 사이의 환산 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConversionMode {
    /// 참조 표 선형 보간. 표 범위 밖은 오류.
    #[default]
    Table,
    /// 다항 근사식. 표 없이 빠르게 추정할 때만 사용한다.
    Polynomial,
}

/// 환산에 사용할 수단. 표 보간은 표 참조를 함께 가진다.
#[derive(Debug, Clone, Copy)]
pub enum GravityConversion<'a> {
    Table(&'a GravityTable),
    Polynomial,
}

impl<'a> GravityConversion<'a> {
    /// 설정된 모드와 표로 환산 수단을 고른다.
    pub fn new(mode: ConversionMode, table: &'a GravityTable) -> Self {
        match mode {
            ConversionMode::Table => GravityConversion::Table(table),
            ConversionMode::Polynomial => GravityConversion::Polynomial,
        }
    }

    pub fn plato_to_sg(self, plato: f64) -> Result<f64, InterpolationError> {
        match self {
            GravityConversion::Table(table) => table.plato_to_sg(plato),
            GravityConversion::Polynomial => Ok(poly_plato_to_sg(plato)),
        }
    }

    pub fn sg_to_plato(self, sg: f64) -> Result<f64, InterpolationError> {
        match self {
            GravityConversion::Table(table) => table.sg_to_plato(sg),
            GravityConversion::Polynomial => Ok(poly_sg_to_plato(sg)),
        }
    }
}

/// °Plato → SG 근사식.
///
/// [`poly_sg_to_plato`]의 역함수가 아니다. 두 식을 오가면 소수 셋째 자리 수준의
/// 차이가 남으며, 두 식 모두 원래 형태 그대로 유지한다.
pub fn poly_plato_to_sg(plato: f64) -> f64 {
    1.0 + (plato / (258.6 - ((plato / 258.2) * 227.1)))
}

/// SG → °Plato 3차 근사식. [`poly_plato_to_sg`]와 정확한 역관계가 아니다.
pub fn poly_sg_to_plato(sg: f64) -> f64 {
    -616.868 + 1111.14 * sg - 630.272 * sg.powi(2) + 135.997 * sg.powi(3)
}

/// 맥즙 농도. 값과 단위를 함께 저장하고, 다른 단위는 요청 시 환산한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gravity {
    value: f64,
    unit: GravityUnit,
}

impl Gravity {
    pub fn new(value: f64, unit: GravityUnit) -> Self {
        Self { value, unit }
    }

    pub fn from_plato(value: f64) -> Self {
        Self::new(value, GravityUnit::Plato)
    }

    pub fn from_specific_gravity(value: f64) -> Self {
        Self::new(value, GravityUnit::SpecificGravity)
    }

    /// 저장된 값(저장 단위 기준).
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> GravityUnit {
        self.unit
    }

    /// °Plato 값. 저장 단위가 °Plato면 변환 없이 그대로 돌려준다.
    pub fn plato(&self, conversion: GravityConversion<'_>) -> Result<f64, InterpolationError> {
        match self.unit {
            GravityUnit::Plato => Ok(self.value),
            GravityUnit::SpecificGravity => conversion.sg_to_plato(self.value),
        }
    }

    /// 비중 값. 저장 단위가 SG면 변환 없이 그대로 돌려준다.
    pub fn specific_gravity(
        &self,
        conversion: GravityConversion<'_>,
    ) -> Result<f64, InterpolationError> {
        match self.unit {
            GravityUnit::Plato => conversion.plato_to_sg(self.value),
            GravityUnit::SpecificGravity => Ok(self.value),
        }
    }

    /// 원하는 단위로 읽는다.
    pub fn value_in(
        &self,
        unit: GravityUnit,
        conversion: GravityConversion<'_>,
    ) -> Result<f64, InterpolationError> {
        match unit {
            GravityUnit::Plato => self.plato(conversion),
            GravityUnit::SpecificGravity => self.specific_gravity(conversion),
        }
    }

    /// °Plato로 값을 설정한다. 저장 단위는 유지되며 필요하면 환산해 저장한다.
    /// 환산이 실패하면 기존 값은 바뀌지 않는다.
    pub fn set_plato(
        &mut self,
        plato: f64,
        conversion: GravityConversion<'_>,
    ) -> Result<(), InterpolationError> {
        self.value = match self.unit {
            GravityUnit::Plato => plato,
            GravityUnit::SpecificGravity => conversion.plato_to_sg(plato)?,
        };
        Ok(())
    }

    /// 비중으로 값을 설정한다. 저장 단위는 유지된다.
    pub fn set_specific_gravity(
        &mut self,
        sg: f64,
        conversion: GravityConversion<'_>,
    ) -> Result<(), InterpolationError> {
        self.value = match self.unit {
            GravityUnit::Plato => conversion.sg_to_plato(sg)?,
            GravityUnit::SpecificGravity => sg,
        };
        Ok(())
    }
}

impl fmt::Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gravity: {}{}", self.value, self.unit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ReferenceTables;
    use approx::assert_abs_diff_eq;

    fn table() -> GravityTable {
        ReferenceTables::bundled().unwrap().gravity
    }

    #[test]
    fn table_conversion_hits_sample_points_exactly() {
        let table = table();
        let conv = GravityConversion::Table(&table);
        assert_eq!(conv.plato_to_sg(6.0).unwrap(), 1.024);
        assert_eq!(conv.plato_to_sg(12.0).unwrap(), 1.048);
        assert_eq!(conv.plato_to_sg(20.0).unwrap(), 1.083);
        assert_eq!(conv.sg_to_plato(1.024).unwrap(), 6.0);
        assert_eq!(conv.sg_to_plato(1.048).unwrap(), 12.0);
        assert_eq!(conv.sg_to_plato(1.083).unwrap(), 20.0);
    }

    #[test]
    fn same_unit_is_returned_unchanged() {
        let table = table();
        let conv = GravityConversion::Table(&table);
        let g = Gravity::from_plato(25.0);
        // 표 범위 밖이어도 같은 단위 읽기는 변환하지 않는다.
        assert_eq!(g.plato(conv).unwrap(), 25.0);
        assert!(g.specific_gravity(conv).is_err());
    }

    #[test]
    fn setters_keep_the_stored_unit() {
        let table = table();
        let conv = GravityConversion::Table(&table);

        let mut g = Gravity::from_plato(10.0);
        g.set_plato(6.0, conv).unwrap();
        assert_eq!(g.specific_gravity(conv).unwrap(), 1.024);
        g.set_specific_gravity(1.083, conv).unwrap();
        assert_eq!(g.unit(), GravityUnit::Plato);
        assert_eq!(g.value(), 20.0);

        let mut sg = Gravity::from_specific_gravity(1.040);
        sg.set_plato(12.0, conv).unwrap();
        assert_eq!(sg.unit(), GravityUnit::SpecificGravity);
        assert_eq!(sg.value(), 1.048);
    }

    #[test]
    fn failed_setter_leaves_value_untouched() {
        let table = table();
        let conv = GravityConversion::Table(&table);
        let mut g = Gravity::from_specific_gravity(1.040);
        assert!(g.set_plato(30.0, conv).is_err());
        assert_eq!(g.value(), 1.040);
    }

    #[test]
    fn polynomials_are_close_to_the_table_but_not_inverse() {
        assert_abs_diff_eq!(poly_plato_to_sg(12.0), 1.048, epsilon = 5e-4);
        assert_abs_diff_eq!(poly_sg_to_plato(1.048), 12.0, epsilon = 0.1);
        let back = poly_sg_to_plato(poly_plato_to_sg(12.0));
        assert!((back - 12.0).abs() > 1e-6);
        assert_abs_diff_eq!(back, 12.0, epsilon = 0.1);
    }

    #[test]
    fn conversion_mode_selects_strategy() {
        let table = table();
        let conv = GravityConversion::new(ConversionMode::Polynomial, &table);
        assert_eq!(conv.plato_to_sg(25.0).unwrap(), poly_plato_to_sg(25.0));
        let conv = GravityConversion::new(ConversionMode::Table, &table);
        assert!(conv.plato_to_sg(25.0).is_err());
    }

    #[test]
    fn display_uses_stored_unit() {
        assert_eq!(Gravity::from_plato(20.0).to_string(), "Gravity: 20°P");
        assert_eq!(
            Gravity::from_specific_gravity(1.083).to_string(),
            "Gravity: 1.083SG"
        );
    }
}
