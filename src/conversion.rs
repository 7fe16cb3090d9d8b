use crate::interpolation::InterpolationError;
use crate::quantity::QuantityKind;
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    /// 표 범위 밖의 비중
    #[error(transparent)]
    OutOfRange(#[from] InterpolationError),
}

/// 문자열로 전달된 단위명을 enum으로 변환한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `P`, `SG`, `C`, `F`, `g/l` 등을 사용할 수 있다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
    gravity_conversion: GravityConversion<'_>,
) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::Gravity => {
            let from = parse_gravity_unit(from_unit_str)?;
            let to = parse_gravity_unit(to_unit_str)?;
            Ok(Gravity::new(value, from).value_in(to, gravity_conversion)?)
        }
        QuantityKind::Temperature => {
            let from = parse_temperature_unit(from_unit_str)?;
            let to = parse_temperature_unit(to_unit_str)?;
            Ok(convert_temperature(value, from, to))
        }
        QuantityKind::Concentration => {
            parse_concentration_unit(from_unit_str)?;
            let to = parse_concentration_unit(to_unit_str)?;
            Ok(Concentration::new(value).value_in(to))
        }
    }
}

pub fn parse_gravity_unit(s: &str) -> Result<GravityUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "p" | "°p" | "plato" | "pl" => Ok(GravityUnit::Plato),
        "sg" | "specific_gravity" | "specific-gravity" => Ok(GravityUnit::SpecificGravity),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_temperature_unit(s: &str) -> Result<TemperatureUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "c" | "celsius" | "°c" => Ok(TemperatureUnit::Celsius),
        "f" | "fahrenheit" | "°f" => Ok(TemperatureUnit::Fahrenheit),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_concentration_unit(s: &str) -> Result<ConcentrationUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "g/l" | "gpl" | "grams_per_liter" => Ok(ConcentrationUnit::GramsPerLiter),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}
