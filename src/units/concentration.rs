use std::fmt;

use serde::{Deserialize, Serialize};

/// 농도 단위. 현재는 g/l 하나뿐이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcentrationUnit {
    #[default]
    GramsPerLiter,
}

impl ConcentrationUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            ConcentrationUnit::GramsPerLiter => "g/l",
        }
    }
}

/// 용존 농도(예: CO₂) [g/l].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Concentration {
    value: f64,
}

impl Concentration {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> ConcentrationUnit {
        ConcentrationUnit::GramsPerLiter
    }

    /// 지정한 단위의 값. g/l 외의 단위가 추가되면 여기서 환산한다.
    pub fn value_in(&self, unit: ConcentrationUnit) -> f64 {
        match unit {
            ConcentrationUnit::GramsPerLiter => self.value,
        }
    }
}

impl fmt::Display for Concentration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Concentration: {}{}", self.value, self.unit().symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_and_unit() {
        let c = Concentration::new(5.0);
        assert_eq!(c.value(), 5.0);
        assert_eq!(c.unit(), ConcentrationUnit::GramsPerLiter);
        assert_eq!(c.unit().symbol(), "g/l");
        assert_eq!(c.to_string(), "Concentration: 5g/l");
        assert_eq!(c.value_in(ConcentrationUnit::GramsPerLiter), 5.0);
    }
}
