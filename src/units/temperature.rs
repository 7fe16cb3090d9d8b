use std::fmt;

use serde::{Deserialize, Serialize};

/// 온도 단위를 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

/// 섭씨를 화씨로 변환한다.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

/// 화씨를 섭씨로 변환한다.
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) / 1.8
}

/// 온도를 서로 다른 단위로 변환한다.
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    match (from, to) {
        (TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit) => celsius_to_fahrenheit(value),
        (TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius) => fahrenheit_to_celsius(value),
        _ => value,
    }
}

/// 값과 단위를 함께 가지는 온도. 변환은 아핀 변환이라 실패하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    value: f64,
    unit: TemperatureUnit,
}

impl Temperature {
    pub fn new(value: f64, unit: TemperatureUnit) -> Self {
        Self { value, unit }
    }

    pub fn from_celsius(value: f64) -> Self {
        Self::new(value, TemperatureUnit::Celsius)
    }

    pub fn from_fahrenheit(value: f64) -> Self {
        Self::new(value, TemperatureUnit::Fahrenheit)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn celsius(&self) -> f64 {
        convert_temperature(self.value, self.unit, TemperatureUnit::Celsius)
    }

    pub fn fahrenheit(&self) -> f64 {
        convert_temperature(self.value, self.unit, TemperatureUnit::Fahrenheit)
    }

    /// 섭씨로 값을 설정한다. 저장 단위는 유지된다.
    pub fn set_celsius(&mut self, celsius: f64) {
        self.value = convert_temperature(celsius, TemperatureUnit::Celsius, self.unit);
    }

    /// 화씨로 값을 설정한다. 저장 단위는 유지된다.
    pub fn set_fahrenheit(&mut self, fahrenheit: f64) {
        self.value = convert_temperature(fahrenheit, TemperatureUnit::Fahrenheit, self.unit);
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Temperature: {}{}", self.value, self.unit.symbol())
    }
}
