//! 양조 계산에 쓰는 단위 정의 및 변환 모듈 모음.

pub mod concentration;
pub mod gravity;
pub mod temperature;

pub use concentration::{Concentration, ConcentrationUnit};
pub use gravity::{
    poly_plato_to_sg, poly_sg_to_plato, ConversionMode, Gravity, GravityConversion, GravityUnit,
};
pub use temperature::{
    celsius_to_fahrenheit, convert_temperature, fahrenheit_to_celsius, Temperature,
    TemperatureUnit,
};
