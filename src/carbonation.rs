//! 맥주 탄산화 계산.
//!
//! 발효 온도에서 자연히 녹아 있는 CO₂(포화 농도)와 목표 농도의 차이로
//! 추가로 넣어야 할 탄산량을 구한다. 맥주 종류별 일반적인 탄산 농도 범위는
//! Hubert Hanghofer, "Gutes Bier selbst brauen"(BLV, 2014)을 따른다.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::tables::CarbonateTable;
use crate::units::Temperature;

/// 탄산화 계산 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CarbonationError {
    /// 온도가 표 범위를 벗어남
    #[error("the value for temperature must be in range ({min:.1}..{max:.1}°C)")]
    TemperatureOutOfRange { min: f64, max: f64 },
}

/// 주어진 온도에서의 탄산 포화 농도 [g/l]를 구한다.
pub fn saturation(table: &CarbonateTable, temp: Temperature) -> Result<f64, CarbonationError> {
    let celsius = temp.celsius();
    table.carbonate_at(celsius).map_err(|_| {
        let (min, max) = table.temperature_range();
        CarbonationError::TemperatureOutOfRange { min, max }
    })
}

/// 목표 농도 `target_g_per_l`에 도달하기 위해 추가할 탄산량 [g/l].
///
/// 이미 과포화 상태면 음수를 그대로 돌려준다.
pub fn carbonisation(
    table: &CarbonateTable,
    target_g_per_l: f64,
    temp: Temperature,
) -> Result<f64, CarbonationError> {
    let sat = saturation(table, temp)?;
    let needed = target_g_per_l - sat;
    if needed < 0.0 {
        warn!(
            target_g_per_l,
            saturation = sat,
            "beer is already above the target carbonation"
        );
    } else {
        debug!(target_g_per_l, saturation = sat, needed, "carbonisation");
    }
    Ok(needed)
}

/// 탄산 농도 범위를 참고할 맥주 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeerStyle {
    Lager,
    WheatBeer,
    BritishAle,
    PorterStout,
    BelgianBeer,
    Lambic,
    FruitLambic,
}

impl BeerStyle {
    pub const ALL: [BeerStyle; 7] = [
        BeerStyle::Lager,
        BeerStyle::WheatBeer,
        BeerStyle::BritishAle,
        BeerStyle::PorterStout,
        BeerStyle::BelgianBeer,
        BeerStyle::Lambic,
        BeerStyle::FruitLambic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BeerStyle::Lager => "lager",
            BeerStyle::WheatBeer => "wheat beer",
            BeerStyle::BritishAle => "british ale",
            BeerStyle::PorterStout => "porter, stout",
            BeerStyle::BelgianBeer => "belgian beer",
            BeerStyle::Lambic => "lambic",
            BeerStyle::FruitLambic => "fruit lambic",
        }
    }

    /// 일반적인 탄산 농도 (최소, 최대) [g/l].
    pub fn carbonation_range(self) -> (f64, f64) {
        match self {
            BeerStyle::Lager => (4.4, 5.5),
            BeerStyle::WheatBeer => (6.5, 9.0),
            BeerStyle::BritishAle => (3.0, 4.0),
            BeerStyle::PorterStout => (3.4, 4.6),
            BeerStyle::BelgianBeer => (3.8, 4.8),
            BeerStyle::Lambic => (4.8, 5.6),
            BeerStyle::FruitLambic => (6.0, 9.0),
        }
    }

    /// 범위의 중간값을 목표 농도로 쓴다.
    pub fn target_carbonation(self) -> f64 {
        let (min, max) = self.carbonation_range();
        (min + max) / 2.0
    }
}
