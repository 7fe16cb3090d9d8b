//! 레시피 계산: 목표 맥즙량/농도에 필요한 맥아량과 목표 쓴맛에 필요한 홉량.
//!
//! 계산식 출처: http://www.mathe-fuer-hobbybrauer.de/bierrezepte/index.html

use tracing::{debug, warn};

use crate::interpolation::InterpolationError;
use crate::tables::ReferenceTables;
use crate::units::{ConversionMode, Gravity, GravityConversion};

/// 양조장 수율 기본값.
pub const DEFAULT_EFFICIENCY: f64 = 0.75;

/// 레시피 계산 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecipeError {
    /// 맥즙 농도 환산 또는 홉 이용률 표 범위를 벗어남
    #[error(transparent)]
    OutOfRange(#[from] InterpolationError),
    /// 실제 추출량이 0 (빈 구성, 비율 합 0, 수율 0)
    #[error("practical extract is zero; check the malt shares and efficiency")]
    ZeroExtract,
    /// 홉 이용률 또는 알파산 함량이 0
    #[error("hop utilization times alpha acid is zero; no bitterness can be extracted")]
    ZeroUtilization,
}

/// 맥아 종류와 추출 수율 [g 추출물 / kg 맥아].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Malt {
    pub name: &'static str,
    pub extract_ratio: f64,
}

impl Malt {
    pub const fn new(name: &'static str, extract_ratio: f64) -> Self {
        Self {
            name,
            extract_ratio,
        }
    }
}

pub const PILSENER_MALT: Malt = Malt::new("Pilsener Malz", 800.0);
pub const WIENER_MALT: Malt = Malt::new("Wiener Malz", 800.0);
pub const MUNICH_MALT: Malt = Malt::new("Münchener Malz", 790.0);
pub const CARAMALT: Malt = Malt::new("Caramalz", 720.0);
pub const CARAMALT_DARK: Malt = Malt::new("Caramalz dunkel", 720.0);
pub const WHEAT_MALT: Malt = Malt::new("Weizenmalz", 800.0);
pub const ROAST_MALT: Malt = Malt::new("Röstmalz", 700.0);
pub const CORN: Malt = Malt::new("Mais", 800.0);
pub const RICE: Malt = Malt::new("Reis", 800.0);
pub const CEREAL_FLAKES: Malt = Malt::new("Getreideflocke", 650.0);
pub const SUGAR: Malt = Malt::new("Zucker", 1000.0);
pub const EXTRACT_DRY: Malt = Malt::new("Malzextrakt trocken", 990.0);
pub const EXTRACT_FLUID: Malt = Malt::new("Malzextrakt flüssig", 800.0);
pub const HONEY: Malt = Malt::new("Honig", 680.0);

const MALTS: [Malt; 14] = [
    PILSENER_MALT,
    WIENER_MALT,
    MUNICH_MALT,
    CARAMALT,
    CARAMALT_DARK,
    WHEAT_MALT,
    ROAST_MALT,
    CORN,
    RICE,
    CEREAL_FLAKES,
    SUGAR,
    EXTRACT_DRY,
    EXTRACT_FLUID,
    HONEY,
];

/// 맥아 목록 전체.
pub fn malts() -> &'static [Malt] {
    &MALTS
}

/// 이름으로 맥아를 찾는다. 대소문자는 구분하지 않는다.
pub fn find_malt(name: &str) -> Option<Malt> {
    let name = name.trim().to_lowercase();
    MALTS.iter().copied().find(|m| m.name.to_lowercase() == name)
}

/// 맥아량 계산 입력.
#[derive(Debug, Clone)]
pub struct MaltBillInput {
    /// 목표 맥즙량 [l]
    pub volume_l: f64,
    /// 목표 맥즙 농도
    pub gravity: Gravity,
    /// (맥아, 비율) 목록. 비율 합은 1이어야 한다(검증하지 않음).
    pub composition: Vec<(Malt, f64)>,
    /// 양조장 수율 (기본 0.75)
    pub efficiency: f64,
    /// 비중 환산 방식 (기본 표 보간)
    pub conversion: ConversionMode,
}

impl MaltBillInput {
    pub fn new(volume_l: f64, gravity: Gravity, composition: Vec<(Malt, f64)>) -> Self {
        Self {
            volume_l,
            gravity,
            composition,
            efficiency: DEFAULT_EFFICIENCY,
            conversion: ConversionMode::default(),
        }
    }

    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }

    pub fn with_conversion(mut self, conversion: ConversionMode) -> Self {
        self.conversion = conversion;
        self
    }
}

/// 맥아량 계산 결과. 모든 질량은 kg, 소수 둘째 자리 반올림.
#[derive(Debug, Clone, PartialEq)]
pub struct MaltBill {
    pub total_kg: f64,
    pub malts: Vec<(&'static str, f64)>,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// 목표 맥즙량과 농도를 얻기 위해 필요한 맥아량을 계산한다.
///
/// 맥즙 질량 = 부피 × SG, 이론 추출물 = 맥즙 질량 × °P × 10,
/// 실제 추출 수율 = 수율 × Σ(비율 × 맥아 추출 수율), 총 맥아량 = 이론 / 실제.
pub fn malt_composition(
    tables: &ReferenceTables,
    input: &MaltBillInput,
) -> Result<MaltBill, RecipeError> {
    let conv = GravityConversion::new(input.conversion, &tables.gravity);
    let sg = input.gravity.specific_gravity(conv)?;
    let plato = input.gravity.plato(conv)?;

    let share_sum: f64 = input.composition.iter().map(|(_, share)| share).sum();
    if (share_sum - 1.0).abs() > 1e-6 {
        warn!(share_sum, "malt shares do not add up to 1");
    }

    let wort_mass_kg = input.volume_l * sg;
    let theoretical_extract = wort_mass_kg * plato * 10.0;
    let practical_extract = input
        .composition
        .iter()
        .map(|(malt, share)| share * malt.extract_ratio)
        .sum::<f64>()
        * input.efficiency;
    if practical_extract == 0.0 {
        return Err(RecipeError::ZeroExtract);
    }
    let total = theoretical_extract / practical_extract;
    debug!(wort_mass_kg, theoretical_extract, practical_extract, total, "malt bill");

    Ok(MaltBill {
        total_kg: round2(total),
        malts: input
            .composition
            .iter()
            .map(|(malt, share)| (malt.name, round2(share * total)))
            .collect(),
    })
}

/// 홉량 계산 입력.
#[derive(Debug, Clone, Copy)]
pub struct HopQuantityInput {
    /// 목표 쓴맛 [IBU]
    pub ibu: f64,
    /// 홉 알파산 함량 [%]
    pub alpha_percent: f64,
    /// 맥즙량 [l]
    pub wort_volume_l: f64,
    /// 끓임 시간 [분]
    pub cook_time_min: f64,
    /// 맥즙 농도
    pub gravity: Gravity,
    /// 비중 환산 방식
    pub conversion: ConversionMode,
}

/// 목표 쓴맛을 내는 데 필요한 홉량 [g]을 계산한다.
///
/// 이용률은 (°P, 끓임 시간) 격자에서 쌍선형 보간한다.
pub fn hop_quantity(
    tables: &ReferenceTables,
    input: HopQuantityInput,
) -> Result<f64, RecipeError> {
    let plato = input
        .gravity
        .plato(GravityConversion::new(input.conversion, &tables.gravity))?;
    let utilization = tables
        .hop_utilization
        .utilization_at(plato, input.cook_time_min)?;
    let denominator = input.alpha_percent * utilization;
    if denominator == 0.0 {
        return Err(RecipeError::ZeroUtilization);
    }
    let grams = input.ibu * input.wort_volume_l * 10.0 / denominator;
    debug!(plato, utilization, grams, "hop quantity");
    Ok(grams)
}
