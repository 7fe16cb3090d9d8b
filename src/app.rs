use tracing::info;

use crate::alcohol;
use crate::carbonation::{self, BeerStyle, CarbonationError};
use crate::cli::{
    AlcoholArgs, CarbonisationArgs, Cli, Command, ConvertArgs, HopsArgs, MaltBillArgs,
    TemperatureArgs,
};
use crate::config::{self, Config, ConfigError};
use crate::conversion::{self, ConversionError};
use crate::interpolation::InterpolationError;
use crate::recipe::{self, HopQuantityInput, MaltBillInput, RecipeError};
use crate::tables::{ReferenceTables, TableError};
use crate::units::{Concentration, Gravity, GravityConversion, Temperature};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 참조 표 로드 오류
    #[error("참조 표 오류: {0}")]
    Table(#[from] TableError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    /// 맥즙 농도 환산 오류
    #[error("맥즙 농도 환산 오류: {0}")]
    Gravity(#[from] InterpolationError),
    /// 탄산화 계산 오류
    #[error("탄산화 계산 오류: {0}")]
    Carbonation(#[from] CarbonationError),
    /// 레시피 계산 오류
    #[error("레시피 계산 오류: {0}")]
    Recipe(#[from] RecipeError),
}

/// 설정과 참조 표를 준비한 뒤 하위 명령을 실행한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default(&cli.config)?;
    let tables = ReferenceTables::load(cfg.data_dir.as_deref())?;
    info!(command = ?cli.command, "running");

    match cli.command {
        Command::Convert(args) => handle_convert(&cfg, &tables, args),
        Command::Saturation(args) => handle_saturation(&cfg, &tables, args),
        Command::Carbonisation(args) => handle_carbonisation(&cfg, &tables, args),
        Command::Styles => {
            handle_styles();
            Ok(())
        }
        Command::Malts => {
            handle_malts();
            Ok(())
        }
        Command::MaltBill(args) => handle_malt_bill(&cfg, &tables, args),
        Command::Hops(args) => handle_hops(&cfg, &tables, args),
        Command::Alcohol(args) => handle_alcohol(&cfg, &tables, args),
    }
}

fn gravity_conversion<'a>(cfg: &Config, tables: &'a ReferenceTables) -> GravityConversion<'a> {
    GravityConversion::new(cfg.gravity_conversion, &tables.gravity)
}

fn temperature_of(cfg: &Config, args: &TemperatureArgs) -> Temperature {
    Temperature::new(
        args.temperature,
        args.unit.unwrap_or(cfg.default_units.temperature),
    )
}

fn handle_convert(
    cfg: &Config,
    tables: &ReferenceTables,
    args: ConvertArgs,
) -> Result<(), AppError> {
    let result = conversion::convert(
        args.kind,
        args.value,
        &args.from,
        &args.to,
        gravity_conversion(cfg, tables),
    )?;
    println!("변환 결과: {result} {}", args.to.trim());
    Ok(())
}

fn handle_saturation(
    cfg: &Config,
    tables: &ReferenceTables,
    args: TemperatureArgs,
) -> Result<(), AppError> {
    let temp = temperature_of(cfg, &args);
    let sat = carbonation::saturation(&tables.carbonate, temp)?;
    println!("{temp}");
    println!("탄산 포화 농도: {sat:.2} g/l");
    Ok(())
}

fn handle_carbonisation(
    cfg: &Config,
    tables: &ReferenceTables,
    args: CarbonisationArgs,
) -> Result<(), AppError> {
    let temp = temperature_of(cfg, &args.temperature);
    let needed = carbonation::carbonisation(&tables.carbonate, args.target, temp)?;
    println!("{temp}");
    println!("목표 {}", Concentration::new(args.target));
    println!("추가 탄산량: {needed:.2} g/l");
    if needed < 0.0 {
        println!("이미 목표 농도보다 과포화 상태입니다.");
    }
    Ok(())
}

fn handle_styles() {
    println!("{:<16} {:>10} {:>10}", "종류", "최소 g/l", "최대 g/l");
    for style in BeerStyle::ALL {
        let (min, max) = style.carbonation_range();
        println!("{:<16} {:>10.1} {:>10.1}", style.name(), min, max);
    }
}

fn handle_malts() {
    for malt in recipe::malts() {
        println!("{:<22} {:>6.0} g/kg", malt.name, malt.extract_ratio);
    }
}

fn handle_malt_bill(
    cfg: &Config,
    tables: &ReferenceTables,
    args: MaltBillArgs,
) -> Result<(), AppError> {
    let gravity = Gravity::new(
        args.gravity,
        args.gravity_unit.unwrap_or(cfg.default_units.gravity),
    );
    let input = MaltBillInput::new(args.volume, gravity, args.malts)
        .with_efficiency(args.efficiency.unwrap_or(cfg.brewhouse_efficiency))
        .with_conversion(cfg.gravity_conversion);
    let bill = recipe::malt_composition(tables, &input)?;
    println!("총 맥아량: {:.2} kg", bill.total_kg);
    for (name, kg) in &bill.malts {
        println!("  {name}: {kg:.2} kg");
    }
    Ok(())
}

fn handle_hops(cfg: &Config, tables: &ReferenceTables, args: HopsArgs) -> Result<(), AppError> {
    let gravity = Gravity::new(
        args.gravity,
        args.gravity_unit.unwrap_or(cfg.default_units.gravity),
    );
    let grams = recipe::hop_quantity(
        tables,
        HopQuantityInput {
            ibu: args.ibu,
            alpha_percent: args.alpha,
            wort_volume_l: args.volume,
            cook_time_min: args.cook_time,
            gravity,
            conversion: cfg.gravity_conversion,
        },
    )?;
    println!("필요 홉량: {grams:.2} g");
    Ok(())
}

fn handle_alcohol(
    cfg: &Config,
    tables: &ReferenceTables,
    args: AlcoholArgs,
) -> Result<(), AppError> {
    let unit = args.gravity_unit.unwrap_or(cfg.default_units.gravity);
    let original = Gravity::new(args.original, unit);
    let residual = args.residual.map(|v| Gravity::new(v, unit));
    let result = alcohol::alcohol(
        &original,
        residual.as_ref(),
        gravity_conversion(cfg, tables),
    )?;
    println!("{result}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_failing_stage() {
        let err = AppError::from(RecipeError::ZeroExtract);
        assert_eq!(
            err.to_string(),
            "레시피 계산 오류: practical extract is zero; check the malt shares and efficiency"
        );
        let err = AppError::from(InterpolationError::OutOfRange {
            value: 1.09,
            min: 1.024,
            max: 1.083,
        });
        assert!(err.to_string().starts_with("맥즙 농도 환산 오류: "), "{err}");
        let err = AppError::from(ConfigError::Invalid("bad".to_string()));
        assert_eq!(err.to_string(), "설정 오류: 설정 값 오류: bad");
    }
}
