use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_FILE;
use crate::conversion::{parse_gravity_unit, parse_temperature_unit};
use crate::quantity::QuantityKind;
use crate::recipe::{find_malt, Malt};
use crate::units::{GravityUnit, TemperatureUnit};

/// 가정 양조용 계산 도구.
#[derive(Debug, Parser)]
#[command(
    name = "brew_toolbox",
    version,
    about = "가정 양조 계산기: 맥즙 농도, 탄산화, 맥아/홉 양"
)]
pub struct Cli {
    /// 상세도 (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// TOML 설정 파일 경로
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 같은 물리량의 단위 변환
    Convert(ConvertArgs),
    /// 온도별 탄산 포화 농도
    Saturation(TemperatureArgs),
    /// 목표 농도까지 추가할 탄산량
    Carbonisation(CarbonisationArgs),
    /// 맥주 종류별 일반 탄산 농도
    Styles,
    /// 맥아 목록
    Malts,
    /// 목표 맥즙량/농도에 필요한 맥아량
    MaltBill(MaltBillArgs),
    /// 목표 쓴맛에 필요한 홉량
    Hops(HopsArgs),
    /// 예상 알코올 도수
    Alcohol(AlcoholArgs),
}

#[derive(Debug, clap::Args)]
pub struct ConvertArgs {
    #[arg(value_enum)]
    pub kind: QuantityKind,
    #[arg(allow_negative_numbers = true)]
    pub value: f64,
    pub from: String,
    pub to: String,
}

#[derive(Debug, clap::Args)]
pub struct TemperatureArgs {
    /// 온도 값
    #[arg(allow_negative_numbers = true)]
    pub temperature: f64,
    /// 온도 단위 (C, F). 생략하면 설정의 기본 단위.
    #[arg(short, long, value_parser = parse_temperature_unit)]
    pub unit: Option<TemperatureUnit>,
}

#[derive(Debug, clap::Args)]
pub struct CarbonisationArgs {
    /// 목표 탄산 농도 [g/l]
    pub target: f64,
    #[command(flatten)]
    pub temperature: TemperatureArgs,
}

#[derive(Debug, clap::Args)]
pub struct MaltBillArgs {
    /// 맥즙량 [l]
    #[arg(long)]
    pub volume: f64,
    /// 목표 맥즙 농도
    #[arg(long)]
    pub gravity: f64,
    /// 농도 단위 (P, SG). 생략하면 설정의 기본 단위.
    #[arg(long, value_parser = parse_gravity_unit)]
    pub gravity_unit: Option<GravityUnit>,
    /// `이름=비율` 형식, 여러 번 지정 가능 (예: "Pilsener Malz=0.8")
    #[arg(long = "malt", required = true, value_parser = parse_malt_share)]
    pub malts: Vec<(Malt, f64)>,
    /// 양조장 수율. 생략하면 설정 값.
    #[arg(long)]
    pub efficiency: Option<f64>,
}

#[derive(Debug, clap::Args)]
pub struct HopsArgs {
    /// 목표 쓴맛 [IBU]
    #[arg(long)]
    pub ibu: f64,
    /// 알파산 함량 [%]
    #[arg(long)]
    pub alpha: f64,
    /// 맥즙량 [l]
    #[arg(long)]
    pub volume: f64,
    /// 끓임 시간 [분]
    #[arg(long)]
    pub cook_time: f64,
    #[arg(long)]
    pub gravity: f64,
    #[arg(long, value_parser = parse_gravity_unit)]
    pub gravity_unit: Option<GravityUnit>,
}

#[derive(Debug, clap::Args)]
pub struct AlcoholArgs {
    /// 원맥즙 농도
    #[arg(long)]
    pub original: f64,
    /// 발효 후 잔여 농도
    #[arg(long)]
    pub residual: Option<f64>,
    #[arg(long, value_parser = parse_gravity_unit)]
    pub gravity_unit: Option<GravityUnit>,
}

/// `이름=비율` 문자열을 (맥아, 비율)로 파싱한다.
pub fn parse_malt_share(s: &str) -> Result<(Malt, f64), String> {
    let (name, share) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=SHARE, got '{s}'"))?;
    let malt = find_malt(name).ok_or_else(|| format!("unknown malt: '{}'", name.trim()))?;
    let share = share
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("share must be a number, got '{}'", share.trim()))?;
    Ok((malt, share))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{MUNICH_MALT, PILSENER_MALT};

    #[test]
    fn malt_share_parsing() {
        assert_eq!(
            parse_malt_share("Pilsener Malz=0.8").unwrap(),
            (PILSENER_MALT, 0.8)
        );
        assert_eq!(
            parse_malt_share("münchener malz = 0.2").unwrap(),
            (MUNICH_MALT, 0.2)
        );
        assert!(parse_malt_share("Pilsener Malz").is_err());
        assert!(parse_malt_share("Gerste=0.5").is_err());
        assert!(parse_malt_share("Honig=viel").is_err());
    }

    #[test]
    fn parses_malt_bill_command() {
        let cli = Cli::try_parse_from([
            "brew_toolbox",
            "malt-bill",
            "--volume",
            "22",
            "--gravity",
            "14",
            "--malt",
            "Pilsener Malz=0.8",
            "--malt",
            "Münchener Malz=0.2",
        ])
        .unwrap();
        match cli.command {
            Command::MaltBill(args) => {
                assert_eq!(args.malts.len(), 2);
                assert_eq!(args.gravity_unit, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn parses_units_and_negative_values() {
        let cli = Cli::try_parse_from(["brew_toolbox", "-vv", "saturation", "68", "--unit", "F"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Saturation(args) => {
                assert_eq!(args.unit, Some(TemperatureUnit::Fahrenheit));
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli =
            Cli::try_parse_from(["brew_toolbox", "convert", "temperature", "-40", "C", "F"])
                .unwrap();
        assert!(matches!(cli.command, Command::Convert(ref a) if a.value == -40.0));

        assert!(Cli::try_parse_from(["brew_toolbox", "saturation", "5", "--unit", "K"]).is_err());
    }
}
