//! 양조 계산에 쓰는 참조 표(비중, 탄산 포화도, 홉 이용률)를 읽어 들인다.
//!
//! 표는 머리글 행이 있는 쉼표 구분 텍스트이며 기본 표는 바이너리에 내장된다.
//! 한 번 읽은 뒤에는 변경하지 않고 계산기에 참조로 넘겨 사용한다.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::interpolation::{self, InterpolationError};

pub const GRAVITY_FILE: &str = "gravity.csv";
pub const CARBONATE_FILE: &str = "carbonate.csv";
pub const HOP_UTILIZATION_FILE: &str = "hop_utilization.csv";

const BUNDLED_GRAVITY: &str = include_str!("../data/gravity.csv");
const BUNDLED_CARBONATE: &str = include_str!("../data/carbonate.csv");
const BUNDLED_HOP_UTILIZATION: &str = include_str!("../data/hop_utilization.csv");

/// 표 로드/파싱 시 발생 가능한 오류.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("cannot read table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{table}: table has no header row")]
    MissingHeader { table: &'static str },
    #[error("{table}: column '{column}' not found in header")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("{table}, line {line}: '{value}' is not a number")]
    InvalidNumber {
        table: &'static str,
        line: usize,
        value: String,
    },
    #[error("{table}, line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        table: &'static str,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{table}: {source}")]
    Invalid {
        table: &'static str,
        #[source]
        source: InterpolationError,
    },
}

/// 한 줄을 필드로 나눈다. 큰따옴표로 감싼 필드 안의 쉼표는 구분자로 보지 않는다.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for ch in line.chars() {
        match ch {
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields.into_iter().map(|f| f.trim().to_string()).collect()
}

/// 소수점이 쉼표로 표기된 값("14,5")도 허용한다. NaN과 무한대는 거부한다.
fn parse_number(table: &'static str, line: usize, raw: &str) -> Result<f64, TableError> {
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TableError::InvalidNumber {
            table,
            line,
            value: raw.to_string(),
        })
}

/// 머리글과 데이터 행(줄 번호 포함)으로 나눈다. 빈 줄은 건너뛴다.
fn split_rows(
    table: &'static str,
    text: &str,
) -> Result<(Vec<String>, Vec<(usize, Vec<String>)>), TableError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| (i + 1, split_fields(l)));
    let (_, header) = lines.next().ok_or(TableError::MissingHeader { table })?;
    let rows: Vec<_> = lines.collect();
    for (line, fields) in &rows {
        if fields.len() != header.len() {
            return Err(TableError::RaggedRow {
                table,
                line: *line,
                expected: header.len(),
                found: fields.len(),
            });
        }
    }
    Ok((header, rows))
}

/// 두 열로 된 표에서 지정한 열을 숫자 벡터로 꺼낸다.
fn two_columns(
    table: &'static str,
    text: &str,
    x_column: &'static str,
    y_column: &'static str,
) -> Result<(Vec<f64>, Vec<f64>), TableError> {
    let (header, rows) = split_rows(table, text)?;
    let find = |column: &'static str| {
        header
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column))
            .ok_or(TableError::MissingColumn { table, column })
    };
    let (xi, yi) = (find(x_column)?, find(y_column)?);
    let mut xs = Vec::with_capacity(rows.len());
    let mut ys = Vec::with_capacity(rows.len());
    for (line, fields) in &rows {
        xs.push(parse_number(table, *line, &fields[xi])?);
        ys.push(parse_number(table, *line, &fields[yi])?);
    }
    Ok((xs, ys))
}

fn validate(table: &'static str, axis: &[f64]) -> Result<(), TableError> {
    interpolation::check_axis(axis).map_err(|source| TableError::Invalid { table, source })
}

/// °Plato와 비중(SG)의 대응표. 두 열 모두 오름차순이어야 한다.
#[derive(Debug, Clone, PartialEq)]
pub struct GravityTable {
    plato: Vec<f64>,
    specific_gravity: Vec<f64>,
}

impl GravityTable {
    const NAME: &'static str = "gravity";

    /// `Plato`, `SG` 열을 가진 표를 파싱한다.
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let (plato, specific_gravity) = two_columns(Self::NAME, text, "Plato", "SG")?;
        validate(Self::NAME, &plato)?;
        validate(Self::NAME, &specific_gravity)?;
        Ok(Self {
            plato,
            specific_gravity,
        })
    }

    /// 표 보간으로 °Plato를 비중으로 환산한다.
    pub fn plato_to_sg(&self, plato: f64) -> Result<f64, InterpolationError> {
        interpolation::interpolate(&self.plato, &self.specific_gravity, plato)
    }

    /// 표 보간으로 비중을 °Plato로 환산한다.
    pub fn sg_to_plato(&self, sg: f64) -> Result<f64, InterpolationError> {
        interpolation::interpolate(&self.specific_gravity, &self.plato, sg)
    }

    pub fn plato_range(&self) -> (f64, f64) {
        axis_range(&self.plato)
    }

    pub fn specific_gravity_range(&self) -> (f64, f64) {
        axis_range(&self.specific_gravity)
    }

    /// 표본점 (°Plato, SG) 쌍.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.plato
            .iter()
            .copied()
            .zip(self.specific_gravity.iter().copied())
    }
}

/// 온도별 탄산 포화 농도표. 온도는 오름차순, 농도는 온도가 오를수록 감소한다.
#[derive(Debug, Clone, PartialEq)]
pub struct CarbonateTable {
    temperature_c: Vec<f64>,
    carbonate_g_per_l: Vec<f64>,
}

impl CarbonateTable {
    const NAME: &'static str = "carbonate";

    /// `temperature`, `carbonate` 열을 가진 표를 파싱한다.
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let (temperature_c, carbonate_g_per_l) =
            two_columns(Self::NAME, text, "temperature", "carbonate")?;
        validate(Self::NAME, &temperature_c)?;
        Ok(Self {
            temperature_c,
            carbonate_g_per_l,
        })
    }

    /// 주어진 온도(°C)의 포화 농도 [g/l].
    pub fn carbonate_at(&self, temperature_c: f64) -> Result<f64, InterpolationError> {
        interpolation::interpolate(&self.temperature_c, &self.carbonate_g_per_l, temperature_c)
    }

    pub fn temperature_range(&self) -> (f64, f64) {
        axis_range(&self.temperature_c)
    }
}

/// 끓임 시간과 맥즙 농도에 따른 홉 이용률 격자.
///
/// 열 머리글은 °Plato 값(소수점 쉼표 허용), 첫 열은 끓임 시간[분]이다.
#[derive(Debug, Clone, PartialEq)]
pub struct HopUtilizationTable {
    plato: Vec<f64>,
    cook_time_min: Vec<f64>,
    utilization: Vec<Vec<f64>>,
}

impl HopUtilizationTable {
    const NAME: &'static str = "hop_utilization";

    pub fn parse(text: &str) -> Result<Self, TableError> {
        let table = Self::NAME;
        let (header, rows) = split_rows(table, text)?;
        if header.len() < 2 {
            return Err(TableError::MissingColumn {
                table,
                column: "plato",
            });
        }
        let plato = header[1..]
            .iter()
            .map(|h| parse_number(table, 1, h))
            .collect::<Result<Vec<_>, _>>()?;

        let mut cook_time_min = Vec::with_capacity(rows.len());
        let mut utilization = Vec::with_capacity(rows.len());
        for (line, fields) in &rows {
            cook_time_min.push(parse_number(table, *line, &fields[0])?);
            let row = fields[1..]
                .iter()
                .map(|f| parse_number(table, *line, f))
                .collect::<Result<Vec<_>, _>>()?;
            utilization.push(row);
        }
        validate(table, &plato)?;
        validate(table, &cook_time_min)?;
        Ok(Self {
            plato,
            cook_time_min,
            utilization,
        })
    }

    /// (°Plato, 끓임 시간) 지점의 이용률을 쌍선형 보간한다.
    pub fn utilization_at(
        &self,
        plato: f64,
        cook_time_min: f64,
    ) -> Result<f64, InterpolationError> {
        interpolation::interpolate_2d(
            &self.plato,
            &self.cook_time_min,
            &self.utilization,
            plato,
            cook_time_min,
        )
    }

    pub fn plato_range(&self) -> (f64, f64) {
        axis_range(&self.plato)
    }

    pub fn cook_time_range(&self) -> (f64, f64) {
        axis_range(&self.cook_time_min)
    }
}

fn axis_range(axis: &[f64]) -> (f64, f64) {
    // 파싱 시 비어 있지 않음을 검증했다.
    (axis[0], axis[axis.len() - 1])
}

/// 계산기 전체가 공유하는 불변 참조 표 묶음.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTables {
    pub gravity: GravityTable,
    pub carbonate: CarbonateTable,
    pub hop_utilization: HopUtilizationTable,
}

impl ReferenceTables {
    /// 바이너리에 내장된 기본 표를 파싱한다.
    pub fn bundled() -> Result<Self, TableError> {
        let tables = Self {
            gravity: GravityTable::parse(BUNDLED_GRAVITY)?,
            carbonate: CarbonateTable::parse(BUNDLED_CARBONATE)?,
            hop_utilization: HopUtilizationTable::parse(BUNDLED_HOP_UTILIZATION)?,
        };
        debug!("loaded bundled reference tables");
        Ok(tables)
    }

    /// 디렉터리에서 세 표 파일을 읽는다. 파일명은 내장 표와 같다.
    pub fn from_dir(dir: &Path) -> Result<Self, TableError> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| TableError::Io { path, source })
        };
        let tables = Self {
            gravity: GravityTable::parse(&read(GRAVITY_FILE)?)?,
            carbonate: CarbonateTable::parse(&read(CARBONATE_FILE)?)?,
            hop_utilization: HopUtilizationTable::parse(&read(HOP_UTILIZATION_FILE)?)?,
        };
        debug!(dir = %dir.display(), "loaded reference tables from directory");
        Ok(tables)
    }

    /// 디렉터리가 주어지면 그곳에서, 아니면 내장 표를 읽는다.
    pub fn load(dir: Option<&Path>) -> Result<Self, TableError> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::bundled(),
        }
    }
}
