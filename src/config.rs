use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::recipe::DEFAULT_EFFICIENCY;
use crate::units::{ConversionMode, GravityUnit, TemperatureUnit};

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_FILE: &str = "brew_toolbox.toml";

/// 입력 값에 단위가 지정되지 않았을 때 쓰는 기본 단위.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultUnits {
    pub gravity: GravityUnit,
    pub temperature: TemperatureUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self {
            gravity: GravityUnit::Plato,
            temperature: TemperatureUnit::Celsius,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 비중 환산 방식
    pub gravity_conversion: ConversionMode,
    /// 양조장 수율 (0 초과 1 이하)
    pub brewhouse_efficiency: f64,
    /// 참조 표 디렉터리. 없으면 내장 표를 사용한다.
    pub data_dir: Option<PathBuf>,
    /// TOML 표로 직렬화되므로 마지막에 둔다.
    pub default_units: DefaultUnits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gravity_conversion: ConversionMode::Table,
            brewhouse_efficiency: DEFAULT_EFFICIENCY,
            data_dir: None,
            default_units: DefaultUnits::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 값 검증 실패
    #[error("설정 값 오류: {0}")]
    Invalid(String),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        info!(path = %path.display(), "created default config");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 TOML 파일로 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.brewhouse_efficiency > 0.0 && self.brewhouse_efficiency <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "brewhouse_efficiency must be in (0, 1], got {}",
                self.brewhouse_efficiency
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        let cfg = load_or_default(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let cfg = Config {
            default_units: DefaultUnits {
                gravity: GravityUnit::SpecificGravity,
                temperature: TemperatureUnit::Fahrenheit,
            },
            gravity_conversion: ConversionMode::Polynomial,
            brewhouse_efficiency: 0.68,
            data_dir: Some(PathBuf::from("tables")),
        };
        cfg.save(&path).unwrap();
        assert_eq!(load_or_default(&path).unwrap(), cfg);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(&path, "gravity_conversion = \"Polynomial\"\n").unwrap();
        let cfg = load_or_default(&path).unwrap();
        assert_eq!(cfg.gravity_conversion, ConversionMode::Polynomial);
        assert_eq!(cfg.brewhouse_efficiency, DEFAULT_EFFICIENCY);
    }

    #[test]
    fn rejects_invalid_efficiency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "brewhouse_efficiency = 1.5\n").unwrap();
        let err = load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert_eq!(
            err.to_string(),
            "설정 값 오류: brewhouse_efficiency must be in (0, 1], got 1.5"
        );
    }
}
