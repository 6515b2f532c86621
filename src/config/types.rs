use serde::{Deserialize, Serialize};

use crate::codec::{CodecResult, LocalZone, TemporalCodec};
use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use crate::utils::serde_helpers::empty_string_as_none;

/// 應用程序配置結構
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub codec: CodecConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.log.validate()?;
        self.codec.validate()?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證日誌級別
        ValidationUtils::one_of(
            &self.level.to_lowercase().as_str(),
            &["trace", "debug", "info", "warn", "error"],
            "log.level",
        )?;

        // 驗證日誌格式
        ValidationUtils::one_of(&self.format.to_lowercase().as_str(), &["pretty", "json"], "log.format")?;

        Ok(())
    }
}

/// 編解碼器配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodecConfig {
    /// 取代主機時區的固定偏移量（`±HH[:MM]`），空值代表使用主機時區
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub local_offset: Option<String>,
}

impl Validator for CodecConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(offset) = &self.local_offset {
            ValidationUtils::utc_offset(offset, "codec.local_offset")?;
        }

        Ok(())
    }
}

impl CodecConfig {
    /// 配置指定的本地時區
    pub fn local_zone(&self) -> CodecResult<LocalZone> {
        LocalZone::from_config(self.local_offset.as_deref())
    }

    /// 建立使用配置時區的編解碼器
    pub fn build_codec(&self) -> CodecResult<TemporalCodec<LocalZone>> {
        self.local_zone().map(TemporalCodec::with_zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_default_config_is_valid() {
        let config = ApplicationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.log.level, "info");
        assert_eq!(config.codec.local_zone().unwrap(), LocalZone::Host);
    }

    #[test]
    fn test_log_config_validation() {
        let mut log = LogConfig::default();
        log.level = "DEBUG".to_string();
        assert!(log.validate().is_ok());

        log.level = "verbose".to_string();
        assert!(log.validate().is_err());

        log.level = "info".to_string();
        log.format = "xml".to_string();
        assert!(log.validate().is_err());
    }

    #[test]
    fn test_codec_config_builds_fixed_zone() {
        let config = CodecConfig {
            local_offset: Some("+08:00".to_string()),
        };
        assert!(config.validate().is_ok());

        let codec = config.build_codec().unwrap();
        assert_eq!(
            *codec.zone(),
            LocalZone::Fixed(FixedOffset::east_opt(8 * 3600).unwrap())
        );
    }

    #[test]
    fn test_codec_config_rejects_zone_names() {
        let config = CodecConfig {
            local_offset: Some("Asia/Taipei".to_string()),
        };
        assert!(config.validate().is_err());
        assert!(config.build_codec().is_err());
    }
}
