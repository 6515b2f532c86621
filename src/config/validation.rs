use thiserror::Error;

use crate::codec::LocalZone;

/// 配置驗證錯誤
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("無效的配置值: {0}")]
    InvalidValue(String),
}

/// 配置驗證器trait
pub trait Validator {
    /// 驗證配置
    fn validate(&self) -> Result<(), ValidationError>;
}

/// 驗證配置區段
pub fn validate_config<T>(config: &T) -> Result<(), ValidationError>
where
    T: Validator,
{
    config.validate()
}

/// 驗證工具函數
pub struct ValidationUtils;

impl ValidationUtils {
    /// 驗證一個選項是否為某些值中的一個
    pub fn one_of<T>(value: &T, options: &[T], field_name: &str) -> Result<(), ValidationError>
    where
        T: PartialEq + ToString,
    {
        if !options.contains(value) {
            return Err(ValidationError::InvalidValue(format!(
                "{} 的值 {} 不是有效選項: {:?}",
                field_name,
                value.to_string(),
                options.iter().map(ToString::to_string).collect::<Vec<_>>()
            )));
        }
        Ok(())
    }

    /// 驗證時區偏移量字串（`±HH[:MM]`）
    pub fn utc_offset(value: &str, field_name: &str) -> Result<(), ValidationError> {
        LocalZone::from_offset(value)
            .map(|_| ())
            .map_err(|err| ValidationError::InvalidValue(format!("{}: {}", field_name, err)))
    }
}
