//! 時間編解碼錯誤定義

use thiserror::Error;

/// 時間編解碼錯誤類型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// 字串不符合任何可解析的形狀，或欄位超出日曆範圍
    #[error("無法解析時間字串 {value:?}: {reason}")]
    Unparseable { value: String, reason: String },

    /// 無時區的字串必須指定 UTC 或 local 解讀模式
    #[error("字串未帶時區，必須指定解讀模式: {0}")]
    MissingZone(String),

    /// 文法匹配成功但擷取群組為空；代表編解碼器自身的邏輯不一致
    #[error("日期分解失敗: {0}")]
    Decomposition(String),

    #[error("未知的編碼格式: {0}")]
    UnknownFormat(String),

    #[error("未知的解讀模式: {0}")]
    UnknownMode(String),

    #[error("無效的時區偏移量: {0}")]
    InvalidOffset(String),
}

impl CodecError {
    pub(crate) fn unparseable(value: &str, reason: impl Into<String>) -> Self {
        CodecError::Unparseable {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// 時間編解碼結果類型
pub type CodecResult<T> = Result<T, CodecError>;
