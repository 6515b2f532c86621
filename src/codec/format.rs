use std::fmt;
use std::str::FromStr;

use super::error::CodecError;

/// 無時區字串的解讀方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneMode {
    /// 以 UTC 解讀或輸出
    Utc,
    /// 以本地民用曆解讀或輸出
    Local,
}

impl ZoneMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneMode::Utc => "UTC",
            ZoneMode::Local => "local",
        }
    }
}

impl fmt::Display for ZoneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneMode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utc" => Ok(ZoneMode::Utc),
            "local" => Ok(ZoneMode::Local),
            _ => Err(CodecError::UnknownMode(s.to_string())),
        }
    }
}

/// 解碼模式
///
/// `SelfDescribing` 僅適用於自帶時區的字串（TimestampTz）；
/// 無時區的 DateOnly 與 Timestamp 必須指定 `Utc` 或 `Local`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeMode {
    SelfDescribing,
    Utc,
    Local,
}

impl DecodeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecodeMode::SelfDescribing => "self-describing",
            DecodeMode::Utc => "UTC",
            DecodeMode::Local => "local",
        }
    }
}

impl From<ZoneMode> for DecodeMode {
    fn from(mode: ZoneMode) -> Self {
        match mode {
            ZoneMode::Utc => DecodeMode::Utc,
            ZoneMode::Local => DecodeMode::Local,
        }
    }
}

impl From<Option<ZoneMode>> for DecodeMode {
    fn from(mode: Option<ZoneMode>) -> Self {
        mode.map_or(DecodeMode::SelfDescribing, DecodeMode::from)
    }
}

impl fmt::Display for DecodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecodeMode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("self-describing") {
            return Ok(DecodeMode::SelfDescribing);
        }
        s.parse::<ZoneMode>().map(DecodeMode::from)
    }
}

/// 編碼輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodeFormat {
    /// 帶毫秒與 `Z` 的完整時間戳，恆以 UTC 表示
    TimestampTz,
    /// `YYYY-MM-DDTHH:MM:SS.fff`
    Timestamp(ZoneMode),
    /// `YYYY-MM-DD`
    Date(ZoneMode),
}

impl EncodeFormat {
    /// 全部五種格式
    pub const ALL: [EncodeFormat; 5] = [
        EncodeFormat::TimestampTz,
        EncodeFormat::Timestamp(ZoneMode::Utc),
        EncodeFormat::Timestamp(ZoneMode::Local),
        EncodeFormat::Date(ZoneMode::Utc),
        EncodeFormat::Date(ZoneMode::Local),
    ];

    /// 解碼此格式輸出時應使用的模式
    pub fn decode_mode(&self) -> DecodeMode {
        match self {
            EncodeFormat::TimestampTz => DecodeMode::SelfDescribing,
            EncodeFormat::Timestamp(zone) | EncodeFormat::Date(zone) => DecodeMode::from(*zone),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EncodeFormat::TimestampTz => "timestamptz",
            EncodeFormat::Timestamp(ZoneMode::Utc) => "timestamp:UTC",
            EncodeFormat::Timestamp(ZoneMode::Local) => "timestamp:local",
            EncodeFormat::Date(ZoneMode::Utc) => "date:UTC",
            EncodeFormat::Date(ZoneMode::Local) => "date:local",
        }
    }
}

impl fmt::Display for EncodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodeFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EncodeFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| CodecError::UnknownFormat(s.to_string()))
    }
}
