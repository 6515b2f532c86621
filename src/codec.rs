//! 時間編解碼模組
//!
//! 在資料庫日期時間欄位的 ISO8601 字串與記憶體中的 [`Instant`] 之間雙向轉換。
//! 資料庫的文字格式本身有歧義（timestamp 無時區、date 無時刻），
//! 呼叫端必須明確宣告以 UTC 或本地民用曆解讀。
//!
//! 兩個方向都保留 null：`None` 輸入一律得到 `None` 輸出。
//! 以不同模式往返（例如以 `timestamp:UTC` 編碼後以 local 解碼）不保證還原，屬呼叫端錯誤。

// 宣告子模組
pub mod encoder;
pub mod error;
pub mod format;
pub mod instant;
pub mod parser;
pub mod shape;
pub mod zone;

use chrono::Local;
use tracing::trace;

// 重新導出常用組件
pub use error::{CodecError, CodecResult};
pub use format::{DecodeMode, EncodeFormat, ZoneMode};
pub use instant::Instant;
pub use shape::{classify, StringShape};
pub use zone::{CivilZone, LocalZone};

/// 時間編解碼器
///
/// `Z` 代表「本地民用曆」；預設為主機時區。無狀態，可在任意執行緒間共用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalCodec<Z = Local> {
    zone: Z,
}

impl TemporalCodec<Local> {
    /// 以主機時區作為本地民用曆
    pub fn local() -> Self {
        Self { zone: Local }
    }
}

impl<Z: CivilZone> TemporalCodec<Z> {
    /// 以指定時區作為本地民用曆
    pub fn with_zone(zone: Z) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> &Z {
        &self.zone
    }

    /// 字串 -> 時刻
    ///
    /// - `SelfDescribing`：字串必須帶時區（TimestampTz）
    /// - `Utc`：附加 `Z` 後解析
    /// - `Local`：`YYYY-MM-DD` 建立本地午夜，其餘形狀以本地民用時間解析
    ///
    /// 不符合文法的字串返回錯誤，不會產生無效時刻。
    pub fn decode(&self, value: Option<&str>, mode: DecodeMode) -> CodecResult<Option<Instant>> {
        match value {
            Some(value) => parser::decode_value(value, mode, &self.zone).map(Some),
            None => {
                trace!("解碼 null，模式 {}", mode);
                Ok(None)
            }
        }
    }

    /// 解碼自帶時區的字串
    pub fn decode_self_describing(&self, value: &str) -> CodecResult<Instant> {
        parser::decode_value(value, DecodeMode::SelfDescribing, &self.zone)
    }

    /// 以指定模式解碼無時區的字串
    pub fn decode_with_mode(&self, value: &str, mode: ZoneMode) -> CodecResult<Instant> {
        parser::decode_value(value, mode.into(), &self.zone)
    }

    /// 時刻 -> 字串
    pub fn encode(&self, value: Option<Instant>, format: EncodeFormat) -> Option<String> {
        value.map(|instant| self.encode_instant(&instant, format))
    }

    pub fn encode_instant(&self, instant: &Instant, format: EncodeFormat) -> String {
        encoder::encode_instant(instant, format, &self.zone)
    }
}

/// 以主機時區解碼
pub fn decode(value: Option<&str>, mode: DecodeMode) -> CodecResult<Option<Instant>> {
    TemporalCodec::local().decode(value, mode)
}

/// 以主機時區編碼
pub fn encode(value: Option<Instant>, format: EncodeFormat) -> Option<String> {
    TemporalCodec::local().encode(value, format)
}
