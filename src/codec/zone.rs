//! 本地民用曆的抽象
//!
//! 編解碼器的 local 模式需要「主機的本地民用曆」。此處以 [`CivilZone`] 表達該需求，
//! 任何 `chrono::TimeZone` 皆自動實作；部署環境亦可透過 [`LocalZone`] 改用固定偏移量。

use chrono::{FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeZone};

use super::error::{CodecError, CodecResult};
use super::shape;

/// 可在民用時間與 UTC 之間換算的時區
pub trait CivilZone {
    /// 某個民用時間在此時區的偏移量（可能不存在或有兩個）
    fn offset_at_local(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset>;

    /// 某個 UTC 時間在此時區的偏移量
    fn offset_at_utc(&self, utc: &NaiveDateTime) -> FixedOffset;
}

impl<Tz: TimeZone> CivilZone for Tz {
    fn offset_at_local(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        self.offset_from_local_datetime(local).map(|offset| offset.fix())
    }

    fn offset_at_utc(&self, utc: &NaiveDateTime) -> FixedOffset {
        self.offset_from_utc_datetime(utc).fix()
    }
}

/// 可由配置決定的本地時區
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalZone {
    /// 主機時區
    #[default]
    Host,
    /// 固定偏移量，適用於時區設為 UTC 的容器環境
    Fixed(FixedOffset),
}

impl LocalZone {
    /// 解析 `±HH[:MM]` 形式的偏移量
    pub fn from_offset(offset: &str) -> CodecResult<Self> {
        shape::parse_tz_suffix(offset)
            .map(LocalZone::Fixed)
            .ok_or_else(|| CodecError::InvalidOffset(offset.to_string()))
    }

    /// 依可選的偏移量字串建立時區，None 代表主機時區
    pub fn from_config(offset: Option<&str>) -> CodecResult<Self> {
        match offset {
            Some(offset) => Self::from_offset(offset),
            None => Ok(LocalZone::Host),
        }
    }
}

impl CivilZone for LocalZone {
    fn offset_at_local(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        match self {
            LocalZone::Host => Local.offset_at_local(local),
            LocalZone::Fixed(offset) => offset.offset_at_local(local),
        }
    }

    fn offset_at_utc(&self, utc: &NaiveDateTime) -> FixedOffset {
        match self {
            LocalZone::Host => Local.offset_at_utc(utc),
            LocalZone::Fixed(offset) => offset.offset_at_utc(utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    #[test]
    fn test_from_offset() {
        assert_eq!(
            LocalZone::from_offset("+08:00").unwrap(),
            LocalZone::Fixed(FixedOffset::east_opt(8 * 3600).unwrap())
        );
        assert_eq!(
            LocalZone::from_offset("-0330").unwrap(),
            LocalZone::Fixed(FixedOffset::west_opt(3 * 3600 + 1800).unwrap())
        );
        assert_matches!(LocalZone::from_offset("08:00"), Err(CodecError::InvalidOffset(_)));
        assert_matches!(LocalZone::from_offset("+25"), Err(CodecError::InvalidOffset(_)));
        assert_matches!(LocalZone::from_offset("+999999:00"), Err(CodecError::InvalidOffset(_)));
        assert_matches!(LocalZone::from_offset("-1193046:00"), Err(CodecError::InvalidOffset(_)));
    }

    #[test]
    fn test_from_config_defaults_to_host() {
        assert_eq!(LocalZone::from_config(None).unwrap(), LocalZone::Host);
        assert_eq!(LocalZone::default(), LocalZone::Host);
    }

    #[test]
    fn test_fixed_zone_offsets() {
        let zone = LocalZone::from_offset("+05:30").unwrap();
        let civil = NaiveDate::from_ymd_opt(2021, 5, 25)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            zone.offset_at_local(&civil).single(),
            FixedOffset::east_opt(5 * 3600 + 1800)
        );
        assert_eq!(zone.offset_at_utc(&civil).local_minus_utc(), 5 * 3600 + 1800);
    }
}
