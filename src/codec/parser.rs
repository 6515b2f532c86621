//! 字串 -> 時刻
//!
//! 所有非特例的形狀一律交給 [`parse_civil_or_zoned`]，寬鬆解析的行為只存在於該處：
//! - 僅日期（無時區）視為 UTC 午夜
//! - 日期時間（無時區）視為本地民用時間
//! - 帶時區後綴者依其偏移量換算
//!
//! 不符合文法或日曆欄位無效的字串返回 [`CodecError::Unparseable`]，呼叫端應在上游自行驗證格式。

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::Captures;
use tracing::trace;

use super::error::{CodecError, CodecResult};
use super::format::DecodeMode;
use super::instant::Instant;
use super::shape::{self, RawParts, RawTime};
use super::zone::CivilZone;
use crate::utils::time_utils::resolve_local;

/// 依模式解碼單一非空字串
pub(crate) fn decode_value<Z: CivilZone + ?Sized>(
    value: &str,
    mode: DecodeMode,
    zone: &Z,
) -> CodecResult<Instant> {
    match mode {
        DecodeMode::SelfDescribing => {
            let shape = shape::classify(value);
            trace!("自描述解碼 {:?}，形狀 {:?}", value, shape);
            if matches!(shape, shape::StringShape::DateOnly | shape::StringShape::Timestamp) {
                return Err(CodecError::MissingZone(value.to_string()));
            }
            parse_civil_or_zoned(value, zone)
        }
        // 附加 Z 強制以 UTC 解讀
        DecodeMode::Utc => parse_civil_or_zoned(&format!("{}Z", value), zone),
        DecodeMode::Local => match shape::capture_date_only(value) {
            Some(caps) => decode_local_date(value, caps, zone),
            None => parse_civil_or_zoned(value, zone),
        },
    }
}

/// 將 `YYYY-MM-DD` 逐欄位分解並建立本地午夜
///
/// 不能交給通用解析：僅日期的字串在該處會被視為 UTC 午夜。
fn decode_local_date<Z: CivilZone + ?Sized>(
    value: &str,
    caps: Captures<'_>,
    zone: &Z,
) -> CodecResult<Instant> {
    let component = |index: usize| {
        caps.get(index)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CodecError::Decomposition(value.to_string()))
    };
    let (year, month, day) = (component(1)?, component(2)?, component(3)?);
    trace!("本地日期分解 {:?} -> {}/{}/{}", value, year, month, day);

    let date = civil_date(value, year, month, day)?;
    let midnight = date.and_time(NaiveTime::MIN);
    resolve_local(zone, midnight)
        .map(Instant::from)
        .ok_or_else(|| CodecError::unparseable(value, "超出可表示範圍"))
}

/// 通用解析原語：無時區的日期時間以 `zone` 解讀，其餘依字串自身的時區
pub(crate) fn parse_civil_or_zoned<Z: CivilZone + ?Sized>(value: &str, zone: &Z) -> CodecResult<Instant> {
    let parts = shape::split_date_time(value)
        .ok_or_else(|| CodecError::unparseable(value, "不符合日期時間文法"))?;
    let civil = civil_date_time(value, &parts)?;

    let utc = match (parts.zone, parts.time.is_some()) {
        (Some(suffix), _) => {
            let offset = shape::parse_tz_suffix(suffix)
                .ok_or_else(|| CodecError::unparseable(value, format!("無效的時區後綴 {}", suffix)))?;
            offset
                .from_local_datetime(&civil)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
        }
        // 僅日期的字串視為 UTC 午夜
        (None, false) => Some(Utc.from_utc_datetime(&civil)),
        (None, true) => resolve_local(zone, civil),
    };

    utc.map(Instant::from)
        .ok_or_else(|| CodecError::unparseable(value, "超出可表示範圍"))
}

fn civil_date_time(value: &str, parts: &RawParts<'_>) -> CodecResult<NaiveDateTime> {
    let date = civil_date(value, parts.year, parts.month, parts.day)?;
    let time = match &parts.time {
        Some(time) => civil_time(value, time)?,
        None => NaiveTime::MIN,
    };
    Ok(date.and_time(time))
}

fn civil_date(value: &str, year: &str, month: &str, day: &str) -> CodecResult<NaiveDate> {
    NaiveDate::from_ymd_opt(number(value, year)?, number(value, month)?, number(value, day)?)
        .ok_or_else(|| CodecError::unparseable(value, "日期超出日曆範圍"))
}

fn civil_time(value: &str, time: &RawTime<'_>) -> CodecResult<NaiveTime> {
    let second = match time.second {
        Some(second) => number(value, second)?,
        None => 0,
    };
    let millis = time.fraction.map_or(0, fraction_to_millis);
    NaiveTime::from_hms_milli_opt(number(value, time.hour)?, number(value, time.minute)?, second, millis)
        .ok_or_else(|| CodecError::unparseable(value, "時間超出範圍"))
}

/// 小數秒截斷（非四捨五入）至毫秒：`"249097"` -> 249，`"5"` -> 500
fn fraction_to_millis(fraction: &str) -> u32 {
    fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(3)
        .fold(0, |acc, digit| acc * 10 + u32::from(digit - b'0'))
}

fn number<T: std::str::FromStr>(value: &str, digits: &str) -> CodecResult<T> {
    digits.parse().map_err(|_| {
        let reason = if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            format!("數值欄位溢位 {}", digits)
        } else {
            format!("不是數值 {}", digits)
        };
        CodecError::unparseable(value, reason)
    })
}
