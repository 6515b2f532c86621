//! 資料庫時間字串的形狀文法
//!
//! - DateOnly:    `[0-9]+-[0-9]+-[0-9]+`
//! - Timestamp:   `DateOnly "T" [0-9]+:[0-9]+(:[0-9]+(\.[0-9]+)?)?`
//! - TzSuffix:    `"Z" | ("+"|"-") [0-9]+ (":" [0-9]+)?`
//! - TimestampTz: `Timestamp TzSuffix`
//! - TimeTz:      `[0-9]+:[0-9]+(:[0-9]+(\.[0-9]+)?)? TzSuffix`
//!
//! 日期與時間之間亦接受單一空白，資料庫本身的文字輸出即使用空白分隔。
//! 數字僅限 ASCII `0-9`；regex 的 `\d` 會匹配其他書寫系統的數字。

use chrono::FixedOffset;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// 僅日期：用於 local 模式的逐欄位分解
static DATE_ONLY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)-([0-9]+)-([0-9]+)$").expect("日期文法無效"));

/// 日期、可選的時間、可選的時區後綴
static DATE_TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9]+)-([0-9]+)-([0-9]+)(?:[T ]([0-9]+):([0-9]+)(?::([0-9]+)(?:\.([0-9]+))?)?)?(Z|[+-][0-9]+(?::[0-9]+)?)?$",
    )
    .expect("時間戳文法無效")
});

static TIME_TZ_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+:[0-9]+(?::[0-9]+(?:\.[0-9]+)?)?(?:Z|[+-][0-9]+(?::[0-9]+)?)$").expect("TimeTz 文法無效")
});

static TZ_SUFFIX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-])([0-9]+)(?::([0-9]+))?$").expect("時區後綴文法無效"));

/// 字串形狀分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringShape {
    /// `YYYY-MM-DD`
    DateOnly,
    /// 日期加時區後綴；UTC 模式附加 `Z` 之後的形狀
    DateTz,
    /// 無時區的日期時間
    Timestamp,
    /// 帶時區的日期時間
    TimestampTz,
    /// 帶時區的時間（僅見於資料庫輸出，無法轉為時刻）
    TimeTz,
    /// 不符合任何已知文法
    Unrecognized,
}

impl StringShape {
    /// 是否自帶時區，可不指定解讀模式直接解析
    pub fn is_self_describing(&self) -> bool {
        matches!(self, StringShape::DateTz | StringShape::TimestampTz)
    }
}

/// 分解後的原始欄位（尚未轉為數值）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawParts<'a> {
    pub year: &'a str,
    pub month: &'a str,
    pub day: &'a str,
    pub time: Option<RawTime<'a>>,
    pub zone: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawTime<'a> {
    pub hour: &'a str,
    pub minute: &'a str,
    pub second: Option<&'a str>,
    pub fraction: Option<&'a str>,
}

/// 判斷字串形狀
pub fn classify(value: &str) -> StringShape {
    if let Some(parts) = split_date_time(value) {
        return match (parts.time.is_some(), parts.zone.is_some()) {
            (false, false) => StringShape::DateOnly,
            (false, true) => StringShape::DateTz,
            (true, false) => StringShape::Timestamp,
            (true, true) => StringShape::TimestampTz,
        };
    }
    if TIME_TZ_PATTERN.is_match(value) {
        StringShape::TimeTz
    } else {
        StringShape::Unrecognized
    }
}

/// 以 DateOnly 文法擷取年、月、日；不符合時返回 None
pub(crate) fn capture_date_only(value: &str) -> Option<Captures<'_>> {
    DATE_ONLY_PATTERN.captures(value)
}

/// 依日期時間文法分解字串
pub(crate) fn split_date_time(value: &str) -> Option<RawParts<'_>> {
    let caps = DATE_TIME_PATTERN.captures(value)?;
    let group = |index: usize| caps.get(index).map(|m| m.as_str());

    let time = match (group(4), group(5)) {
        (Some(hour), Some(minute)) => Some(RawTime {
            hour,
            minute,
            second: group(6),
            fraction: group(7),
        }),
        _ => None,
    };

    Some(RawParts {
        year: group(1)?,
        month: group(2)?,
        day: group(3)?,
        time,
        zone: group(8),
    })
}

/// 解析時區後綴：`Z`、`±H`、`±HH`、`±HHMM`、`±HH:MM`
pub fn parse_tz_suffix(suffix: &str) -> Option<FixedOffset> {
    if suffix == "Z" {
        return FixedOffset::east_opt(0);
    }

    let caps = TZ_SUFFIX_PATTERN.captures(suffix)?;
    let sign = if &caps[1] == "-" { -1 } else { 1 };
    let digits = &caps[2];

    let (hours, minutes): (i32, i32) = match caps.get(3) {
        Some(minutes) => (digits.parse().ok()?, minutes.as_str().parse().ok()?),
        None if digits.len() <= 2 => (digits.parse().ok()?, 0),
        None if digits.len() == 4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        None => return None,
    };
    if hours > 23 || minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
