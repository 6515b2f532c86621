use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::encoder;
use crate::utils::time_utils::{datetime_to_timestamp_ms, timestamp_ms_to_datetime, truncate_to_millis};

/// 毫秒精度的絕對時刻，不附帶時區
///
/// 內部以 UTC 儲存；以 UTC 或本地民用曆解讀只發生在編解碼的邊界。
/// 所有建構方式都會將次毫秒部分截斷。序列化形式為紀元毫秒數。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// 由紀元毫秒建立，超出 chrono 可表示範圍時返回 None
    pub fn from_millis(millis: i64) -> Option<Self> {
        timestamp_ms_to_datetime(millis).map(Self)
    }

    /// 由任意時區的 DateTime 建立，截斷至毫秒
    pub fn from_datetime<Tz: TimeZone>(dt: DateTime<Tz>) -> Self {
        Self(truncate_to_millis(dt.with_timezone(&Utc)))
    }

    pub fn as_millis(&self) -> i64 {
        datetime_to_timestamp_ms(&self.0)
    }

    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }

    /// 轉換至指定時區
    pub fn to_zone<Tz: TimeZone>(&self, zone: &Tz) -> DateTime<Tz> {
        self.0.with_timezone(zone)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Instant {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::from_datetime(dt)
    }
}

impl From<Instant> for DateTime<Utc> {
    fn from(instant: Instant) -> Self {
        instant.0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encoder::encode_timestamptz(self))
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_millis())
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let millis = i64::deserialize(deserializer)?;
        Instant::from_millis(millis)
            .ok_or_else(|| de::Error::custom(format!("毫秒時間戳超出範圍: {}", millis)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeDelta, Timelike};

    #[test]
    fn test_from_datetime_truncates() {
        let dt = Utc.with_ymd_and_hms(2021, 5, 25, 14, 41, 10).unwrap()
            + TimeDelta::microseconds(249_097);
        let instant = Instant::from_datetime(dt);
        assert_eq!(instant.as_millis(), 1_621_953_670_249);
        assert_eq!(instant.as_utc().nanosecond(), 249_000_000);
    }

    #[test]
    fn test_from_datetime_with_offset() {
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = zone.with_ymd_and_hms(2021, 5, 25, 16, 41, 10).unwrap();
        let instant = Instant::from(dt);
        assert_eq!(instant.as_utc(), Utc.with_ymd_and_hms(2021, 5, 25, 14, 41, 10).unwrap());
        assert_eq!(instant.to_zone(&zone), dt);
    }

    #[test]
    fn test_from_millis_range() {
        assert_eq!(Instant::from_millis(0).unwrap().as_millis(), 0);
        assert_eq!(Instant::from_millis(-1).unwrap().as_millis(), -1);
        assert!(Instant::from_millis(i64::MIN).is_none());
    }

    #[test]
    fn test_display_is_timestamptz() {
        let instant = Instant::from_millis(1_621_953_670_249).unwrap();
        assert_eq!(instant.to_string(), "2021-05-25T14:41:10.249Z");
    }

    #[test]
    fn test_serde_as_millis() {
        let instant = Instant::from_millis(1_621_953_670_249).unwrap();
        let json = serde_json::to_string(&instant).unwrap();
        assert_eq!(json, "1621953670249");
        let back: Instant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, instant);
        assert!(serde_json::from_str::<Instant>("9223372036854775807").is_err());
    }
}
