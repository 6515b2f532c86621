//! 時刻 -> 字串

use chrono::{Datelike, NaiveDateTime, Timelike};

use super::format::{EncodeFormat, ZoneMode};
use super::instant::Instant;
use super::zone::CivilZone;
use crate::utils::time_utils::{to_local_civil, zero_pad};

/// 輸出 `YYYY-MM-DDTHH:MM:SS.fffZ`
pub fn encode_timestamptz(instant: &Instant) -> String {
    let mut encoded = format_timestamp(&instant.as_utc().naive_utc());
    encoded.push('Z');
    encoded
}

/// 依格式輸出字串；`zone` 僅在 local 格式下使用
pub(crate) fn encode_instant<Z: CivilZone + ?Sized>(
    instant: &Instant,
    format: EncodeFormat,
    zone: &Z,
) -> String {
    match format {
        EncodeFormat::TimestampTz => encode_timestamptz(instant),
        EncodeFormat::Timestamp(mode) => format_timestamp(&civil_fields(instant, mode, zone)),
        EncodeFormat::Date(mode) => format_date(&civil_fields(instant, mode, zone)),
    }
}

/// 以 UTC 或本地民用曆讀取年月日時分秒
fn civil_fields<Z: CivilZone + ?Sized>(instant: &Instant, mode: ZoneMode, zone: &Z) -> NaiveDateTime {
    match mode {
        ZoneMode::Utc => instant.as_utc().naive_utc(),
        ZoneMode::Local => to_local_civil(zone, &instant.as_utc()),
    }
}

fn format_date(civil: &NaiveDateTime) -> String {
    format!(
        "{}-{}-{}",
        zero_pad(i64::from(civil.year()), 4),
        zero_pad(i64::from(civil.month()), 2),
        zero_pad(i64::from(civil.day()), 2),
    )
}

fn format_timestamp(civil: &NaiveDateTime) -> String {
    // 閏秒的納秒欄位可超過一秒，毫秒欄位需限制在三位數內
    let millis = (civil.nanosecond() / 1_000_000).min(999);
    format!(
        "{}T{}:{}:{}.{}",
        format_date(civil),
        zero_pad(i64::from(civil.hour()), 2),
        zero_pad(i64::from(civil.minute()), 2),
        zero_pad(i64::from(civil.second()), 2),
        zero_pad(i64::from(millis), 3),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Utc};
    use rstest::rstest;

    fn sample() -> Instant {
        Instant::from_millis(1_621_953_670_249).unwrap()
    }

    fn plus_eight() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    #[rstest]
    #[case(EncodeFormat::TimestampTz, "2021-05-25T14:41:10.249Z")]
    #[case(EncodeFormat::Timestamp(ZoneMode::Utc), "2021-05-25T14:41:10.249")]
    #[case(EncodeFormat::Timestamp(ZoneMode::Local), "2021-05-25T22:41:10.249")]
    #[case(EncodeFormat::Date(ZoneMode::Utc), "2021-05-25")]
    #[case(EncodeFormat::Date(ZoneMode::Local), "2021-05-25")]
    fn test_encode_formats(#[case] format: EncodeFormat, #[case] expected: &str) {
        assert_eq!(encode_instant(&sample(), format, &plus_eight()), expected);
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        let late = Instant::from(Utc.with_ymd_and_hms(2021, 12, 31, 20, 0, 0).unwrap());
        assert_eq!(encode_instant(&late, EncodeFormat::Date(ZoneMode::Utc), &plus_eight()), "2021-12-31");
        assert_eq!(encode_instant(&late, EncodeFormat::Date(ZoneMode::Local), &plus_eight()), "2022-01-01");
    }

    #[test]
    fn test_timestamptz_ignores_local_zone() {
        let far_west = FixedOffset::west_opt(11 * 3600).unwrap();
        assert_eq!(
            encode_instant(&sample(), EncodeFormat::TimestampTz, &far_west),
            "2021-05-25T14:41:10.249Z"
        );
    }

    #[test]
    fn test_padding_of_small_fields() {
        let early = Instant::from(Utc.with_ymd_and_hms(987, 1, 2, 3, 4, 5).unwrap());
        assert_eq!(encode_timestamptz(&early), "0987-01-02T03:04:05.000Z");
        let date = encode_instant(&early, EncodeFormat::Date(ZoneMode::Utc), &Utc);
        assert_eq!(date.len(), 10);
        assert_eq!(date, "0987-01-02");
    }

    #[test]
    fn test_epoch_and_before() {
        let epoch = Instant::from_millis(0).unwrap();
        assert_eq!(encode_timestamptz(&epoch), "1970-01-01T00:00:00.000Z");
        let before = Instant::from_millis(-1).unwrap();
        assert_eq!(encode_timestamptz(&before), "1969-12-31T23:59:59.999Z");
    }
}
