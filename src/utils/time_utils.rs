// time_utils.rs
//
// 提供時間轉換相關的工具函數，用於在資料庫字串層與記憶體時刻之間轉換。
// 主要功能：
// 1. 毫秒時間戳與 DateTime<Utc> 的互相轉換（截斷至毫秒）
// 2. 將民用時間（無時區）依指定時區換算為絕對時刻，處理夏令時間缺口與重疊
// 3. 數字欄位補零

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Timelike, Utc};
use tracing::warn;

use crate::codec::zone::CivilZone;

const NANOS_PER_MILLI: u32 = 1_000_000;

//
// 基礎時間轉換函數
//

/// 將 DateTime<Utc> 轉換為毫秒時間戳
pub fn datetime_to_timestamp_ms(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

/// 將毫秒時間戳轉換為 DateTime<Utc>，超出 chrono 可表示範圍時返回 None
pub fn timestamp_ms_to_datetime(ts: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ts).single()
}

/// 將時間截斷（非四捨五入）至毫秒精度
pub fn truncate_to_millis(dt: DateTime<Utc>) -> DateTime<Utc> {
    let nanos = dt.nanosecond() / NANOS_PER_MILLI * NANOS_PER_MILLI;
    dt.with_nanosecond(nanos).unwrap_or(dt)
}

//
// 民用時間 <-> 絕對時刻
//

/// 依 `zone` 將無時區的民用時間換算為 UTC 時刻
///
/// - 重疊（夏令時間結束）時取較早的時刻
/// - 缺口（夏令時間開始）時沿用轉換前的偏移量，結果會往後推移缺口長度
///
/// 超出可表示範圍時返回 None。
pub fn resolve_local<Z: CivilZone + ?Sized>(zone: &Z, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    let offset = match zone.offset_at_local(&naive) {
        LocalResult::Single(offset) => offset,
        // 偏移量較大者對應較早的 UTC 時刻
        LocalResult::Ambiguous(first, second) => {
            if first.local_minus_utc() >= second.local_minus_utc() {
                first
            } else {
                second
            }
        }
        LocalResult::None => {
            let before = naive
                .checked_sub_signed(TimeDelta::days(1))
                .and_then(|earlier| zone.offset_at_local(&earlier).earliest())
                .unwrap_or_else(|| zone.offset_at_utc(&naive));
            warn!("民用時間 {} 落在夏令時間缺口內，沿用偏移量 {}", naive, before);
            before
        }
    };
    apply_offset(naive, offset)
}

/// 以 `zone` 的民用曆讀取 UTC 時刻
pub fn to_local_civil<Z: CivilZone + ?Sized>(zone: &Z, utc: &DateTime<Utc>) -> NaiveDateTime {
    let offset = zone.offset_at_utc(&utc.naive_utc());
    utc.with_timezone(&offset).naive_local()
}

fn apply_offset(naive: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    naive
        .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
        .map(|utc| Utc.from_utc_datetime(&utc))
}

//
// 格式化
//

/// 將數值補零至指定寬度，負數的符號不計入寬度
pub fn zero_pad(value: i64, width: usize) -> String {
    if value < 0 {
        format!("-{:0width$}", value.unsigned_abs(), width = width)
    } else {
        format!("{:0width$}", value, width = width)
    }
}
