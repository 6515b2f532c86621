// utils.rs - 公共工具模組
//
// 提供編解碼核心共用的時間轉換與序列化輔助函數。

pub mod serde_helpers;
pub mod time_utils;

// 重新導出時間工具函數，使其可以通過 utils::function_name 直接訪問
pub use time_utils::{
    // 基礎時間轉換
    datetime_to_timestamp_ms,
    timestamp_ms_to_datetime,
    truncate_to_millis,

    // 民用時間 <-> 絕對時刻
    resolve_local,
    to_local_civil,

    // 格式化
    zero_pad,
};
