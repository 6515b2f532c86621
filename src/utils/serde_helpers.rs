// utils/serde_helpers.rs - 序列化與反序列化輔助函數
use serde::{Deserialize, Deserializer};

/// 將空字符串反序列化為None
///
/// 在配置文件中，經常需要將空字符串解析為None以表示不存在的值。
/// 這個函數可用於serde的自定義反序列化器。
///
/// # 使用範例
///
/// ```
/// use serde::Deserialize;
/// use temporal_codec::utils::serde_helpers::empty_string_as_none;
///
/// #[derive(Deserialize)]
/// struct Config {
///     #[serde(default, deserialize_with = "empty_string_as_none")]
///     optional_value: Option<String>,
/// }
/// ```
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// 以 timestamptz 字串序列化 [`Instant`](crate::codec::Instant)
///
/// 資料列結構保存時刻，線路上則是 `YYYY-MM-DDTHH:MM:SS.fffZ` 字串：
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use temporal_codec::codec::Instant;
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "temporal_codec::utils::serde_helpers::timestamptz")]
///     created_at: Instant,
/// }
/// ```
pub mod timestamptz {
    use chrono::Utc;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::codec::{encoder, Instant, TemporalCodec};

    pub fn serialize<S: Serializer>(value: &Instant, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encoder::encode_timestamptz(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Instant, D::Error> {
        let value = String::deserialize(deserializer)?;
        // 自描述字串不會用到本地時區
        TemporalCodec::with_zone(Utc)
            .decode_self_describing(&value)
            .map_err(de::Error::custom)
    }
}

/// [`timestamptz`] 的可空版本，null 對應 None
pub mod option_timestamptz {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::codec::{encoder, Instant};

    pub fn serialize<S: Serializer>(value: &Option<Instant>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(instant) => serializer.serialize_str(&encoder::encode_timestamptz(instant)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Instant>, D::Error> {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "super::timestamptz")] Instant);

        Option::<Wrapper>::deserialize(deserializer).map(|wrapped| wrapped.map(|Wrapper(instant)| instant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Instant;
    use serde::Serialize;

    #[derive(Debug, Deserialize)]
    struct Settings {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        value: Option<String>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        #[serde(with = "timestamptz")]
        created_at: Instant,
        #[serde(default, with = "option_timestamptz")]
        deleted_at: Option<Instant>,
    }

    #[test]
    fn test_empty_string_as_none() {
        let empty: Settings = serde_json::from_str(r#"{"value": ""}"#).unwrap();
        assert_eq!(empty.value, None);
        let missing: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.value, None);
        let present: Settings = serde_json::from_str(r#"{"value": "+08:00"}"#).unwrap();
        assert_eq!(present.value.as_deref(), Some("+08:00"));
    }

    #[test]
    fn test_row_round_trip() {
        let row = Row {
            created_at: Instant::from_millis(1_621_953_670_249).unwrap(),
            deleted_at: None,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"created_at":"2021-05-25T14:41:10.249Z","deleted_at":null}"#);
        assert_eq!(serde_json::from_str::<Row>(&json).unwrap(), row);
    }

    #[test]
    fn test_row_accepts_database_precision() {
        let row: Row = serde_json::from_str(
            r#"{"created_at":"2021-05-25 16:41:10.249097+02","deleted_at":"2021-05-26T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(row.created_at.as_millis(), 1_621_953_670_249);
        assert!(row.deleted_at.is_some());
    }

    #[test]
    fn test_row_rejects_zoneless() {
        let result = serde_json::from_str::<Row>(r#"{"created_at":"2021-05-25T14:41:10"}"#);
        assert!(result.is_err());
    }
}
