// 模組定義
pub mod codec;
pub mod config;
pub mod utils;

pub use codec::{decode, encode, DecodeMode, EncodeFormat, Instant, TemporalCodec, ZoneMode};
