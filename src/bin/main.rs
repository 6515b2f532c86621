use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use temporal_codec::codec::{DecodeMode, EncodeFormat, Instant, LocalZone, TemporalCodec, ZoneMode};
use temporal_codec::config::{self, LogConfig};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// 資料庫日期時間字串與毫秒時刻的轉換工具
#[derive(Parser, Debug)]
#[command(name = "temporal_codec", version, about)]
struct Cli {
    /// 以 JSON 輸出
    #[arg(long, global = true)]
    json: bool,

    /// 以固定偏移量（±HH:MM）取代配置中的本地時區
    #[arg(long, global = true, allow_hyphen_values = true)]
    offset: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 字串 -> 時刻；未指定 --mode 時字串必須帶時區
    Decode {
        value: String,
        #[arg(long)]
        mode: Option<ZoneMode>,
    },
    /// 紀元毫秒 -> 字串
    Encode {
        #[arg(allow_negative_numbers = true)]
        millis: i64,
        #[arg(long)]
        format: EncodeFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化配置
    let app_config = config::init_config()?;

    // 初始化日誌系統
    init_logging(&app_config.log)?;

    let zone = match &cli.offset {
        Some(offset) => LocalZone::from_offset(offset)?,
        None => app_config.codec.local_zone()?,
    };
    debug!("本地時區: {:?}", zone);
    let codec = TemporalCodec::with_zone(zone);

    let output = match cli.command {
        Command::Decode { value, mode } => run_decode(&codec, &value, mode.into(), cli.json)?,
        Command::Encode { millis, format } => run_encode(&codec, millis, format, cli.json)?,
    };
    println!("{}", output);
    Ok(())
}

fn run_decode(codec: &TemporalCodec<LocalZone>, value: &str, mode: DecodeMode, as_json: bool) -> Result<String> {
    // 字面值 null 對應資料庫的 NULL
    let input = (value != "null").then_some(value);
    let decoded = codec.decode(input, mode)?;
    info!("解碼 {:?}（{}）", value, mode);

    Ok(match (decoded, as_json) {
        (Some(instant), true) => json!({
            "input": value,
            "mode": mode.as_str(),
            "millis": instant.as_millis(),
            "timestamptz": codec.encode_instant(&instant, EncodeFormat::TimestampTz),
        })
        .to_string(),
        (None, true) => json!({ "input": null, "mode": mode.as_str(), "millis": null }).to_string(),
        (Some(instant), false) => format!("{}\t{}", instant.as_millis(), instant),
        (None, false) => "null".to_string(),
    })
}

fn run_encode(codec: &TemporalCodec<LocalZone>, millis: i64, format: EncodeFormat, as_json: bool) -> Result<String> {
    let instant = Instant::from_millis(millis)
        .ok_or_else(|| anyhow!("毫秒時間戳超出範圍: {}", millis))?;
    let encoded = codec.encode_instant(&instant, format);
    info!("編碼 {} 為 {}", millis, format);

    Ok(if as_json {
        json!({ "millis": millis, "format": format.as_str(), "value": encoded }).to_string()
    } else {
        encoded
    })
}

// 初始化日誌系統
fn init_logging(log_config: &LogConfig) -> Result<()> {
    let level = match log_config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO, // 默認為INFO
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    // 日誌輸出至 stderr，stdout 保留給轉換結果
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let result = if log_config.format.eq_ignore_ascii_case("json") {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;

    debug!("日誌系統初始化完成");
    Ok(())
}
