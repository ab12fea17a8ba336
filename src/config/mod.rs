pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::cli::OutputFormat;
#[cfg(feature = "cli")]
use crate::config::toml_config::{parse_instant, CountdownConfig, ZoneMode};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use chrono::{DateTime, Utc};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "campaign-countdown")]
#[command(about = "Live election countdowns for the campaign site")]
pub struct CliConfig {
    /// TOML 設定檔路徑（省略時使用內建的選舉日期）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 只輸出一次後結束
    #[arg(long)]
    pub once: bool,

    /// 將時鐘固定在這個時間，不使用系統時間
    #[arg(long)]
    pub at: Option<String>,

    /// 排程執行這麼多次 tick 後停止
    #[arg(long)]
    pub ticks: Option<u32>,

    /// 以 JSON 行輸出倒數
    #[arg(long)]
    pub json: bool,

    /// 以 JSON 格式輸出日誌
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn load_settings(&self) -> Result<CountdownConfig> {
        match &self.config {
            Some(path) => CountdownConfig::from_file(path),
            None => Ok(CountdownConfig::default()),
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    pub fn pinned_now(&self, zone: ZoneMode) -> Result<Option<DateTime<Utc>>> {
        self.at.as_deref().map(|raw| parse_instant(raw, zone)).transpose()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(ticks) = self.ticks {
            validation::validate_range("--ticks", ticks, 1, 86_400)?;
        }
        if let Some(at) = &self.at {
            validation::validate_non_empty_string("--at", at)?;
        }
        Ok(())
    }
}
