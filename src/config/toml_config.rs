use crate::core::engine::{DEFAULT_COMPLETION_MESSAGE, DEFAULT_TICK_INTERVAL};
use crate::domain::model::TargetInstant;
use crate::domain::ports::CountdownSettings;
use crate::utils::error::{CountdownError, Result};
use crate::utils::validation::{self, Validate};
use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_PRIMARY_DATE: &str = "2026-05-19T00:00:00";
pub const DEFAULT_GENERAL_DATE: &str = "2026-11-03T00:00:00";

const MIN_TICK_INTERVAL_MS: u64 = 10;
const MAX_TICK_INTERVAL_MS: u64 = 60_000;

/// 沒有時區位移的目標時間要以哪個時區解讀
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneMode {
    #[default]
    Local,
    Utc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default)]
    pub countdown: CountdownSection,
    #[serde(default = "default_targets")]
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountdownSection {
    pub tick_interval_ms: Option<u64>,
    pub completion_message: Option<String>,
    pub retire_completed: Option<bool>,
    pub timezone: Option<ZoneMode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub label: String,
    pub at: String,
}

fn default_targets() -> Vec<TargetConfig> {
    vec![
        TargetConfig {
            label: "primary".to_string(),
            at: DEFAULT_PRIMARY_DATE.to_string(),
        },
        TargetConfig {
            label: "general".to_string(),
            at: DEFAULT_GENERAL_DATE.to_string(),
        },
    ]
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            countdown: CountdownSection::default(),
            targets: default_targets(),
        }
    }
}

/// 解析目標時間：RFC 3339（含時區）、`YYYY-MM-DDTHH:MM:SS` 或 `YYYY-MM-DD`
pub fn parse_instant(raw: &str, zone: ZoneMode) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| CountdownError::InvalidInstant {
            value: raw.to_string(),
            reason: "unrecognized date format".to_string(),
        })?;

    match zone {
        ZoneMode::Utc => Ok(Utc.from_utc_datetime(&naive)),
        ZoneMode::Local => resolve_local_time(naive, |candidate| {
            Local
                .from_local_datetime(candidate)
                .map(|local| local.with_timezone(&Utc))
        })
        .ok_or_else(|| CountdownError::InvalidInstant {
            value: raw.to_string(),
            reason: "time does not exist in the local time zone".to_string(),
        }),
    }
}

/// 將本地時間換成 UTC：重複的時間取較早者，夏令時間跳過的時間往後推一小時
fn resolve_local_time<F>(naive: NaiveDateTime, lookup: F) -> Option<DateTime<Utc>>
where
    F: Fn(&NaiveDateTime) -> LocalResult<DateTime<Utc>>,
{
    lookup(&naive)
        .earliest()
        .or_else(|| lookup(&(naive + chrono::Duration::hours(1))).earliest())
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

impl CountdownConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CountdownError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CountdownError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PRIMARY_DATE})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_range(
            "countdown.tick_interval_ms",
            self.tick_interval_ms(),
            MIN_TICK_INTERVAL_MS,
            MAX_TICK_INTERVAL_MS,
        )?;

        if let Some(message) = &self.countdown.completion_message {
            validation::validate_non_empty_string("countdown.completion_message", message)?;
        }

        for target in &self.targets {
            validation::validate_label("targets.label", &target.label)?;
            parse_instant(&target.at, self.zone())?;
        }

        validation::validate_unique_labels(
            "targets.label",
            self.targets.iter().map(|t| t.label.as_str()),
        )?;

        Ok(())
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.countdown
            .tick_interval_ms
            .unwrap_or(DEFAULT_TICK_INTERVAL.as_millis() as u64)
    }

    pub fn zone(&self) -> ZoneMode {
        self.countdown.timezone.unwrap_or_default()
    }
}

impl CountdownSettings for CountdownConfig {
    fn targets(&self) -> Result<Vec<TargetInstant>> {
        let zone = self.zone();
        self.targets
            .iter()
            .map(|target| -> Result<TargetInstant> {
                let at = parse_instant(&target.at, zone)?;
                Ok(TargetInstant::new(target.label.clone(), at))
            })
            .collect()
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms())
    }

    fn completion_message(&self) -> &str {
        self.countdown
            .completion_message
            .as_deref()
            .unwrap_or(DEFAULT_COMPLETION_MESSAGE)
    }

    fn retire_completed(&self) -> bool {
        self.countdown.retire_completed.unwrap_or(false)
    }
}

impl Validate for CountdownConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
