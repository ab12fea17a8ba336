use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MS_PER_SECOND: i64 = 1000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// 連結目標時間與頁面位置的短識別碼
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountdownLabel(String);

impl CountdownLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 數值欄位的鍵，例如 `primary-days`
    pub fn field_key(&self, unit: TimeUnit) -> String {
        format!("{}-{}", self.0, unit.suffix())
    }
}

impl fmt::Display for CountdownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CountdownLabel {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Days,
        TimeUnit::Hours,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Days => "days",
            TimeUnit::Hours => "hours",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInstant {
    pub label: CountdownLabel,
    pub at: DateTime<Utc>,
}

impl TargetInstant {
    pub fn new(label: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            label: CountdownLabel::new(label),
            at,
        }
    }
}

/// 拆成天、時、分、秒的剩餘時間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// 每個欄位都直接由 `diff_ms` 計算，不依賴前一個欄位
    pub fn from_millis(diff_ms: i64) -> Self {
        Self {
            days: diff_ms / MS_PER_DAY,
            hours: (diff_ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (diff_ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (diff_ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    pub fn get(&self, unit: TimeUnit) -> i64 {
        match unit {
            TimeUnit::Days => self.days,
            TimeUnit::Hours => self.hours,
            TimeUnit::Minutes => self.minutes,
            TimeUnit::Seconds => self.seconds,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CountdownState {
    Pending(Remaining),
    Complete,
}

impl CountdownState {
    pub fn is_complete(&self) -> bool {
        matches!(self, CountdownState::Complete)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickEntry {
    pub label: CountdownLabel,
    pub state: CountdownState,
    /// 成功寫入的次數
    pub writes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub entries: Vec<TickEntry>,
}

impl TickReport {
    pub fn state_of(&self, label: &str) -> Option<CountdownState> {
        self.entries
            .iter()
            .find(|entry| entry.label.as_str() == label)
            .map(|entry| entry.state)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys() {
        let label = CountdownLabel::from("primary");
        assert_eq!(label.field_key(TimeUnit::Days), "primary-days");
        assert_eq!(label.field_key(TimeUnit::Seconds), "primary-seconds");
    }

    #[test]
    fn test_one_hour_decomposition() {
        let remaining = Remaining::from_millis(3_600_000);
        assert_eq!(
            remaining,
            Remaining {
                days: 0,
                hours: 1,
                minutes: 0,
                seconds: 0
            }
        );
    }

    #[test]
    fn test_sub_second_remainder_truncates() {
        let diff = 2 * MS_PER_DAY + 3 * MS_PER_HOUR + 4 * MS_PER_MINUTE + 5 * MS_PER_SECOND + 999;
        let remaining = Remaining::from_millis(diff);
        assert_eq!(remaining.days, 2);
        assert_eq!(remaining.hours, 3);
        assert_eq!(remaining.minutes, 4);
        assert_eq!(remaining.seconds, 5);
        assert_eq!(remaining.total_seconds(), diff / 1000);
    }

    #[test]
    fn test_total_seconds_matches_floor_for_many_diffs() {
        let mut diff = 1;
        while diff < 400 * MS_PER_DAY {
            let remaining = Remaining::from_millis(diff);
            assert!(remaining.hours < 24 && remaining.minutes < 60 && remaining.seconds < 60);
            assert_eq!(remaining.total_seconds(), diff / 1000, "diff = {}", diff);
            diff = diff * 3 + 7;
        }
    }
}
