use crate::domain::model::{CountdownLabel, Remaining, TargetInstant, TimeUnit};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::time::Duration;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 單次寫入的結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    Written,
    /// 找不到對應的位置，寫入被略過
    Missing,
}

impl Render {
    pub fn landed(self) -> bool {
        matches!(self, Render::Written)
    }
}

pub trait RenderSink: Send {
    /// 將 `text` 寫到 `key` 對應的位置（例如 `primary-hours`）
    fn write_field(&mut self, key: &str, text: &str) -> Render;

    /// 以完成訊息取代 `label` 的所有內容
    fn write_complete(&mut self, label: &str, message: &str) -> Render;

    /// 每個 tick 處理完所有標籤後呼叫一次
    fn end_tick(&mut self) {}

    /// 寫入 `label` 的四個補零欄位，回傳成功寫入的數量
    fn render_remaining(&mut self, label: &CountdownLabel, remaining: &Remaining) -> usize {
        let mut landed = 0;
        for unit in TimeUnit::ALL {
            let text = pad2(remaining.get(unit));
            if self.write_field(&label.field_key(unit), &text).landed() {
                landed += 1;
            }
        }
        landed
    }
}

/// 補零到至少兩位數，超過兩位則保持原樣
pub fn pad2(value: i64) -> String {
    format!("{:02}", value)
}

pub type TickTask = Box<dyn FnMut() + Send + 'static>;

pub trait Scheduler: Send + Sync {
    /// 每隔 `period` 執行 `task`，直到取消回傳的 handle；第一次執行在排程後一個週期
    fn schedule(&self, period: Duration, task: TickTask) -> Result<ScheduleHandle>;
}

/// 排程任務的取消憑證
pub struct ScheduleHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ScheduleHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl std::fmt::Debug for ScheduleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

pub trait CountdownSettings: Send + Sync {
    fn targets(&self) -> Result<Vec<TargetInstant>>;
    fn tick_interval(&self) -> Duration;
    fn completion_message(&self) -> &str;
    fn retire_completed(&self) -> bool;
}
