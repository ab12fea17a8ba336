use crate::domain::model::{CountdownLabel, TimeUnit};
use crate::domain::ports::{Render, RenderSink};
use std::collections::BTreeMap;

/// 倒數區塊目前顯示的內容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    /// 以 `primary-days` 這類鍵索引的數字欄位
    Fields(BTreeMap<String, String>),
    /// 欄位已被完成訊息取代
    Message(String),
}

/// 記憶體中的倒數頁面；頁面上不存在的鍵會被略過，如同找不到元素
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSink {
    regions: BTreeMap<String, Region>,
    ticks: usize,
}

impl PageSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每個標籤一個完整區塊（四個欄位，初始為 `00`）
    pub fn with_countdowns<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut page = Self::new();
        for label in labels {
            page.add_countdown(label.as_ref());
        }
        page
    }

    pub fn add_countdown(&mut self, label: &str) {
        let label = CountdownLabel::from(label);
        let fields = TimeUnit::ALL
            .iter()
            .map(|unit| (label.field_key(*unit), "00".to_string()))
            .collect();
        self.regions
            .insert(label.as_str().to_string(), Region::Fields(fields));
    }

    /// 從所屬區塊移除單一欄位
    pub fn remove_field(&mut self, key: &str) -> bool {
        self.regions.values_mut().any(|region| match region {
            Region::Fields(fields) => fields.remove(key).is_some(),
            Region::Message(_) => false,
        })
    }

    pub fn remove_countdown(&mut self, label: &str) -> bool {
        self.regions.remove(label).is_some()
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.regions.values().find_map(|region| match region {
            Region::Fields(fields) => fields.get(key).map(String::as_str),
            Region::Message(_) => None,
        })
    }

    pub fn message(&self, label: &str) -> Option<&str> {
        match self.regions.get(label) {
            Some(Region::Message(message)) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn region(&self, label: &str) -> Option<&Region> {
        self.regions.get(label)
    }

    /// 已輸出到此頁面的 tick 數
    pub fn ticks(&self) -> usize {
        self.ticks
    }
}

impl RenderSink for PageSink {
    fn write_field(&mut self, key: &str, text: &str) -> Render {
        for region in self.regions.values_mut() {
            if let Region::Fields(fields) = region {
                if let Some(slot) = fields.get_mut(key) {
                    *slot = text.to_string();
                    return Render::Written;
                }
            }
        }
        Render::Missing
    }

    fn write_complete(&mut self, label: &str, message: &str) -> Render {
        match self.regions.get_mut(label) {
            Some(region) => {
                *region = Region::Message(message.to_string());
                Render::Written
            }
            None => Render::Missing,
        }
    }

    fn end_tick(&mut self) {
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_field_only_lands_on_existing_keys() {
        let mut page = PageSink::with_countdowns(["primary"]);
        assert_eq!(page.write_field("primary-days", "12"), Render::Written);
        assert_eq!(page.write_field("general-days", "12"), Render::Missing);
        assert_eq!(page.field("primary-days"), Some("12"));
    }

    #[test]
    fn test_completion_replaces_fields() {
        let mut page = PageSink::with_countdowns(["primary"]);
        assert_eq!(page.write_complete("primary", "Election Complete"), Render::Written);

        assert_eq!(page.message("primary"), Some("Election Complete"));
        assert_eq!(page.field("primary-days"), None);
        assert_eq!(page.write_field("primary-days", "01"), Render::Missing);
    }

    #[test]
    fn test_remove_field_leaves_siblings() {
        let mut page = PageSink::with_countdowns(["primary"]);
        assert!(page.remove_field("primary-hours"));
        assert!(!page.remove_field("primary-hours"));
        assert_eq!(page.field("primary-minutes"), Some("00"));
    }

    #[test]
    fn test_render_remaining_counts_landed_writes() {
        let mut page = PageSink::with_countdowns(["primary"]);
        page.remove_field("primary-seconds");

        let remaining = crate::domain::model::Remaining {
            days: 120,
            hours: 5,
            minutes: 30,
            seconds: 9,
        };
        let landed = page.render_remaining(&CountdownLabel::from("primary"), &remaining);

        assert_eq!(landed, 3);
        assert_eq!(page.field("primary-days"), Some("120"));
        assert_eq!(page.field("primary-hours"), Some("05"));
        assert_eq!(page.field("primary-minutes"), Some("30"));
    }
}
