pub const SCROLLED_THRESHOLD_PX: f64 = 100.0;
pub const SCROLLED_CLASS: &str = "scrolled";

/// 捲動超過門檻後加上 `scrolled` class 的固定頁首
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollHeader {
    scrolled: bool,
    last_offset: f64,
}

impl ScrollHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }

    /// class 有變動時回傳 true
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        let scrolled = offset > SCROLLED_THRESHOLD_PX;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        self.last_offset = offset;
        changed
    }
}
