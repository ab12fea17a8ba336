use std::time::Duration;

pub const SHOW_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    OkButton,
    /// 半透明背景本身
    Overlay,
    /// 對話框內的任何元素
    Content,
}

/// 「網站建置中」公告，載入後稍等片刻顯示一次
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeModal {
    active: bool,
    shown: bool,
}

impl NoticeModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// 傳入載入後經過的時間，第一次超過延遲時開啟
    pub fn on_elapsed(&mut self, since_load: Duration) -> bool {
        if self.shown || since_load < SHOW_DELAY {
            return false;
        }
        self.shown = true;
        self.active = true;
        true
    }

    pub fn on_click(&mut self, click: ModalClick) {
        match click {
            ModalClick::OkButton | ModalClick::Overlay => self.active = false,
            ModalClick::Content => {}
        }
    }
}
