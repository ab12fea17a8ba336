/// 行動版選單啟用時被點擊的元素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTrigger {
    MenuButton,
    CloseButton,
    Overlay,
    /// 選單內的任一導覽連結
    MenuLink,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MobileMenu {
    pub menu_active: bool,
    pub overlay_active: bool,
    /// 選單開啟時禁止頁面捲動
    pub body_scroll_locked: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.menu_active
    }

    pub fn open(&mut self) {
        self.menu_active = true;
        self.overlay_active = true;
        self.body_scroll_locked = true;
    }

    pub fn close(&mut self) {
        self.menu_active = false;
        self.overlay_active = false;
        self.body_scroll_locked = false;
    }

    pub fn handle(&mut self, trigger: MenuTrigger) {
        match trigger {
            MenuTrigger::MenuButton => self.open(),
            MenuTrigger::CloseButton | MenuTrigger::Overlay | MenuTrigger::MenuLink => self.close(),
        }
        tracing::trace!("Mobile menu {:?} -> open={}", trigger, self.menu_active);
    }
}
