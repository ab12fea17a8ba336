//! 競選網站互動元件的無介面模型
//!
//! 每個型別只處理一種頁面事件（點擊、捲動、可見度或經過時間），並提供處理後的狀態，
//! 不需要瀏覽器就能驅動

pub mod header;
pub mod menu;
pub mod modal;
pub mod reveal;
pub mod scroll;

pub use header::ScrollHeader;
pub use menu::{MenuTrigger, MobileMenu};
pub use modal::{ModalClick, NoticeModal};
pub use reveal::RevealObserver;
pub use scroll::{scroll_target, ScrollAction};
