use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollAction {
    /// 交給瀏覽器預設的導覽行為
    Default,
    /// 平滑捲動到這個垂直位置
    Smooth { top: f64 },
}

/// 頁內連結的捲動目標，扣掉固定頁首的高度；`anchors` 是元素 id 對應到頂端的距離
pub fn scroll_target(href: &str, anchors: &HashMap<String, f64>, header_height: f64) -> ScrollAction {
    let id = match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => id,
        _ => return ScrollAction::Default,
    };

    match anchors.get(id) {
        Some(offset_top) => ScrollAction::Smooth {
            top: (offset_top - header_height).max(0.0),
        },
        None => ScrollAction::Default,
    }
}
