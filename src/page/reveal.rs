use std::collections::BTreeSet;

pub const REVEAL_CLASS: &str = "animate-fadeInUp";
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// 底部 root margin：元素要高出視窗底部 50px 才算可見
pub const ROOT_MARGIN_BOTTOM_PX: f64 = -50.0;

/// 扣掉底部邊界後，元素落在視窗內的比例
pub fn intersection_ratio(element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
    if element_height <= 0.0 {
        return 0.0;
    }
    let visible_bottom = viewport_height + ROOT_MARGIN_BOTTOM_PX;
    let top = element_top.max(0.0);
    let bottom = (element_top + element_height).min(visible_bottom);
    ((bottom - top) / element_height).clamp(0.0, 1.0)
}

/// `.animate-on-scroll` 元素第一次捲入視窗時加上動畫，之後不再觀察
#[derive(Debug, Clone, Default)]
pub struct RevealObserver {
    observed: BTreeSet<String>,
    revealed: BTreeSet<String>,
}

impl RevealObserver {
    pub fn new<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            observed: elements.into_iter().map(Into::into).collect(),
            revealed: BTreeSet::new(),
        }
    }

    /// 無法觀察可見度時，所有元素一開始就顯示
    pub fn without_observer<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            observed: BTreeSet::new(),
            revealed: elements.into_iter().map(Into::into).collect(),
        }
    }

    /// 輸入 `(元素 id, 交集比例)`，回傳這一批新顯示的 id
    pub fn on_intersections<'a, I>(&mut self, entries: I) -> Vec<String>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut newly_revealed = Vec::new();
        for (id, ratio) in entries {
            if ratio >= REVEAL_THRESHOLD && self.observed.remove(id) {
                self.revealed.insert(id.to_string());
                newly_revealed.push(id.to_string());
            }
        }
        newly_revealed
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    pub fn is_observing(&self, id: &str) -> bool {
        self.observed.contains(id)
    }

    pub fn pending(&self) -> usize {
        self.observed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_ratio_respects_bottom_margin() {
        // 視窗高 800，可見範圍到 750
        assert_eq!(intersection_ratio(700.0, 100.0, 800.0), 0.5);
        assert_eq!(intersection_ratio(760.0, 100.0, 800.0), 0.0);
        assert_eq!(intersection_ratio(100.0, 200.0, 800.0), 1.0);
        assert_eq!(intersection_ratio(-150.0, 200.0, 800.0), 0.25);
        assert_eq!(intersection_ratio(0.0, 0.0, 800.0), 0.0);
    }

    #[test]
    fn test_reveal_once_then_unobserve() {
        let mut observer = RevealObserver::new(["hero", "issues"]);

        let first = observer.on_intersections([("hero", 0.05), ("issues", 0.4)]);
        assert_eq!(first, vec!["issues".to_string()]);
        assert!(observer.is_revealed("issues"));
        assert!(!observer.is_observing("issues"));
        assert!(observer.is_observing("hero"));

        let second = observer.on_intersections([("issues", 1.0), ("hero", 0.1)]);
        assert_eq!(second, vec!["hero".to_string()]);
        assert_eq!(observer.pending(), 0);
    }

    #[test]
    fn test_fallback_reveals_everything() {
        let observer = RevealObserver::without_observer(["hero", "issues"]);
        assert!(observer.is_revealed("hero"));
        assert!(observer.is_revealed("issues"));
        assert_eq!(observer.pending(), 0);
    }
}
