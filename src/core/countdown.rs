use crate::domain::model::{CountdownLabel, CountdownState, Remaining, TargetInstant};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pending,
    Complete,
    /// 已完成並移出 tick 集合
    Retired,
}

/// 單一倒數；完成後即使時鐘倒退也不會回到倒數中
#[derive(Debug, Clone)]
pub struct Countdown {
    target: TargetInstant,
    phase: Phase,
}

impl Countdown {
    pub fn new(target: TargetInstant) -> Self {
        Self {
            target,
            phase: Phase::Pending,
        }
    }

    pub fn label(&self) -> &CountdownLabel {
        &self.target.label
    }

    pub fn target(&self) -> &TargetInstant {
        &self.target
    }

    pub fn is_complete(&self) -> bool {
        self.phase != Phase::Pending
    }

    pub fn is_retired(&self) -> bool {
        self.phase == Phase::Retired
    }

    pub(crate) fn retire(&mut self) {
        if self.phase == Phase::Complete {
            self.phase = Phase::Retired;
        }
    }

    pub fn evaluate(&mut self, now: DateTime<Utc>) -> CountdownState {
        if self.phase != Phase::Pending {
            return CountdownState::Complete;
        }

        let diff_ms = (self.target.at - now).num_milliseconds();
        if diff_ms > 0 {
            CountdownState::Pending(Remaining::from_millis(diff_ms))
        } else {
            self.phase = Phase::Complete;
            CountdownState::Complete
        }
    }
}

/// 建立 tick 集合；重複的標籤以後者的目標為準，但保留原本的順序
pub fn register<I>(targets: I) -> Vec<Countdown>
where
    I: IntoIterator<Item = TargetInstant>,
{
    let mut countdowns: Vec<Countdown> = Vec::new();
    for target in targets {
        match countdowns.iter_mut().find(|c| c.label() == &target.label) {
            Some(existing) => *existing = Countdown::new(target),
            None => countdowns.push(Countdown::new(target)),
        }
    }
    countdowns
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_pending_then_complete() {
        let mut countdown = Countdown::new(TargetInstant::new("primary", at(2026, 5, 19, 0)));

        let state = countdown.evaluate(at(2026, 5, 18, 23));
        assert_eq!(
            state,
            CountdownState::Pending(Remaining {
                days: 0,
                hours: 1,
                minutes: 0,
                seconds: 0
            })
        );

        assert_eq!(countdown.evaluate(at(2026, 5, 19, 0)), CountdownState::Complete);
        assert!(countdown.is_complete());
    }

    #[test]
    fn test_complete_is_absorbing_even_if_clock_goes_back() {
        let mut countdown = Countdown::new(TargetInstant::new("general", at(2026, 11, 3, 0)));
        assert!(countdown.evaluate(at(2026, 11, 4, 0)).is_complete());
        assert!(countdown.evaluate(at(2026, 1, 1, 0)).is_complete());
    }

    #[test]
    fn test_one_millisecond_before_target_is_pending_with_zero_fields() {
        let target = at(2026, 5, 19, 0);
        let mut countdown = Countdown::new(TargetInstant::new("primary", target));
        let state = countdown.evaluate(target - Duration::milliseconds(1));
        assert_eq!(
            state,
            CountdownState::Pending(Remaining {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 0
            })
        );
        assert!(!countdown.is_complete());
    }

    #[test]
    fn test_retire_only_after_complete() {
        let mut countdown = Countdown::new(TargetInstant::new("primary", at(2026, 5, 19, 0)));
        countdown.retire();
        assert!(!countdown.is_retired());

        countdown.evaluate(at(2026, 6, 1, 0));
        countdown.retire();
        assert!(countdown.is_retired());
    }

    #[test]
    fn test_register_replaces_duplicate_in_place() {
        let countdowns = register(vec![
            TargetInstant::new("primary", at(2026, 5, 19, 0)),
            TargetInstant::new("general", at(2026, 11, 3, 0)),
            TargetInstant::new("primary", at(2026, 5, 20, 0)),
        ]);

        assert_eq!(countdowns.len(), 2);
        assert_eq!(countdowns[0].label().as_str(), "primary");
        assert_eq!(countdowns[0].target().at, at(2026, 5, 20, 0));
        assert_eq!(countdowns[1].label().as_str(), "general");
    }
}
