use crate::domain::ports::{ScheduleHandle, Scheduler, TickTask};
use crate::utils::error::{CountdownError, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};

/// 以 tokio interval 執行任務；每次執行完才等待下一個週期，不會重疊
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler {
    runtime: Option<Handle>,
}

impl TokioScheduler {
    /// 使用呼叫 `schedule` 時所在的 runtime
    pub fn new() -> Self {
        Self { runtime: None }
    }

    pub fn with_handle(runtime: Handle) -> Self {
        Self {
            runtime: Some(runtime),
        }
    }

    fn runtime(&self) -> Result<Handle> {
        match &self.runtime {
            Some(handle) => Ok(handle.clone()),
            None => Handle::try_current().map_err(|e| CountdownError::SchedulerUnavailable {
                reason: e.to_string(),
            }),
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, period: Duration, mut task: TickTask) -> Result<ScheduleHandle> {
        if period.is_zero() {
            return Err(CountdownError::SchedulerUnavailable {
                reason: "tick period must be greater than zero".to_string(),
            });
        }

        let runtime = self.runtime()?;
        let join = runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                task();
            }
        });

        tracing::debug!("Scheduled repeating tick every {:?}", period);
        Ok(ScheduleHandle::new(move || join.abort()))
    }
}

#[derive(Default)]
struct ManualState {
    task: Option<TickTask>,
    period: Option<Duration>,
    generation: u64,
    schedules: usize,
    fired: usize,
}

/// 只在呼叫 `fire` 時執行任務的排程器
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 執行一次已排程的任務，沒有排程時回傳 false
    pub fn fire(&self) -> bool {
        let mut state = self.lock();
        match state.task.as_mut() {
            Some(task) => {
                task();
                state.fired += 1;
                true
            }
            None => false,
        }
    }

    pub fn fired(&self) -> usize {
        self.lock().fired
    }

    pub fn schedules(&self) -> usize {
        self.lock().schedules
    }

    pub fn period(&self) -> Option<Duration> {
        self.lock().period
    }

    pub fn is_scheduled(&self) -> bool {
        self.lock().task.is_some()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, period: Duration, task: TickTask) -> Result<ScheduleHandle> {
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.schedules += 1;
            state.task = Some(task);
            state.period = Some(period);
            state.generation
        };

        let shared = Arc::clone(&self.state);
        Ok(ScheduleHandle::new(move || {
            let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
            // 只取消自己排程的任務
            if state.generation == generation {
                state.task = None;
            }
        }))
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("ManualScheduler")
            .field("scheduled", &state.task.is_some())
            .field("period", &state.period)
            .field("fired", &state.fired)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_task(counter: &Arc<AtomicUsize>) -> TickTask {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_manual_scheduler_fires_until_cancelled() {
        let runs = Arc::new(AtomicUsize::new(0));
        let scheduler = ManualScheduler::new();
        let mut handle = scheduler
            .schedule(Duration::from_secs(1), counting_task(&runs))
            .unwrap();

        assert!(scheduler.fire());
        assert!(scheduler.fire());
        handle.cancel();
        assert!(!scheduler.fire());

        assert_eq!(runs.load(Ordering::SeqCst), 2);
        assert_eq!(scheduler.fired(), 2);
    }

    #[test]
    fn test_stale_handle_does_not_cancel_newer_schedule() {
        let runs = Arc::new(AtomicUsize::new(0));
        let scheduler = ManualScheduler::new();
        let mut old = scheduler
            .schedule(Duration::from_secs(1), counting_task(&runs))
            .unwrap();
        let _new = scheduler
            .schedule(Duration::from_secs(2), counting_task(&runs))
            .unwrap();

        old.cancel();
        assert!(scheduler.is_scheduled());
        assert_eq!(scheduler.period(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_tokio_scheduler_without_runtime_is_unavailable() {
        let runs = Arc::new(AtomicUsize::new(0));
        let result = TokioScheduler::new().schedule(Duration::from_secs(1), counting_task(&runs));
        assert!(matches!(result, Err(CountdownError::SchedulerUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_tokio_scheduler_rejects_zero_period() {
        let runs = Arc::new(AtomicUsize::new(0));
        let result = TokioScheduler::new().schedule(Duration::ZERO, counting_task(&runs));
        assert!(matches!(result, Err(CountdownError::SchedulerUnavailable { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_waits_one_period_before_first_run() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut handle = TokioScheduler::new()
            .schedule(Duration::from_secs(1), counting_task(&runs))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2_000)).await;
        assert!(runs.load(Ordering::SeqCst) >= 2);

        handle.cancel();
        tokio::task::yield_now().await;
        let after_cancel = runs.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(runs.load(Ordering::SeqCst), after_cancel);
    }
}
