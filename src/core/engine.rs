use crate::core::countdown::{register, Countdown};
use crate::domain::model::{CountdownLabel, CountdownState, TargetInstant, TickEntry, TickReport};
use crate::domain::ports::{Clock, CountdownSettings, RenderSink, ScheduleHandle, Scheduler};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_COMPLETION_MESSAGE: &str = "Election Complete";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub tick_interval: Duration,
    pub completion_message: String,
    /// 完成訊息只輸出一次，之後不再更新該標籤
    pub retire_completed: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            completion_message: DEFAULT_COMPLETION_MESSAGE.to_string(),
            retire_completed: false,
        }
    }
}

impl EngineOptions {
    pub fn from_settings<T: CountdownSettings + ?Sized>(settings: &T) -> Self {
        Self {
            tick_interval: settings.tick_interval(),
            completion_message: settings.completion_message().to_string(),
            retire_completed: settings.retire_completed(),
        }
    }
}

struct TickState<C, S> {
    clock: C,
    sink: S,
    countdowns: Vec<Countdown>,
    completion_message: String,
    retire_completed: bool,
}

impl<C: Clock, S: RenderSink> TickState<C, S> {
    fn run_tick(&mut self, now: DateTime<Utc>) -> TickReport {
        let mut report = TickReport::default();

        for countdown in self.countdowns.iter_mut() {
            if countdown.is_retired() {
                continue;
            }

            let was_complete = countdown.is_complete();
            let state = countdown.evaluate(now);
            let writes = match &state {
                CountdownState::Pending(remaining) => {
                    self.sink.render_remaining(countdown.label(), remaining)
                }
                CountdownState::Complete => {
                    let render = self
                        .sink
                        .write_complete(countdown.label().as_str(), &self.completion_message);
                    usize::from(render.landed())
                }
            };

            if !was_complete && state.is_complete() {
                tracing::info!("🗳️ Countdown '{}' reached its target", countdown.label());
            }
            if writes == 0 {
                tracing::trace!("No render destination for '{}', skipped", countdown.label());
            }
            if state.is_complete() && self.retire_completed {
                countdown.retire();
                tracing::debug!("Countdown '{}' retired from the tick set", countdown.label());
            }

            report.entries.push(TickEntry {
                label: countdown.label().clone(),
                state,
                writes,
            });
        }

        self.sink.end_tick();
        report
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 排程器執行過的 tick 數，每次執行後喚醒等待者
#[derive(Default)]
struct TickCounter {
    count: AtomicU64,
    notify: Notify,
}

impl TickCounter {
    fn record(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    fn get(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }
}

/// 倒數引擎：每個 tick 重新計算各目標時間的剩餘時間並輸出
pub struct CountdownEngine<C: Clock, S: RenderSink, Sch: Scheduler> {
    state: Arc<Mutex<TickState<C, S>>>,
    scheduled: Arc<TickCounter>,
    scheduler: Sch,
    tick_interval: Duration,
    handle: Option<ScheduleHandle>,
}

impl<C, S, Sch> CountdownEngine<C, S, Sch>
where
    C: Clock + 'static,
    S: RenderSink + 'static,
    Sch: Scheduler,
{
    pub fn new(clock: C, sink: S, scheduler: Sch) -> Self {
        Self::with_options(clock, sink, scheduler, EngineOptions::default())
    }

    pub fn with_options(clock: C, sink: S, scheduler: Sch, options: EngineOptions) -> Self {
        Self {
            state: Arc::new(Mutex::new(TickState {
                clock,
                sink,
                countdowns: Vec::new(),
                completion_message: options.completion_message,
                retire_completed: options.retire_completed,
            })),
            scheduled: Arc::new(TickCounter::default()),
            scheduler,
            tick_interval: options.tick_interval,
            handle: None,
        }
    }

    /// 註冊目標後立即輸出一次，再交給排程器持續 tick；執行中的排程會被取代。
    /// 排程失敗時回傳錯誤，由呼叫端負責回報
    pub fn start<I>(&mut self, targets: I) -> Result<TickReport>
    where
        I: IntoIterator<Item = TargetInstant>,
    {
        self.stop();

        let report = {
            let mut state = lock(&self.state);
            state.countdowns = register(targets);
            let now = state.clock.now();
            state.run_tick(now)
        };

        // 舊排程的計數不延續
        let counter = Arc::new(TickCounter::default());
        self.scheduled = Arc::clone(&counter);

        let shared = Arc::clone(&self.state);
        let task = Box::new(move || {
            {
                let mut state = lock(&shared);
                let now = state.clock.now();
                state.run_tick(now);
            }
            counter.record();
        });

        let handle = self.scheduler.schedule(self.tick_interval, task)?;
        tracing::info!(
            "⏱️ Countdown started for {} target(s), every {:?}",
            report.entries.len(),
            self.tick_interval
        );
        self.handle = Some(handle);
        Ok(report)
    }

    /// 以 `now` 重新計算並輸出所有倒數
    pub fn tick(&self, now: DateTime<Utc>) -> TickReport {
        lock(&self.state).run_tick(now)
    }

    pub fn tick_now(&self) -> TickReport {
        let mut state = lock(&self.state);
        let now = state.clock.now();
        state.run_tick(now)
    }

    pub fn labels(&self) -> Vec<CountdownLabel> {
        lock(&self.state)
            .countdowns
            .iter()
            .map(|c| c.label().clone())
            .collect()
    }

    pub fn with_sink<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&lock(&self.state).sink)
    }
}

impl<C: Clock, S: RenderSink, Sch: Scheduler> CountdownEngine<C, S, Sch> {
    /// 本次 `start` 之後由排程器執行的 tick 數（不含啟動時的那一次）
    pub fn scheduled_ticks(&self) -> u64 {
        self.scheduled.get()
    }

    /// 等到排程器執行滿 `n` 次 tick 才完成
    pub async fn wait_for_scheduled_ticks(&self, n: u64) {
        let counter = Arc::clone(&self.scheduled);
        loop {
            let notified = counter.notify.notified();
            tokio::pin!(notified);
            // 必須在讀取計數前登記
            notified.as_mut().enable();
            if counter.get() >= n {
                return;
            }
            notified.await;
        }
    }

    pub fn stop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.cancel();
            tracing::debug!("Countdown timer stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(ScheduleHandle::is_active)
    }
}

impl<C: Clock, S: RenderSink, Sch: Scheduler> Drop for CountdownEngine<C, S, Sch> {
    fn drop(&mut self) {
        self.stop();
    }
}
