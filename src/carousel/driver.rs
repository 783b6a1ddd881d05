//! Tokio driver that runs one carousel's autoplay timer.
//!
//! The engine lives behind a mutex shared with a background task. The task
//! sleeps until the engine's armed deadline and is woken through a `Notify`
//! whenever an input may have moved or cancelled that deadline. Inputs
//! cancel and apply inside one critical section, so a wake-up racing with
//! `pause` or `begin_drag` finds no armed timer and does nothing.

use super::{CarouselConfig, CarouselEngine, CarouselState, Swipe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// A mounted carousel with a live autoplay timer.
///
/// Dropping the driver unmounts the carousel and aborts its task.
pub struct AutoplayDriver {
    engine: Arc<Mutex<CarouselEngine>>,
    wake: Arc<Notify>,
    origin: Instant,
    task: JoinHandle<()>,
}

impl AutoplayDriver {
    /// Mount a carousel and start its autoplay task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(item_count: usize, config: CarouselConfig) -> Self {
        let origin = Instant::now();
        let engine = Arc::new(Mutex::new(CarouselEngine::new(item_count, config, 0)));
        let wake = Arc::new(Notify::new());

        let task = tokio::spawn(run(Arc::clone(&engine), Arc::clone(&wake), origin));

        Self {
            engine,
            wake,
            origin,
            task,
        }
    }

    fn now_ms(&self) -> u64 {
        elapsed_ms(self.origin)
    }

    fn update<T>(&self, apply: impl FnOnce(&mut CarouselEngine, u64) -> T) -> T {
        let now = self.now_ms();
        let result = apply(&mut lock(&self.engine), now);
        self.wake.notify_one();
        result
    }

    pub fn state(&self) -> CarouselState {
        lock(&self.engine).state().clone()
    }

    pub fn current_index(&self) -> usize {
        lock(&self.engine).current_index()
    }

    pub fn advance(&self) -> bool {
        self.update(|engine, _| engine.advance())
    }

    pub fn retreat(&self) -> bool {
        self.update(|engine, _| engine.retreat())
    }

    pub fn jump_to(&self, index: usize) -> bool {
        self.update(|engine, _| engine.jump_to(index))
    }

    pub fn play(&self) {
        self.update(|engine, now| engine.play(now))
    }

    pub fn pause(&self) {
        self.update(|engine, now| engine.pause(now))
    }

    pub fn set_hovered(&self, hovered: bool) {
        self.update(|engine, now| engine.set_hovered(hovered, now))
    }

    pub fn begin_drag(&self, x: f64) {
        self.update(|engine, now| engine.begin_drag(x, now))
    }

    pub fn update_drag(&self, x: f64) {
        self.update(|engine, _| engine.update_drag(x))
    }

    pub fn end_drag(&self) -> Option<Swipe> {
        self.update(|engine, now| engine.end_drag(now))
    }

    pub fn set_item_count(&self, item_count: usize) {
        self.update(|engine, now| engine.set_item_count(item_count, now))
    }

    /// Cancel the timer and stop the task. Idempotent.
    pub fn unmount(&self) {
        lock(&self.engine).unmount();
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for AutoplayDriver {
    fn drop(&mut self) {
        self.unmount();
    }
}

async fn run(engine: Arc<Mutex<CarouselEngine>>, wake: Arc<Notify>, origin: Instant) {
    loop {
        let deadline = {
            let engine = lock(&engine);
            if !engine.is_mounted() {
                break;
            }
            engine.next_deadline_ms()
        };

        match deadline {
            Some(due) => {
                tokio::select! {
                    _ = sleep_until(origin + Duration::from_millis(due)) => {
                        let now = elapsed_ms(origin);
                        if lock(&engine).tick(now) {
                            debug!("Carousel autoplay advanced at {}ms", now);
                        }
                    }
                    _ = wake.notified() => {}
                }
            }
            None => wake.notified().await,
        }
    }
    debug!("Carousel autoplay task stopped");
}

fn elapsed_ms(origin: Instant) -> u64 {
    u64::try_from(origin.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn lock(engine: &Mutex<CarouselEngine>) -> MutexGuard<'_, CarouselEngine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}
