//! Running engine: immediate pass plus a periodic scan on the tokio runtime.

use super::{Engine, PassReport, ToggleOutcome};
use crate::context::{TargetSite, UserInfo};
use crate::error::ToggleError;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// A started engine. Stop it with [`Session::teardown`]; dropping it aborts the scan.
pub struct Session<T: TargetSite> {
    engine: Arc<Mutex<Engine<T>>>,
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl<T: TargetSite> Session<T> {
    pub(crate) fn start(mut engine: Engine<T>) -> Self {
        let period = engine.scan_interval();
        let is_entry_page = engine.is_entry_page();
        let site = engine.target_context().name.clone();

        if is_entry_page {
            engine.reconcile();
        }

        let engine = Arc::new(Mutex::new(engine));
        let (shutdown, shutdown_rx) = watch::channel(false);

        let task = match (is_entry_page, period) {
            (true, Some(period)) => match Handle::try_current() {
                Ok(handle) => {
                    info!(site = %site, interval_ms = period.as_millis() as u64, "Started periodic scan");
                    Some(handle.spawn(scan_loop(Arc::clone(&engine), period, shutdown_rx)))
                }
                Err(_) => {
                    warn!(site = %site, "No async runtime, periodic scan disabled");
                    None
                }
            },
            (true, None) => {
                debug!(site = %site, "Interval below minimum, single pass only");
                None
            }
            (false, _) => None,
        };

        Self {
            engine,
            shutdown,
            task,
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Run a pass now, outside the schedule
    pub fn reconcile_now(&self) -> PassReport {
        self.engine.lock().reconcile()
    }

    pub fn click(&self, control: &T::Entry) -> Result<ToggleOutcome, ToggleError> {
        self.engine.lock().click(control)
    }

    pub fn recall_user(&self, site: &str) -> Option<UserInfo> {
        self.engine.lock().recall_user(site)
    }

    /// Run `f` with exclusive access to the engine
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut Engine<T>) -> R) -> R {
        f(&mut self.engine.lock())
    }

    /// Stop the periodic scan and wait for it to finish
    pub async fn teardown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        info!(site = %self.engine.lock().target_context().name, "Session torn down");
    }
}

impl<T: TargetSite> Drop for Session<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn scan_loop<T: TargetSite>(
    engine: Arc<Mutex<Engine<T>>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                engine.lock().reconcile();
            }
            // only ever set to true; a dropped sender also stops the loop
            _ = shutdown.changed() => break,
        }
    }
    debug!("Scan loop stopped");
}
