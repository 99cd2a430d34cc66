//! The monitoring loop.
//!
//! Idle until [`MonitorLoop::run`] is called; Running until the shutdown
//! channel fires. One sweep per tick covers every configured instrument in
//! order: detect, deduplicate-and-notify each ranked opportunity, and, when
//! automatic execution is enabled, execute the top-ranked one. A sweep that
//! overruns its period delays the next tick; cycles never overlap.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::state::{AppState, MonitorState};
use crate::detector::OpportunityDetector;
use crate::domain::{Instrument, Opportunity};
use crate::error::Result;
use crate::service::{
    AlertDeduplicator, Event, ExecutionEvent, ExecutionRecorder, NotifierRegistry,
    OpportunityEvent,
};

pub struct MonitorLoop {
    detector: OpportunityDetector,
    dedup: AlertDeduplicator,
    notifiers: Arc<NotifierRegistry>,
    recorder: Arc<ExecutionRecorder>,
    state: Arc<AppState>,
    instruments: Vec<Instrument>,
    period: Duration,
    /// Whether alert delivery is globally enabled. The deduplicator is
    /// consulted (and its timestamps advanced) even when this is false.
    alerts_enabled: bool,
}

impl MonitorLoop {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        detector: OpportunityDetector,
        dedup: AlertDeduplicator,
        notifiers: Arc<NotifierRegistry>,
        recorder: Arc<ExecutionRecorder>,
        state: Arc<AppState>,
        instruments: Vec<Instrument>,
        period: Duration,
        alerts_enabled: bool,
    ) -> Self {
        Self {
            detector,
            dedup,
            notifiers,
            recorder,
            state,
            instruments,
            period,
            alerts_enabled,
        }
    }

    /// Run until the shutdown channel reports true.
    ///
    /// Cancellation is cooperative and observed at cycle boundaries only:
    /// an in-flight sweep finishes before the loop transitions back to Idle.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        self.state.set_monitor_state(MonitorState::Running);
        info!(
            instruments = self.instruments.len(),
            period_secs = self.period.as_secs_f64(),
            "Monitoring started"
        );

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep().await;
                }
                _ = shutdown.changed() => {
                    break;
                }
            }
        }

        self.state.set_monitor_state(MonitorState::Idle);
        info!("Monitoring stopped");
        Ok(())
    }

    /// One cycle: every configured instrument, in configured order.
    async fn sweep(&self) {
        for instrument in &self.instruments {
            let opportunities = self.detector.detect(instrument).await;
            debug!(
                instrument = %instrument,
                found = opportunities.len(),
                "Detection pass complete"
            );

            for (rank, opportunity) in opportunities.iter().enumerate() {
                self.dispatch_alert(opportunity);

                // Only the top-ranked opportunity per instrument qualifies
                // for execution.
                if rank == 0 && self.state.auto_execute() {
                    self.execute(opportunity).await;
                }
            }
        }
    }

    /// Consult the deduplicator, then deliver when allowed.
    ///
    /// The deduplicator runs first and updates its timestamp even when the
    /// channel is disabled, so re-enabling alerts does not replay a backlog.
    fn dispatch_alert(&self, opportunity: &Opportunity) {
        let deliver = self.dedup.should_notify(opportunity);
        if !deliver {
            debug!(
                instrument = %opportunity.instrument(),
                buy = %opportunity.buy_venue(),
                sell = %opportunity.sell_venue(),
                "Alert suppressed by cool-down"
            );
            return;
        }
        if !self.alerts_enabled {
            debug!("Alert channel disabled, skipping delivery");
            return;
        }
        self.notifiers.notify_all(Event::OpportunityDetected(OpportunityEvent::from(
            opportunity,
        )));
    }

    /// Execute one opportunity; failures are logged and never stop the loop.
    async fn execute(&self, opportunity: &Opportunity) {
        match self.recorder.execute(opportunity).await {
            Ok(record) => {
                self.notifiers
                    .notify_all(Event::ExecutionCompleted(ExecutionEvent::from_record(
                        &record,
                    )));
            }
            Err(e) => {
                warn!(
                    instrument = %opportunity.instrument(),
                    error = %e,
                    "Execution failed"
                );
                self.notifiers
                    .notify_all(Event::ExecutionCompleted(ExecutionEvent::from_failure(
                        opportunity.instrument().as_str(),
                        &e,
                    )));
            }
        }
    }
}
