//! Cancellable timed tasks.
//!
//! Every task posts its result into the application channel and stops as
//! soon as its `CancellationToken` is cancelled. Owners keep the token (or
//! its drop guard) so the task dies with them.

use crate::events::AppEvent;
use chrono::Local;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval, sleep};
use tokio_util::sync::CancellationToken;

/// Post `AppEvent::Tick` every `period` until cancelled.
pub fn spawn_clock(
    period: Duration,
    sender: mpsc::Sender<AppEvent>,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    if sender.send(AppEvent::Tick(Local::now())).await.is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// Post `event` once after `delay` unless cancelled first.
pub fn schedule_after(
    delay: Duration,
    event: AppEvent,
    sender: mpsc::Sender<AppEvent>,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            _ = sleep(delay) => {
                let _ = sender.send(event).await;
            }
        }
    })
}
