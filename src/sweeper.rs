//! Expiry sweeper: periodic task that reclaims capacity from holds whose
//! reservation window lapsed without confirmation.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::booking::BookingService;

pub fn spawn(service: Arc<BookingService>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let reclaimed = service.expire_holds(Utc::now());
            if reclaimed > 0 {
                info!(reclaimed, "released expired holds");
            }
        }
    })
}
