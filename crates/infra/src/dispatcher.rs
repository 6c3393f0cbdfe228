use crate::repos::IPendingReminderRepo;
use crate::services::{INotifier, IPushGateway};
use crate::system::ISys;
use chrono_tz::Tz;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use study_planner_domain::{NotificationPayload, PlatformCapabilities, ReminderEvent};
use tracing::{info, warn};

/// A remote push handoff is only worth its round trip when the
/// reminder is at least this far out; anything closer is served by the
/// in-process timer.
const PUSH_HANDOFF_MIN_DELAY_MILLIS: i64 = 60 * 1000;

#[derive(Debug, Default)]
struct ChannelHealth {
    /// Set after a failed push handoff; the push channel stays demoted
    /// for the rest of the session
    push_degraded: bool,
}

/// Routes a computed reminder to a delivery channel.
///
/// Channels are tried in order of resilience: a remote push handoff
/// survives process restarts, an in-process timer survives nothing but
/// needs no external service, and immediate delivery handles reminders
/// that are already due when evaluated.
pub struct NotificationDispatcher {
    push: Option<Arc<dyn IPushGateway>>,
    notifier: Arc<dyn INotifier>,
    pending_reminders: Arc<dyn IPendingReminderRepo>,
    capabilities: PlatformCapabilities,
    timezone: Tz,
    sys: Arc<dyn ISys>,
    health: Mutex<ChannelHealth>,
}

impl NotificationDispatcher {
    pub fn new(
        push: Option<Arc<dyn IPushGateway>>,
        notifier: Arc<dyn INotifier>,
        pending_reminders: Arc<dyn IPendingReminderRepo>,
        capabilities: PlatformCapabilities,
        timezone: Tz,
        sys: Arc<dyn ISys>,
    ) -> Self {
        Self {
            push,
            notifier,
            pending_reminders,
            capabilities,
            timezone,
            sys,
            health: Mutex::new(ChannelHealth::default()),
        }
    }

    fn push_channel_usable(&self) -> bool {
        if !self.capabilities.supports_push_scheduling || self.push.is_none() {
            return false;
        }
        match self.health.lock() {
            Ok(health) => !health.push_degraded,
            Err(_) => false,
        }
    }

    fn demote_push_channel(&self) {
        if let Ok(mut health) = self.health.lock() {
            health.push_degraded = true;
        }
    }

    /// Picks a delivery channel for `event` based on how far out its
    /// fire time is. Already due events are delivered inline.
    pub async fn schedule(self: Arc<Self>, event: ReminderEvent) {
        let delay_millis = event.fire_at - self.sys.get_timestamp_millis();
        if delay_millis <= 0 {
            self.fire_now(&event).await;
            return;
        }

        if delay_millis >= PUSH_HANDOFF_MIN_DELAY_MILLIS && self.push_channel_usable() {
            // push is Some whenever push_channel_usable returns true
            if let Some(push) = &self.push {
                let payload = NotificationPayload::for_reminder(&event, &self.timezone);
                match push.schedule_notification(&payload, event.fire_at).await {
                    Ok(_) => {
                        info!("Handed reminder off to push gateway: {}", event.dedup_key());
                        return;
                    }
                    Err(e) => {
                        warn!("Push handoff failed, demoting to in-process timer: {:?}", e);
                        self.demote_push_channel();
                    }
                }
            }
        }

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_millis as u64)).await;
            self.fire_now(&event).await;
        });
    }

    /// Delivers the reminder on the local surface and, on success,
    /// retires its pending record.
    pub async fn fire_now(&self, event: &ReminderEvent) {
        let payload = NotificationPayload::for_reminder(event, &self.timezone);
        match self.notifier.notify(&payload).await {
            Ok(_) => {
                if let Err(e) = self.pending_reminders.delete(&payload.tag).await {
                    warn!(
                        "Unable to retire delivered reminder {}: {:?}",
                        payload.tag, e
                    );
                }
            }
            Err(e) => {
                // Record stays pending so a later flush retries it
                warn!("Unable to deliver reminder {}: {:?}", payload.tag, e);
            }
        }
    }
}
