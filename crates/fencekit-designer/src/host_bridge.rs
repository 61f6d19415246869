//! Host bridge: the one outbound interface of the designer.
//!
//! The surrounding form subscribes a callback and receives the complete list
//! of measurements whenever it changes (finalize, delete, clear-all, and
//! pointer-up after a live edit). Intermediate drag moves are never
//! published.

use std::fmt;
use uuid::Uuid;

use serde::{Deserialize, Serialize};

use crate::model::Measurement;

/// Subscription handle for unsubscribing from measurement updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

type MeasurementsCallback = Box<dyn FnMut(&[Measurement])>;

/// Publishes measurement lists to subscribed host callbacks.
#[derive(Default)]
pub struct HostBridge {
    subscribers: Vec<(SubscriptionId, MeasurementsCallback)>,
    publish_count: u64,
}

impl HostBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` to receive every published measurement list.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&[Measurement]) + 'static,
    {
        let id = SubscriptionId::new();
        self.subscribers.push((id, Box::new(callback)));
        tracing::debug!("Host subscription {} added", id);
        id
    }

    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        let removed = self.subscribers.len() != before;
        if removed {
            tracing::debug!("Host subscription {} removed", id);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Number of publishes since creation.
    pub fn publish_count(&self) -> u64 {
        self.publish_count
    }

    /// Sends the full measurement list to every subscriber.
    pub fn publish(&mut self, measurements: &[Measurement]) {
        self.publish_count += 1;
        tracing::debug!(
            "Publishing {} measurement(s) to {} subscriber(s)",
            measurements.len(),
            self.subscribers.len()
        );
        for (_, callback) in self.subscribers.iter_mut() {
            callback(measurements);
        }
    }
}

impl fmt::Debug for HostBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostBridge")
            .field("subscribers", &self.subscribers.len())
            .field("publish_count", &self.publish_count)
            .finish()
    }
}

/// Totals a host form derives from the published list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasurementSummary {
    pub linear_feet: f64,
    pub gate_count: usize,
    pub post_count: usize,
    pub panel_count: usize,
}

impl MeasurementSummary {
    pub fn from_measurements(measurements: &[Measurement]) -> Self {
        measurements.iter().fold(Self::default(), |acc, m| Self {
            linear_feet: acc.linear_feet + m.total_length,
            gate_count: acc.gate_count + m.total_gates,
            post_count: acc.post_count + m.materials_list.posts,
            panel_count: acc.panel_count + m.materials_list.panels,
        })
    }
}
