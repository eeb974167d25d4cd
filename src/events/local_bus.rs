use std::collections::{HashSet, VecDeque};

use serde_json::Value as JsonValue;

use crate::error::DraftError;

use super::{EventBus, RenderEvent, Signal, SignalKind};

/// Number of published events `LocalBus::new` remembers.
pub const DEFAULT_PUBLISHED_CAPACITY: usize = 16;

/// In-process event bus: a queue of inbound signals and a log of the most recently
/// published events. Older events are dropped once the log is full.
#[derive(Debug)]
pub struct LocalBus {
    subscriptions: HashSet<SignalKind>,
    pending: VecDeque<Signal>,
    published: VecDeque<RenderEvent>,
    capacity: usize,
}

impl Default for LocalBus {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_PUBLISHED_CAPACITY)
    }
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bus remembering the last `capacity` published events, at least one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            subscriptions: HashSet::new(),
            pending: VecDeque::new(),
            published: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn is_subscribed(&self, kind: SignalKind) -> bool {
        self.subscriptions.contains(&kind)
    }

    /// Queue a signal for delivery. Returns false, dropping the signal, when nobody
    /// subscribed to it.
    pub fn emit(&mut self, signal: Signal) -> bool {
        if !self.is_subscribed(signal.kind()) {
            log::warn!(
                "Dropping {} signal, nothing is subscribed to it",
                signal.kind().name()
            );
            return false;
        }
        self.pending.push_back(signal);
        true
    }

    pub fn fire(&mut self, name: &str, payload: &JsonValue) -> Result<bool, DraftError> {
        let signal = Signal::from_event(name, payload)?;
        Ok(self.emit(signal))
    }

    /// The remembered events, oldest first.
    pub fn published(&self) -> &VecDeque<RenderEvent> {
        &self.published
    }

    pub fn last_published(&self) -> Option<&RenderEvent> {
        self.published.back()
    }

    pub fn take_published(&mut self) -> Vec<RenderEvent> {
        self.published.drain(..).collect()
    }
}

impl EventBus for LocalBus {
    fn subscribe(&mut self, kind: SignalKind) {
        log::debug!("Subscribed to {}", kind.name());
        self.subscriptions.insert(kind);
    }

    fn poll(&mut self) -> Option<Signal> {
        self.pending.pop_front()
    }

    fn publish(&mut self, event: &RenderEvent) {
        log::debug!(
            "Publishing {} with {} features",
            event.name(),
            event.geojson.features.len()
        );
        if self.published.len() == self.capacity {
            self.published.pop_front();
        }
        self.published.push_back(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::events::{EventBus, RenderEvent, Signal, SignalKind};

    use super::{LocalBus, DEFAULT_PUBLISHED_CAPACITY};

    fn event(num_features: usize) -> RenderEvent {
        let feature = geojson::Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        };
        RenderEvent {
            geojson: geojson::FeatureCollection {
                bbox: None,
                features: vec![feature; num_features],
                foreign_members: None,
            },
        }
    }

    #[test]
    fn test_only_subscribed_signals_are_queued() {
        let mut bus = LocalBus::new();
        assert!(!bus.emit(Signal::NewEdit));
        bus.subscribe(SignalKind::NewEdit);
        bus.subscribe(SignalKind::EditEnd);
        assert!(bus.emit(Signal::NewEdit));
        assert!(!bus.fire("finish.edit", &json!(null)).unwrap());
        assert!(bus
            .fire("edit.end", &json!({ "geometry": { "drawId": 3 } }))
            .unwrap());
        assert!(bus.fire("edit.end", &json!({})).is_err());

        assert_eq!(Some(Signal::NewEdit), bus.poll());
        assert_eq!(Some(Signal::EditEnd { draw_id: 3 }), bus.poll());
        assert_eq!(None, bus.poll());
    }

    #[test]
    fn test_published_events_are_kept_in_order() {
        let mut bus = LocalBus::new();
        let empty = event(0);
        let one = event(1);
        bus.publish(&empty);
        bus.publish(&one);

        assert_eq!(2, bus.published().len());
        assert_eq!(Some(&one), bus.last_published());
        assert_eq!(vec![empty, one], bus.take_published());
        assert!(bus.published().is_empty());
    }

    #[test]
    fn test_published_log_is_bounded() {
        let mut bus = LocalBus::with_capacity(3);
        for num_features in 0..10 {
            bus.publish(&event(num_features));
        }
        let kept: Vec<usize> = bus
            .published()
            .iter()
            .map(|event| event.geojson.features.len())
            .collect();
        assert_eq!(vec![7, 8, 9], kept);

        let mut bus = LocalBus::new();
        for _ in 0..10_000 {
            bus.publish(&event(0));
        }
        assert_eq!(DEFAULT_PUBLISHED_CAPACITY, bus.published().len());
    }

    #[test]
    fn test_zero_capacity_still_keeps_last_event() {
        let mut bus = LocalBus::with_capacity(0);
        bus.publish(&event(0));
        bus.publish(&event(2));
        assert_eq!(1, bus.published().len());
        assert_eq!(Some(&event(2)), bus.last_published());
    }
}
