pub mod local_bus;
pub mod signal;

pub use local_bus::LocalBus;
pub use signal::{RenderEvent, Signal, SignalKind, FEATURE_UPDATE};

/// The messaging capabilities the draft store needs from its host.
///
/// Delivery is synchronous: the host queues inbound signals, the store takes them one at a
/// time through `poll` and handles each to completion before taking the next.
pub trait EventBus {
    /// Register interest in a signal. Signals nobody subscribed to are not delivered.
    fn subscribe(&mut self, kind: SignalKind);

    fn poll(&mut self) -> Option<Signal>;

    /// Broadcast the combined draft and handle geometry to the renderer.
    fn publish(&mut self, event: &RenderEvent);
}

impl<B: EventBus + ?Sized> EventBus for &mut B {
    fn subscribe(&mut self, kind: SignalKind) {
        (**self).subscribe(kind)
    }

    fn poll(&mut self) -> Option<Signal> {
        (**self).poll()
    }

    fn publish(&mut self, event: &RenderEvent) {
        (**self).publish(event)
    }
}
