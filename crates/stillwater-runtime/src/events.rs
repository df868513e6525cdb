//! Typed event bus for lake, quality, and viewport notifications

use stillwater_core::LakeId;
use stillwater_quality::QualityTier;
use stillwater_sim::FlowEffect;

use crate::camera::CameraPose;

/// Events broadcast between subsystems. Delivery is by drain: producers
/// push during a frame, consumers take the whole batch at a fixed point.
#[derive(Clone, Debug, PartialEq)]
pub enum VizEvent {
    LakeActivated(LakeId),
    QualityChanged {
        tier: QualityTier,
        complete: bool,
    },
    ViewportChanged {
        width: f32,
        height: f32,
    },
    /// Fire-and-forget camera command for the map provider
    CameraFlyTo {
        pose: CameraPose,
        duration: f32,
    },
    Effect(FlowEffect),
}

/// A simple event queue that systems push to and consumers drain
#[derive(Default)]
pub struct EventBus {
    events: Vec<VizEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: VizEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<VizEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut bus = EventBus::new();
        assert!(bus.is_empty());

        bus.push(VizEvent::LakeActivated(LakeId::from_raw(3)));
        bus.push(VizEvent::ViewportChanged {
            width: 800.0,
            height: 600.0,
        });
        assert_eq!(bus.len(), 2);

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(bus.is_empty());
        assert!(matches!(events[0], VizEvent::LakeActivated(id) if id.raw() == 3));
    }

    #[test]
    fn drain_on_empty_is_empty() {
        let mut bus = EventBus::new();
        assert!(bus.drain().is_empty());
    }
}
