use crate::domain::events::DomainEvent;
use crate::domain::ports::EventSink;
use std::sync::Mutex;

/// 把領域事件寫進日誌
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: DomainEvent) {
        match &event {
            DomainEvent::RepCreated {
                rep_id,
                exercise_id,
                velocity,
                ..
            } => tracing::info!(
                event_type = event.event_type(),
                rep_id = %rep_id,
                exercise_id = %exercise_id,
                velocity = *velocity,
                "📥 Rep recorded"
            ),
        }
    }
}

/// 收集事件，給測試或之後的訂閱者讀取
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: Mutex<Vec<DomainEvent>>,
}

impl CollectingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出並清空目前收集到的事件
    pub fn drain(&self) -> Vec<DomainEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventSink for CollectingEventSink {
    fn publish(&self, event: DomainEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
