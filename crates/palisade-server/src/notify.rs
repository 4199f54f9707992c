//! Notification drain.
//!
//! Consumes the store's event channel and hands each event to the
//! notifier collaborator. The shipped notifier writes structured log
//! records; delivery failures are logged and swallowed, they must
//! never surface on the request path that produced the event.

use tokio::sync::mpsc::UnboundedReceiver;

use palisade_core::events::{EdlEvent, EventPayload};

/// Drain events until the channel closes.
pub async fn run(mut events: UnboundedReceiver<EdlEvent>) {
    while let Some(event) = events.recv().await {
        dispatch(&event);
    }
    tracing::info!("Notification channel closed, drain exiting");
}

fn dispatch(event: &EdlEvent) {
    match &event.payload {
        EventPayload::IndicatorAdded {
            token,
            kind,
            category_id,
            source,
            ..
        } => {
            tracing::info!(
                event_id = %event.id,
                token = %token,
                kind = %kind,
                category = %category_id,
                source = %source,
                "Indicator added"
            );
        }
        EventPayload::IndicatorExpired {
            token, category_id, ..
        } => {
            tracing::info!(
                event_id = %event.id,
                token = %token,
                category = %category_id,
                "Indicator expired and removed"
            );
        }
        EventPayload::SweepCompleted {
            removed,
            categories_swept,
            duration_ms,
        } => {
            tracing::info!(
                event_id = %event.id,
                removed,
                categories_swept,
                duration_ms,
                "Sweep completed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palisade_core::classify::Kind;
    use palisade_core::types::{CategoryId, IndicatorId, Source};

    #[tokio::test]
    async fn drain_exits_when_channel_closes() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        tx.send(EdlEvent::new(EventPayload::IndicatorAdded {
            indicator_id: IndicatorId::new(),
            token: "1.2.3.4".to_string(),
            kind: Kind::Ip,
            category_id: CategoryId::new(),
            source: Source::Manual,
        }))
        .unwrap();
        drop(tx);

        // Must consume the pending event and return.
        tokio::time::timeout(std::time::Duration::from_secs(1), run(rx))
            .await
            .expect("drain did not exit");
    }
}
