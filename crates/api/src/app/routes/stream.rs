//! Live order stream for admin displays.
//!
//! Server-Sent Events carrying `order:new` / `order:update`, each with the
//! fully hydrated order. Delivery is best-effort: there is no backlog, so a
//! display that (re)connects must re-fetch `/api/orders` to recover anything
//! it missed.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    response::{
        sse::{Event as SseEvent, KeepAlive, Sse},
        IntoResponse,
    },
};
use tokio::sync::mpsc::unbounded_channel;
use tokio_stream::wrappers::UnboundedReceiverStream;

use tuckshop_events::Event;

use crate::app::dto;
use crate::app::services::AppServices;

/// GET /api/stream
pub async fn stream_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    // Bridge the sync bus subscription into an async SSE stream.
    let (tx, rx) = unbounded_channel::<Result<SseEvent, std::convert::Infallible>>();

    let subscription = services.subscribe();
    tokio::task::spawn_blocking(move || {
        let mut last_heartbeat = std::time::Instant::now();

        loop {
            match subscription.recv_timeout(Duration::from_millis(1000)) {
                Ok(event) => {
                    let json = match serde_json::to_string(&dto::order_to_json(&event.order)) {
                        Ok(s) => s,
                        Err(_) => continue,
                    };

                    let sse_event = SseEvent::default().event(event.event_type()).data(json);
                    if tx.send(Ok(sse_event)).is_err() {
                        break; // Receiver dropped
                    }

                    last_heartbeat = std::time::Instant::now();
                }
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                    // Heartbeat every 15 seconds to keep the connection alive.
                    if last_heartbeat.elapsed() > Duration::from_secs(15) {
                        let heartbeat = SseEvent::default().event("heartbeat").data("{}");
                        if tx.send(Ok(heartbeat)).is_err() {
                            break;
                        }
                        last_heartbeat = std::time::Instant::now();
                    }
                }
                Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                    break; // Bus closed
                }
            }
        }
    });

    let stream = UnboundedReceiverStream::new(rx);
    Sse::new(stream)
        .keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
        .into_response()
}
