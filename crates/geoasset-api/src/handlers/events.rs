//! Change feed handler
//!
//! Streams store change events as Server-Sent Events so front ends can
//! refresh their listing after an upload instead of polling.

use std::convert::Infallible;

use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::handlers::assets::company_filter;
use crate::state::AppState;

/// GET /assets/events?companyId=<id>
/// Stream `assets-replaced` events, optionally for one company only
pub async fn stream_events(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let filter = company_filter(&params).map(str::to_string);
    let receiver = state.store().subscribe();

    let stream = BroadcastStream::new(receiver).filter_map(move |result| match result {
        Ok(event) => {
            if let Some(ref company_id) = filter {
                if event.company_id() != company_id.as_str() {
                    return None;
                }
            }

            Some(Ok::<_, Infallible>(
                Event::default()
                    .event(event.name())
                    .data(serde_json::to_string(&event).unwrap_or_default()),
            ))
        }
        Err(_) => None, // Skip lagged messages
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
