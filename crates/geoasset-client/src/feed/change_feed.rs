//! Change feed stream

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::Stream;
use geoasset_core::StoreEvent;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::parser::SseParser;
use super::{FeedError, FeedResult};
use crate::error::{AssetClientError, Result};

/// An open connection to the change feed
///
/// Implements `Stream<Item = Result<StoreEvent, FeedError>>`. The stream
/// ends when the server closes the connection; dropping it disconnects.
pub struct ChangeFeed {
    /// The underlying byte stream from reqwest
    byte_stream: Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>,
    /// SSE parser
    parser: SseParser,
    /// Parsed events not yet handed out
    pending: VecDeque<FeedResult<StoreEvent>>,
}

impl ChangeFeed {
    /// Connect to a feed URL
    pub(crate) async fn connect(client: &Client, url: Url) -> Result<Self> {
        debug!("Connecting to change feed: {}", url);

        let response = client
            .get(url)
            .header("Accept", "text/event-stream")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(AssetClientError::server_error(status, message));
        }

        Ok(Self {
            byte_stream: Box::pin(response.bytes_stream()),
            parser: SseParser::new(),
            pending: VecDeque::new(),
        })
    }

    /// Get the next event from the feed
    ///
    /// Returns `None` when the server closes the stream.
    pub async fn next_event(&mut self) -> Option<FeedResult<StoreEvent>> {
        futures::StreamExt::next(self).await
    }
}

impl Stream for ChangeFeed {
    type Item = FeedResult<StoreEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(event) = this.pending.pop_front() {
                return Poll::Ready(Some(event));
            }

            match this.byte_stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    // Keep polling until a complete event is buffered
                    this.pending.extend(this.parser.feed(bytes));
                }
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(FeedError::Connection(e))))
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
