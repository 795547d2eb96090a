//! Telemetry stream implementation

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::{Stream, StreamExt};
use reqwest::{Client, Response};
use tracing::{debug, trace};
use url::Url;

use teslapi_core::{columns_query, DEFAULT_COLUMNS};

use super::parser::LineParser;
use super::types::{StreamError, StreamResult, TelemetryRecord};

fn resolve_columns(columns: &[&str]) -> Vec<String> {
    let columns: &[&str] = if columns.is_empty() {
        &DEFAULT_COLUMNS
    } else {
        columns
    };
    columns.iter().map(|c| c.to_string()).collect()
}

/// Build `{base}{vehicle_id}/?values={columns}`
pub fn stream_url(
    base: &Url,
    vehicle_id: &str,
    columns: &[&str],
) -> Result<Url, url::ParseError> {
    let mut url = base.join(&format!("{}/", vehicle_id))?;
    url.query_pairs_mut()
        .append_pair("values", &columns_query(&resolve_columns(columns)));
    Ok(url)
}

async fn open(
    client: &Client,
    url: Url,
    username: &str,
    stream_token: &str,
) -> StreamResult<Response> {
    debug!("Connecting to telemetry stream: {}", url);

    let response = client
        .get(url)
        .basic_auth(username, Some(stream_token))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(StreamError::Server { status, message });
    }
    Ok(response)
}

/// Hand each inbound chunk to `sink` until the server closes the stream
pub async fn for_each_chunk<F>(
    client: &Client,
    url: Url,
    username: &str,
    stream_token: &str,
    mut sink: F,
) -> StreamResult<()>
where
    F: FnMut(Bytes),
{
    let mut response = open(client, url, username, stream_token).await?;
    while let Some(chunk) = response.chunk().await? {
        trace!("stream chunk of {} bytes", chunk.len());
        sink(chunk);
    }
    debug!("telemetry stream closed by server");
    Ok(())
}

/// An open telemetry stream
///
/// Implements `Stream<Item = Result<TelemetryRecord, StreamError>>`. The
/// stream ends when the server closes the connection; dropping it closes the
/// connection from our side.
pub struct TelemetryStream {
    byte_stream: Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>,
    parser: LineParser,
    pending: VecDeque<StreamResult<TelemetryRecord>>,
    finished: bool,
}

impl TelemetryStream {
    /// Connect to a stream URL built with [`stream_url`] from the same columns
    pub async fn connect(
        client: Client,
        url: Url,
        username: &str,
        stream_token: &str,
        columns: &[&str],
    ) -> StreamResult<Self> {
        let response = open(&client, url, username, stream_token).await?;

        Ok(Self {
            byte_stream: Box::pin(response.bytes_stream()),
            parser: LineParser::new(&resolve_columns(columns)),
            pending: VecDeque::new(),
            finished: false,
        })
    }

    /// Get the next record from the stream
    ///
    /// Returns `None` once the server has closed the stream.
    pub async fn next(&mut self) -> Option<StreamResult<TelemetryRecord>> {
        <Self as StreamExt>::next(self).await
    }
}

impl Stream for TelemetryStream {
    type Item = StreamResult<TelemetryRecord>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(record) = this.pending.pop_front() {
                return Poll::Ready(Some(record));
            }
            if this.finished {
                return Poll::Ready(None);
            }

            match this.byte_stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    this.pending.extend(this.parser.feed(&bytes));
                }
                Poll::Ready(Some(Err(e))) => {
                    this.finished = true;
                    return Poll::Ready(Some(Err(StreamError::Connection(e))));
                }
                Poll::Ready(None) => {
                    debug!("telemetry stream ended");
                    this.finished = true;
                    this.pending.extend(this.parser.finish());
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
