//! Draining an audio stream into one contiguous buffer.

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};

use crate::Result;

/// Collect every chunk of `stream` in delivery order.
///
/// The first `Err` item aborts collection; nothing collected so far is
/// returned, but `received` still holds the byte count taken before it.
pub async fn collect_audio<S>(mut stream: S, received: &mut usize) -> Result<Bytes>
where
    S: Stream<Item = Result<Bytes>> + Unpin,
{
    let mut buf = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        buf.extend_from_slice(&chunk?);
        *received = buf.len();
    }
    Ok(buf.freeze())
}
