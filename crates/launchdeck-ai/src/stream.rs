//! Streaming reply types

use crate::error::Result;
use std::pin::Pin;
use tokio_stream::Stream;

/// A lazy, finite, non-restartable sequence of reply fragments.
///
/// Each `Ok` item is a text delta; an `Err` item ends the reply abnormally.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Build a fragment stream from already-known items.
///
/// Useful for canned replies and for driving the session manager without a network.
pub fn from_fragments<I>(items: I) -> FragmentStream
where
    I: IntoIterator<Item = Result<String>>,
    I::IntoIter: Send + 'static,
{
    Box::pin(tokio_stream::iter(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_from_fragments_preserves_order() {
        let stream = from_fragments(vec![Ok("a".to_string()), Ok("b".to_string())]);
        let items: Vec<String> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(items, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_from_fragments_carries_errors() {
        let mut stream = from_fragments(vec![
            Ok("a".to_string()),
            Err(Error::Sse("reset".into())),
        ]);
        assert!(stream.next().await.unwrap().is_ok());
        assert!(stream.next().await.unwrap().is_err());
        assert!(stream.next().await.is_none());
    }
}
