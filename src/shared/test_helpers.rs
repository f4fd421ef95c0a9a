#[cfg(test)]
use axum::body::Bytes;

#[cfg(test)]
use futures::{stream, Stream, TryStreamExt};

#[cfg(test)]
use tempfile::TempDir;

#[cfg(test)]
use crate::core::error::Result;

#[cfg(test)]
use crate::modules::storage::LocalStore;

/// Create a store directory named `name` inside `temp`
#[cfg(test)]
pub async fn temp_store(temp: &TempDir, name: &str) -> LocalStore {
    let store = LocalStore::new(temp.path().join(name));
    store.ensure_root().await.unwrap();
    store
}

/// Single-chunk upload body
#[cfg(test)]
pub fn body_of(data: &'static [u8]) -> impl Stream<Item = Result<Bytes>> {
    stream::iter(vec![Ok(Bytes::from_static(data))])
}

/// Drain a response body stream into memory
#[cfg(test)]
pub async fn collect_body<S>(body: S) -> Vec<u8>
where
    S: Stream<Item = Result<Bytes>>,
{
    body.try_fold(Vec::new(), |mut data, chunk| async move {
        data.extend_from_slice(&chunk);
        Ok(data)
    })
    .await
    .unwrap()
}
