//! Local filesystem store
//!
//! All entries live directly inside a single root directory. Writes go to a
//! hidden temporary file next to the target and are renamed into place, so
//! readers only ever observe complete entries. Hidden entries (leading `.`)
//! are never listed or served.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};

/// Chunk size used when streaming an entry out of the store
const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Content of an entry as a stream of chunks
pub type ByteStream = BoxStream<'static, Result<Bytes>>;

/// Metadata of one entry in a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// Directory-rooted store of flat files
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory (and parents) if missing
    pub async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn temp_path_for(&self, name: &str) -> PathBuf {
        let nonce = Uuid::new_v4().simple().to_string();
        self.root.join(format!(".{}.{}.part", name, &nonce[..8]))
    }

    /// Write `data` as entry `name`, replacing any previous content
    pub async fn write(&self, name: &str, data: &[u8]) -> Result<()> {
        let temp_path = self.temp_path_for(name);

        let result = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(data).await?;
            file.flush().await?;
            fs::rename(&temp_path, self.path_of(name)).await
        }
        .await;

        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!("Wrote {} bytes to {:?}", data.len(), self.path_of(name));
        Ok(())
    }

    /// Write a chunked body as entry `name` and return the number of bytes written.
    ///
    /// Nothing is left behind when the stream or the disk fails part way.
    pub async fn write_stream<S>(&self, name: &str, stream: S) -> Result<u64>
    where
        S: Stream<Item = Result<Bytes>>,
    {
        futures::pin_mut!(stream);
        let temp_path = self.temp_path_for(name);

        let result: Result<u64> = async {
            let mut file = fs::File::create(&temp_path).await?;
            let mut written = 0u64;
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
            }
            file.flush().await?;
            fs::rename(&temp_path, self.path_of(name)).await?;
            Ok(written)
        }
        .await;

        match result {
            Ok(written) => {
                debug!("Streamed {} bytes to {:?}", written, self.path_of(name));
                Ok(written)
            }
            Err(e) => {
                let _ = fs::remove_file(&temp_path).await;
                Err(e)
            }
        }
    }

    /// Metadata of entry `name`, or `None` when it is absent or not a regular file
    pub async fn entry(&self, name: &str) -> Result<Option<StoredEntry>> {
        if is_hidden(name) {
            return Ok(None);
        }

        match fs::metadata(self.path_of(name)).await {
            Ok(meta) if meta.is_file() => Ok(Some(StoredEntry {
                name: name.to_string(),
                size: meta.len(),
                modified: DateTime::<Utc>::from(meta.modified()?),
            })),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Full content of entry `name`, or `None` when it is absent
    pub async fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        if self.entry(name).await?.is_none() {
            return Ok(None);
        }

        match fs::read(self.path_of(name)).await {
            Ok(data) => Ok(Some(data)),
            // Removed between the metadata check and the read
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Open entry `name` for streaming, or `None` when it is absent.
    ///
    /// The returned metadata belongs to the opened file, so its size matches
    /// the streamed content unless the entry is replaced mid-read.
    pub async fn open(&self, name: &str) -> Result<Option<(StoredEntry, ByteStream)>> {
        if is_hidden(name) {
            return Ok(None);
        }

        let file = match fs::File::open(self.path_of(name)).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let meta = file.metadata().await?;
        if !meta.is_file() {
            return Ok(None);
        }

        let entry = StoredEntry {
            name: name.to_string(),
            size: meta.len(),
            modified: DateTime::<Utc>::from(meta.modified()?),
        };
        Ok(Some((entry, stream::try_unfold(file, next_chunk).boxed())))
    }

    /// Remove entry `name`. Returns `false` when there was nothing to remove.
    pub async fn remove(&self, name: &str) -> Result<bool> {
        if self.entry(name).await?.is_none() {
            return Ok(false);
        }

        match fs::remove_file(self.path_of(name)).await {
            Ok(()) => {
                debug!("Removed {:?}", self.path_of(name));
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// List every visible regular file in the store, in directory order.
    ///
    /// Entries whose metadata cannot be read are skipped with a warning.
    pub async fn entries(&self) -> Result<Vec<StoredEntry>> {
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read directory {}: {}", self.root.display(), e),
            ))
        })?;

        let mut entries = Vec::new();
        while let Some(dir_entry) = dir.next_entry().await? {
            let Some(name) = dir_entry.file_name().to_str().map(str::to_string) else {
                warn!("Skipping entry with non UTF-8 name in {:?}", self.root);
                continue;
            };
            if is_hidden(&name) {
                continue;
            }

            // Follows symlinks, like `entry`
            let meta = match fs::metadata(dir_entry.path()).await {
                Ok(meta) => meta,
                Err(e) => {
                    warn!("Skipping {:?}: failed to read metadata: {}", name, e);
                    continue;
                }
            };
            if !meta.is_file() {
                continue;
            }
            let modified = match meta.modified() {
                Ok(modified) => DateTime::<Utc>::from(modified),
                Err(e) => {
                    warn!("Skipping {:?}: modification time unavailable: {}", name, e);
                    continue;
                }
            };

            entries.push(StoredEntry {
                name,
                size: meta.len(),
                modified,
            });
        }

        Ok(entries)
    }
}

async fn next_chunk(mut file: fs::File) -> Result<Option<(Bytes, fs::File)>> {
    let mut buf = vec![0u8; READ_CHUNK_SIZE];
    let read = file.read(&mut buf).await?;
    if read == 0 {
        return Ok(None);
    }
    buf.truncate(read);
    Ok(Some((Bytes::from(buf), file)))
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}
