use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};
use uuid::Uuid;

/// A short-lived file backing exactly one export response.
///
/// The path is unique per instance, so concurrent exports never collide.
/// Dropping the guard removes the file; a failed removal is logged and
/// never escalated, since by then the response status is already sent.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Allocate a unique, extension-suffixed path under the system temp
    /// directory. The file itself is created by the first write.
    pub fn allocate(prefix: &str, extension: &str) -> Self {
        let path = std::env::temp_dir().join(format!("{}_{}.{}", prefix, Uuid::new_v4(), extension));
        debug!("Allocated scratch file {}", path.display());
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn write(&self, contents: &[u8]) -> std::io::Result<()> {
        tokio::fs::write(&self.path, contents).await
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to clean up scratch file {}: {}", self.path.display(), e);
            }
        } else {
            debug!("Removed scratch file {}", self.path.display());
        }
    }
}

/// Byte stream over a scratch file that owns its cleanup guard, so the
/// file is deleted when the stream is dropped: after a complete response,
/// after a mid-stream failure, or on client abort.
pub struct ScratchFileStream {
    inner: ReaderStream<File>,
    _guard: ScratchFile,
}

impl ScratchFileStream {
    pub async fn open(scratch: ScratchFile) -> std::io::Result<Self> {
        let file = File::open(scratch.path()).await?;
        Ok(Self {
            inner: ReaderStream::new(file),
            _guard: scratch,
        })
    }
}

impl Stream for ScratchFileStream {
    type Item = std::io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
