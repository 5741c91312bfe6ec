use super::{LineEvent, MuxError, Shutdown};
use crate::format::FormatterChain;
use std::io::{self, SeekFrom};
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::Semaphore;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::MissedTickBehavior;

/// What a follower needs beyond its own file.
#[derive(Clone)]
pub struct FollowContext {
    pub chain: Arc<FormatterChain>,
    pub lines: UnboundedSender<LineEvent>,
    pub format_workers: usize,
    pub poll_interval: Duration,
    pub shutdown: Shutdown,
}

/// Device and inode of an open file. A rotated path points at a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileIdentity {
    dev: u64,
    ino: u64,
}

impl FileIdentity {
    fn of(meta: &std::fs::Metadata) -> Self {
        Self {
            dev: meta.dev(),
            ino: meta.ino(),
        }
    }
}

/// Tails one file from its current end, reopening it when it is rotated.
pub struct Follower {
    path: PathBuf,
    file: File,
    identity: FileIdentity,
    offset: u64,
    pending: Vec<u8>,
    missing: bool,
}

impl Follower {
    /// Opens `path` and positions at its end.
    ///
    /// Fails if the file cannot be opened now. Later disappearances are
    /// waited out instead.
    pub async fn start(path: &Path) -> Result<Self, MuxError> {
        let open_error = |source| MuxError::Open {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::open(path).await.map_err(open_error)?;
        let meta = file.metadata().await.map_err(open_error)?;
        let offset = file.seek(SeekFrom::End(0)).await.map_err(open_error)?;

        tracing::info!(path = %path.display(), offset, "following file");

        Ok(Self {
            path: path.to_path_buf(),
            file,
            identity: FileIdentity::of(&meta),
            offset,
            pending: Vec::new(),
            missing: false,
        })
    }

    /// Polls for new lines until shutdown, handing each one to the worker pool.
    ///
    /// With a single worker, lines are delivered in the order they were read.
    pub async fn run(mut self, ctx: FollowContext) -> Result<(), MuxError> {
        let pool = Arc::new(Semaphore::new(ctx.format_workers));
        let mut shutdown = ctx.shutdown.subscribe();
        let mut ticker = tokio::time::interval(ctx.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait() => {
                    tracing::debug!(path = %self.path.display(), "follower stopped");
                    return Ok(());
                }
                _ = ticker.tick() => {}
            }

            for line in self.poll().await? {
                let permit = pool
                    .clone()
                    .acquire_owned()
                    .await
                    .map_err(|_| MuxError::WorkerPool)?;
                let chain = ctx.chain.clone();
                let tx = ctx.lines.clone();

                // Reverse DNS lookups block.
                tokio::task::spawn_blocking(move || {
                    let formatted = chain.format(&line);
                    let _ = tx.send(LineEvent(formatted));
                    drop(permit);
                });
            }
        }
    }

    /// Reads what was appended since the last poll, then follows the path
    /// to a rotated or truncated file.
    async fn poll(&mut self) -> Result<Vec<String>, MuxError> {
        // The old handle is drained first so lines written before a rename survive.
        let mut lines = self.read_available().await?;

        let meta = match tokio::fs::metadata(&self.path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if !self.missing {
                    tracing::warn!(
                        path = %self.path.display(),
                        "file disappeared, waiting for it"
                    );
                    self.missing = true;
                }
                return Ok(lines);
            }
            Err(source) => return Err(self.read_error(source)),
        };

        if FileIdentity::of(&meta) != self.identity {
            let file = match File::open(&self.path).await {
                Ok(file) => file,
                // Replaced again between the stat and the open.
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(lines),
                Err(source) => return Err(self.read_error(source)),
            };
            let meta = file.metadata().await.map_err(|e| self.read_error(e))?;

            tracing::info!(path = %self.path.display(), "file rotated, reopening");
            lines.extend(self.take_partial());
            self.file = file;
            self.identity = FileIdentity::of(&meta);
            self.offset = 0;
            self.missing = false;
            lines.extend(self.read_available().await?);
        } else if meta.len() < self.offset {
            tracing::info!(path = %self.path.display(), "file truncated, rereading");
            self.file
                .seek(SeekFrom::Start(0))
                .await
                .map_err(|e| self.read_error(e))?;
            self.offset = 0;
            self.pending.clear();
            self.missing = false;
            lines.extend(self.read_available().await?);
        } else {
            self.missing = false;
        }

        Ok(lines)
    }

    /// Reads to end of file and returns every complete line.
    ///
    /// A trailing partial line is kept until its newline arrives.
    async fn read_available(&mut self) -> Result<Vec<String>, MuxError> {
        let mut chunk = [0u8; 8192];
        loop {
            let n = self
                .file
                .read(&mut chunk)
                .await
                .map_err(|e| self.read_error(e))?;
            if n == 0 {
                break;
            }
            self.offset += n as u64;
            self.pending.extend_from_slice(&chunk[..n]);
        }

        let Some(last) = self.pending.iter().rposition(|&b| b == b'\n') else {
            return Ok(Vec::new());
        };
        let rest = self.pending.split_off(last + 1);
        let complete = std::mem::replace(&mut self.pending, rest);

        Ok(complete[..last]
            .split(|&b| b == b'\n')
            .map(decode_line)
            .collect())
    }

    /// The unterminated tail of a file that is being left behind.
    fn take_partial(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        Some(decode_line(&std::mem::take(&mut self.pending)))
    }

    fn read_error(&self, source: io::Error) -> MuxError {
        MuxError::Read {
            path: self.path.clone(),
            source,
        }
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
