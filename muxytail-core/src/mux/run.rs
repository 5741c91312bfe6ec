use super::{
    FollowContext, Follower, LineEvent, MuxError, SeparatorEvent, Shutdown, TriggerListener,
};
use crate::conf::RuntimeSettings;
use std::future::Future;
use std::io::Write;
use tokio::io::AsyncRead;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Runs the multiplexer until shutdown fires or a task fails.
///
/// Every source is opened before any task starts, so a bad path fails the
/// run without printing anything. Lines and separators are written to `out`
/// one at a time, each followed by a newline. Events still queued when
/// shutdown fires are dropped. Returns once every follower has stopped.
pub async fn run<R, W>(
    settings: &RuntimeSettings,
    input: R,
    out: &mut W,
    shutdown: Shutdown,
) -> Result<(), MuxError>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: Write,
{
    // Fail early when the separator cannot be sized.
    let columns = settings.separator.columns()?;

    let mut followers = Vec::with_capacity(settings.sources.len());
    for path in &settings.sources {
        followers.push(Follower::start(path).await?);
    }

    let (line_tx, mut lines) = mpsc::unbounded_channel();
    let (separator_tx, mut separators) = mpsc::unbounded_channel();
    let (fatal_tx, mut fatal) = mpsc::unbounded_channel();

    let ctx = FollowContext {
        chain: settings.chain.clone(),
        lines: line_tx,
        format_workers: settings.format_workers,
        poll_interval: settings.poll_interval,
        shutdown: shutdown.clone(),
    };
    let following: Vec<JoinHandle<()>> = followers
        .into_iter()
        .map(|follower| spawn_reporting(follower.run(ctx.clone()), fatal_tx.clone()))
        .collect();

    let listener = TriggerListener::new(
        input,
        settings.separator.clone(),
        separator_tx,
        fatal_tx.clone(),
        shutdown.clone(),
    );
    spawn_reporting(listener.run(), fatal_tx);

    tracing::info!(
        sources = settings.sources.len(),
        format_workers = settings.format_workers,
        separator_columns = columns,
        "multiplexer running"
    );

    let result = consume(out, &mut lines, &mut separators, &mut fatal, &shutdown).await;
    shutdown.trigger();

    // Followers hold their files open until they return.
    for task in following {
        let _ = task.await;
    }

    if let Err(e) = &result {
        tracing::error!(error = %e, "multiplexer failed");
    }
    result
}

fn spawn_reporting<F>(task: F, fatal: UnboundedSender<MuxError>) -> JoinHandle<()>
where
    F: Future<Output = Result<(), MuxError>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = task.await {
            let _ = fatal.send(e);
        }
    })
}

/// Writes events until shutdown or a fatal error.
///
/// Shutdown and fatal errors win over anything queued.
pub(super) async fn consume<W: Write>(
    out: &mut W,
    lines: &mut UnboundedReceiver<LineEvent>,
    separators: &mut UnboundedReceiver<SeparatorEvent>,
    fatal: &mut UnboundedReceiver<MuxError>,
    shutdown: &Shutdown,
) -> Result<(), MuxError> {
    let mut listener = shutdown.subscribe();

    loop {
        if shutdown.is_triggered() {
            return Ok(());
        }

        // Lines come before separators only when both are ready at once.
        let payload = tokio::select! {
            biased;
            _ = listener.wait() => return Ok(()),
            Some(e) = fatal.recv() => return Err(e),
            Some(LineEvent(line)) = lines.recv() => line,
            Some(SeparatorEvent(separator)) = separators.recv() => separator,
        };

        writeln!(out, "{payload}")
            .and_then(|()| out.flush())
            .map_err(MuxError::Output)?;
    }
}
