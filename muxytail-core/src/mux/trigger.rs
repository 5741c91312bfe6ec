use super::{MuxError, SeparatorEvent, Shutdown};
use crate::separator::Separator;
use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices, Termios};
use std::io::{self, IsTerminal};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Separator,
    Quit,
}

/// Maps a single keystroke to a trigger.
pub fn decode_trigger(byte: u8) -> Option<Trigger> {
    match byte {
        b'\n' | b'\r' => Some(Trigger::Separator),
        b'q' | b'Q' => Some(Trigger::Quit),
        _ => None,
    }
}

/// Stateful [`decode_trigger`] that counts a `\r\n` pair as one Enter.
#[derive(Debug, Default)]
pub struct TriggerDecoder {
    after_cr: bool,
}

impl TriggerDecoder {
    pub fn feed(&mut self, byte: u8) -> Option<Trigger> {
        let after_cr = std::mem::replace(&mut self.after_cr, byte == b'\r');
        if after_cr && byte == b'\n' {
            return None;
        }
        decode_trigger(byte)
    }
}

/// Turns interactive input into separator events and the quit signal.
pub struct TriggerListener<R> {
    input: R,
    separator: Arc<Separator>,
    separators: UnboundedSender<SeparatorEvent>,
    fatal: UnboundedSender<MuxError>,
    shutdown: Shutdown,
}

impl<R> TriggerListener<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(
        input: R,
        separator: Arc<Separator>,
        separators: UnboundedSender<SeparatorEvent>,
        fatal: UnboundedSender<MuxError>,
        shutdown: Shutdown,
    ) -> Self {
        Self {
            input,
            separator,
            separators,
            fatal,
            shutdown,
        }
    }

    /// Listens until quit, shutdown, or end of input. End of input only
    /// stops the listener.
    pub async fn run(mut self) -> Result<(), MuxError> {
        let mut buf = [0u8; 64];
        let mut decoder = TriggerDecoder::default();
        let mut shutdown = self.shutdown.subscribe();

        loop {
            let read = tokio::select! {
                _ = shutdown.wait() => return Ok(()),
                read = self.input.read(&mut buf) => read,
            };

            let n = read.map_err(MuxError::Input)?;
            if n == 0 {
                tracing::info!("end of input, separator trigger disabled");
                return Ok(());
            }

            for &byte in &buf[..n] {
                match decoder.feed(byte) {
                    Some(Trigger::Separator) => self.spawn_separator(),
                    Some(Trigger::Quit) => {
                        tracing::info!("quit requested");
                        self.shutdown.trigger();
                        return Ok(());
                    }
                    None => {}
                }
            }
        }
    }

    /// Renders off the listener so the next keystroke is read right away.
    fn spawn_separator(&self) {
        let separator = self.separator.clone();
        let separators = self.separators.clone();
        let fatal = self.fatal.clone();

        tokio::spawn(async move {
            match separator.display() {
                Ok(line) => {
                    let _ = separators.send(SeparatorEvent(line));
                }
                Err(e) => {
                    let _ = fatal.send(e);
                }
            }
        });
    }
}

/// Puts stdin in non-canonical, no-echo mode until dropped.
///
/// Does nothing when stdin is not a terminal.
pub struct InputModeGuard {
    original: Option<Termios>,
}

impl InputModeGuard {
    pub fn enable() -> Result<Self, MuxError> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            tracing::debug!("stdin is not a terminal, leaving input mode alone");
            return Ok(Self { original: None });
        }

        let original = termios::tcgetattr(&stdin).map_err(|e| MuxError::Input(e.into()))?;

        let mut keystrokes = original.clone();
        keystrokes
            .local_flags
            .remove(LocalFlags::ICANON | LocalFlags::ECHO);
        keystrokes.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        keystrokes.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;

        termios::tcsetattr(&stdin, SetArg::TCSANOW, &keystrokes)
            .map_err(|e| MuxError::Input(e.into()))?;

        Ok(Self {
            original: Some(original),
        })
    }
}

impl Drop for InputModeGuard {
    fn drop(&mut self) {
        let Some(original) = &self.original else {
            return;
        };
        if let Err(e) = termios::tcsetattr(io::stdin(), SetArg::TCSANOW, original) {
            tracing::warn!(error = %e, "failed to restore terminal mode");
        }
    }
}
