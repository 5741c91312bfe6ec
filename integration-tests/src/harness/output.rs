use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::timeout;

/// A `Write` sink that forwards every completed line to a channel.
pub struct ChannelWriter {
    buf: Vec<u8>,
    tx: UnboundedSender<String>,
}

impl ChannelWriter {
    pub fn new() -> (Self, OutputLines) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { buf: Vec::new(), tx }, OutputLines { rx })
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);

        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..pos]).into_owned();
            self.tx
                .send(text)
                .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "output closed"))?;
        }

        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct OutputLines {
    rx: UnboundedReceiver<String>,
}

impl OutputLines {
    /// Waits for a printed line matching `pred`, calling `poke` before each
    /// wait so file watchers that start late still see an append.
    pub async fn wait_for(
        &mut self,
        mut poke: impl FnMut(),
        pred: impl Fn(&str) -> bool,
    ) -> String {
        for _ in 0..50 {
            poke();
            while let Ok(Some(line)) = timeout(Duration::from_millis(100), self.rx.recv()).await {
                if pred(&line) {
                    return line;
                }
            }
        }
        panic!("no matching output line");
    }

    /// Lines printed so far, without waiting.
    pub fn drain(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(line) = self.rx.try_recv() {
            lines.push(line);
        }
        lines
    }
}
