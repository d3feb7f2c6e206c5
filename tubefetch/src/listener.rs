//! Command listener: reads `pause`/`resume`/`cancel`/`quit` lines from the host.

use crate::console::{Console, Status};
use crate::control::ControlState;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Command sent by the host, one per line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Pause,
    Resume,
    Cancel,
    Quit,
}

impl FromStr for Command {
    type Err = ();

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line.trim() {
            "pause" => Ok(Self::Pause),
            "resume" => Ok(Self::Resume),
            "cancel" => Ok(Self::Cancel),
            "quit" => Ok(Self::Quit),
            _ => Err(()),
        }
    }
}

/// Why the listener loop ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stop {
    Cancel,
    Quit,
    /// Input closed
    Eof,
}

/// Apply commands from `input` until `cancel`, `quit`, or end of input.
pub fn listen<R, W>(
    mut input: R,
    control: &ControlState,
    console: &Console<W>,
) -> io::Result<Stop>
where
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(Stop::Eof);
        }

        // Undecodable bytes are just another unrecognized line
        let line = String::from_utf8_lossy(&buf);
        let Ok(command) = line.parse::<Command>() else {
            tracing::debug!(line = %line.trim_end(), "ignoring unrecognized command");
            continue;
        };

        tracing::debug!(?command, "received command");

        match command {
            Command::Pause => {
                control.set_paused(true);
                console.emit(&Status::Paused)?;
            }
            Command::Resume => {
                control.set_paused(false);
                console.emit(&Status::Resumed)?;
            }
            Command::Cancel => {
                control.set_canceled();
                console.emit(&Status::Cancelled)?;
                return Ok(Stop::Cancel);
            }
            Command::Quit => return Ok(Stop::Quit),
        }
    }
}

/// Run [`listen`] over stdin on a background thread.
///
/// The thread is never joined; the process may exit while it is blocked on a read.
pub fn spawn<W>(control: Arc<ControlState>, console: Console<W>) -> io::Result<JoinHandle<()>>
where
    W: Write + Send + 'static,
{
    thread::Builder::new()
        .name("command-listener".to_string())
        .spawn(move || match listen(io::stdin().lock(), &control, &console) {
            Ok(stop) => tracing::debug!(?stop, "command listener stopped"),
            Err(e) => tracing::warn!(error = %e, "command listener failed"),
        })
}
