//! Operator commands
//!
//! Commands arrive from stdin (one per line) and from Ctrl-C. `end`, `quit`
//! and `q` terminate; any other non-empty line is forwarded as
//! [`Command::Other`] and ignored by the dispatcher.

use std::io::BufRead;
use std::thread;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Command channel capacity
pub const COMMAND_CHANNEL_CAPACITY: usize = 4;

/// Operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Stop acquisition and exit
    Terminate,
    /// Unrecognised input, forwarded as-is
    Other(String),
}

impl Command {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" => None,
            "end" | "quit" | "q" => Some(Command::Terminate),
            other => Some(Command::Other(other.to_string())),
        }
    }

    pub fn is_terminate(&self) -> bool {
        matches!(self, Command::Terminate)
    }
}

/// Forward commands read from `reader` until EOF, `Terminate` or a closed channel
///
/// Blocking; returns the number of commands forwarded.
pub fn read_commands<R: BufRead>(reader: R, tx: &mpsc::Sender<Command>) -> usize {
    let mut forwarded = 0;
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                crate::log_warn!("Command input failed: {}", e);
                break;
            }
        };
        let Some(command) = Command::parse(&line) else {
            continue;
        };
        let terminate = command.is_terminate();
        if tx.blocking_send(command).is_err() {
            break;
        }
        forwarded += 1;
        if terminate {
            break;
        }
    }
    forwarded
}

/// Start the stdin reader thread and the Ctrl-C listener
///
/// Stdin is read on a plain thread so a parked read never holds up runtime
/// shutdown. Ctrl-C keeps being honoured after stdin reaches EOF. The
/// returned handle is the Ctrl-C task; abort it once the dispatcher is done.
pub fn spawn_command_sources(tx: mpsc::Sender<Command>) -> std::io::Result<JoinHandle<()>> {
    let stdin_tx = tx.clone();
    thread::Builder::new()
        .name("stdin-commands".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            let forwarded = read_commands(stdin.lock(), &stdin_tx);
            crate::log_debug!("Command input closed after {} commands", forwarded);
        })?;

    Ok(tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                crate::log_info!("Ctrl-C received");
                let _ = tx.send(Command::Terminate).await;
            }
            Err(e) => crate::log_warn!("Ctrl-C handler unavailable: {}", e),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_terminate_words() {
        assert_eq!(Command::parse("end"), Some(Command::Terminate));
        assert_eq!(Command::parse("quit"), Some(Command::Terminate));
        assert_eq!(Command::parse(" q \n"), Some(Command::Terminate));
    }

    #[test]
    fn test_parse_other_and_blank() {
        assert_eq!(Command::parse("arm"), Some(Command::Other("arm".into())));
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn test_read_commands_stops_after_terminate() {
        let (tx, mut rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let input = Cursor::new("hello\n\nquit\nignored\n");

        let forwarded = read_commands(input, &tx);
        assert_eq!(forwarded, 2);
        assert_eq!(rx.try_recv(), Ok(Command::Other("hello".into())));
        assert_eq!(rx.try_recv(), Ok(Command::Terminate));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_read_commands_until_eof() {
        let (tx, mut rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let forwarded = read_commands(Cursor::new("a\nb"), &tx);
        assert_eq!(forwarded, 2);
        assert_eq!(rx.try_recv(), Ok(Command::Other("a".into())));
        assert_eq!(rx.try_recv(), Ok(Command::Other("b".into())));
    }

    #[test]
    fn test_read_commands_closed_channel() {
        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        drop(rx);
        assert_eq!(read_commands(Cursor::new("end\n"), &tx), 0);
    }
}
