use anyhow::{Context, Result};
use calc_engine::{Console, Reply};
use console::style;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use tracing::{debug, warn};

/// Anything that can end a wait at a prompt.
#[derive(Debug)]
pub enum Event {
    Input(Result<Reply>),
    Signal(i32),
}

/// Console backed by the process terminal.
///
/// Lines are read on a dedicated thread so a prompt can be abandoned when an
/// interrupt or terminate signal arrives. Interactive sessions go through a
/// line editor; piped input is read line by line with the prompt echoed to
/// stdout.
pub struct TerminalConsole {
    requests: Sender<String>,
    events: Receiver<Event>,
    pending: bool,
    #[cfg(unix)]
    saved_mode: Option<nix::sys::termios::Termios>,
}

impl TerminalConsole {
    pub fn new() -> Result<Self> {
        let interactive = io::stdin().is_terminal();
        let (request_tx, request_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        #[cfg(unix)]
        forward_signals(event_tx.clone())?;
        spawn_reader(interactive, request_rx, event_tx)?;

        let mut terminal = Self::with_channels(request_tx, event_rx);
        #[cfg(unix)]
        if interactive {
            terminal.saved_mode = nix::sys::termios::tcgetattr(io::stdin()).ok();
        }
        Ok(terminal)
    }

    fn with_channels(requests: Sender<String>, events: Receiver<Event>) -> Self {
        Self {
            requests,
            events,
            pending: false,
            #[cfg(unix)]
            saved_mode: None,
        }
    }

    fn wait(&mut self) -> Result<Reply> {
        match self.events.recv().context("Input thread has stopped")? {
            Event::Input(reply) => {
                self.pending = false;
                reply
            }
            Event::Signal(signal) => {
                debug!(signal, "signal received while waiting for input");
                self.restore_terminal();
                // keep "Exiting..." off the prompt line
                println!();
                Ok(Reply::Interrupted)
            }
        }
    }

    /// The line editor may still hold the terminal in raw mode when a signal
    /// ends the wait.
    fn restore_terminal(&self) {
        #[cfg(unix)]
        if self.pending {
            if let Some(mode) = &self.saved_mode {
                use nix::sys::termios::{SetArg, tcsetattr};

                if let Err(err) = tcsetattr(io::stdin(), SetArg::TCSANOW, mode) {
                    warn!(error = %err, "failed to restore terminal mode");
                }
                // bracketed paste off
                print!("\x1b[?2004l");
                let _ = io::stdout().flush();
            }
        }
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Reply> {
        if !self.pending {
            self.requests
                .send(prompt.to_string())
                .context("Input thread has stopped")?;
            self.pending = true;
        }
        self.wait()
    }

    fn print_line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn print_banner(&mut self, text: &str) {
        println!("{}", style(text).bold());
    }

    fn print_result(&mut self, text: &str) {
        println!("{}", style(text).green());
    }

    fn print_error(&mut self, text: &str) {
        println!("{}", style(text).red());
    }
}

fn spawn_reader(
    interactive: bool,
    requests: Receiver<String>,
    events: Sender<Event>,
) -> Result<()> {
    thread::Builder::new()
        .name("calc-input".to_string())
        .spawn(move || {
            let mut editor = match interactive.then(DefaultEditor::new).transpose() {
                Ok(editor) => editor,
                Err(err) => {
                    let err = anyhow::Error::new(err).context("Failed to initialize line editor");
                    let _ = events.send(Event::Input(Err(err)));
                    return;
                }
            };
            if editor.is_none() {
                debug!("stdin is not a terminal, reading lines directly");
            }

            for prompt in requests {
                let reply = match editor.as_mut() {
                    Some(editor) => read_edited(editor, &prompt),
                    None => read_piped(&mut io::stdin().lock(), &mut io::stdout(), &prompt),
                };
                if events.send(Event::Input(reply)).is_err() {
                    break;
                }
            }
        })
        .context("Failed to spawn input thread")?;
    Ok(())
}

#[cfg(unix)]
fn forward_signals(events: Sender<Event>) -> Result<()> {
    use signal_hook::{consts::signal, iterator::Signals};

    let mut signals = Signals::new([signal::SIGINT, signal::SIGTERM])
        .context("Failed to initialize signals")?;

    thread::Builder::new()
        .name("calc-signals".to_string())
        .spawn(move || {
            for sig in signals.forever() {
                if events.send(Event::Signal(sig)).is_err() {
                    break;
                }
            }
        })
        .context("Failed to spawn signal thread")?;
    Ok(())
}

fn read_edited(editor: &mut DefaultEditor, prompt: &str) -> Result<Reply> {
    match editor.readline(prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                editor.add_history_entry(line.as_str())?;
            }
            Ok(Reply::Line(line))
        }
        Err(ReadlineError::Interrupted) => Ok(Reply::Interrupted),
        Err(ReadlineError::Eof) => Ok(Reply::EndOfInput),
        Err(err) => Err(err).context("Failed to read line"),
    }
}

/// Writes `prompt`, then reads one line without its line terminator.
fn read_piped(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> Result<Reply> {
    output.write_all(prompt.as_bytes())?;
    output.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if read == 0 {
        // keep "Exiting..." off the prompt line
        writeln!(output)?;
        return Ok(Reply::EndOfInput);
    }

    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Reply::Line(line))
}
