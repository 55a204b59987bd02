use anyhow::Result;

/// Outcome of a single blocking read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Line(String),
    /// The user pressed Ctrl-C (or sent an equivalent terminate signal).
    Interrupted,
    EndOfInput,
}

pub trait Console {
    /// Show `prompt` and block until the user answers, interrupts, or input ends.
    fn read_line(&mut self, prompt: &str) -> Result<Reply>;

    /// Write one line of regular output.
    fn print_line(&mut self, text: &str);

    /// Write a welcome or goodbye line.
    fn print_banner(&mut self, text: &str) {
        self.print_line(text);
    }

    /// Write the line holding a computed result.
    fn print_result(&mut self, text: &str) {
        self.print_line(text);
    }

    /// Write an error line.
    fn print_error(&mut self, text: &str) {
        self.print_line(text);
    }
}

// Exposed for testing
pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Console that replays scripted replies and records everything written.
    ///
    /// Clones share state, so a test can keep one handle while the session
    /// owns another. When the script runs dry every further read reports
    /// end of input.
    #[derive(Default, Clone)]
    pub struct MockConsole {
        pub replies: Arc<Mutex<VecDeque<Reply>>>,
        pub prompts: Arc<Mutex<Vec<String>>>,
        pub output: Arc<Mutex<Vec<String>>>,
    }

    impl MockConsole {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_lines<I, S>(lines: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            let console = Self::new();
            for line in lines {
                console.add_line(line);
            }
            console
        }

        pub fn add_line(&self, line: impl Into<String>) {
            self.add_reply(Reply::Line(line.into()));
        }

        pub fn add_reply(&self, reply: Reply) {
            self.replies.lock().unwrap().push_back(reply);
        }

        pub fn output_lines(&self) -> Vec<String> {
            self.output.lock().unwrap().clone()
        }

        pub fn output_text(&self) -> String {
            self.output_lines().join("\n")
        }

        pub fn prompts_seen(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    impl Console for MockConsole {
        fn read_line(&mut self, prompt: &str) -> Result<Reply> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Reply::EndOfInput))
        }

        fn print_line(&mut self, text: &str) {
            self.output.lock().unwrap().push(text.to_string());
        }
    }
}
