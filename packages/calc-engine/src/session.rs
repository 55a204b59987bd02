use crate::error::CalcError;
use crate::interaction::{Console, Reply};
use crate::operations::{Operation, calculate, format_value};
use crate::validator::{self, SUPPORTED_OPERATIONS};
use anyhow::Result;
use tracing::{debug, info, warn};

pub const OPERATION_PROMPT: &str = "Enter operation (+, -, *, /): ";
pub const FIRST_NUMBER_PROMPT: &str = "Enter first number: ";
pub const SECOND_NUMBER_PROMPT: &str = "Enter second number: ";

pub const WELCOME_MESSAGE: &str = "Welcome to the Calculator CLI!";
pub const QUIT_HINT: &str = "Type 'quit' or 'exit' to exit.";
pub const GOODBYE_MESSAGE: &str = "Thank you for using Calculator CLI!";
pub const EXITING_MESSAGE: &str = "Exiting...";

/// Whether the outer loop should run another cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingOperation,
    AwaitingFirstOperand,
    AwaitingSecondOperand,
    Computing,
    Terminated,
}

/// Drives the read, validate, compute, print cycle over a [`Console`].
pub struct Session<C: Console> {
    console: C,
    state: SessionState,
    cycles: usize,
}

impl<C: Console> Session<C> {
    pub fn new(console: C) -> Self {
        Self {
            console,
            state: SessionState::AwaitingOperation,
            cycles: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of cycles that reached the compute step.
    pub fn completed_cycles(&self) -> usize {
        self.cycles
    }

    /// Runs cycles until the user quits, interrupts, or input ends.
    ///
    /// The goodbye banner is printed exactly once on every exit path, including
    /// when the console itself fails; that failure is returned afterwards.
    pub fn run(&mut self) -> Result<()> {
        info!("calculator session started");
        self.display_welcome();

        let outcome = self.run_cycles();

        self.transition(SessionState::Terminated);
        self.display_goodbye();
        info!(cycles = self.cycles, "calculator session finished");
        outcome
    }

    fn run_cycles(&mut self) -> Result<()> {
        while self.run_single_calculation()? == Flow::Continue {}
        Ok(())
    }

    pub fn display_welcome(&mut self) {
        self.console.print_banner(WELCOME_MESSAGE);
        self.console.print_banner(&format!(
            "Available operations: {}",
            SUPPORTED_OPERATIONS.join(", ")
        ));
        self.console.print_banner(QUIT_HINT);
        self.console.print_line("");
    }

    pub fn display_goodbye(&mut self) {
        self.console.print_banner(GOODBYE_MESSAGE);
    }

    /// One full cycle. Returns [`Flow::Stop`] when a prompt saw a quit
    /// command, an interrupt, or end of input.
    pub fn run_single_calculation(&mut self) -> Result<Flow> {
        self.transition(SessionState::AwaitingOperation);
        let Some(operation) = self.prompt_operation()? else {
            return Ok(self.stop());
        };

        self.transition(SessionState::AwaitingFirstOperand);
        let Some(first) = self.prompt_number(FIRST_NUMBER_PROMPT)? else {
            return Ok(self.stop());
        };

        self.transition(SessionState::AwaitingSecondOperand);
        let Some(second) = self.prompt_number(SECOND_NUMBER_PROMPT)? else {
            return Ok(self.stop());
        };

        self.transition(SessionState::Computing);
        self.perform_calculation(operation, first, second);
        self.console.print_line("");
        self.cycles += 1;

        Ok(Flow::Continue)
    }

    /// Prompts until a supported operation is entered. `None` means stop.
    pub fn prompt_operation(&mut self) -> Result<Option<Operation>> {
        self.prompt_field(OPERATION_PROMPT, validator::validate_operation)
    }

    /// Prompts until a valid number is entered. `None` means stop.
    pub fn prompt_number(&mut self, prompt: &str) -> Result<Option<f64>> {
        self.prompt_field(prompt, validator::validate_number)
    }

    fn prompt_field<T>(
        &mut self,
        prompt: &str,
        validate: impl Fn(&str) -> Result<T, CalcError>,
    ) -> Result<Option<T>> {
        loop {
            let line = match self.console.read_line(prompt)? {
                Reply::Line(line) => line,
                Reply::Interrupted | Reply::EndOfInput => {
                    self.console.print_line(EXITING_MESSAGE);
                    return Ok(None);
                }
            };

            if validator::is_quit_command(&line) {
                debug!(command = %validator::sanitize_input(&line), "quit command received");
                return Ok(None);
            }

            match validate(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => self.console.print_error(&format!("Error: {}", err)),
            }
        }
    }

    pub fn perform_calculation(&mut self, operation: Operation, first: f64, second: f64) {
        match calculate(operation.symbol(), first, second) {
            Ok(value) => {
                debug!(%operation, first, second, value, "calculated");
                self.console
                    .print_result(&format!("Result: {}", format_value(value)));
            }
            Err(err @ CalcError::DivisionByZero) => {
                self.console.print_error(&format!("Error: {}", err));
            }
            Err(err) => {
                warn!(error = %err, "unexpected calculation failure");
                self.console
                    .print_error(&format!("Unexpected error: {}", err));
            }
        }
    }

    fn stop(&mut self) -> Flow {
        self.transition(SessionState::Terminated);
        Flow::Stop
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "session state");
            self.state = next;
        }
    }
}
