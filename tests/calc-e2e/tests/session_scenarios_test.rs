use anyhow::Result;
use calc_engine::interaction::mocks::MockConsole;
use calc_engine::session::{
    EXITING_MESSAGE, FIRST_NUMBER_PROMPT, GOODBYE_MESSAGE, OPERATION_PROMPT, QUIT_HINT,
    SECOND_NUMBER_PROMPT, WELCOME_MESSAGE,
};
use calc_engine::{Reply, Session, SessionState};

fn run_script(lines: &[&str]) -> Result<MockConsole> {
    let console = MockConsole::with_lines(lines.iter().copied());
    let mut session = Session::new(console.clone());
    session.run()?;
    assert_eq!(session.state(), SessionState::Terminated);
    Ok(console)
}

fn count(output: &[String], line: &str) -> usize {
    output.iter().filter(|l| l.as_str() == line).count()
}

#[test]
fn test_addition_scenario() -> Result<()> {
    let console = run_script(&["+", "5", "3", "quit"])?;
    let output = console.output_lines();

    assert!(output.contains(&"Result: 8.0".to_string()));
    assert_eq!(
        console.prompts_seen(),
        vec![
            OPERATION_PROMPT,
            FIRST_NUMBER_PROMPT,
            SECOND_NUMBER_PROMPT,
            OPERATION_PROMPT
        ]
    );
    assert_eq!(count(&output, GOODBYE_MESSAGE), 1);
    assert_eq!(count(&output, EXITING_MESSAGE), 0);
    Ok(())
}

#[test]
fn test_invalid_operation_then_valid() -> Result<()> {
    let console = run_script(&["^", "+", "5", "3", "q"])?;
    let output = console.output_lines();

    let error_at = output
        .iter()
        .position(|l| l == "Error: Invalid operation: '^'. Supported operations: +, -, *, /")
        .expect("invalid operation error printed");
    let result_at = output
        .iter()
        .position(|l| l == "Result: 8.0")
        .expect("result printed");
    assert!(error_at < result_at);
    Ok(())
}

#[test]
fn test_invalid_numbers_reprompt_same_field() -> Result<()> {
    let console = run_script(&["*", "1,000", "4", "", "--2", "2.5", "exit"])?;
    let text = console.output_text();

    assert!(text.contains("Error: Invalid number: '1,000'. Please enter a valid number."));
    assert!(text.contains("Error: Invalid number: ''. Please enter a valid number."));
    assert!(text.contains("Error: Invalid number: '--2'. Please enter a valid number."));
    assert!(text.contains("Result: 10.0"));
    assert_eq!(
        console.prompts_seen(),
        vec![
            OPERATION_PROMPT,
            FIRST_NUMBER_PROMPT,
            FIRST_NUMBER_PROMPT,
            SECOND_NUMBER_PROMPT,
            SECOND_NUMBER_PROMPT,
            SECOND_NUMBER_PROMPT,
            OPERATION_PROMPT,
        ]
    );
    Ok(())
}

#[test]
fn test_division_by_zero_does_not_end_session() -> Result<()> {
    let console = run_script(&["/", "10", "0", "/", "10", "-0", "-", "1", "3", "quit"])?;
    let output = console.output_lines();

    assert_eq!(count(&output, "Error: Division by zero is not allowed."), 2);
    assert!(output.contains(&"Result: -2.0".to_string()));
    Ok(())
}

#[test]
fn test_infinite_operands() -> Result<()> {
    let console = run_script(&["/", "inf", "2", "+", "-INF", "1", "q"])?;
    let output = console.output_lines();

    assert!(output.contains(&"Result: inf".to_string()));
    assert!(output.contains(&"Result: -inf".to_string()));
    Ok(())
}

#[test]
fn test_quit_immediately() -> Result<()> {
    let console = run_script(&["quit"])?;

    assert_eq!(
        console.output_lines(),
        vec![
            WELCOME_MESSAGE,
            "Available operations: +, -, *, /",
            QUIT_HINT,
            "",
            GOODBYE_MESSAGE,
        ]
    );
    Ok(())
}

#[test]
fn test_quit_is_accepted_at_number_prompts() -> Result<()> {
    for script in [&["-", " Q "][..], &["-", "7", "EXIT"][..]] {
        let console = run_script(script)?;
        let output = console.output_lines();
        assert!(!console.output_text().contains("Result:"));
        assert_eq!(output.last().map(String::as_str), Some(GOODBYE_MESSAGE));
    }
    Ok(())
}

#[test]
fn test_interrupt_or_eof_at_every_prompt() -> Result<()> {
    let prefixes: [&[&str]; 3] = [&[], &["+"], &["+", "1"]];

    for prefix in prefixes {
        for reply in [Reply::Interrupted, Reply::EndOfInput] {
            let console = MockConsole::with_lines(prefix.iter().copied());
            console.add_reply(reply.clone());
            // anything after the interrupt must never be read
            console.add_line("+");

            let mut session = Session::new(console.clone());
            session.run()?;

            let output = console.output_lines();
            assert_eq!(count(&output, EXITING_MESSAGE), 1, "{:?} {:?}", prefix, reply);
            assert_eq!(count(&output, GOODBYE_MESSAGE), 1, "{:?} {:?}", prefix, reply);
            assert_eq!(output.last().map(String::as_str), Some(GOODBYE_MESSAGE));
            assert_eq!(console.prompts_seen().len(), prefix.len() + 1);
            assert_eq!(session.completed_cycles(), 0);
        }
    }
    Ok(())
}

#[test]
fn test_several_cycles_are_independent() -> Result<()> {
    let console = MockConsole::with_lines(["+", "1", "2", "*", "3", "4"]);
    let mut session = Session::new(console.clone());
    session.run()?;

    let output = console.output_lines();
    assert!(output.contains(&"Result: 3.0".to_string()));
    assert!(output.contains(&"Result: 12.0".to_string()));
    assert_eq!(session.completed_cycles(), 2);
    // exhausted script reads as end of input
    assert_eq!(count(&output, EXITING_MESSAGE), 1);
    Ok(())
}
