//! Console prompting for the preparation and install flows.
//!
//! All prompts insist on a real terminal: on a build server every value
//! has to arrive through a flag or the build file, and failing fast beats
//! hanging on a read from a closed stdin.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use colored::*;

use crate::error::Error;

fn ensure_tty(question: &str) -> Result<()> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(());
    }
    bail!("stdin is not a terminal, cannot ask: {question} (supply the value as an argument)");
}

/// Free-form question; empty input falls back to `default` when given.
pub fn ask(question: &str, default: Option<&str>) -> Result<String> {
    ensure_tty(question)?;
    match default {
        Some(default) => print!("{question} (Default: {default}): "),
        None => print!("{question}: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();
    if input.is_empty() {
        return Ok(default.unwrap_or("").to_string());
    }
    Ok(input.to_string())
}

/// Ask until `validator` accepts the answer.
pub fn ask_validated(
    question: &str,
    default: Option<&str>,
    validator: impl Fn(&str) -> Result<(), Error>,
) -> Result<String> {
    loop {
        let answer = ask(question, default)?;
        match validator(&answer) {
            Ok(()) => return Ok(answer),
            Err(err) => eprintln!("{}", err.to_string().yellow()),
        }
    }
}

/// Secret answer, read without echo.
pub fn ask_hidden(question: &str) -> Result<String> {
    ensure_tty(question)?;
    print!("{question}: ");
    io::stdout().flush()?;
    console::Term::stdout()
        .read_secure_line()
        .context("Failed to read hidden input")
}

/// Numbered selection; plain enter picks `default`.
pub fn select(question: &str, options: &[&str], default: usize) -> Result<usize> {
    ensure_tty(question)?;
    println!("{question}");
    for (i, option) in options.iter().enumerate() {
        if i == default {
            println!(
                "  {}. {}",
                i + 1,
                format!("{option} (Default, press enter to continue)").cyan()
            );
        } else {
            println!("  {}. {option}", i + 1);
        }
    }

    loop {
        print!("Choice [{}]: ", default + 1);
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();
        if input.is_empty() {
            return Ok(default);
        }
        match input.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
            _ => eprintln!(
                "{}",
                format!("Enter a number between 1 and {}", options.len()).yellow()
            ),
        }
    }
}

/// Confirm prompt (Y/n)
pub fn confirm(question: &str) -> Result<bool> {
    ensure_tty(question)?;
    print!("{question} [Y/n]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let trimmed = input.trim().to_lowercase();
    Ok(trimmed.is_empty() || trimmed == "y" || trimmed == "yes")
}
