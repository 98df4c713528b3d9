//! Console prompt helpers.

use std::io::{self, Write};

/// Prompt for one line of input, trimmed.
pub fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompt until a non-empty line is entered.
pub fn prompt_nonempty(label: &str) -> io::Result<String> {
    loop {
        let value = prompt(label)?;
        if !value.is_empty() {
            return Ok(value);
        }
        println!("Please enter something.");
    }
}

/// Yes/no prompt; accepts y/yes/n/no in any case.
pub fn prompt_yes_no(label: &str) -> io::Result<bool> {
    loop {
        let value = prompt(label)?.to_lowercase();
        match value.as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please enter Y or N."),
        }
    }
}

/// Prompt for a number within 1..=max, used for list selections.
pub fn prompt_selection(label: &str, max: usize) -> io::Result<usize> {
    loop {
        let value = prompt(label)?;
        if let Ok(n) = value.parse::<usize>() {
            if (1..=max).contains(&n) {
                return Ok(n);
            }
        }
        println!("Invalid selection. Please try again.");
    }
}
