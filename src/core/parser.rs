//! Command line tokenizer.
//!
//! A line is split on whitespace: the first word is the command name, the
//! rest are its arguments. There is no quoting; handlers that accept a path
//! containing spaces re-join their arguments themselves.

/// One tokenized input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// Check whether the line had no words at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Arguments joined back with single spaces (for path operands).
    pub fn joined_args(&self) -> String {
        self.args.join(" ")
    }
}

/// Tokenize one input line.
///
/// Blank input yields a command with an empty name, which the registry
/// rejects like any other unknown name.
pub fn parse_input(input: &str) -> ParsedCommand {
    let mut words = input.split_whitespace().map(str::to_string);
    let name = words.next().unwrap_or_default();
    ParsedCommand {
        name,
        args: words.collect(),
    }
}
