//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: assembly error (schema names that cannot become GLSL identifiers)
//! - 11: I/O error (reading schema, config or body files)
//! - 12: input error (bad schema or config JSON, unknown placeholder)
//! - 13: serialization error

use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// The schema cannot be assembled into valid GLSL.
    Assembly(String),
    /// A file could not be read.
    Io(String),
    /// A user input error (malformed JSON, unknown placeholder).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Assembly(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Assembly(msg) => write!(f, "{msg}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembly_error_exit_code_is_10() {
        let err = CliError::Assembly("bad name".into());
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        let err = CliError::Io("read failed".into());
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        let err = CliError::Input("unknown placeholder".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        let err = CliError::Serialization("json fail".into());
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn display_is_the_bare_message() {
        let err = CliError::Io("cannot read schema.json".into());
        assert_eq!(err.to_string(), "cannot read schema.json");
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
