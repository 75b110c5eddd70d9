//! Command line parsing helpers for collaborator commands.

use std::fmt;

use serde::{Deserialize, Serialize};
use shell_words::{join, split};

use crate::error::RegressError;

/// Parsed command line with program and args separated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// A command with no leading arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append leading arguments
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Parse a command line string into argv.
    ///
    /// This rejects unquoted shell control operators: the command is
    /// executed directly, never through a shell. Quoted or escaped
    /// metacharacters are ordinary argument text.
    pub fn parse(command: &str) -> Result<Self, RegressError> {
        let trimmed = command.trim();
        if trimmed.is_empty() {
            return Err(RegressError::config("Command must not be empty"));
        }

        if contains_shell_operators(trimmed) {
            return Err(RegressError::config(format!(
                "Shell operators are not allowed in '{}'. Provide a single command without pipes, redirection, or command chaining.",
                trimmed
            )));
        }

        let argv = split(trimmed).map_err(|e| {
            RegressError::config(format!("Failed to parse command line '{}': {}", trimmed, e))
        })?;

        let (program, args) = argv
            .split_first()
            .map(|(p, rest)| (p.clone(), rest.to_vec()))
            .ok_or_else(|| RegressError::config("Command must include a program"))?;

        Ok(Self { program, args })
    }

    /// Return argv vector including program.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(1 + self.args.len());
        argv.push(self.program.clone());
        argv.extend(self.args.clone());
        argv
    }

    /// Shell-quoted rendering of this command followed by `trailing`
    pub fn render_with<S: AsRef<str>>(&self, trailing: &[S]) -> String {
        let mut argv = self.argv();
        argv.extend(trailing.iter().map(|s| s.as_ref().to_string()));
        join(argv)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join(self.argv()))
    }
}

impl TryFrom<String> for CommandSpec {
    type Error = RegressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CommandSpec> for String {
    fn from(spec: CommandSpec) -> Self {
        spec.to_string()
    }
}

/// Scan for operators a shell would act on, skipping quoted text.
fn contains_shell_operators(command: &str) -> bool {
    let mut chars = command.chars().peekable();
    let mut in_single = false;
    let mut in_double = false;

    while let Some(c) = chars.next() {
        if in_single {
            if c == '\'' {
                in_single = false;
            }
            continue;
        }
        if in_double {
            match c {
                '"' => in_double = false,
                '\\' => {
                    chars.next();
                }
                _ => {}
            }
            continue;
        }
        match c {
            '\'' => in_single = true,
            '"' => in_double = true,
            '\\' => {
                chars.next();
            }
            '|' | '&' | ';' | '<' | '>' | '`' => return true,
            '$' if chars.peek() == Some(&'(') => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_module_invocation() {
        let spec = CommandSpec::parse("python -m pbtranscript.testkit.compare_isoseq_runs").unwrap();
        assert_eq!(spec.program, "python");
        assert_eq!(
            spec.args,
            vec!["-m", "pbtranscript.testkit.compare_isoseq_runs"]
        );
    }

    #[test]
    fn test_parse_quoted_arguments() {
        let spec = CommandSpec::parse(r#"bash "my runner.sh" --tag 'a b'"#).unwrap();
        assert_eq!(spec.argv(), vec!["bash", "my runner.sh", "--tag", "a b"]);
    }

    #[test]
    fn test_rejects_empty_and_operators() {
        assert!(CommandSpec::parse("   ").is_err());
        assert!(CommandSpec::parse("bash run.sh > log").is_err());
        assert!(CommandSpec::parse("bash run.sh && echo ok").is_err());
        assert!(CommandSpec::parse("echo $(whoami)").is_err());
        assert!(CommandSpec::parse("bash 'unterminated").is_err());
        assert!(CommandSpec::parse("bash run.sh|tee log").is_err());
        assert!(CommandSpec::parse("bash 'a b' ; ls").is_err());
    }

    #[test]
    fn test_quoted_metacharacters_are_arguments() {
        let spec = CommandSpec::parse("bash '/data/R&D/run_isoseq_bam_in.sh'").unwrap();
        assert_eq!(spec.argv(), vec!["bash", "/data/R&D/run_isoseq_bam_in.sh"]);

        let spec = CommandSpec::parse(r#"compare --label "bam>bax" x\;y"#).unwrap();
        assert_eq!(spec.args, vec!["--label", "bam>bax", "x;y"]);
    }

    #[test]
    fn test_rendered_metacharacters_reparse() {
        let spec = CommandSpec::new("python").with_args(["-m", "cmp", "--label", "bam>bax", "R&D"]);
        let text = spec.to_string();
        assert_eq!(CommandSpec::parse(&text).unwrap(), spec);

        let json = serde_json::to_string(&spec).unwrap();
        let back: CommandSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_render_quotes_trailing_paths() {
        let spec = CommandSpec::new("bash").with_args(["run_isoseq_bam_in.sh"]);
        assert_eq!(
            spec.render_with(&["/data/my run/test_bam_in"]),
            "bash run_isoseq_bam_in.sh '/data/my run/test_bam_in'"
        );
    }

    #[test]
    fn test_string_form_reparses() {
        let spec = CommandSpec::new("python").with_args(["-m", "compare runs"]);
        let text: String = spec.clone().into();
        assert_eq!(CommandSpec::parse(&text).unwrap(), spec);
    }
}
