//! Code to configure and run the tokenizer and parse-tree builder over a file
//! holding one expression per line.

use std::fmt::Display;
use std::fs;

use clap::{Parser, ValueEnum};

use crate::lexical_analysis::{tokenize, ScanError, TokenSequence};
use crate::parse_tree::ParseTree;
use crate::parse_tree_construction::build_tree;

/// What the driver reports for the input lines.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverMode {
    /// Tokenize every line and report which ones are valid.
    Check,
    /// Print the parse tree of every valid line.
    Tree,
    /// Both of the above, in that order.
    Both,
}

/// Config for the driver. Instantiate via `DriverConfig::parse()`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct DriverConfig {
    /// What to report for the input lines.
    #[arg(short, long, value_enum, default_value_t = DriverMode::Both)]
    pub mode: DriverMode,

    /// The input filepath to read expressions from, one per line.
    #[arg(short, long)]
    pub input_filepath: String,
}

/// Errors that may be thrown when running the driver.
#[derive(Debug)]
pub enum RunError {
    ConfigError(String),
    InputFileError(std::io::Error),
}

/// Display trait implementation for RunError.
impl Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigError(config_err_string) => {
                return write!(f, "Driver configuration error: {}", config_err_string);
            }

            Self::InputFileError(io_err) => {
                return write!(f, "Input file error: {}", io_err);
            }
        }
    }
}

impl From<std::io::Error> for RunError {
    fn from(value: std::io::Error) -> Self {
        return Self::InputFileError(value);
    }
}

/// Reads the lines of a text file, stripping trailing whitespace.
pub fn read_lines(filepath: &str) -> Result<Vec<String>, RunError> {
    let file_contents = fs::read_to_string(filepath)?;

    return Ok(file_contents
        .lines()
        .map(|line| String::from(line.trim_end()))
        .collect());
}

/// The outcome of tokenizing each input line, in input order.
#[derive(Debug)]
pub struct ValidityReport {
    pub outcomes: Vec<(String, Result<TokenSequence, ScanError>)>,
}

impl ValidityReport {
    pub fn valid_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_ok())
            .count()
    }

    pub fn invalid_count(&self) -> usize {
        self.outcomes.len() - self.valid_count()
    }

    pub fn all_valid(&self) -> bool {
        self.invalid_count() == 0
    }
}

impl Display for ValidityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (line, outcome) in &self.outcomes {
            match outcome {
                Ok(tokens) => writeln!(
                    f,
                    "The tokenized string for input string {} is {}",
                    line, tokens
                )?,
                Err(scan_error) => writeln!(f, "Invalid input string {}: {}", line, scan_error)?,
            }
        }

        if self.all_valid() {
            return write!(f, "All lines are valid");
        }

        return write!(
            f,
            "{} of {} lines are valid",
            self.valid_count(),
            self.outcomes.len()
        );
    }
}

/// Tokenizes every line, keeping the diagnostic for each rejected one.
pub fn check_validity(lines: &[String]) -> ValidityReport {
    let outcomes: Vec<(String, Result<TokenSequence, ScanError>)> = lines
        .iter()
        .map(|line| (line.clone(), tokenize(line)))
        .collect();

    for (line, outcome) in &outcomes {
        if let Err(scan_error) = outcome {
            tracing::info!(line = line.as_str(), %scan_error, "rejected line");
        }
    }

    let report = ValidityReport { outcomes };

    tracing::info!(
        valid = report.valid_count(),
        invalid = report.invalid_count(),
        "checked lines"
    );

    return report;
}

/// Builds the parse tree of every valid line. Rejected lines are skipped.
pub fn build_parse_trees(lines: &[String]) -> Vec<(String, ParseTree)> {
    let mut out = Vec::new();

    for line in lines {
        match tokenize(line) {
            Ok(tokens) => out.push((line.clone(), build_tree(&tokens))),
            Err(scan_error) => {
                tracing::info!(line = line.as_str(), %scan_error, "skipping line");
            }
        }
    }

    return out;
}

/// Renders each tree after a blank line, the way they are printed.
pub fn parse_trees_to_string(parse_trees: &[(String, ParseTree)]) -> String {
    return parse_trees
        .iter()
        .map(|(_, parse_tree)| parse_tree.to_string())
        .collect::<Vec<_>>()
        .join("\n\n");
}

/// Run the driver on the input file given in the config, returning the
/// report to print.
pub fn run_driver(config: &DriverConfig) -> Result<String, RunError> {
    if config.input_filepath.is_empty() {
        return Err(RunError::ConfigError(String::from("No input filepath given")));
    }

    let lines = read_lines(&config.input_filepath)?;

    tracing::debug!(
        filepath = config.input_filepath.as_str(),
        line_count = lines.len(),
        "read input lines"
    );

    let mut sections = Vec::new();

    if matches!(config.mode, DriverMode::Check | DriverMode::Both) {
        sections.push(check_validity(&lines).to_string());
    }

    if matches!(config.mode, DriverMode::Tree | DriverMode::Both) {
        sections.push(parse_trees_to_string(&build_parse_trees(&lines)));
    }

    return Ok(sections.join("\n\n"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical_analysis::{DotFault, LambdaMarkerFault};

    const VALID_EXAMPLES: &str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/test_inputs/valid_examples.txt");
    const INVALID_EXAMPLES: &str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/test_inputs/invalid_examples.txt");

    fn config_for(filepath: &str, mode: DriverMode) -> DriverConfig {
        DriverConfig {
            mode,
            input_filepath: String::from(filepath),
        }
    }

    #[test]
    fn test_valid_examples_all_pass() {
        let lines = read_lines(VALID_EXAMPLES).expect("Unable to read valid examples");
        let report = check_validity(&lines);

        assert_eq!(report.outcomes.len(), 9);
        assert!(report.all_valid());
        assert!(report.to_string().ends_with("All lines are valid"));
    }

    // Test if every invalid example is rejected with its own diagnostic.
    #[test]
    fn test_invalid_examples_all_fail() {
        let lines = read_lines(INVALID_EXAMPLES).expect("Unable to read invalid examples");
        let report = check_validity(&lines);

        let scan_errors: Vec<ScanError> = report
            .outcomes
            .iter()
            .map(|(_, outcome)| outcome.clone().expect_err("invalid example was accepted"))
            .collect();

        assert_eq!(
            scan_errors,
            vec![
                ScanError::InvalidIdentifier { position: 1 },
                ScanError::MalformedLambdaMarker {
                    fault: LambdaMarkerFault::SpaceAfterMarker,
                    position: 0
                },
                ScanError::UnmatchedOpenParen { position: 0 },
                ScanError::UnmatchedCloseParen { position: 1 },
                ScanError::MalformedDot {
                    fault: DotFault::NotPrecededByLetter,
                    position: 0
                },
                ScanError::MalformedDot {
                    fault: DotFault::InvalidFollowingCharacter,
                    position: 2
                },
                ScanError::DisallowedCharacter {
                    character: '$',
                    position: 1
                },
            ]
        );
        assert!(report.to_string().ends_with("0 of 7 lines are valid"));
    }

    // Test if rejected lines get no tree.
    #[test]
    fn test_build_parse_trees_skips_invalid_lines() {
        let lines = vec![
            String::from("x"),
            String::from("1x"),
            String::from(r"\x.x"),
        ];

        let parse_trees = build_parse_trees(&lines);
        let tree_lines: Vec<&str> = parse_trees.iter().map(|(line, _)| line.as_str()).collect();

        assert_eq!(tree_lines, vec!["x", r"\x.x"]);
        assert_eq!(
            parse_trees_to_string(&parse_trees),
            [
                "x",
                "----x",
                "",
                r"\_x_(_x_)",
                r"----\",
                "----x",
                "----(_x_)",
                "--------(",
                "--------x",
                "--------)",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_run_driver_modes() {
        let check_output = run_driver(&config_for(VALID_EXAMPLES, DriverMode::Check))
            .expect("run_driver returned unexpected error");
        let tree_output = run_driver(&config_for(VALID_EXAMPLES, DriverMode::Tree))
            .expect("run_driver returned unexpected error");
        let both_output = run_driver(&config_for(VALID_EXAMPLES, DriverMode::Both))
            .expect("run_driver returned unexpected error");

        assert!(check_output.starts_with("The tokenized string for input string x is x"));
        assert!(!tree_output.contains("All lines are valid"));
        assert!(tree_output.starts_with("x\n----x"));
        assert_eq!(both_output, format!("{}\n\n{}", check_output, tree_output));
    }

    #[test]
    fn test_run_driver_errors() {
        let missing_file = run_driver(&config_for("does/not/exist.txt", DriverMode::Check));
        let no_file = run_driver(&config_for("", DriverMode::Check));

        assert!(matches!(missing_file, Err(RunError::InputFileError(_))));
        assert!(matches!(no_file, Err(RunError::ConfigError(_))));
    }

    #[test]
    fn test_driver_config_parsing() {
        let config =
            DriverConfig::parse_from(["lambda-parse-tree", "-i", "lines.txt", "-m", "tree"]);

        assert_eq!(config.mode, DriverMode::Tree);
        assert_eq!(config.input_filepath, "lines.txt");
    }
}
