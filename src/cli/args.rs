use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "pdc")]
#[command(about = "Command-line client for the polydown timer server")]
#[command(long_about = "pdc - polydown client

Sends timers, alarms, stopwatches and counters to a running polydown server.

ACTIONS:
  add [EXPRESSION]       Create a time object (default, 'add' may be omitted)
  ls, list               List all objects (default with no arguments)
  rm [INDEX|@LABEL]...   Remove objects
  pidof [INDEX|@LABEL]...
  index [PID|@LABEL]...
  cat [INDEX|@LABEL]...  Print object values
  cmd [INDEX|@LABEL]...  Print object commands
  stat [INDEX|@LABEL]... Print everything known about objects
  kill                   Shut the server down

EXPRESSIONS:
  pdc 5                    timer, 5 seconds
  pdc 1h 2m 3s             timer, 1 hour 2 minutes 3 seconds
  pdc 4.5s                 timer, 4.5 seconds (fractions need a unit)
  pdc +12m 180s            alarm, 15 minutes from now
  pdc 5pm                  alarm, the closest 5pm
  pdc 25.06 13:15          alarm, the closest Jun 25th 13:15
  pdc 12/23/2055 7:30:15am alarm, Dec 23rd 2055 7:30:15am
  pdc 5/3 8                alarm, 8am on May 3rd
  pdc 4.5                  alarm, the closest May 4th
  pdc s 1h 3m              stopwatch starting at 1 hour 3 minutes
  pdc c 2 +1               add 1 to counter 2
  pdc c 1 %4               counter 1 modulo 4
  pdc c @abc 0             set counters labeled 'abc' to 0")]
#[command(version)]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Port the server is listening on
    #[arg(short, long, env = "PDC_PORT")]
    pub port: Option<u16>,

    /// Host the server is running on
    #[arg(long, env = "PDC_HOST")]
    pub host: Option<String>,

    /// Run once for every line in FILE, using each line as the arguments
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Print the message that would be sent without contacting the server
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Action and expression, e.g. `rm 3` or `25.06 13:15`
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expression_tokens() {
        let cli = Cli::try_parse_from(["pdc", "25.06", "13:15"]).unwrap();
        assert_eq!(cli.tokens, vec!["25.06", "13:15"]);
        assert!(!cli.dry_run);
        assert_eq!(cli.output, None);
    }

    #[test]
    fn test_parse_no_arguments() {
        let cli = Cli::try_parse_from(["pdc"]).unwrap();
        assert!(cli.tokens.is_empty());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_hyphen_values_after_expression() {
        let cli = Cli::try_parse_from(["pdc", "c", "1", "-5"]).unwrap();
        assert_eq!(cli.tokens, vec!["c", "1", "-5"]);

        let cli = Cli::try_parse_from(["pdc", "c", "4", "^-0.12"]).unwrap();
        assert_eq!(cli.tokens, vec!["c", "4", "^-0.12"]);
    }

    #[test]
    fn test_options_before_expression() {
        let cli =
            Cli::try_parse_from(["pdc", "-n", "-vv", "-o", "json", "-p", "6000", "+10m"]).unwrap();
        assert!(cli.dry_run);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.port, Some(6000));
        assert_eq!(cli.tokens, vec!["+10m"]);
    }

    #[test]
    fn test_input_file() {
        let cli = Cli::try_parse_from(["pdc", "-i", "batch.txt"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("batch.txt")));
    }

    #[test]
    fn test_invalid_port() {
        assert!(Cli::try_parse_from(["pdc", "-p", "99999", "5"]).is_err());
    }
}
