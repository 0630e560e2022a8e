//! Positional command line:
//!
//! ```text
//! dispatch <INSTANCE> <HOURS> <PENALTY> <INTER_ARRIVAL> <MODE> [LAMBDA_T] [LAMBDA_S] [--tape <PATH>]
//! ```
//!
//! `--tape` replays one recorded arrival tape in the evaluation modes.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{ArgMatches, Command, arg, value_parser};

pub const MODES: &str = "nearestWarehouse | trainPolicy | testPolicy";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    NearestWarehouse,
    TrainPolicy,
    TestPolicy,
}

impl Mode {
    pub fn parse(name: &str) -> Option<Mode> {
        match name {
            "nearestWarehouse" => Some(Mode::NearestWarehouse),
            "trainPolicy" => Some(Mode::TrainPolicy),
            "testPolicy" => Some(Mode::TestPolicy),
            _ => None,
        }
    }

    /// Epochs run by default in this mode.
    pub fn default_epochs(self) -> u32 {
        match self {
            Mode::TrainPolicy => 8_000,
            Mode::NearestWarehouse | Mode::TestPolicy => 1_000,
        }
    }
}

pub fn cli() -> Command {
    Command::new("dispatch")
        .about("Simulates last-mile order dispatch across warehouses")
        .arg_required_else_help(true)
        .arg(arg!(<INSTANCE> "Instance JSON file").value_parser(value_parser!(PathBuf)))
        .arg(arg!(<HOURS> "Simulated hours per run").value_parser(value_parser!(u64)))
        .arg(
            arg!(<PENALTY> "Cost of a rejected or undelivered order, in seconds")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            arg!(<INTER_ARRIVAL> "Mean seconds between order arrivals")
                .value_parser(value_parser!(f64)),
        )
        // Unknown modes are reported after parsing.
        .arg(arg!(<MODE> "nearestWarehouse, trainPolicy or testPolicy").value_parser(value_parser!(String)))
        .arg(
            arg!([LAMBDA_T] "Temporal discount for training")
                .default_value("1.0")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            arg!([LAMBDA_S] "Spatial discount for training")
                .default_value("1.0")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            arg!(--tape <PATH> "Arrival tape CSV to replay instead of drawing tapes")
                .required(false)
                .value_parser(value_parser!(PathBuf)),
        )
}

#[derive(Clone, Debug)]
pub struct CliArgs {
    pub instance: PathBuf,
    pub hours: u64,
    pub penalty_secs: u64,
    pub mean_inter_arrival_secs: f64,
    /// Raw mode name; resolved with [`Mode::parse`].
    pub mode: String,
    pub lambda_t: f64,
    pub lambda_s: f64,
    pub tape: Option<PathBuf>,
}

impl CliArgs {
    pub fn from_matches(m: &ArgMatches) -> Result<Self> {
        Ok(Self {
            instance:                value(m, "INSTANCE")?,
            hours:                   value(m, "HOURS")?,
            penalty_secs:            value(m, "PENALTY")?,
            mean_inter_arrival_secs: value(m, "INTER_ARRIVAL")?,
            mode:                    value(m, "MODE")?,
            lambda_t:                value(m, "LAMBDA_T")?,
            lambda_s:                value(m, "LAMBDA_S")?,
            tape:                    m.get_one::<PathBuf>("tape").cloned(),
        })
    }

    /// Parse an explicit argument list (program name first).
    pub fn try_parse_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_matches(&cli().try_get_matches_from(args)?)
    }
}

fn value<T: Clone + Send + Sync + 'static>(m: &ArgMatches, id: &str) -> Result<T> {
    m.get_one::<T>(id).cloned().ok_or_else(|| anyhow!("missing argument {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_training_line() {
        let cli =
            CliArgs::try_parse_from(["dispatch", "inst.json", "8", "1800", "25", "trainPolicy", "0.99", "0.5"])
                .unwrap();
        assert_eq!(cli.instance, PathBuf::from("inst.json"));
        assert_eq!(cli.hours, 8);
        assert_eq!(cli.penalty_secs, 1800);
        assert_eq!(cli.mean_inter_arrival_secs, 25.0);
        assert_eq!(Mode::parse(&cli.mode), Some(Mode::TrainPolicy));
        assert_eq!((cli.lambda_t, cli.lambda_s), (0.99, 0.5));
    }

    #[test]
    fn lambdas_default_to_one() {
        let cli = CliArgs::try_parse_from(["dispatch", "i.json", "1", "60", "30", "nearestWarehouse"]).unwrap();
        assert_eq!((cli.lambda_t, cli.lambda_s), (1.0, 1.0));
        assert_eq!(cli.tape, None);
    }

    #[test]
    fn tape_option() {
        let cli = CliArgs::try_parse_from([
            "dispatch", "i.json", "1", "60", "30", "testPolicy", "--tape", "arrivals.csv",
        ])
        .unwrap();
        assert_eq!(cli.tape, Some(PathBuf::from("arrivals.csv")));
        assert_eq!((cli.lambda_t, cli.lambda_s), (1.0, 1.0));
    }

    #[test]
    fn unknown_mode_is_not_a_parse_error() {
        let cli = CliArgs::try_parse_from(["dispatch", "i.json", "1", "60", "30", "bogus"]).unwrap();
        assert_eq!(cli.mode, "bogus");
        assert_eq!(Mode::parse(&cli.mode), None);
    }

    #[test]
    fn short_or_bad_input_fails() {
        assert!(CliArgs::try_parse_from(["dispatch", "i.json"]).is_err());
        assert!(CliArgs::try_parse_from(["dispatch", "i.json", "x", "60", "30", "testPolicy"]).is_err());
        assert!(CliArgs::try_parse_from(["dispatch", "i.json", "1", "60", "fast", "testPolicy"]).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        cli().debug_assert();
    }
}
