//! Command-line surface.

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command};

use crate::types::CostMethod;

#[derive(Debug, PartialEq)]
pub enum Cmd {
    Positions { method: Option<CostMethod> },
    Add { text: String },
    Options { symbol: String },
    Earnings { symbol: Option<String> },
    Prices { symbol: String },
}

#[derive(Debug)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub cmd: Cmd,
}

fn command() -> Command {
    let symbol = |default: Option<&'static str>| {
        let arg = Arg::new("symbol").help("Ticker symbol").num_args(1);
        match default {
            Some(d) => arg.default_value(d),
            None => arg,
        }
    };

    Command::new("portfolio-desk")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Portfolio cost-basis tracker and covered-call analyzer")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .global(true)
                .help("Path to config.yaml (default: $DESK_CONFIG or ./config.yaml)")
                .num_args(1),
        )
        .subcommand(
            Command::new("positions")
                .about("Per-symbol quantity, cost basis and P/L")
                .arg(
                    Arg::new("method")
                        .short('m')
                        .long("method")
                        .help("Cost method: FIFO, LIFO or Average")
                        .num_args(1),
                ),
        )
        .subcommand(
            Command::new("add")
                .about("Record a transaction, e.g. \"BUY 10 AAPL @ 187.5 on 2025-01-02\"")
                .arg(Arg::new("text").required(true).num_args(1..)),
        )
        .subcommand(
            Command::new("options")
                .about("Covered-call candidates for a symbol")
                .arg(symbol(Some("SPY"))),
        )
        .subcommand(
            Command::new("earnings")
                .about("Upcoming earnings, or details for one symbol")
                .arg(symbol(None)),
        )
        .subcommand(
            Command::new("prices")
                .about("Sample price series for a symbol")
                .arg(symbol(Some("SPY"))),
        )
}

fn string_arg(m: &ArgMatches, id: &str) -> Option<String> {
    m.get_one::<String>(id).cloned()
}

impl Args {
    /// Parse the process arguments; `--help`/`--version` exit here.
    pub fn parse() -> anyhow::Result<Self> {
        Self::from_matches(&command().get_matches())
    }

    pub fn parse_from<I, T>(argv: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::from_matches(&command().try_get_matches_from(argv)?)
    }

    fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        // global flag: may sit before or after the subcommand
        let config = matches
            .subcommand()
            .and_then(|(_, m)| string_arg(m, "config"))
            .or_else(|| string_arg(matches, "config"))
            .map(PathBuf::from);

        let cmd = match matches.subcommand() {
            Some(("positions", m)) => Cmd::Positions {
                method: string_arg(m, "method").map(|s| s.parse()).transpose()?,
            },
            Some(("add", m)) => Cmd::Add {
                text: m
                    .get_many::<String>("text")
                    .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
                    .unwrap_or_default(),
            },
            Some(("options", m)) => Cmd::Options {
                symbol: string_arg(m, "symbol").unwrap_or_else(|| "SPY".into()),
            },
            Some(("earnings", m)) => Cmd::Earnings {
                symbol: string_arg(m, "symbol"),
            },
            Some(("prices", m)) => Cmd::Prices {
                symbol: string_arg(m, "symbol").unwrap_or_else(|| "SPY".into()),
            },
            _ => anyhow::bail!("No command given"),
        };

        Ok(Args { config, cmd })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["portfolio-desk"];
        argv.extend_from_slice(args);
        Args::parse_from(argv).unwrap()
    }

    #[test]
    fn positions_with_method() {
        let a = parse(&["positions", "--method", "lifo"]);
        assert_eq!(a.cmd, Cmd::Positions { method: Some(CostMethod::Lifo) });
        assert!(a.config.is_none());
    }

    #[test]
    fn add_joins_unquoted_words() {
        let a = parse(&["add", "BUY", "1", "SPY", "@", "500", "on", "2025-01-02"]);
        assert_eq!(
            a.cmd,
            Cmd::Add {
                text: "BUY 1 SPY @ 500 on 2025-01-02".into()
            }
        );
    }

    #[test]
    fn options_defaults_to_spy_and_global_config() {
        let a = parse(&["options", "--config", "alt.yaml"]);
        assert_eq!(a.cmd, Cmd::Options { symbol: "SPY".into() });
        assert_eq!(a.config, Some(PathBuf::from("alt.yaml")));
    }

    #[test]
    fn earnings_symbol_optional() {
        assert_eq!(parse(&["earnings"]).cmd, Cmd::Earnings { symbol: None });
        assert_eq!(
            parse(&["earnings", "nvda"]).cmd,
            Cmd::Earnings {
                symbol: Some("nvda".into())
            }
        );
    }

    #[test]
    fn unknown_method_is_an_error() {
        assert!(Args::parse_from(["portfolio-desk", "positions", "-m", "HIFO"]).is_err());
    }
}
