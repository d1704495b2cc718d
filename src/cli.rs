use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::app::{self, App};
use crate::config::Config;
use crate::emi::{self, LoanInput, LoanResult};
use crate::format::money;
use crate::logging::{init_logging, LogTarget};
use crate::theme::ThemeKind;

#[derive(Parser, Debug)]
#[command(name = "emi", version, about = "Loan EMI calculator")]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = "emi.toml")]
    pub config: PathBuf,

    /// Override the configured theme
    #[arg(long, global = true, value_enum)]
    pub theme: Option<ThemeKind>,

    /// Append logs to this file while the form is open
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Calculate once and print the result
    Calc {
        /// Loan amount
        #[arg(long, allow_hyphen_values = true)]
        principal: String,

        /// Annual interest rate in percent
        #[arg(long, allow_hyphen_values = true)]
        rate: String,

        /// Tenure in whole months
        #[arg(long, allow_hyphen_values = true)]
        tenure: String,

        /// Print full-precision JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    input: &'a LoanInput,
    #[serde(flatten)]
    result: &'a LoanResult,
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    match cli.command {
        None => {
            let target = match cli.log_file {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Off,
            };
            init_logging(&target, &config.log_filter, cli.verbose)?;
            tracing::info!(theme = ?config.theme, config = %cli.config.display(), "starting form");
            app::run(App::new(&config))?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Calc {
            principal,
            rate,
            tenure,
            json,
        }) => {
            init_logging(&LogTarget::Stderr, &config.log_filter, cli.verbose)?;
            match emi::calculate_text(&principal, &rate, &tenure) {
                Ok((input, result)) => {
                    let mut stdout = std::io::stdout().lock();
                    if json {
                        write_json(&mut stdout, &input, &result)?;
                    } else {
                        write_text(&mut stdout, &config.currency_symbol, &input, &result)?;
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "calculation rejected");
                    eprintln!("error: {err}");
                    Ok(ExitCode::from(2))
                }
            }
        }
    }
}

fn write_text(
    out: &mut impl Write,
    symbol: &str,
    input: &LoanInput,
    result: &LoanResult,
) -> Result<()> {
    writeln!(out, "Loan Amount: {}", money(symbol, input.principal()))?;
    writeln!(out, "EMI: {}", money(symbol, result.monthly_installment))?;
    writeln!(
        out,
        "Total Interest to be Paid: {}",
        money(symbol, result.total_interest)
    )?;
    writeln!(
        out,
        "Total Payment (Principal + Interest): {}",
        money(symbol, result.total_payment)
    )?;
    Ok(())
}

fn write_json(out: &mut impl Write, input: &LoanInput, result: &LoanResult) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &Report { input, result })?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_report_is_rounded_and_grouped() {
        let (input, result) = emi::calculate_text("500000", "7.5", "60").unwrap();
        let mut out = Vec::new();
        write_text(&mut out, "₹", &input, &result).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Loan Amount: ₹500,000.00\n\
             EMI: ₹10,018.97\n\
             Total Interest to be Paid: ₹101,138.46\n\
             Total Payment (Principal + Interest): ₹601,138.46\n"
        );
    }

    #[test]
    fn json_report_keeps_full_precision() {
        let (input, result) = emi::calculate_text("100000", "10", "12").unwrap();
        let mut out = Vec::new();
        write_json(&mut out, &input, &result).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["principal"], 100000.0);
        assert_eq!(value["annual_rate_percent"], 10.0);
        assert_eq!(value["tenure_months"], 12);
        assert_eq!(value["monthly_installment"], result.monthly_installment);
        assert_eq!(value["total_interest"], result.total_interest);
        assert_eq!(value["total_payment"], result.total_payment);
    }

    #[test]
    fn parses_calc_subcommand_with_negative_values() {
        let cli = Cli::try_parse_from([
            "emi", "calc", "--principal", "-5", "--rate", "7.5", "--tenure", "60",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Calc { principal, json, .. }) => {
                assert_eq!(principal, "-5");
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_theme_override() {
        let cli = Cli::try_parse_from(["emi", "--theme", "classic"]).unwrap();
        assert_eq!(cli.theme, Some(ThemeKind::Classic));
        assert!(cli.command.is_none());
    }
}
