//! Ticker symbols and helpers for the feed driver.
//!
//! The adapter itself treats a stock identifier as an opaque string; the `Ticker`
//! enum only bounds what the synthetic generator and the CLI accept.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use strum_macros::{Display, EnumString};

use crate::error::GraphError;

/// Trait providing file parsing for tickers.
pub trait TickerParser {
    /// Parses tickers from a buffered reader.
    ///
    /// Symbols may be separated by commas, whitespace or new lines; empty tokens are
    /// skipped. Returns an error if any token cannot be parsed.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Ticker>, GraphError>;
}

impl TickerParser for Ticker {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, GraphError> {
        let mut tickers = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(GraphError::Io)?;
            let tokens = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty());

            for token in tokens {
                match token.parse::<Self>() {
                    Ok(ticker) => tickers.push(ticker),
                    Err(e) => {
                        return Err(GraphError::ParseTickersFile(format!("{token}: {e}")));
                    }
                }
            }
        }
        Ok(tickers)
    }
}

/// Set of supported ticker symbols.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[clap(rename_all = "UPPER")]
#[strum(ascii_case_insensitive)]
pub enum Ticker {
    ABC,
    DEF,
    AAPL,
    MSFT,
    GOOGL,
    AMZN,
    NVDA,
    META,
    TSLA,
    JPM,
    GS,
    MS,
    BLK,
    C,
    V,
    NFLX,
    ADBE,
    ORCL,
    INTC,
    CSCO,
}
