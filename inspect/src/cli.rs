//! # CLI Interface
//!
//! Command-line structure for `lumen-inspect`, via `clap` derive.

use clap::{Parser, Subcommand};

use crate::logging::LogFormat;

/// Inspect and produce ledger operation XDR.
#[derive(Parser, Debug)]
#[command(
    name = "lumen-inspect",
    about = "Inspect and produce ledger operation XDR",
    version,
    propagate_version = true
)]
pub struct InspectCli {
    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "LUMEN_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a base64 XDR operation and print it as JSON.
    Decode(DecodeArgs),
    /// Encode a JSON operation as base64 XDR.
    Encode(EncodeArgs),
    /// Convert between decimal amounts and stroops.
    #[command(subcommand)]
    Amount(AmountCommand),
    /// Parse a `G...` or `M...` account id.
    Account(AccountArgs),
    /// Compute the id of a constant-product liquidity pool.
    PoolId(PoolIdArgs),
}

#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Base64 XDR of a single operation.
    pub xdr: String,

    /// Maximum nesting of recursive structures (claim predicates).
    #[arg(long)]
    pub max_depth: Option<u32>,
}

#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// Operation JSON, in the shape `decode` prints.
    pub json: String,
}

#[derive(Subcommand, Debug)]
pub enum AmountCommand {
    /// Decimal text to raw stroops.
    ToStroops {
        /// Decimal amount, at most 7 fractional digits.
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Raw stroops to decimal text.
    FromStroops {
        #[arg(allow_hyphen_values = true)]
        stroops: i64,
    },
}

#[derive(Parser, Debug)]
pub struct AccountArgs {
    /// Account strkey.
    pub address: String,
}

#[derive(Parser, Debug)]
pub struct PoolIdArgs {
    /// First asset: `native` or `CODE:ISSUER`.
    pub asset_a: String,
    /// Second asset, canonically after the first.
    pub asset_b: String,
}
