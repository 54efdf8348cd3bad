// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Lumen Inspector
//!
//! Entry point for the `lumen-inspect` binary, a thin shell over
//! `lumen-codec` for looking at wire data by hand:
//!
//! - `decode`  — base64 XDR operation to JSON
//! - `encode`  — JSON operation to base64 XDR
//! - `amount`  — decimal text <-> stroops
//! - `account` — key bytes and sub-id of a `G...`/`M...` strkey
//! - `pool-id` — id of the constant-product pool for two assets
//!
//! Results go to stdout; logs go to stderr.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use lumen_codec::account::MuxedAccount;
use lumen_codec::amount;
use lumen_codec::asset::{Asset, LiquidityPoolParameters};
use lumen_codec::config::DecodeLimits;
use lumen_codec::xdr;
use lumen_codec::{Operation, ReadXdr, WriteXdr};

use cli::{AmountCommand, Commands, InspectCli};

fn main() -> Result<()> {
    let cli = InspectCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    let output = match cli.command {
        Commands::Decode(args) => decode(&args.xdr, args.max_depth)?,
        Commands::Encode(args) => encode(&args.json)?,
        Commands::Amount(AmountCommand::ToStroops { amount }) => amount::encode(&amount)
            .with_context(|| format!("cannot convert '{}' to stroops", amount))?
            .to_string(),
        Commands::Amount(AmountCommand::FromStroops { stroops }) => amount::decode(stroops),
        Commands::Account(args) => account(&args.address)?,
        Commands::PoolId(args) => pool_id(&args.asset_a, &args.asset_b)?,
    };

    println!("{}", output);
    Ok(())
}

fn decode(encoded: &str, max_depth: Option<u32>) -> Result<String> {
    let bytes = xdr::decode_base64(encoded).context("input is not base64")?;
    let limits = max_depth.map_or_else(DecodeLimits::default, DecodeLimits::with_max_depth);
    let op = Operation::from_xdr_with_limits(&bytes, limits)
        .context("failed to decode operation XDR")?;
    tracing::info!(
        operation = %op.operation_type(),
        bytes = bytes.len(),
        "decoded operation"
    );
    serde_json::to_string_pretty(&op).context("failed to render operation as JSON")
}

fn encode(json: &str) -> Result<String> {
    let op: Operation = serde_json::from_str(json).context("invalid operation JSON")?;
    let encoded = op
        .to_xdr_base64()
        .with_context(|| format!("cannot encode {} operation", op.operation_type()))?;
    tracing::info!(operation = %op.operation_type(), "encoded operation");
    Ok(encoded)
}

#[derive(Serialize)]
struct AccountReport {
    address: String,
    account_id: String,
    public_key_hex: String,
    sub_id: Option<u64>,
}

fn account(address: &str) -> Result<String> {
    let muxed = MuxedAccount::from_text(address)
        .with_context(|| format!("cannot parse account '{}'", address))?;
    let report = AccountReport {
        address: muxed.address().to_string(),
        account_id: muxed.account_id().to_text(),
        public_key_hex: hex::encode(muxed.ed25519()),
        sub_id: muxed.sub_id(),
    };
    serde_json::to_string_pretty(&report).context("failed to render account as JSON")
}

fn pool_id(asset_a: &str, asset_b: &str) -> Result<String> {
    let a: Asset = asset_a
        .parse()
        .with_context(|| format!("cannot parse asset '{}'", asset_a))?;
    let b: Asset = asset_b
        .parse()
        .with_context(|| format!("cannot parse asset '{}'", asset_b))?;
    let params = LiquidityPoolParameters::constant_product(a, b)
        .context("assets do not form a valid pool")?;
    Ok(params.pool_id().to_hex())
}
