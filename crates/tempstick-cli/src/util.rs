//! Shared helpers for command implementations.

use anyhow::{Result, bail};
use serde::Serialize;

/// Parse `key=value` arguments into form/query pairs.
///
/// `true`/`false` values encode as `1`/`0`, the gateway's boolean form
/// encoding. Pairs with an empty key are skipped; a token without `=` is an
/// input error.
pub fn parse_pairs(args: &[String]) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::with_capacity(args.len());
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("expected key=value, got '{arg}'");
        };
        if key.is_empty() {
            continue;
        }
        let value = match value {
            "true" => "1",
            "false" => "0",
            other => other,
        };
        pairs.push((key.to_string(), value.to_string()));
    }
    Ok(pairs)
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
