//! Feature Table Preprocessing - Entry Point

use anyhow::Context;
use std::fs::File;
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let input_path = args
        .next()
        .unwrap_or_else(|| "models/monatszahlen_verkehrsunfaelle.csv".to_string());
    let output_path = args
        .next()
        .unwrap_or_else(|| "models/processed_data.csv".to_string());

    info!("Reshaping {input_path} into {output_path}");

    let input =
        File::open(&input_path).with_context(|| format!("failed to open {input_path}"))?;
    let rows = preprocess::reshape(input)?;

    let output =
        File::create(&output_path).with_context(|| format!("failed to create {output_path}"))?;
    preprocess::write_csv(&rows, output)?;

    info!("Wrote {} monthly rows to {output_path}", rows.len());
    Ok(())
}
