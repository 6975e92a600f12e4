use std::io::{self, BufWriter, Read, Write};

use anyhow::{Context, Result};
use glyphcols::FontTable;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let mut json = String::new();
    io::stdin()
        .lock()
        .read_to_string(&mut json)
        .context("reading font table from stdin")?;
    let table = FontTable::from_json(&json).context("converting font table")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write!(out, "{}", table.listing())
        .and_then(|()| out.flush())
        .context("writing listing")?;
    Ok(())
}
