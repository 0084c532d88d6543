//! LUT generation command.

use anyhow::{Context, Result};
use tracing::debug;

use chroma_core::HueRange;
use chroma_lut::CubeLut;

use crate::LutArgs;

pub fn run(args: LutArgs, verbose: bool) -> Result<()> {
    let range = HueRange::new(args.from, args.to);
    debug!(from = args.from, to = args.to, size = args.size, "generating cube LUT");

    let lut = CubeLut::generate(range, args.size)
        .with_context(|| format!("cannot generate a size-{} LUT", args.size))?;

    std::fs::write(&args.output, lut.to_bytes())
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    if verbose {
        println!(
            "Wrote {} ({} entries, band [{}, {}])",
            args.output.display(),
            lut.entry_count(),
            args.from,
            args.to
        );
    }
    Ok(())
}
