//! Keying pass command.

use anyhow::{Context, Result};
use tracing::debug;

use chroma_core::KeyParams;
use chroma_pipeline::{KeyControl, KeyPipeline, KeyStrategy, MemorySink, MemorySource, TickOutcome};

use crate::KeyArgs;
use super::{load_frame, parse_backend, save_frame};

pub fn run(args: KeyArgs, verbose: bool) -> Result<()> {
    let frame = load_frame(&args.input, args.width, args.height)?;
    let params = resolve_params(&args)?;
    let backend = parse_backend(&args.backend)?;
    debug!(?params, backend = backend.name(), "keying frame");

    let control = KeyControl::new(params);
    let mut pipeline = KeyPipeline::new(
        backend,
        KeyStrategy::PerPixel,
        control,
        args.width,
        args.height,
    )?;

    if let Some(bg_path) = &args.background {
        let mut bg = load_frame(bg_path, args.width, args.height)?;
        // Files carry straight alpha; the compositor wants premultiplied.
        bg.premultiply_alpha();
        pipeline = pipeline.with_background(bg)?;
    }

    let mut source = MemorySource::new(vec![frame]);
    let mut sink = MemorySink::new();
    let outcome = pipeline.tick(&mut source, &mut sink)?;
    anyhow::ensure!(
        outcome == TickOutcome::Presented,
        "keying pass did not produce a frame: {outcome:?}"
    );

    let output = sink
        .last_frame()
        .context("no frame was presented")?;
    save_frame(&args.output, output)?;

    if verbose {
        println!(
            "Keyed {} -> {} ({}x{}, backend {})",
            args.input.display(),
            args.output.display(),
            args.width,
            args.height,
            pipeline.backend_name()
        );
    }
    Ok(())
}

/// Builds KeyParams from a YAML file and/or individual flags; flags win.
fn resolve_params(args: &KeyArgs) -> Result<KeyParams> {
    let mut params = match &args.params {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_yaml::from_str(&text)
                .with_context(|| format!("{} is not a valid parameter file", path.display()))?
        }
        None => KeyParams::green_screen(),
    };

    if let Some(weights) = &args.weights {
        params.weights = [weights[0], weights[1], weights[2]];
    }
    if let Some(threshold) = args.threshold {
        params.threshold = threshold;
    }
    if let Some(smoothing) = args.smoothing {
        params.smoothing = smoothing;
    }
    Ok(params)
}
