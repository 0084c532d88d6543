//! Backend listing command.

use anyhow::Result;

use chroma_compute::{describe_backends, select_best_backend};

pub fn run() -> Result<()> {
    for (backend, available) in describe_backends() {
        let status = if available { "available" } else { "unavailable" };
        println!("{:<6} {status}", backend.name());
    }
    println!("best: {}", select_best_backend().name());
    Ok(())
}
