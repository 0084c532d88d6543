//! Integration tests for CHROMA-RS crates.
//!
//! End-to-end scenarios that exercise the interaction between frame
//! intake, the keying backends, and the pipeline orchestrator.
