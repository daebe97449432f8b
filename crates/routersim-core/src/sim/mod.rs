// ── Simulation generators ──
//
// Pure functions from (current router facts, RNG) to fresh outputs.
// They never see the aggregate, so the engine decides what to store.
// Every generator takes `&mut dyn RngCore`; seed the engine to make
// their output reproducible.

pub mod firmware;
pub mod scan;
pub mod speed;
