// Library root
// -----------
// The binary (`main.rs`) parses the command line and hands an `ApiClient`
// to one of the front ends below.
//
// Module responsibilities:
// - `api`: request bodies and the blocking client for `/generate` and
//   `/train_lut`.
// - `config`: command-line flags and their environment fallbacks.
// - `error`: the client's error type.
// - `script`: the non-interactive train-then-generate run.
// - `telemetry`: tracing subscriber setup.
// - `ui`: the interactive generate/train panels and LUT name persistence.
pub mod api;
pub mod config;
pub mod error;
pub mod script;
pub mod telemetry;
pub mod ui;
