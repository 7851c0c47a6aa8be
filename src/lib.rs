// Library root
// -----------
// This crate exposes the library surface behind the admin CLI. The binary
// (`main.rs`) wires these modules into an interactive terminal dashboard.
//
// Module responsibilities:
// - `config`: Resolves the API base URL and refresh policy from defaults,
//   an optional TOML file, the `API_BASE` variable and CLI flags.
// - `api`: Encapsulates HTTP interactions with the relief API (auth, aid
//   requests, donors, volunteers, tasks).
// - `controller`: Holds the session's view state and turns operator
//   actions into API calls, logging every outcome.
// - `ui`: Implements the terminal menu and renders the view state.
//
// Keeping the controller free of terminal code makes it testable against a
// mock server and replaceable by another front-end later.
pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod state;
pub mod ui;
