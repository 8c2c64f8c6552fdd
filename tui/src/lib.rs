//! Clarify TUI - terminal surface for the Clarify text-correction assistant
//!
//! A thin client: key presses become `SurfaceEvent`s for the embedded
//! Conductor, and `ConductorMessage`s are rendered through a layered
//! compositor.

pub mod app;
pub mod clipboard;
pub mod compositor;
pub mod conductor_client;
pub mod display;
pub mod logging;
pub mod theme;
pub mod widgets;

pub use app::{map_key, Action, App};
pub use clipboard::{Clipboard, Osc52Clipboard};
pub use conductor_client::ConductorClient;
pub use display::DisplayState;
