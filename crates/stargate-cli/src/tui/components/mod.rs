//! TUI reusable components.

mod controls;
mod file_browser;
mod help_overlay;
mod portal;
mod spinner;
mod status_bar;
mod target_input;

pub use controls::Controls;
pub use file_browser::{init_browser_state, load_directory, FileBrowser};
pub use help_overlay::HelpOverlay;
pub use portal::{PortalPanel, PortalView};
pub use spinner::{SpinnerState, SpinnerStyle};
pub use status_bar::StatusBar;
pub use target_input::TargetInput;
