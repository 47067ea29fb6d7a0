//! UI Components for the operator console.
//!
//! # Layout Components
//! - [`Header`] - Title bar with last-sync indicator
//!
//! # Status Panels
//! - [`ServerStatus`] - Node cards
//! - [`LogViewer`] - Gateway log with auto-follow
//!
//! # File Console
//! - [`FilePanel`] - File list and upload form ([`FileConsole`] holds the logic)
//! - [`FileDetail`] - Content of the selected file

mod header;
mod server_status;
mod logs;
mod file_console;
mod file_detail;

pub use header::*;
pub use server_status::*;
pub use logs::*;
pub use file_console::*;
pub use file_detail::*;
