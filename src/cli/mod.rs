pub mod launcher;

pub use launcher::{LauncherCommand, run};
