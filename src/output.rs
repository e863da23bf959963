//! Progress reporting abstraction for gist.
//!
//! Defines the [`Progress`] trait that decouples workflow stage reporting
//! from the display layer. [`ConsoleProgress`] prints colored stage lines to
//! the terminal; tests rely on the default no-op methods to run silently.

use colored::Colorize;

/// Observer for workflow stage changes. All methods default to no-ops, so
/// implementations override only what they display.
pub trait Progress {
    /// A planning turn is starting.
    fn planning(&mut self, _turn: usize) {}

    /// A tool call is about to be handled.
    fn tool_call(&mut self, _name: &str, _arguments: &str) {}

    /// A tool call returned this many items.
    fn tool_items(&mut self, _count: usize) {}

    /// A tool call failed or was refused.
    fn tool_failure(&mut self, _reason: &str) {}

    /// The summarizing stage is starting over this many stored items.
    fn summarizing(&mut self, _item_count: usize) {}
}

/// Prints workflow stages to the terminal as they happen.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn planning(&mut self, turn: usize) {
        println!("{} {}", "planning".bold().cyan(), format!("turn {}", turn).dimmed());
    }

    fn tool_call(&mut self, name: &str, arguments: &str) {
        println!("{} {} {}", "tool".bold().yellow(), name, arguments.dimmed());
    }

    fn tool_items(&mut self, count: usize) {
        println!("{}", format!("  retrieved {} item(s)", count).dimmed());
    }

    fn tool_failure(&mut self, reason: &str) {
        println!("  {} {}", "!".red().bold(), reason);
    }

    fn summarizing(&mut self, item_count: usize) {
        println!(
            "{} {}",
            "summarizing".bold().cyan(),
            format!("{} item(s)", item_count).dimmed()
        );
    }
}

/// Discards all progress events.
#[cfg(test)]
pub struct SilentProgress;

#[cfg(test)]
impl Progress for SilentProgress {}
