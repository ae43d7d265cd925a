//! Terminal output helpers.

use console::style;

use crate::release::ReleaseState;

/// Print an in-progress status line
pub fn display_status(message: &str) {
    println!("{} {}", style("→").cyan(), message);
}

/// Print a success line
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print an error line to stderr
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a package's release-state transition
pub fn display_release_state(package: &str, state: ReleaseState) {
    let styled = match state {
        ReleaseState::Pushed => style(state.to_string()).green(),
        ReleaseState::Failed => style(state.to_string()).red().bold(),
        _ => style(state.to_string()).cyan(),
    };
    println!("{} {} [{}]", style("•").dim(), package, styled);
}
