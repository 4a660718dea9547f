use std::io::Write;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

fn print_status(style: Style, label: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        style.apply_to(label),
    );
}

/// Print a Cargo-style status line: `   Packaging vyra v1.0 (release)`
///
/// The `label` is right-aligned to 12 characters and printed in bold green.
pub fn status(label: &str, message: &str) {
    print_status(Style::new().green().bold(), label, message);
}

/// Like [`status`] but with a bold cyan label, for informational lines.
pub fn status_info(label: &str, message: &str) {
    print_status(Style::new().cyan().bold(), label, message);
}

/// Like [`status`] but with a bold yellow label.
pub fn status_warn(label: &str, message: &str) {
    print_status(Style::new().yellow().bold(), label, message);
}

/// Create a ticking spinner for work of unknown length (e.g. writing a package).
///
/// Finish it with [`ProgressBar::finish_and_clear`].
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
