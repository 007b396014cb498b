// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering shared by the commands.

use std::io::IsTerminal;

use serde::Serialize;

/// Outcome of a single reported line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Ok,
    Warn,
    Fail,
}

/// Colors are used only on a terminal and never with `--plain`.
pub fn use_color(plain: bool) -> bool {
    !plain && std::io::stdout().is_terminal()
}

pub fn print_header(title: &str) {
    println!();
    println!("  {title}");
    println!("  {}", "-".repeat(35));
}

/// Formats one report line, e.g. `✓ id looks good` or `[OK] id looks good`.
pub fn format_line(mark: Mark, message: &str, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        match mark {
            Mark::Ok => format!("{} {}", "✓".green(), message),
            Mark::Warn => format!("{} {}", "!".yellow(), message.yellow()),
            Mark::Fail => format!("{} {}", "✗".red(), message.red()),
        }
    } else {
        let tag = match mark {
            Mark::Ok => "[OK]",
            Mark::Warn => "[WARN]",
            Mark::Fail => "[FAIL]",
        };
        format!("{tag} {message}")
    }
}

pub fn print_line(mark: Mark, message: &str, use_color: bool) {
    println!("    {}", format_line(mark, message, use_color));
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}
