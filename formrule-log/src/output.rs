// Log line rendering

use crate::{Format, Level, LogConfig, config, is_level_enabled};
use std::io::Write;

/// Write one line to stderr if `level` is enabled.
#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    if !is_level_enabled(level) {
        return;
    }
    let line = render(config(), level, target, message);
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "{}", line);
}

/// Render a line without writing it.
pub fn render(config: &LogConfig, level: Level, target: &str, message: &str) -> String {
    match config.format {
        Format::Pretty => render_pretty(config, level, target, message),
        Format::Compact => render_compact(config, level, target, message),
        Format::Json => render_json(level, target, message),
    }
}

fn render_pretty(config: &LogConfig, level: Level, target: &str, message: &str) -> String {
    let mut line = String::new();
    if config.timestamps {
        let now = chrono::Local::now();
        line.push_str(&format!("{} ", now.format("%Y-%m-%d %H:%M:%S%.3f")));
    }
    line.push_str(&format!("{:5} ", level.as_str()));
    if config.target && !target.is_empty() {
        line.push_str(&format!("[{}] ", target));
    }
    line.push_str(message);
    line
}

fn render_compact(config: &LogConfig, level: Level, target: &str, message: &str) -> String {
    let mut line = String::new();
    if config.timestamps {
        line.push_str(&format!("{} ", chrono::Local::now().format("%H:%M:%S")));
    }
    line.push(level.as_str().chars().next().unwrap_or('?'));
    line.push(' ');
    if config.target && !target.is_empty() {
        line.push_str(target);
        line.push_str(": ");
    }
    line.push_str(message);
    line
}

#[cfg(feature = "json")]
fn render_json(level: Level, target: &str, message: &str) -> String {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Entry<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let entry = Entry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };
    serde_json::to_string(&entry).unwrap_or_else(|_| message.to_string())
}

#[cfg(not(feature = "json"))]
fn render_json(level: Level, target: &str, message: &str) -> String {
    format!(
        r#"{{"timestamp":"{}","level":"{}","target":"{}","message":"{}"}}"#,
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        escape_json(target),
        escape_json(message)
    )
}

#[cfg(not(feature = "json"))]
fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
