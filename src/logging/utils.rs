//! Log file location, escape-code removal and timestamps.
use std::path::PathBuf;

/// Remove terminal escape sequences so the log file holds plain text.
///
/// Only CSI sequences (`ESC [ ... final`) are emitted by the console
/// formatter; a lone `ESC` followed by anything else is dropped with its
/// next character.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut plain = String::with_capacity(s.len());
    let mut rest = s;
    while let Some((head, tail)) = rest.split_once('\x1b') {
        plain.push_str(head);
        rest = match tail.strip_prefix('[') {
            Some(csi) => csi
                .split_once(|c: char| ('@'..='~').contains(&c))
                .map_or("", |(_, after)| after),
            None => {
                let mut chars = tail.chars();
                chars.next();
                chars.as_str()
            }
        };
    }
    plain.push_str(rest);
    plain
}

/// Cache root: `$XDG_CACHE_HOME`, else `$HOME/.cache`, else `./.cache`.
fn cache_root() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CACHE_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg);
    }
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(".cache")
}

/// Log file for `command` under `<cache>/mailroom/`, creating the directory.
///
/// `None` when the directory cannot be created; logging then stays
/// console-only.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = cache_root().join("mailroom");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC date and time, `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Current UTC time of day, `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}
