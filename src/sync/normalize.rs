//! Wrapper stripping: recover a command's canonical body from provider text.
//!
//! A provider file is `header + body + footer`.  Files can end up carrying a
//! sibling provider's wrapper (an earlier sync copied the wrong one), so the
//! body is recovered by stripping every known wrapper, not just the file's
//! own.
use std::collections::BTreeMap;

use crate::config::ProviderSpec;

/// Remove `header` from the start of `content`.
///
/// Exact match first; otherwise the header with trailing newlines trimmed,
/// followed by exactly one `\n`, is accepted.  An empty header strips nothing.
#[must_use]
pub fn strip_header<'a>(content: &'a str, header: &str) -> &'a str {
    if header.is_empty() {
        return content;
    }
    if let Some(rest) = content.strip_prefix(header) {
        return rest;
    }
    content
        .strip_prefix(header.trim_end_matches('\n'))
        .and_then(|rest| rest.strip_prefix('\n'))
        .unwrap_or(content)
}

/// Remove `footer` from the end of `content`.
///
/// Mirror image of [`strip_header`]: exact match first, otherwise `\n`
/// followed by the footer with leading newlines trimmed.
#[must_use]
pub fn strip_footer<'a>(content: &'a str, footer: &str) -> &'a str {
    if footer.is_empty() {
        return content;
    }
    if let Some(rest) = content.strip_suffix(footer) {
        return rest;
    }
    content
        .strip_suffix(footer.trim_start_matches('\n'))
        .and_then(|rest| rest.strip_suffix('\n'))
        .unwrap_or(content)
}

/// Strip one provider's header and footer.
#[must_use]
pub fn strip_wrapper<'a>(content: &'a str, provider: &ProviderSpec) -> &'a str {
    strip_footer(strip_header(content, &provider.header), &provider.footer)
}

/// Strip every known provider wrapper from `content`.
///
/// Passes over `providers` (in name order) repeat until one changes nothing,
/// so the result is a fixed point and re-normalizing it is a no-op.
#[must_use]
pub fn strip_known_wrappers(content: &str, providers: &BTreeMap<String, ProviderSpec>) -> String {
    let mut body = content;
    loop {
        let before = body.len();
        for provider in providers.values() {
            if body.is_empty() {
                return String::new();
            }
            body = strip_wrapper(body, provider);
        }
        if body.len() == before {
            return body.to_string();
        }
    }
}

/// Build a provider file's full text from its wrapper and a body.
#[must_use]
pub fn assemble(header: &str, body: &str, footer: &str) -> String {
    format!("{header}{body}{footer}")
}
