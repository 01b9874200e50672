//! Resolve which provider is the source of truth for a command.
use super::snapshot::CommandSnapshot;
use crate::config::{CommandSpec, PrimaryPolicy};
use crate::error::ConfigError;

/// Resolve the primary provider of `spec`.
///
/// A fixed policy must name one of the command's providers.  Under `auto`
/// the existing file with the newest mtime wins; ties go to the first
/// provider in name order.  When no file exists `fallback` is used, and it
/// too must be one of the command's providers.
///
/// # Errors
///
/// Returns [`ConfigError::PrimaryNotFound`] or
/// [`ConfigError::FallbackProviderMissing`] when the resolved name is not a
/// provider of `spec`.
pub fn detect_primary(
    spec: &CommandSpec,
    policy: &PrimaryPolicy,
    fallback: &str,
    snapshot: &CommandSnapshot,
) -> Result<String, ConfigError> {
    if let PrimaryPolicy::Fixed(name) = policy {
        return if spec.providers.contains_key(name) {
            Ok(name.clone())
        } else {
            Err(ConfigError::PrimaryNotFound {
                provider: name.clone(),
                command: spec.name.clone(),
            })
        };
    }

    let newest = snapshot
        .iter()
        .filter(|(name, state)| state.exists() && spec.providers.contains_key(*name))
        .fold(None, |best: Option<(&str, _)>, (name, state)| match best {
            Some((_, mtime)) if state.mtime() <= mtime => best,
            _ => Some((name, state.mtime())),
        });

    match newest {
        Some((name, _)) => Ok(name.to_string()),
        None if spec.providers.contains_key(fallback) => Ok(fallback.to_string()),
        None => Err(ConfigError::FallbackProviderMissing {
            provider: fallback.to_string(),
            command: spec.name.clone(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::test_helpers::{command, provider};
    use crate::sync::snapshot::ProviderState;
    use std::collections::BTreeMap;
    use std::path::Path;
    use std::time::{Duration, UNIX_EPOCH};

    fn spec() -> CommandSpec {
        let dir = Path::new("/repo");
        command(
            "emails",
            vec![
                provider(dir, "claude", "", ""),
                provider(dir, "codex", "", ""),
                provider(dir, "cursor", "", ""),
            ],
        )
    }

    /// Snapshot where each `(name, Some(secs))` exists with that mtime.
    fn snapshot(spec: &CommandSpec, mtimes: &[(&str, Option<u64>)]) -> CommandSnapshot {
        let states: BTreeMap<String, ProviderState> = mtimes
            .iter()
            .map(|(name, secs)| {
                let modified = secs.map(|s| UNIX_EPOCH + Duration::from_secs(s));
                let content = if modified.is_some() { "body" } else { "" };
                (
                    (*name).to_string(),
                    ProviderState::new(content.to_string(), modified, spec),
                )
            })
            .collect();
        CommandSnapshot::from_states(states)
    }

    #[test]
    fn fixed_policy_returns_named_provider() {
        let spec = spec();
        let snap = snapshot(&spec, &[("claude", Some(500)), ("cursor", Some(100))]);
        let policy = PrimaryPolicy::Fixed("cursor".into());
        assert_eq!(detect_primary(&spec, &policy, "claude", &snap).unwrap(), "cursor");
    }

    #[test]
    fn fixed_policy_ignores_file_existence() {
        let spec = spec();
        let snap = snapshot(&spec, &[("claude", Some(500)), ("codex", None)]);
        let policy = PrimaryPolicy::Fixed("codex".into());
        assert_eq!(detect_primary(&spec, &policy, "claude", &snap).unwrap(), "codex");
    }

    #[test]
    fn fixed_policy_with_unknown_provider_fails() {
        let spec = spec();
        let snap = snapshot(&spec, &[]);
        let err = detect_primary(&spec, &PrimaryPolicy::Fixed("gemini".into()), "claude", &snap)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::PrimaryNotFound { ref provider, ref command }
                if provider == "gemini" && command == "emails"
        ));
    }

    #[test]
    fn auto_picks_newest_existing_file() {
        let spec = spec();
        let snap = snapshot(
            &spec,
            &[("claude", Some(100)), ("codex", Some(300)), ("cursor", Some(200))],
        );
        assert_eq!(
            detect_primary(&spec, &PrimaryPolicy::Auto, "claude", &snap).unwrap(),
            "codex"
        );
    }

    #[test]
    fn auto_skips_missing_files() {
        let spec = spec();
        let snap = snapshot(&spec, &[("claude", None), ("codex", None), ("cursor", Some(5))]);
        assert_eq!(
            detect_primary(&spec, &PrimaryPolicy::Auto, "claude", &snap).unwrap(),
            "cursor"
        );
    }

    #[test]
    fn auto_ties_go_to_first_provider_by_name() {
        let spec = spec();
        let snap = snapshot(
            &spec,
            &[("claude", Some(100)), ("codex", Some(200)), ("cursor", Some(200))],
        );
        for _ in 0..3 {
            assert_eq!(
                detect_primary(&spec, &PrimaryPolicy::Auto, "claude", &snap).unwrap(),
                "codex"
            );
        }
    }

    #[test]
    fn auto_without_files_uses_fallback() {
        let spec = spec();
        let snap = snapshot(&spec, &[("claude", None), ("codex", None), ("cursor", None)]);
        assert_eq!(
            detect_primary(&spec, &PrimaryPolicy::Auto, "claude", &snap).unwrap(),
            "claude"
        );
        assert_eq!(
            detect_primary(&spec, &PrimaryPolicy::Auto, "cursor", &snap).unwrap(),
            "cursor"
        );
    }

    #[test]
    fn auto_without_files_and_unknown_fallback_fails() {
        let spec = spec();
        let snap = snapshot(&spec, &[("claude", None)]);
        let err = detect_primary(&spec, &PrimaryPolicy::Auto, "gemini", &snap).unwrap_err();
        assert!(matches!(err, ConfigError::FallbackProviderMissing { .. }));
    }
}
