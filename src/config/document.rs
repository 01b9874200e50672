//! Raw config document parsing (YAML or TOML, chosen by extension).
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// Primary policy used when the document does not set one.
pub const AUTO_POLICY: &str = "auto";

/// Provider assumed canonical when no provider file exists yet.
pub const DEFAULT_FALLBACK_PROVIDER: &str = "claude";

/// Top-level shape of the sync config document.
///
/// Keys the sync does not read (descriptions, editor hints) are ignored at
/// every level.
#[derive(Debug, Deserialize)]
pub struct RawDocument {
    /// `"auto"` or a fixed provider name.
    #[serde(default = "default_policy")]
    pub primary_provider: String,
    /// Provider treated as canonical when no file exists yet.
    #[serde(default = "default_fallback")]
    pub fallback_provider: String,
    /// Declared commands, in file order.
    #[serde(default)]
    pub commands: Vec<RawCommand>,
}

/// One `commands` entry.
#[derive(Debug, Deserialize)]
pub struct RawCommand {
    /// Command name as used on the command line.
    pub name: String,
    /// Provider name to provider file declaration.
    #[serde(default)]
    pub files: BTreeMap<String, RawProvider>,
}

/// One provider file declaration.
#[derive(Debug, Deserialize)]
pub struct RawProvider {
    /// Path relative to the config file's directory (or absolute).
    pub path: String,
    /// Literal prefix written before the body.
    #[serde(default)]
    pub header: String,
    /// Literal suffix written after the body.
    #[serde(default)]
    pub footer: String,
}

fn default_policy() -> String {
    AUTO_POLICY.to_string()
}

fn default_fallback() -> String {
    DEFAULT_FALLBACK_PROVIDER.to_string()
}

/// Document syntax, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML via `serde_yaml`.
    Yaml,
    /// TOML via `toml`.
    Toml,
}

impl Format {
    /// `.toml` files are TOML; everything else is read as YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// Deserialize `content` as `format`, labelling errors with `path`.
///
/// An empty (or whitespace-only) document deserializes as if it were an
/// empty mapping.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSyntax`] if the text does not match the
/// schema.
pub fn parse_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    path: &Path,
) -> Result<T, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidSyntax {
        path: path.display().to_string(),
        message,
    };
    match format {
        Format::Toml => toml::from_str(content).map_err(|e| invalid(e.message().to_string())),
        Format::Yaml if content.trim().is_empty() => {
            serde_yaml::from_str("{}").map_err(|e| invalid(e.to_string()))
        }
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| invalid(e.to_string())),
    }
}

/// Read and parse the document at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] for a missing file,
/// [`ConfigError::Io`] for an unreadable one, and
/// [`ConfigError::InvalidSyntax`] for a malformed one.
pub fn load_document(path: &Path) -> Result<RawDocument, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_str(&content, Format::from_path(path), path)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn yaml(content: &str) -> Result<RawDocument, ConfigError> {
        parse_str(content, Format::Yaml, &PathBuf::from("sync.yaml"))
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.toml")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("a.TOML")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("a.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("config")), Format::Yaml);
    }

    #[test]
    fn policy_defaults_to_auto() {
        let doc = yaml("commands: []\n").unwrap();
        assert_eq!(doc.primary_provider, "auto");
        assert_eq!(doc.fallback_provider, "claude");
        assert!(doc.commands.is_empty());
    }

    #[test]
    fn empty_document_is_empty_config() {
        let doc = yaml("").unwrap();
        assert_eq!(doc.primary_provider, "auto");
        assert!(doc.commands.is_empty());
    }

    #[test]
    fn parses_providers_with_optional_wrappers() {
        let doc = yaml(
            "primary_provider: claude\n\
             commands:\n\
             \x20 - name: emails\n\
             \x20   files:\n\
             \x20     claude:\n\
             \x20       path: .claude/commands/emails.md\n\
             \x20       header: \"<!-- claude -->\\n\"\n\
             \x20     cursor:\n\
             \x20       path: .cursor/commands/emails.md\n",
        )
        .unwrap();
        assert_eq!(doc.primary_provider, "claude");
        let cmd = &doc.commands[0];
        assert_eq!(cmd.name, "emails");
        assert_eq!(cmd.files["claude"].header, "<!-- claude -->\n");
        assert_eq!(cmd.files["claude"].footer, "");
        assert_eq!(cmd.files["cursor"].header, "");
    }

    #[test]
    fn parses_toml_with_same_schema() {
        let doc: RawDocument = parse_str(
            "primary_provider = \"auto\"\n\n\
             [[commands]]\n\
             name = \"emails\"\n\
             [commands.files.cursor]\n\
             path = \"b.md\"\n\
             footer = \"\\n<!-- end -->\"\n",
            Format::Toml,
            Path::new("sync.toml"),
        )
        .unwrap();
        assert_eq!(doc.commands[0].files["cursor"].footer, "\n<!-- end -->");
    }

    #[test]
    fn missing_path_is_invalid_syntax() {
        let err = yaml("commands:\n  - name: emails\n    files:\n      claude: {}\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSyntax { .. }));
        assert!(err.to_string().contains("sync.yaml"));
    }

    #[test]
    fn unread_keys_are_ignored() {
        let doc = yaml(
            "version: 2\n\
             commands:\n\
             \x20 - name: emails\n\
             \x20   description: triage inbox\n\
             \x20   files:\n\
             \x20     claude:\n\
             \x20       path: a.md\n\
             \x20       owner: me\n",
        )
        .unwrap();
        assert_eq!(doc.commands[0].name, "emails");
        assert_eq!(doc.commands[0].files["claude"].path, "a.md");
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }
}
