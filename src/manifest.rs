//! package.json parsing and dependency version patching.
use serde_json::{Value, json};
use std::fmt;

use crate::{error::DepBumpError, error::Result};

/// Canonical path of the manifest within a repository.
pub const MANIFEST_FILE: &str = "package.json";

/// The two dependency maps a package can be declared in, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Direct,
    Development,
}

impl DependencyKind {
    const LOOKUP_ORDER: [DependencyKind; 2] =
        [DependencyKind::Direct, DependencyKind::Development];

    /// The package.json key holding this map.
    pub fn key(&self) -> &'static str {
        match self {
            DependencyKind::Direct => "dependencies",
            DependencyKind::Development => "devDependencies",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// In-memory package.json document. Field order is preserved so the
/// uploaded file only differs from the original in the patched entry and
/// formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    doc: Value,
}

/// Result of a successful [`patch`].
#[derive(Debug, Clone, PartialEq)]
pub struct PatchedManifest {
    pub manifest: Manifest,
    /// Which map contained the package
    pub kind: DependencyKind,
    /// Version specifier that was replaced
    pub previous: Value,
}

impl Manifest {
    /// Parse package.json text. The document must be a JSON object.
    pub fn parse(content: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(content).map_err(|e| {
            DepBumpError::manifest(format!("failed to parse {MANIFEST_FILE}: {e}"))
        })?;
        Self::from_value(doc)
    }

    pub fn from_value(doc: Value) -> Result<Self> {
        if !doc.is_object() {
            return Err(DepBumpError::manifest(format!(
                "{MANIFEST_FILE} must contain a JSON object"
            )));
        }
        Ok(Self { doc })
    }

    pub fn as_value(&self) -> &Value {
        &self.doc
    }

    /// Version specifier for `package` in the given map, if declared.
    pub fn dependency(&self, kind: DependencyKind, package: &str) -> Option<&Value> {
        self.doc.get(kind.key())?.as_object()?.get(package)
    }

    /// Two-space indented JSON, the layout npm writes.
    pub fn to_pretty_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.doc).map_err(|e| {
            DepBumpError::manifest(format!("failed to serialize {MANIFEST_FILE}: {e}"))
        })
    }
}

/// Replace the version of `package` in `manifest`.
///
/// `dependencies` is checked before `devDependencies` and only the first
/// map containing the package is changed. The version is written verbatim:
/// ranges, dist-tags and git urls are all valid specifiers. Fails if
/// neither map declares the package, leaving `manifest` untouched.
pub fn patch(
    manifest: &Manifest,
    package: &str,
    version: &str,
) -> Result<PatchedManifest> {
    for kind in DependencyKind::LOOKUP_ORDER {
        let Some(previous) = manifest.dependency(kind, package).cloned() else {
            continue;
        };

        let mut doc = manifest.doc.clone();
        if let Some(deps) = doc[kind.key()].as_object_mut() {
            deps[package] = json!(version);
        }

        return Ok(PatchedManifest {
            manifest: Manifest { doc },
            kind,
            previous,
        });
    }

    Err(DepBumpError::manifest(format!(
        "package not found in manifest: {package} is not listed in dependencies or devDependencies"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(value: Value) -> Manifest {
        Manifest::from_value(value).unwrap()
    }

    #[test]
    fn patches_direct_dependency() {
        let m = manifest(json!({"dependencies": {"left-pad": "1.0.0"}}));

        let patched = patch(&m, "left-pad", "1.3.0").unwrap();

        assert_eq!(
            patched.manifest.as_value(),
            &json!({"dependencies": {"left-pad": "1.3.0"}})
        );
        assert_eq!(patched.kind, DependencyKind::Direct);
        assert_eq!(patched.previous, json!("1.0.0"));
    }

    #[test]
    fn patches_dev_dependency() {
        let m = manifest(json!({"devDependencies": {"jest": "24.0.0"}}));

        let patched = patch(&m, "jest", "25.0.0").unwrap();

        assert_eq!(
            patched.manifest.as_value(),
            &json!({"devDependencies": {"jest": "25.0.0"}})
        );
        assert_eq!(patched.kind, DependencyKind::Development);
    }

    #[test]
    fn direct_patch_leaves_dev_dependencies_untouched() {
        let m = manifest(json!({
            "dependencies": {"react": "16.0.0"},
            "devDependencies": {"jest": "24.0.0", "eslint": "7.0.0"}
        }));

        let patched = patch(&m, "react", "17.0.2").unwrap();

        assert_eq!(
            patched.manifest.as_value()["devDependencies"],
            m.as_value()["devDependencies"]
        );
        assert_eq!(patched.manifest.as_value()["dependencies"]["react"], "17.0.2");
    }

    #[test]
    fn dev_patch_leaves_dependencies_untouched() {
        let m = manifest(json!({
            "dependencies": {"react": "16.0.0"},
            "devDependencies": {"jest": "24.0.0"}
        }));

        let patched = patch(&m, "jest", "29.7.0").unwrap();

        assert_eq!(
            patched.manifest.as_value()["dependencies"],
            m.as_value()["dependencies"]
        );
        assert_eq!(patched.manifest.as_value()["devDependencies"]["jest"], "29.7.0");
    }

    #[test]
    fn prefers_dependencies_when_listed_in_both() {
        let m = manifest(json!({
            "dependencies": {"typescript": "4.0.0"},
            "devDependencies": {"typescript": "4.0.0"}
        }));

        let patched = patch(&m, "typescript", "5.4.0").unwrap();

        assert_eq!(patched.kind, DependencyKind::Direct);
        assert_eq!(
            patched.manifest.as_value()["devDependencies"]["typescript"],
            "4.0.0"
        );
    }

    #[test]
    fn missing_package_fails_without_mutating_input() {
        let m = manifest(json!({"dependencies": {"react": "16.0.0"}}));
        let before = m.clone();

        let err = patch(&m, "vue", "3.0.0").unwrap_err();

        assert!(matches!(err, DepBumpError::ManifestError(_)));
        assert!(err.to_string().contains("vue"));
        assert_eq!(m, before);
    }

    #[test]
    fn missing_maps_fail() {
        let m = manifest(json!({"name": "app", "version": "1.0.0"}));
        assert!(patch(&m, "react", "18.0.0").is_err());
    }

    #[test]
    fn accepts_non_semver_specifiers_verbatim() {
        let m = manifest(json!({"dependencies": {"lib": "1.0.0"}}));

        for spec in ["^2.0.0", "latest", "github:user/lib#main", "*", ""] {
            let patched = patch(&m, "lib", spec).unwrap();
            assert_eq!(patched.manifest.as_value()["dependencies"]["lib"], spec);
        }
    }

    #[test]
    fn preserves_field_order_and_unknown_fields() {
        let content = r#"{
  "name": "app",
  "scripts": {
    "test": "jest"
  },
  "dependencies": {
    "zod": "3.0.0",
    "axios": "0.21.0"
  }
}"#;
        let m = Manifest::parse(content).unwrap();

        let patched = patch(&m, "axios", "1.6.0").unwrap();

        let expected = content.replace("0.21.0", "1.6.0");
        assert_eq!(patched.manifest.to_pretty_string().unwrap(), expected);
    }

    #[test]
    fn parse_rejects_non_object_documents() {
        assert!(matches!(
            Manifest::parse("[1, 2]").unwrap_err(),
            DepBumpError::ManifestError(_)
        ));
        assert!(matches!(
            Manifest::parse("not json").unwrap_err(),
            DepBumpError::ManifestError(_)
        ));
    }
}
