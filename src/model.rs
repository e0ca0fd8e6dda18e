use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Build target kind
// ────────────────────────────────────────────────────────────────────────────

/// Whether a module compiles production code or tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    #[default]
    Production,
    #[serde(alias = "tests")]
    Test,
}

impl TargetKind {
    /// Identifier written verbatim into the `type` attribute of `<module>`.
    pub fn type_id(self) -> &'static str {
        match self {
            TargetKind::Production => "java-production",
            TargetKind::Test => "java-test",
        }
    }

    pub fn is_tests(self) -> bool {
        matches!(self, TargetKind::Test)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Java source roots
// ────────────────────────────────────────────────────────────────────────────

/// A Java source root, optionally mapped onto a package prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JvmSourceRoot {
    pub path: Utf8PathBuf,
    pub package_prefix: Option<String>,
}

impl JvmSourceRoot {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            package_prefix: None,
        }
    }

    pub fn with_package_prefix(path: impl Into<Utf8PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            package_prefix: Some(prefix.into()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ModuleDescriptor
// ────────────────────────────────────────────────────────────────────────────

/// Everything the compiler driver needs to know about one compilation unit.
///
/// All sequences keep their order in the generated XML; duplicates are
/// written as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub name: String,
    pub output_dir: Utf8PathBuf,
    #[serde(default)]
    pub target: TargetKind,
    #[serde(default)]
    pub sources: Vec<Utf8PathBuf>,
    #[serde(default)]
    pub java_source_roots: Vec<JvmSourceRoot>,
    /// Classpath roots. Entries that are output directories of the current
    /// build are commented out unless compilation is incremental.
    #[serde(default)]
    pub classpath: Vec<Utf8PathBuf>,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>, output_dir: impl Into<Utf8PathBuf>, target: TargetKind) -> Self {
        Self {
            name: name.into(),
            output_dir: output_dir.into(),
            target,
            sources: Vec::new(),
            java_source_roots: Vec::new(),
            classpath: Vec::new(),
        }
    }

    pub fn source(mut self, path: impl AsRef<Utf8Path>) -> Self {
        self.sources.push(path.as_ref().to_path_buf());
        self
    }

    pub fn java_source_root(mut self, root: JvmSourceRoot) -> Self {
        self.java_source_roots.push(root);
        self
    }

    pub fn classpath_entry(mut self, path: impl AsRef<Utf8Path>) -> Self {
        self.classpath.push(path.as_ref().to_path_buf());
        self
    }
}
