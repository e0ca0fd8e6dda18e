//! Generate the module script XML handed to the compiler driver.
//!
//! The document has one `<modules>` root with a `<module>` element per
//! compilation unit. Element and attribute names are read by the compiler
//! process and must not change.

use crate::model::*;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;
use std::io::Write;
use tracing::{debug, trace};

pub const MODULES: &str = "modules";
pub const MODULE: &str = "module";
pub const NAME: &str = "name";
pub const TYPE: &str = "type";
pub const OUTPUT_DIR: &str = "outputDir";
pub const SOURCES: &str = "sources";
pub const PATH: &str = "path";
pub const JAVA_SOURCE_ROOTS: &str = "javaSourceRoots";
pub const JAVA_SOURCE_PACKAGE_PREFIX: &str = "packagePrefix";
pub const CLASSPATH: &str = "classpath";

/// Whether the root element has been closed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Open,
    Closed,
}

/// Accumulates `<module>` elements and renders the final document.
///
/// A builder holds unsynchronized state and must stay on one thread or task;
/// every mutating call takes `&mut self`.
///
/// ```
/// use modscript::generator::module_xml::ModuleXmlBuilder;
/// use modscript::model::{ModuleDescriptor, TargetKind};
/// use std::collections::HashSet;
///
/// let app = ModuleDescriptor::new("app", "/out", TargetKind::Production).source("/src/A.kt");
/// let mut builder = ModuleXmlBuilder::new();
/// builder.add_module(&app, &HashSet::new());
/// assert!(builder.render().contains("<sources path=\"/src/A.kt\"/>"));
/// ```
#[derive(Debug)]
pub struct ModuleXmlBuilder {
    out: String,
    level: usize,
    state: BuilderState,
    incremental: bool,
}

impl Default for ModuleXmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleXmlBuilder {
    /// Start a new document for a non-incremental build.
    pub fn new() -> Self {
        let mut builder = Self {
            out: String::with_capacity(1024),
            level: 0,
            state: BuilderState::Open,
            incremental: false,
        };
        builder.open_tag(MODULES);
        builder
    }

    /// Set whether the build reuses previous compilation output. When it
    /// does, output directories stay live on the classpath.
    pub fn with_incremental_compilation(mut self, enabled: bool) -> Self {
        self.incremental = enabled;
        self
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// Append one `<module>` element.
    ///
    /// Classpath entries found in `output_dirs_to_exclude` are written inside
    /// an XML comment unless incremental compilation is enabled.
    ///
    /// # Panics
    ///
    /// Panics if the document was already rendered.
    pub fn add_module(
        &mut self,
        module: &ModuleDescriptor,
        output_dirs_to_exclude: &HashSet<Utf8PathBuf>,
    ) -> &mut Self {
        assert!(
            self.state == BuilderState::Open,
            "module script already rendered"
        );
        debug!(
            module = %module.name,
            kind = module.target.type_id(),
            sources = module.sources.len(),
            classpath = module.classpath.len(),
            "adding module"
        );

        if module.target.is_tests() {
            self.line("<!-- Module script for tests -->");
        } else {
            self.line("<!-- Module script for production -->");
        }

        let open = format!(
            "<{} {}=\"{}\" {}=\"{}\" {}=\"{}\">",
            MODULE,
            NAME,
            xml_escape_attr(&module.name),
            TYPE,
            xml_escape_attr(module.target.type_id()),
            OUTPUT_DIR,
            escaped_path(&module.output_dir)
        );
        self.line(&open);
        self.level += 1;

        for source in &module.sources {
            let element = format!("<{} {}=\"{}\"/>", SOURCES, PATH, escaped_path(source));
            self.line(&element);
        }

        self.write_java_source_roots(&module.java_source_roots);
        self.write_classpath(&module.classpath, output_dirs_to_exclude, self.incremental);

        self.close_tag(MODULE);
        self
    }

    fn write_java_source_roots(&mut self, roots: &[JvmSourceRoot]) {
        self.line("<!-- Java source roots -->");
        for root in roots {
            let mut element = format!(
                "<{} {}=\"{}\"",
                JAVA_SOURCE_ROOTS,
                PATH,
                escaped_path(&root.path)
            );
            if let Some(ref prefix) = root.package_prefix {
                element.push_str(&format!(
                    " {}=\"{}\"",
                    JAVA_SOURCE_PACKAGE_PREFIX,
                    xml_escape_attr(prefix)
                ));
            }
            element.push_str("/>");
            self.line(&element);
        }
    }

    fn write_classpath(
        &mut self,
        entries: &[Utf8PathBuf],
        output_dirs_to_exclude: &HashSet<Utf8PathBuf>,
        incremental: bool,
    ) {
        self.line("<!-- Classpath -->");
        for entry in entries {
            // Output directories of this build may still hold classes whose
            // sources were deleted, so hide them from a full rebuild.
            let is_output = output_dirs_to_exclude.contains(entry) && !incremental;
            if is_output {
                trace!(path = %entry, "commenting out output directory");
                self.line("<!-- Output directory, commented out -->");
                self.line("<!-- ");
                self.level += 1;
            }

            let element = format!("<{} {}=\"{}\"/>", CLASSPATH, PATH, escaped_path(entry));
            if is_output {
                // `--` is not allowed inside a comment.
                self.line(&element.replace('-', "&#45;"));
            } else {
                self.line(&element);
            }

            if is_output {
                self.level -= 1;
                self.line("-->");
            }
        }
    }

    /// Close the document on the first call and return its text. Later calls
    /// return the same text.
    pub fn render(&mut self) -> &str {
        if self.state == BuilderState::Open {
            self.close_tag(MODULES);
            self.state = BuilderState::Closed;
            debug!(bytes = self.out.len(), "module script rendered");
        }
        &self.out
    }

    /// Render the document and write it to `writer`.
    pub fn write_to<W: Write>(&mut self, mut writer: W) -> Result<()> {
        let text = self.render();
        writer
            .write_all(text.as_bytes())
            .context("Failed to write module script")?;
        writer.flush().context("Failed to flush module script")?;
        Ok(())
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.level {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open_tag(&mut self, tag: &str) {
        self.line(&format!("<{}>", tag));
        self.level += 1;
    }

    fn close_tag(&mut self, tag: &str) {
        self.level -= 1;
        self.line(&format!("</{}>", tag));
    }
}

/// Escape an attribute value: `&`, `<`, `>`, `"` and `'`, plus newlines
/// as `&#xA;` and carriage returns as `&#xD;` so they survive attribute
/// normalization.
fn xml_escape_attr(s: &str) -> String {
    let escaped = quick_xml::escape::escape(s);
    if escaped.contains(['\n', '\r']) {
        escaped.replace('\n', "&#xA;").replace('\r', "&#xD;")
    } else {
        escaped.into_owned()
    }
}

/// Path with `/` separators, escaped for use in an attribute.
fn escaped_path(path: &Utf8Path) -> String {
    xml_escape_attr(&system_independent(path))
}

/// Replace Windows separators with `/`.
pub fn system_independent(path: &Utf8Path) -> String {
    path.as_str().replace('\\', "/")
}
