//! JSON build description – the input of the `modscript` binary.

use crate::generator::module_xml::ModuleXmlBuilder;
use crate::model::ModuleDescriptor;
use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::collections::HashSet;

/// Modules to compile together, plus the build-wide settings that affect
/// how their classpath is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDescription {
    /// The build reuses previous compilation output.
    #[serde(default)]
    pub incremental: bool,
    /// Output directories of this build, hidden from the classpath of a
    /// full rebuild.
    #[serde(default)]
    pub output_dirs_to_exclude: HashSet<Utf8PathBuf>,
    pub modules: Vec<ModuleDescriptor>,
}

impl BuildDescription {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let description: BuildDescription =
            serde_json::from_str(text).context("Invalid build description")?;
        description.validate()?;
        Ok(description)
    }

    pub fn from_file(path: &Utf8Path) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read {}", path))?;
        Self::from_json_str(&text).with_context(|| format!("Failed to load {}", path))
    }

    fn validate(&self) -> Result<()> {
        for (idx, module) in self.modules.iter().enumerate() {
            if module.name.trim().is_empty() {
                bail!("Module #{} has an empty name", idx);
            }
        }
        Ok(())
    }

    /// A builder holding every module, in order, ready to render.
    pub fn module_xml_builder(&self) -> ModuleXmlBuilder {
        let mut builder = ModuleXmlBuilder::new().with_incremental_compilation(self.incremental);
        for module in &self.modules {
            builder.add_module(module, &self.output_dirs_to_exclude);
        }
        builder
    }

    /// Render the module script for every module, in order.
    pub fn to_module_xml(&self) -> String {
        self.module_xml_builder().render().to_string()
    }
}
