//! Module script generator.
//!
//! - [`module_xml`] – Build the `<modules>` XML document from [`ModuleDescriptor`]s.
//!
//! [`ModuleDescriptor`]: crate::model::ModuleDescriptor

pub mod module_xml;
