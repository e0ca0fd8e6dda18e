//! Module script generation for a compiler driver.
//!
//! This crate provides a `ModuleXmlBuilder` that writes the XML document
//! describing build modules (sources, Java source roots, classpath) which a
//! compiler process reads before compiling.
//!
//! The binary `modscript` turns a JSON build description into such a script.

pub mod config;
pub mod generator;
pub mod model;
