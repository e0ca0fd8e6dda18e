use anyhow::Result;
use camino::Utf8PathBuf;
use modscript::config::BuildDescription;
use std::fs;
use tempfile::tempdir;

const BUILD_JSON: &str = r#"{
  "outputDirsToExclude": ["/out/app", "/out/app-test"],
  "modules": [
    {
      "name": "app",
      "outputDir": "/out/app",
      "target": "production",
      "sources": ["/src/main/A.kt", "/src/main/B.kt"],
      "javaSourceRoots": [{ "path": "/src/main/java", "packagePrefix": "org.example" }],
      "classpath": ["/libs/stdlib.jar", "/out/app"]
    },
    {
      "name": "app",
      "outputDir": "/out/app-test",
      "target": "test",
      "sources": ["/src/test/ATest.kt"],
      "classpath": ["/out/app", "/out/app-test", "/libs/junit.jar"]
    }
  ]
}"#;

#[test]
fn load_from_file_and_render() -> Result<()> {
    let tmp = tempdir()?;
    let path = Utf8PathBuf::from_path_buf(tmp.path().join("build.json")).unwrap();
    fs::write(&path, BUILD_JSON)?;

    let desc = BuildDescription::from_file(&path)?;
    assert_eq!(desc.modules.len(), 2);

    let xml = desc.to_module_xml();
    let doc = roxmltree::Document::parse(&xml)?;
    let modules: Vec<_> = doc
        .descendants()
        .filter(|n| n.has_tag_name("module"))
        .map(|n| n.attribute("type").unwrap())
        .collect();
    assert_eq!(modules, vec!["java-production", "java-test"]);

    // Only the jars survive as live classpath entries on a full rebuild.
    let live: Vec<_> = doc
        .descendants()
        .filter(|n| n.has_tag_name("classpath"))
        .map(|n| n.attribute("path").unwrap())
        .collect();
    assert_eq!(live, vec!["/libs/stdlib.jar", "/libs/junit.jar"]);
    assert_eq!(xml.matches("<!-- Output directory, commented out -->").count(), 3);
    Ok(())
}

#[test]
fn incremental_build_keeps_output_dirs() -> Result<()> {
    let mut desc = BuildDescription::from_json_str(BUILD_JSON)?;
    desc.incremental = true;
    let xml = desc.to_module_xml();
    assert!(!xml.contains("commented out"));
    assert_eq!(xml.matches("<classpath ").count(), 5);
    Ok(())
}

#[test]
fn missing_file_reports_path() {
    let err = BuildDescription::from_file(camino::Utf8Path::new("/nonexistent/build.json"))
        .unwrap_err();
    assert!(format!("{:#}", err).contains("/nonexistent/build.json"));
}

#[test]
fn builder_from_description_writes_to_file() -> Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("modules.xml");
    let desc = BuildDescription::from_json_str(BUILD_JSON)?;

    let mut builder = desc.module_xml_builder();
    builder.write_to(std::io::BufWriter::new(fs::File::create(&path)?))?;

    assert_eq!(fs::read_to_string(&path)?, desc.to_module_xml());
    Ok(())
}
