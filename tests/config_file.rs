use std::io::Write;

use showmatch::config::{ConfigLoadError, ShowMatchConfig};
use showmatch::{DisplayRenderer, FloatRule, RenderContext, RenderMode, show_matches_with};
use tempfile::NamedTempFile;

const CONFIG: &str = r#"
version: "1.0"
name: "float widths"
normalize:
  replacements:
    - ["Float32", "Float"]
    - ["Float64", "Float"]
    - [{ pattern: "0x[0-9a-f]+" }, "ADDR"]
compare:
  float_rule: { type: relative, rtol: 0.01 }
"#;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(yaml.as_bytes()).unwrap();
    temp_file
}

#[test]
fn loaded_config_drives_comparison() {
    let file = write_config(CONFIG);
    let config = ShowMatchConfig::from_file(file.path()).expect("config loads");
    let ncfg = config.normalize_config().unwrap();
    let ccfg = config.compare_config();
    assert_eq!(ccfg.float_rule, FloatRule::Relative { rtol: 0.01 });

    let rendered = "Float64 { value: 2.004, at: 0x7ffd5e8c }";
    let matched = show_matches_with(
        rendered,
        &DisplayRenderer,
        &RenderMode::default(),
        &RenderContext::new(),
        "Float32 { value: 2.0, at: 0xdeadbeef }",
        &ncfg,
        &ccfg,
    )
    .expect("replacements and tolerance apply");
    assert!(matched);
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ShowMatchConfig::from_file(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ConfigLoadError::FileRead(_))));
}

#[test]
fn malformed_yaml_is_parse_error() {
    let file = write_config("version: [unterminated\n");
    let result = ShowMatchConfig::from_file(file.path());
    assert!(matches!(result, Err(ConfigLoadError::YamlParse(_))));
}

#[test]
fn flat_replacement_pair_in_file_rejected() {
    let file = write_config(
        r#"
version: "1"
normalize:
  replacements: ["Float64", "Float"]
"#,
    );
    let result = ShowMatchConfig::from_file(file.path());
    assert!(matches!(result, Err(ConfigLoadError::Replacements(_))));
}
