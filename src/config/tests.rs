//! Tests for the config module

#[cfg(test)]
mod tests {
    use crate::compiler::ErrorMode;
    use crate::config::{Config, ConfigV1};
    use crate::error::Error;
    use crate::include::IncludePathMode;
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn load(dir: &TempDir) -> ConfigV1 {
        let Config::V1(config) = Config::load_config(dir.path()).unwrap();
        config
    }

    #[test]
    fn loads_yaml_with_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("treeplate.yaml"),
            "schemaVersion: v1\nsource_dir: templates\noutput_dir: build/generated\n",
        )
        .unwrap();

        let config = load(&dir);

        assert_eq!(config.source_dir, Some(dir.path().join("templates")));
        assert_eq!(config.output_dir, Some(dir.path().join("build/generated")));
        assert_eq!(config.source_extension, ".java");
        assert_eq!(config.include_path_mode, IncludePathMode::InputFiles);
        assert!(config.context.is_empty());
        assert!(!config.continue_on_error);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_full_yaml() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("treeplate.yml"),
            r#"
schemaVersion: v1
source_dir: /abs/templates
output_dir: out
include_dirs: [common, /abs/shared]
includes: ["**/*.vm"]
excludes: ["**/skip/**"]
source_extension: .vm
include_path_mode: parent_directories
continue_on_error: true
strict_undefined: true
project:
  name: demo
  version: 1.2.3
context:
  author: Jane
  year: 2024
"#,
        )
        .unwrap();

        let config = load(&dir);

        assert_eq!(config.source_dir, Some(PathBuf::from("/abs/templates")));
        assert_eq!(
            config.include_dirs,
            vec![dir.path().join("common"), PathBuf::from("/abs/shared")]
        );
        assert_eq!(config.includes, vec!["**/*.vm"]);
        assert_eq!(config.excludes, vec!["**/skip/**"]);
        assert_eq!(config.project.name, "demo");
        assert_eq!(config.project.version.as_deref(), Some("1.2.3"));
        assert_eq!(config.context.get("author"), Some(&json!("Jane")));
        assert_eq!(config.context.get("year"), Some(&json!(2024)));

        let options = config.compiler_options();
        assert_eq!(options.source_extension, ".vm");
        assert_eq!(options.include_path_mode, IncludePathMode::ParentDirectories);
        assert_eq!(options.error_mode, ErrorMode::ContinueOnError);
        assert!(options.strict_undefined);
        assert!(options.cache_enabled);
    }

    #[test]
    fn json_takes_precedence_over_yaml() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("treeplate.json"),
            r#"{"schemaVersion": "v1", "source_extension": ".kt"}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("treeplate.yaml"),
            "schemaVersion: v1\nsource_extension: .scala\n",
        )
        .unwrap();

        assert_eq!(load(&dir).source_extension, ".kt");
    }

    #[test]
    fn missing_config_is_reported() {
        let dir = TempDir::new().unwrap();
        match Config::load_config(dir.path()) {
            Err(Error::ConfigNotFound { config_files, .. }) => {
                assert_eq!(config_files, "treeplate.json, treeplate.yaml, treeplate.yml");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(Config::find_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn unknown_schema_version_fails_to_parse() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("treeplate.yaml"), "schemaVersion: v9\n").unwrap();
        assert!(matches!(Config::load_config(dir.path()), Err(Error::Yaml(_))));
    }

    #[test]
    fn validate_rejects_bad_extension() {
        let config = ConfigV1 { source_extension: "java".into(), ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::ConfigValidation(_))));

        let config = ConfigV1 { source_extension: ".".into(), ..Default::default() };
        assert!(config.validate().is_err());

        let config = ConfigV1 { source_extension: String::new(), ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_glob() {
        let config = ConfigV1 { includes: vec!["a/{b".into()], ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::Glob(_))));
    }
}
