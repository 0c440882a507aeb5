use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, SwError};
use crate::models::JobFamilyConfig;

/// Load a job-family config, apply the CLI workflow override and read the allow-list
pub fn load_job_config(path: &Path, workflow: Option<&str>) -> Result<JobFamilyConfig> {
    if !path.exists() {
        return Err(SwError::PathNotFound {
            what: "config file",
            path: path.to_path_buf(),
        });
    }

    let mut config = JobFamilyConfig::load_from_file(path)?;
    if let Some(workflow) = workflow.filter(|w| !w.is_empty()) {
        debug!("Workflow {} overrides {:?} from config", workflow, config.workflow);
        config.workflow = workflow.to_string();
    }
    config.validate()?;

    if let Some(list_path) = config.run_no_list.clone() {
        config.allow_list = Some(read_allow_list(&list_path)?);
    }

    info!(
        "Configuration loaded: workflow={}, runs={}..={}, job_per_run={}",
        config.workflow, config.run_no_min, config.run_no_max, config.job_per_run
    );
    Ok(config)
}

/// Read a newline-separated list of run/directory tokens
pub fn read_allow_list(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(SwError::PathNotFound {
            what: "run/directory-number list",
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path)?;
    let tokens: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    debug!("Read {} tokens from {}", tokens.len(), path.display());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConfigError;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"{"workflow": "ana", "project": "p", "track": "analysis", "command": "run.sh"}"#;

    #[test]
    fn test_missing_config_is_path_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_job_config(&temp_dir.path().join("config.json"), None);
        let error = result.unwrap_err();
        assert!(matches!(error, SwError::PathNotFound { what: "config file", .. }));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let result = load_job_config(&path, None);
        assert!(matches!(result, Err(SwError::Config(ConfigError::ParseError(..)))));
    }

    #[test]
    fn test_workflow_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, MINIMAL).unwrap();

        let config = load_job_config(&path, Some("other")).unwrap();
        assert_eq!(config.workflow, "other");

        let config = load_job_config(&path, Some("")).unwrap();
        assert_eq!(config.workflow, "ana");
    }

    #[test]
    fn test_override_satisfies_missing_workflow() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"project": "p", "track": "t", "command": "c"}"#).unwrap();

        assert!(matches!(
            load_job_config(&path, None),
            Err(SwError::Config(ConfigError::MissingField("workflow")))
        ));
        assert!(load_job_config(&path, Some("ana")).is_ok());
    }

    #[test]
    fn test_allow_list_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let list = temp_dir.path().join("runs.txt");
        fs::write(&list, "000010\n  000012 \n\n").unwrap();
        let path = temp_dir.path().join("config.json");
        let json = format!(
            r#"{{"workflow": "ana", "project": "p", "track": "t", "command": "c", "runNoList": {:?}}}"#,
            list.display().to_string()
        );
        fs::write(&path, json).unwrap();

        let config = load_job_config(&path, None).unwrap();
        assert_eq!(
            config.allow_list,
            Some(vec!["000010".to_string(), "000012".to_string()])
        );
    }

    #[test]
    fn test_missing_allow_list_is_path_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_allow_list(&temp_dir.path().join("runs.txt"));
        assert!(matches!(
            result,
            Err(SwError::PathNotFound { what: "run/directory-number list", .. })
        ));
    }
}
