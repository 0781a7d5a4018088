use anyhow::Result;
use path_absolutize::Absolutize;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Setup of a solution run; the configuration rendered into the report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Setup {
    /// Directory receiving the run report and other outputs.
    #[serde(default = "default_model_output")]
    pub model_output: PathBuf,
    /// Directories holding the model definitions used by the run.
    #[serde(default)]
    pub model_definitions: Vec<PathBuf>,
    /// Prefix of the projects created by the run.
    #[serde(default = "default_project_prefix")]
    pub project_prefix: String,
    /// Environment file with MLRun connection settings.
    #[serde(default)]
    pub mlrun_env: Option<PathBuf>,
    /// MLRun version reported in the footer.
    #[serde(default)]
    pub mlrun_version: Option<String>,
    /// Free-form variables of the run.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

fn default_model_output() -> PathBuf {
    PathBuf::from("output")
}

fn default_project_prefix() -> String {
    "qgate-".to_string()
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            model_output: default_model_output(),
            model_definitions: Vec::new(),
            project_prefix: default_project_prefix(),
            mlrun_env: None,
            mlrun_version: None,
            variables: BTreeMap::new(),
        }
    }
}

impl Setup {
    /// Validate the setup (basic sanity checks).
    pub fn validate(&self) -> Result<()> {
        if self.model_output.as_os_str().is_empty() {
            anyhow::bail!("model_output must not be empty");
        }
        if self.project_prefix.trim().is_empty() {
            anyhow::bail!("project_prefix must not be empty");
        }
        Ok(())
    }

    /// Copy of the setup with `model_output` made absolute against the
    /// current directory.
    pub fn resolved(&self) -> Result<Setup> {
        let mut setup = self.clone();
        setup.model_output = self.model_output.absolutize()?.into_owned();
        Ok(setup)
    }
}

impl crate::reporter::ReportConfig for Setup {
    fn output_dir(&self) -> &Path {
        &self.model_output
    }

    fn dependency_version(&self) -> Option<&str> {
        self.mlrun_version.as_deref()
    }
}

impl fmt::Display for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let definitions = self
            .model_definitions
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Model definitions: {}", definitions)?;
        writeln!(f, "Model output: {}", self.model_output.display())?;
        writeln!(f, "Project prefix: {}", self.project_prefix)?;
        match &self.mlrun_env {
            Some(env) => writeln!(f, "MLRun env: {}", env.display())?,
            None => writeln!(f, "MLRun env: -")?,
        }
        write!(f, "Variables:")?;
        for (key, value) in &self.variables {
            write!(f, "\n  {}: {}", key, value)?;
        }
        Ok(())
    }
}

/// Generate JSON Schema for the Setup type.
pub fn generate_schema() -> Result<String> {
    let schema = schemars::schema_for!(Setup);
    Ok(serde_json::to_string_pretty(&schema)?)
}

/// Load a Setup from a JSON file.
pub fn load_setup(path: &Path) -> Result<Setup> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let setup = serde_json::from_reader(reader)?;
    Ok(setup)
}

/// Create a Setup from a JSON string.
pub fn from_json(json: &str) -> Result<Setup> {
    let setup = serde_json::from_str(json)?;
    Ok(setup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let setup = from_json("{}").unwrap();
        assert_eq!(setup, Setup::default());
        assert!(setup.validate().is_ok());
    }

    #[test]
    fn test_empty_prefix_fails() {
        let setup = Setup {
            project_prefix: "  ".into(),
            ..Setup::default()
        };
        assert!(setup.validate().is_err());
    }

    #[test]
    fn test_display_is_multiline() {
        let mut setup = Setup::default();
        setup.model_definitions.push("defs/basic".into());
        setup.variables.insert("DIR".into(), "data".into());
        setup.variables.insert("RUNS".into(), "3".into());

        let text = setup.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Model definitions: defs/basic");
        assert_eq!(lines[1], "Model output: output");
        assert_eq!(lines[4], "Variables:");
        assert_eq!(&lines[5..], ["  DIR: data", "  RUNS: 3"]);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_resolved_output_is_absolute() {
        let setup = Setup::default().resolved().unwrap();
        assert!(setup.model_output.is_absolute());
        assert!(setup.model_output.ends_with("output"));
    }
}
