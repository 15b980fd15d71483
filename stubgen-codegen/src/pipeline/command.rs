//! External formatter passes.

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use eyre::{Context, Result};

use super::TextTransformer;
use crate::StubError;

/// Expands to the path of the stub being formatted.
pub const STUB_TOKEN: &str = "{stub}";

/// Expands to the shared style configuration path.
pub const STYLE_CONFIG_TOKEN: &str = "{style_config}";

/// Runs an external formatter on the stub file.
///
/// The program is looked up on `PATH`. Options are split with shell quoting
/// rules; when they do not mention `{stub}` the stub path is passed as the
/// first argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTransformer {
    name: String,
    program: String,
    options: String,
    cwd: Option<PathBuf>,
    style_config: Option<PathBuf>,
    ignore_output: bool,
}

impl CommandTransformer {
    /// Create a pass named `name` running `program` with no options.
    pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            options: String::new(),
            cwd: None,
            style_config: None,
            ignore_output: false,
        }
    }

    /// Set the command line options.
    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }

    /// Run the command from `cwd`.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set the path substituted for `{style_config}`.
    pub fn style_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.style_config = Some(path.into());
        self
    }

    /// Discard the command's stdout and stderr.
    pub fn ignore_output(mut self, ignore: bool) -> Self {
        self.ignore_output = ignore;
        self
    }

    /// Build the argument list for formatting `path`.
    pub fn arguments(&self, path: &Path) -> Result<Vec<String>, StubError> {
        let mut args =
            shlex::split(&self.options).ok_or_else(|| StubError::InvalidFormatterOptions {
                formatter: self.name.clone(),
                options: self.options.clone(),
            })?;

        let stub = path.to_string_lossy();
        if !self.options.contains(STUB_TOKEN) {
            args.insert(0, stub.to_string());
        }

        let style_config = self
            .style_config
            .as_deref()
            .map(|p| p.to_string_lossy().into_owned());

        args.into_iter()
            .map(|arg| {
                let arg = arg.replace(STUB_TOKEN, &stub);
                if !arg.contains(STYLE_CONFIG_TOKEN) {
                    return Ok(arg);
                }
                match &style_config {
                    Some(config) => Ok(arg.replace(STYLE_CONFIG_TOKEN, config)),
                    None => Err(StubError::MissingStyleConfig {
                        formatter: self.name.clone(),
                    }),
                }
            })
            .collect()
    }
}

impl TextTransformer for CommandTransformer {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, path: &Path) -> Result<()> {
        let program = which::which(&self.program).map_err(|source| StubError::FormatterNotFound {
            formatter: self.name.clone(),
            program: self.program.clone(),
            source,
        })?;
        let args = self.arguments(path)?;

        let mut command = Command::new(&program);
        command.args(&args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        if self.ignore_output {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }

        tracing::debug!(
            formatter = %self.name,
            program = %program.display(),
            args = ?args,
            "running formatter"
        );

        let status = command
            .status()
            .wrap_err_with(|| format!("failed to run formatter '{}'", self.name))?;

        if !status.success() {
            return Err(StubError::FormatterFailed {
                formatter: self.name.clone(),
                path: path.to_path_buf(),
                status,
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_is_prepended_without_token() {
        let pass = CommandTransformer::new("imports", "zimports").options("-e");
        assert_eq!(pass.arguments(Path::new("alembic/op.pyi")).unwrap(), ["alembic/op.pyi", "-e"]);
    }

    #[test]
    fn test_stub_token_is_substituted() {
        let pass = CommandTransformer::new("style", "black").options("--quiet {stub} --fast");
        assert_eq!(
            pass.arguments(Path::new("op.pyi")).unwrap(),
            ["--quiet", "op.pyi", "--fast"]
        );
    }

    #[test]
    fn test_path_with_spaces_stays_one_argument() {
        let pass = CommandTransformer::new("style", "black").options("{stub}");
        assert_eq!(
            pass.arguments(Path::new("my stubs/op.pyi")).unwrap(),
            ["my stubs/op.pyi"]
        );
    }

    #[test]
    fn test_style_config_is_substituted() {
        let pass = CommandTransformer::new("style", "black")
            .options("--config {style_config}")
            .style_config("/repo/pyproject.toml");
        assert_eq!(
            pass.arguments(Path::new("op.pyi")).unwrap(),
            ["op.pyi", "--config", "/repo/pyproject.toml"]
        );
    }

    #[test]
    fn test_missing_style_config() {
        let pass = CommandTransformer::new("style", "black").options("--config {style_config}");
        assert!(matches!(
            pass.arguments(Path::new("op.pyi")),
            Err(StubError::MissingStyleConfig { .. })
        ));
    }

    #[test]
    fn test_unbalanced_quotes() {
        let pass = CommandTransformer::new("style", "black").options("--config 'oops");
        assert!(matches!(
            pass.arguments(Path::new("op.pyi")),
            Err(StubError::InvalidFormatterOptions { .. })
        ));
    }

    #[test]
    fn test_unknown_program() {
        let pass = CommandTransformer::new("style", "stubgen-no-such-formatter");
        let err = pass.apply(Path::new("op.pyi")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StubError>(),
            Some(StubError::FormatterNotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program() {
        let pass = CommandTransformer::new("style", "false").ignore_output(true);
        let err = pass.apply(Path::new("op.pyi")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StubError>(),
            Some(StubError::FormatterFailed { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_program_rewrites_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("op.pyi");
        std::fs::write(&path, "original\n").unwrap();

        let pass = CommandTransformer::new("style", "sh")
            .options(r#"-c 'printf "formatted\n" > "$1"' sh {stub}"#)
            .cwd(temp.path());
        pass.apply(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "formatted\n");
    }
}
