use miette::Diagnostic;
use std::{
    path::Path,
    process::{Command, ExitStatus},
};
use thiserror::Error;

use crate::config::InstallCommand;

#[derive(Debug, Error, Diagnostic)]
pub enum InstallError {
    #[error("unable to start '{program}'")]
    #[diagnostic(
        code(create_litpress::install::spawn),
        help("Make sure '{program}' is installed and on your PATH")
    )]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}")]
    #[diagnostic(code(create_litpress::install::failed))]
    Failed { program: String, status: ExitStatus },
}

/// Runs the install command inside `project_dir`, streaming its output to the terminal.
pub fn run(command: &InstallCommand, project_dir: &Path) -> Result<(), InstallError> {
    log::debug!(
        "running `{} {}` in {}",
        command.program,
        command.args.join(" "),
        project_dir.display()
    );

    let status = Command::new(&command.program)
        .args(&command.args)
        .current_dir(project_dir)
        .status()
        .map_err(|source| InstallError::Spawn {
            program: command.program.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(InstallError::Failed {
            program: command.program.clone(),
            status,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn command(program: &str, args: &[&str]) -> InstallCommand {
        InstallCommand {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    #[test]
    fn runs_inside_the_project_directory() {
        let dir = tempfile::tempdir().unwrap();

        run(&command("sh", &["-c", "touch installed"]), dir.path()).unwrap();

        assert!(dir.path().join("installed").is_file());
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let error = run(&command("sh", &["-c", "exit 3"]), dir.path()).unwrap_err();

        assert!(matches!(error, InstallError::Failed { .. }));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();

        let error = run(&command("definitely-not-a-package-manager", &[]), dir.path()).unwrap_err();

        assert!(matches!(error, InstallError::Spawn { .. }));
    }
}
