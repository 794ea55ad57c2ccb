use colored::Colorize;
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::{
    answers::{Answers, AnswersError},
    config::TemplateConfig,
    errors::{create_dir, FileOperation, IoError, LoadError},
    fetch::{self, FetchError, WORDPRESS_REPOSITORY},
    install::{self, InstallError},
    materialize::{self, MaterializeError},
    preview::preview_as_tree,
    project::{ProjectError, ProjectName},
    prompt::{self, PromptError},
    settings::Settings,
    transactions::{Active, Transaction},
};

#[derive(Debug, Error, Diagnostic)]
pub enum ScaffoldError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Project(#[from] ProjectError),

    #[error("A directory named '{}' already exists", .path.display())]
    #[diagnostic(
        code(create_litpress::destination_exists),
        help("Use --force to generate into the existing directory")
    )]
    DestinationExists { path: PathBuf },

    #[error("No template found at '{}'", .path.display())]
    #[diagnostic(
        code(create_litpress::template_not_found),
        help("Point --templates at a directory containing one folder per project kind")
    )]
    TemplateNotFound { path: PathBuf },

    #[error("Unable to load template config")]
    #[diagnostic(code(create_litpress::template_config))]
    Config(#[source] LoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Answers(#[from] AnswersError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Materialize(#[from] MaterializeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Install(#[from] InstallError),
}

/// Where answers come from.
#[derive(Debug, Clone)]
pub enum AnswerSource {
    Prompt,
    File(PathBuf),
    Given(Answers),
}

/// Everything needed for one scaffold run. No process-wide state is consulted.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub project_name: String,
    /// Directory the project folder is created in.
    pub workdir: PathBuf,
    /// Directory holding one template folder per project kind.
    pub templates_root: PathBuf,
    pub answers: AnswerSource,
    /// Generate into an existing directory.
    pub force: bool,
    /// Preview the rendered template without fetching or writing anything.
    pub dry_run: bool,
    pub skip_install: bool,
    /// Overrides the project kind's theme repository.
    pub theme_repository: Option<String>,
    pub wordpress_repository: String,
}
impl ScaffoldRequest {
    pub fn new(project_name: &str, workdir: &Path, templates_root: &Path) -> Self {
        Self {
            project_name: project_name.to_string(),
            workdir: workdir.to_path_buf(),
            templates_root: templates_root.to_path_buf(),
            answers: AnswerSource::Prompt,
            force: false,
            dry_run: false,
            skip_install: false,
            theme_repository: None,
            wordpress_repository: WORDPRESS_REPOSITORY.to_string(),
        }
    }
}

fn collect_answers(source: &AnswerSource) -> Result<Answers, ScaffoldError> {
    match source {
        AnswerSource::Prompt => Ok(prompt::get_answers()?),
        AnswerSource::File(path) => Ok(Answers::from_file(path)?),
        AnswerSource::Given(answers) => Ok(answers.clone()),
    }
}

fn finish_logs(name: &ProjectName) {
    println!("{} was created.", name.to_string().bold());
    println!("Run the following commands to start!");
    println!("------------------------------------");
    println!("{}", format!("cd {}", name).bright_blue());
    println!("{}", "npm start".bright_blue());
}

/// Generates a new project from the request.
///
/// Fetches WordPress (when asked to) and the theme, renders the project template over them,
/// and runs the template's install command.
///
/// Returns the path of the generated project.
///
/// # Errors
///
/// Returns a [`ScaffoldError`] if:
///
/// - The project name is invalid, or the destination exists without `force`.
/// - The template directory or its config cannot be loaded.
/// - Answers cannot be prompted for or loaded.
/// - A repository cannot be cloned, or a file cannot be read, copied or written.
/// - The install command cannot be started or fails.
///
/// If the project directory was created by this run, it is removed again on failure.
pub fn create_project(request: &ScaffoldRequest) -> Result<PathBuf, ScaffoldError> {
    let name = ProjectName::parse(&request.project_name)?;

    let destination = request.workdir.join(name.as_str());
    let existed = destination.exists();

    if existed && !request.force {
        return Err(ScaffoldError::DestinationExists { path: destination });
    }

    let answers = collect_answers(&request.answers)?;

    let template_dir = request.templates_root.join(answers.project.slug());
    if !template_dir.is_dir() {
        return Err(ScaffoldError::TemplateNotFound { path: template_dir });
    }

    let config = TemplateConfig::load(&template_dir).map_err(ScaffoldError::Config)?;
    let settings = Settings::from_answers(&name, &answers);

    if request.dry_run {
        let vfs = materialize::plan(&template_dir, &settings, &config.rules)?;
        preview_as_tree(&vfs, &destination);
        return Ok(destination);
    }

    let mut trx = Transaction::<Active>::new();

    if !existed {
        create_dir(&destination)?;
        trx.track_dir(destination.clone());
    }

    // clones are staged here and removed when the run ends
    let staging = tempfile::tempdir()
        .map_err(|error| IoError::new(FileOperation::Mkdir, std::env::temp_dir(), error))?;

    if answers.install_wordpress {
        println!("{}", "Cloning WordPress...".cyan());
        fetch::fetch_and_overlay(
            &request.wordpress_repository,
            &staging.path().join("wordpress"),
            &[".git", "wp-content/themes"],
            &destination,
        )?;
    }

    let theme = request
        .theme_repository
        .clone()
        .unwrap_or_else(|| answers.project.theme_repository());

    println!("{}", "Cloning theme...".cyan());
    fetch::fetch_and_overlay(
        &theme,
        &staging.path().join("theme-files"),
        &[".git", ".gitignore"],
        &destination,
    )?;

    materialize::materialize(&template_dir, &destination, &settings, &config.rules)?;

    if request.skip_install {
        log::info!("skipping install step");
    } else {
        install::run(&config.install, &destination)?;
    }

    trx.commit();

    finish_logs(&name);

    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectKind;
    use indexmap::IndexMap;
    use std::fs;

    fn answers() -> Answers {
        Answers {
            project: ProjectKind::Ausar,
            local_wordpress_url: "http://localhost/demo".to_string(),
            install_wordpress: false,
            database: None,
            extra: IndexMap::new(),
        }
    }

    fn templates() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let ausar = root.path().join("ausar");
        fs::create_dir_all(&ausar).unwrap();
        fs::write(ausar.join("README.md"), "# {{projectName}}").unwrap();
        root
    }

    #[test]
    fn invalid_name_is_rejected_before_anything_else() {
        let workdir = tempfile::tempdir().unwrap();
        let templates = templates();
        let request = ScaffoldRequest::new("bad name", workdir.path(), templates.path());

        let error = create_project(&request).unwrap_err();

        assert!(matches!(error, ScaffoldError::Project(ProjectError::InvalidName { .. })));
        assert_eq!(fs::read_dir(workdir.path()).unwrap().count(), 0);
    }

    #[test]
    fn existing_destination_requires_force() {
        let workdir = tempfile::tempdir().unwrap();
        let templates = templates();
        fs::create_dir(workdir.path().join("demo")).unwrap();
        let request = ScaffoldRequest::new("demo", workdir.path(), templates.path());

        let error = create_project(&request).unwrap_err();

        assert!(matches!(error, ScaffoldError::DestinationExists { .. }));
    }

    #[test]
    fn missing_template_is_reported() {
        let workdir = tempfile::tempdir().unwrap();
        let templates = tempfile::tempdir().unwrap();
        let mut request = ScaffoldRequest::new("demo", workdir.path(), templates.path());
        request.answers = AnswerSource::Given(answers());

        let error = create_project(&request).unwrap_err();

        assert!(matches!(error, ScaffoldError::TemplateNotFound { .. }));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let workdir = tempfile::tempdir().unwrap();
        let templates = templates();
        let mut request = ScaffoldRequest::new("demo", workdir.path(), templates.path());
        request.answers = AnswerSource::Given(answers());
        request.dry_run = true;

        let destination = create_project(&request).unwrap();

        assert_eq!(destination, workdir.path().join("demo"));
        assert!(!destination.exists());
    }

    #[test]
    fn failed_fetch_removes_the_new_project_directory() {
        let workdir = tempfile::tempdir().unwrap();
        let templates = templates();
        let mut request = ScaffoldRequest::new("demo", workdir.path(), templates.path());
        request.answers = AnswerSource::Given(answers());
        request.theme_repository = Some(workdir.path().join("no-such-repo").display().to_string());

        let error = create_project(&request).unwrap_err();

        assert!(matches!(error, ScaffoldError::Fetch(FetchError::GitClone { .. })));
        assert!(!workdir.path().join("demo").exists());
    }

    #[test]
    fn failed_fetch_keeps_a_pre_existing_directory() {
        let workdir = tempfile::tempdir().unwrap();
        let templates = templates();
        let existing = workdir.path().join("demo");
        fs::create_dir(&existing).unwrap();
        fs::write(existing.join("notes.txt"), "mine").unwrap();
        let mut request = ScaffoldRequest::new("demo", workdir.path(), templates.path());
        request.answers = AnswerSource::Given(answers());
        request.force = true;
        request.theme_repository = Some(workdir.path().join("no-such-repo").display().to_string());

        create_project(&request).unwrap_err();

        assert!(existing.join("notes.txt").is_file());
    }
}
