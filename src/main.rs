use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use create_litpress::{
    errors::{FileOperation, IoError},
    AnswerSource, ScaffoldRequest,
};
use std::path::PathBuf;

const BUNDLED_TEMPLATES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/projects");

// The CLI layer should only parse inputs and forward them to library code.
fn main() {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("project-name")
                .help("Name of the project directory to create")
                .required(true),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .help("Generate into an existing directory")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("answers")
                .long("answers")
                .value_name("FILE")
                .help("Read answers from a toml file instead of prompting"),
        )
        .arg(
            Arg::new("templates")
                .long("templates")
                .value_name("DIR")
                .help("Directory holding one template folder per project kind")
                .default_value(BUNDLED_TEMPLATES),
        )
        .arg(
            Arg::new("theme-repo")
                .long("theme-repo")
                .value_name("REPO")
                .help("Theme repository to clone (gh:owner/repo, gl:owner/repo, url or path)"),
        )
        .arg(
            Arg::new("skip-install")
                .long("skip-install")
                .help("Do not run the package install step")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Preview the rendered template without writing anything")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_logger(matches.get_flag("verbose"));

    let request = match build_request(&matches) {
        Ok(request) => request,
        Err(error) => exit_with(error),
    };

    if let Err(error) = create_litpress::create_project(&request) {
        exit_with(error);
    }
}

fn init_logger(is_verbose: bool) {
    let default_filter = if is_verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn build_request(args: &ArgMatches) -> Result<ScaffoldRequest, IoError> {
    let project_name = args
        .get_one::<String>("project-name")
        .expect("project name required");
    let templates = args
        .get_one::<String>("templates")
        .expect("templates has a default");

    let workdir = std::env::current_dir()
        .map_err(|error| IoError::new(FileOperation::Read, PathBuf::from("."), error))?;

    let mut request = ScaffoldRequest::new(project_name, &workdir, &PathBuf::from(templates));

    if let Some(path) = args.get_one::<String>("answers") {
        request.answers = AnswerSource::File(PathBuf::from(path));
    }
    request.theme_repository = args.get_one::<String>("theme-repo").cloned();
    request.force = args.get_flag("force");
    request.skip_install = args.get_flag("skip-install");
    request.dry_run = args.get_flag("dry-run");

    Ok(request)
}

fn exit_with<E>(error: E) -> !
where
    E: miette::Diagnostic + Send + Sync + 'static,
{
    eprintln!("{:?}", miette::Report::new(error));
    std::process::exit(1);
}
