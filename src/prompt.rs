use indexmap::IndexMap;
use inquire::{required, Confirm, Password, Select, Text};
use miette::Diagnostic;
use thiserror::Error;

use crate::{
    answers::{Answers, DatabaseCredentials},
    project::ProjectKind,
};

#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    #[error("unable to read answer for '{question}'")]
    #[diagnostic(
        code(create_litpress::prompt::inquire),
        help("Run in an interactive terminal, or pass --answers <FILE>")
    )]
    Inquire {
        question: &'static str,
        #[source]
        source: inquire::InquireError,
    },
}

fn text(question: &'static str) -> Result<String, PromptError> {
    Text::new(question)
        .with_validator(required!("an answer is required"))
        .prompt()
        .map_err(|source| PromptError::Inquire { question, source })
}

/// Interactively collects [`Answers`].
///
/// The WordPress questions are only asked for kinds that live in WordPress, and the database
/// questions only when WordPress is installed now.
pub fn get_answers() -> Result<Answers, PromptError> {
    let question = "Choose a project to generate.";
    let project = Select::new(question, ProjectKind::ALL.to_vec())
        .prompt()
        .map_err(|source| PromptError::Inquire { question, source })?;

    let mut answers = Answers {
        project,
        local_wordpress_url: String::new(),
        install_wordpress: false,
        database: None,
        extra: IndexMap::new(),
    };

    if !project.uses_wordpress() {
        return Ok(answers);
    }

    answers.local_wordpress_url =
        text("What is the full url to your local WordPress installation?")?;

    let question = "Would you like to install WordPress now?";
    answers.install_wordpress = Confirm::new(question)
        .with_default(true)
        .prompt()
        .map_err(|source| PromptError::Inquire { question, source })?;

    if answers.install_wordpress {
        let name = text("What is the name of your local WordPress database?")?;
        let host = text("What is the ip address/hostname of your local WordPress database?")?;
        let user =
            text("What username will you use to connect to your local WordPress database?")?;

        let question = "What password will you use to connect to your local WordPress database?";
        let password = Password::new(question)
            .without_confirmation()
            .prompt()
            .map_err(|source| PromptError::Inquire { question, source })?;

        answers.database = Some(DatabaseCredentials {
            name,
            host,
            user,
            password,
        });
    }

    Ok(answers)
}
