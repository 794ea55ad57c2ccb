pub mod answers;
pub mod api;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod install;
pub mod materialize;
pub mod preview;
pub mod project;
pub mod prompt;
pub mod render;
pub mod settings;
pub mod transactions;
pub mod vfs;

pub use api::{create_project, AnswerSource, ScaffoldError, ScaffoldRequest};
pub use materialize::materialize;
pub use render::render;
pub use settings::{Settings, Value};
