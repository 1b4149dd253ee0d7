//! CLI domain: parse, route, output, and presentation only.
//! Maintenance of the persisted lists; the engine itself runs inside site adapters.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_config, format_list_body, format_list_names, format_user};
pub use route::RunContext;
