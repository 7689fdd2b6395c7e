use std::process::ExitCode;

use linksym::output as out;
use linksym::{LinksymError, cli};

mod app;
mod logging;

fn main() -> ExitCode {
    let args = cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<LinksymError>() {
            Some(le) => {
                out::print_error(&le.to_string());
                ExitCode::from(le.code())
            }
            None => {
                out::print_error(&format!("{e:#}"));
                ExitCode::FAILURE
            }
        },
    }
}
