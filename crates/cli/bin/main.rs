use std::process::ExitCode;

use clap::Parser;
use filter_cli::{run, Arguments};
use filter_editor_configuration::environment::ProcessEnvironment;

#[tokio::main(flavor = "current_thread")]
pub async fn main() -> ExitCode {
    env_logger::init();
    let arguments = Arguments::parse();
    let mut stdout = std::io::stdout().lock();
    match run(arguments, ProcessEnvironment, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
