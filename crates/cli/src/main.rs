use std::process::ExitCode;

fn main() -> ExitCode {
    bigbike_cli::run()
}
