use std::process::ExitCode;

fn main() -> ExitCode {
    cfgpda::cli::run()
}
