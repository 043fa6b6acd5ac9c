use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    gracile_app::platform::run_app()
}
