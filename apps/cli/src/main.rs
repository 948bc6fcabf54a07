mod commands;
mod config;
mod main_lib;
mod notifications;


use config::Config;
use main_lib::{build_app, init_tracing};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);
    let mut app = build_app(&config)?;
    app.load_snapshot()?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    app.run(stdin.lock(), &mut stdout)
}
