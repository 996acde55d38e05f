use std::io::{self, Write};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

mod app;
pub use app::App;

fn init_tracing() -> anyhow::Result<()> {
    // stdout carries the prompts and the report; logs go to stderr.
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_max_level(LevelFilter::INFO)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to set up logging: {e}");
    }

    println!("Platform: {}", std::env::consts::OS);
    println!("Architecture: {}", std::env::consts::ARCH);

    match App::new().run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            eprint!("Press enter to continue.");
            let _ = io::stderr().flush();
            let mut line = String::new();
            let _ = io::stdin().read_line(&mut line);
            ExitCode::from(1)
        }
    }
}
