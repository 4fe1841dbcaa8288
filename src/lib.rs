pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod layout;
pub mod logging;
pub mod matcher;
pub mod notification;
pub mod session;
pub mod state;
pub mod storage;
pub mod taxonomy;
pub use error::{AppError, AppResult};
pub use session::TaggingSession;

/// Entrypoint used by the binary; `args` excludes the program name.
pub fn run<I>(args: I) -> AppResult<()>
where
    I: IntoIterator<Item = String>,
{
    logging::init();
    let command = cli::parse(args)?;
    tracing::debug!(?command, "starting scenetag");

    let config = config::load_app_config();
    let mut session = TaggingSession::open(config)?;
    let stdout = std::io::stdout();
    cli::execute(command, &mut session, &mut stdout.lock())?;
    Ok(())
}
