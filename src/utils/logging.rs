use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Result;
use crate::utils::constants::DEFAULT_LOG_LEVEL;

/// Initialise the tracing subscriber.
///
/// Priority: RUST_LOG env var > `--verbose` (debug) > configured level > "info".
/// Output goes to stderr, or to `log_file` when one is given.
pub fn init(verbose: bool, config_level: Option<&str>, log_file: Option<&Path>) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(config_level.unwrap_or(DEFAULT_LOG_LEVEL))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact();

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    // The subscriber already in place keeps receiving events
    if let Err(e) = installed {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
        return Ok(());
    }

    tracing::debug!(
        app = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        "Logging initialised"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_repeated_init_keeps_first_subscriber() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let log_path = temp_dir.path().join("quake.log");

        init(false, Some("debug"), Some(&log_path))?;
        init(true, None, None)?;
        init(false, Some("warn"), Some(&log_path))?;

        assert!(log_path.exists());
        Ok(())
    }

    #[test]
    fn test_log_file_in_missing_directory_fails() {
        let result = init(false, None, Some(Path::new("/no/such/dir/quake.log")));
        assert!(matches!(result, Err(crate::error::ExplorerError::Io(_))));
    }
}
