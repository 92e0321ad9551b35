use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing_subscriber::{fmt, EnvFilter};

use crate::Result;

/// Initialize tracing for the bot.
///
/// With `log_path` set, records go to that file in append mode without ANSI
/// colors; otherwise they go to stdout. Calling this twice keeps the first
/// subscriber.
pub fn init(service_name: &str, log_path: Option<&Path>) -> Result<()> {
    // Default: info for our crates, warn for everything else.
    // Can be overridden with `RUST_LOG`.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,hwbot=info,hwbot_core=info,hwbot_practicum=info,hwbot_telegram=info,{service_name}=info"
        ))
    });

    let builder = fmt().with_env_filter(filter).with_target(true);

    let installed = match log_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_ansi(true).try_init(),
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_plain_lines_to_an_append_only_file() {
        let dir = std::env::temp_dir().join(format!("hwbot-logging-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("main.log");
        let _ = std::fs::remove_file(&path);

        assert!(init("hwbot", Some(&path)).is_ok());
        assert!(init("hwbot", Some(&path)).is_ok());

        tracing::info!("first log line marker");
        let written = std::fs::read_to_string(&path).unwrap();
        let line = written
            .lines()
            .find(|l| l.contains("first log line marker"))
            .expect("event not written");
        // timestamp first
        assert!(line.chars().next().is_some_and(|c| c.is_ascii_digit()));
        assert!(line.contains("INFO"));
        assert!(line.contains("hwbot_core::logging::tests"));
        assert!(!written.contains("\x1b["));

        tracing::info!("second log line marker");
        let written = std::fs::read_to_string(&path).unwrap();
        let first = written.find("first log line marker").expect("first line lost");
        let second = written.find("second log line marker").expect("second line missing");
        assert!(first < second);
    }
}
