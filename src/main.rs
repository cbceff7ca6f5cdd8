#![windows_subsystem = "windows"]
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

mod config;
mod error;
mod model;
mod parsers;
mod protocol;
mod services;

use config::CoreConfig;
use services::file_sync;
use services::session::EditorSession;

fn init_logging(cfg: &CoreConfig) {
    let log_config = ConfigBuilder::new()
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();

    // stdout is reserved for protocol responses
    if TermLogger::init(
        cfg.log_level,
        log_config,
        TerminalMode::Stderr,
        ColorChoice::Never,
    )
    .is_err()
    {
        eprintln!("[dict-core] logger already initialized");
    }
}

fn open_session(cfg: &CoreConfig) -> EditorSession {
    let base_dir = match file_sync::resolve_base_dir(cfg.base_dir.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            log::error!("{e}; falling back to the working directory");
            PathBuf::from(".")
        }
    };

    let mut session = EditorSession::start(base_dir, cfg.initial_profile);

    // A failed first load leaves an empty store; the GUI can retry with a reload.
    if let Err(e) = session.reload() {
        log::error!("initial load of {} failed: {e}", session.path().display());
    }

    session
}

fn main() {
    let cfg = CoreConfig::from_env();
    init_logging(&cfg);

    let mut session = open_session(&cfg);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => continue,
        };

        if line.trim().is_empty() {
            continue;
        }

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            protocol::handle(&mut session, &line)
        }));

        let response = match result {
            Ok(resp) => resp,
            Err(_) => serde_json::json!({
                "status": "error",
                "message": "internal core error"
            })
            .to_string(),
        };

        if writeln!(stdout, "{response}").is_err() {
            break;
        }

        let _ = stdout.flush();

        if session.is_closed() {
            log::info!("session closed");
            break;
        }
    }
}
