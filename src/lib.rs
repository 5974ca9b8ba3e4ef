//! Nebula Strategy: request shaping and response normalization for
//! Gemini-backed social media strategy generation.
//!
//! Module layout:
//!   - strategy/  : core pipeline (selector, compiler, extractor, normalizer, orchestrator)
//!   - brand/     : brand-guideline profile and its JSON store
//!   - media.rs   : local files into base64 inline payloads
//!   - settings.rs: credentials, API host, `.env` loading
//!   - cli.rs     : command-line front-end

pub mod brand;
pub mod cli;
pub mod media;
pub mod settings;
pub mod strategy;

use clap::Parser;

pub fn run() {
    // Load .env.local → .env from the crate root so the binary finds
    // credentials regardless of its working directory.
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    settings::load_env(manifest_dir);

    env_logger::init();

    let cli = cli::Cli::parse();
    let settings = settings::Settings::from_env();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("[STARTUP] Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(cli::dispatch(cli, settings)) {
        log::error!("[STARTUP] {}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
