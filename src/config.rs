use std::path::PathBuf;

const APP_DIR: &str = "nads_league";
const LEDGER_FILE: &str = "ledger.sqlite";
const DEFAULT_PREVIEW_THREADS: usize = 4;

/// Knobs for the simulation pipeline itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Reject unknown strategy options instead of treating them as neutral.
    pub strict_options: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub engine: EngineConfig,
    pub preview_threads: usize,
}

impl AppConfig {
    /// Reads `NADS_*` variables from the process environment. Binaries load
    /// `.env.local` / `.env` through dotenvy before calling this.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup("NADS_DB_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                app_cache_dir(&lookup).map(|dir| dir.join(LEDGER_FILE))
            });
        let seed = lookup("NADS_SEED").and_then(|v| v.trim().parse::<u64>().ok());
        let strict_options = lookup("NADS_STRICT_OPTIONS")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        let preview_threads = lookup("NADS_PREVIEW_THREADS")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_PREVIEW_THREADS)
            .clamp(1, 32);

        Self {
            db_path,
            seed,
            engine: EngineConfig { strict_options },
            preview_threads,
        }
    }
}

fn app_cache_dir(lookup: &dyn Fn(&str) -> Option<String>) -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Some(base) = lookup("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(APP_DIR));
    }
    let home = lookup("HOME")?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(APP_DIR))
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
