//! Client-side configuration and persisted state.
//!
//! Two small files live next to the working directory:
//! - `storetrack_config.json` optionally overrides the API base URL
//!   (the `STORETRACK_API_BASE` environment variable wins over the file)
//! - `last_user.txt` remembers the last logged-in username for quick login

use serde::Deserialize;
use std::fs;
use std::io;

/// Default API base URL when neither the environment nor the config file
/// overrides it.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Environment variable overriding the API base URL.
pub const API_BASE_ENV: &str = "STORETRACK_API_BASE";

/// Local JSON config file name.
pub const CONFIG_FILE: &str = "storetrack_config.json";

/// Last-username memory file name.
pub const LAST_USER_FILE: &str = "last_user.txt";

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default, alias = "API_BASE")]
    api_base: Option<String>,
}

/// Resolve the API base URL: environment variable, then config file, then
/// the built-in default. Trailing slashes are trimmed so path joins stay
/// predictable.
pub fn load_api_base() -> String {
    if let Ok(base) = std::env::var(API_BASE_ENV) {
        let base = base.trim();
        if !base.is_empty() {
            return base.trim_end_matches('/').to_string();
        }
    }

    if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
        if let Ok(parsed) = serde_json::from_str::<ConfigFile>(&raw) {
            if let Some(base) = parsed.api_base {
                let base = base.trim();
                if !base.is_empty() {
                    return base.trim_end_matches('/').to_string();
                }
            }
        }
    }

    DEFAULT_API_BASE.to_string()
}

/// Load the remembered username, if any.
pub fn load_last_username() -> Option<String> {
    match fs::read_to_string(LAST_USER_FILE) {
        Ok(contents) => {
            let username = contents.trim();
            if username.is_empty() {
                None
            } else {
                Some(username.to_string())
            }
        }
        Err(_) => None,
    }
}

/// Remember the last logged-in username. Failures are ignored; losing the
/// memory file only costs a quick login next launch.
pub fn save_last_username(username: &str) {
    let username = username.trim();
    if username.is_empty() {
        return;
    }
    let _: io::Result<()> = fs::write(LAST_USER_FILE, username);
}
