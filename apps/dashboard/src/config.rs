use std::path::PathBuf;

use findash_client::ClientConfig;
use findash_core::Locale;

pub struct Config {
    pub client: ClientConfig,
    pub locale: Locale,
    pub download_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let client = ClientConfig::from_env();
        let locale = match std::env::var("FINDASH_LOCALE") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Unknown FINDASH_LOCALE '{}', falling back to English", raw);
                Locale::default()
            }),
            Err(_) => Locale::default(),
        };
        let download_dir = std::env::var("FINDASH_DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./downloads"));
        Self {
            client,
            locale,
            download_dir,
        }
    }
}
