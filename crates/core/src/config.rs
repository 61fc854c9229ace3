use anyhow::Context;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "FILE_TAGGER";

pub const DEFAULT_EXTENSIONS: &[&str] = &["csv", "xls", "xlsx", "doc", "docx", "txt"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub scan: ScanConfig,
    pub store: StoreConfig,
    pub organize: OrganizeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub roots: Vec<String>,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file holding the tag -> folder mapping.
    pub tag_config: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeConfig {
    /// Destination parent for tags without an explicit folder.
    pub default_base: String,
    #[serde(default)]
    pub copy_then_delete: bool,
    #[serde(default)]
    pub dry_run: bool,
}

impl AppConfig {
    /// Built-in configuration rooted at `home`.
    pub fn for_home(home: &Path) -> Self {
        AppConfig {
            scan: ScanConfig {
                roots: vec![
                    path_string(home.join("Downloads")),
                    path_string(home.join("Documents")),
                ],
                extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            },
            store: StoreConfig {
                tag_config: path_string(home.join(".file_organizer_tags.json")),
            },
            organize: OrganizeConfig {
                default_base: path_string(home.join("Documents").join("Tagged Files")),
                copy_then_delete: false,
                dry_run: false,
            },
        }
    }

    pub fn roots(&self) -> Vec<PathBuf> {
        self.scan.roots.iter().map(PathBuf::from).collect()
    }
}

fn path_string(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}

/// Layers built-in defaults, an optional config file and `FILE_TAGGER__*`
/// environment variables. Without an explicit `path`, the per-user
/// `<config_dir>/file-tagger/config` file is read when present.
pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let dirs = BaseDirs::new().context("could not determine the home directory")?;
    let defaults = AppConfig::for_home(dirs.home_dir());

    let mut settings = config::Config::builder()
        .set_default("scan.roots", defaults.scan.roots)?
        .set_default("scan.extensions", defaults.scan.extensions)?
        .set_default("store.tag_config", defaults.store.tag_config)?
        .set_default("organize.default_base", defaults.organize.default_base)?
        .set_default("organize.copy_then_delete", false)?
        .set_default("organize.dry_run", false)?;
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        let user_file = dirs.config_dir().join("file-tagger").join("config");
        settings = settings
            .add_source(config::File::with_name(&path_string(user_file)).required(false));
    }
    settings = settings.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}
