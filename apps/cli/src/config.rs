use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "ccost";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub file: PathBuf,
    pub created: bool,
}

pub fn load_or_create() -> Result<ConfigLoad, String> {
    load_or_create_in(&config_dir()?)
}

pub fn load_or_create_in(dir: &Path) -> Result<ConfigLoad, String> {
    fs::create_dir_all(dir)
        .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    let file = dir.join(CONFIG_FILE_NAME);

    if file.exists() {
        let contents = fs::read_to_string(&file)
            .map_err(|err| format!("read config {}: {}", file.display(), err))?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", file.display(), err))?;
        return Ok(ConfigLoad {
            config,
            file,
            created: false,
        });
    }

    let config = CliConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&file, contents)
        .map_err(|err| format!("write config {}: {}", file.display(), err))?;

    Ok(ConfigLoad {
        config,
        file,
        created: true,
    })
}

fn config_dir() -> Result<PathBuf, String> {
    let base = dirs::config_dir().ok_or_else(|| "resolve config dir".to_string())?;
    Ok(base.join(CONFIG_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_default_config_once() {
        let dir = tempfile::tempdir().expect("temp dir");
        let first = load_or_create_in(dir.path()).expect("create");
        assert!(first.created);
        assert!(first.file.exists());
        assert_eq!(first.config, CliConfig::default());

        let second = load_or_create_in(dir.path()).expect("load");
        assert!(!second.created);
        assert_eq!(second.config, CliConfig::default());
    }

    #[test]
    fn reads_configured_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "projects_dir = \"/data/projects\"\ncache_dir = \"/data/cache\"\n",
        )
        .expect("write config");
        let load = load_or_create_in(dir.path()).expect("load");
        assert_eq!(load.config.projects_dir, Some(PathBuf::from("/data/projects")));
        assert_eq!(load.config.cache_dir, Some(PathBuf::from("/data/cache")));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join(CONFIG_FILE_NAME), "cache_dir = [").expect("write config");
        let err = load_or_create_in(dir.path()).expect_err("parse error");
        assert!(err.starts_with("parse config"));
    }
}
