use std::fs;
use std::path::{Path, PathBuf};

use lexi_config::Config;
use serde::{Deserialize, Serialize};

fn lexi_root() -> anyhow::Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("lexi"))
        .ok_or_else(|| anyhow::anyhow!("No user config directory on this platform"))
}

fn profiles_dir() -> anyhow::Result<PathBuf> {
    Ok(lexi_root()?.join("profiles"))
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Initialize user config folders and main profile if missing
pub fn init_user_config() -> anyhow::Result<()> {
    init_in(&profiles_dir()?)
}

fn init_in(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;

    let main_profile = dir.join("main.json");
    if !main_profile.exists() {
        let profile = Profile {
            name: "main".into(),
            value: Config::default(),
        };
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile in {}", dir.display());
    }

    Ok(())
}

/// Load a user profile by name, defaulting to main if name not found
pub fn load_user_profile(name: &str) -> anyhow::Result<Config> {
    load_from(&profiles_dir()?, name)
}

fn read_profile(file: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(file)?;
    let profile: Profile = serde_json::from_str(&data)?;
    Ok(profile.value)
}

fn load_from(dir: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = dir.join(format!("{name}.json"));
    if profile_file.exists() {
        return read_profile(&profile_file);
    }

    tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
    let main_file = dir.join("main.json");
    if main_file.exists() {
        read_profile(&main_file)
    } else {
        Ok(Config::default())
    }
}

/// Add a new profile cloned from main (or defaults if main missing)
pub fn add_profile_from_default(new_name: &str) -> anyhow::Result<PathBuf> {
    add_in(&profiles_dir()?, new_name)
}

fn add_in(dir: &Path, new_name: &str) -> anyhow::Result<PathBuf> {
    let profile = Profile {
        name: new_name.into(),
        value: load_from(dir, "main")?,
    };
    let file = dir.join(format!("{new_name}.json"));
    fs::write(&file, serde_json::to_string_pretty(&profile)?)?;
    tracing::info!("Created new profile: {new_name}");
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_writes_main_profile() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = dir.path().join("profiles");

        init_in(&profiles).unwrap();
        let config = load_from(&profiles, "main").unwrap();

        assert!(profiles.join("main.json").exists());
        assert_eq!(config.limits.vocabulary, 1000);
    }

    #[test]
    fn unknown_profile_falls_back_to_main() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.limits.practice_words = 3;
        let main = Profile {
            name: "main".into(),
            value: config,
        };
        fs::write(
            dir.path().join("main.json"),
            serde_json::to_string_pretty(&main).unwrap(),
        )
        .unwrap();

        let loaded = load_from(dir.path(), "spanish").unwrap();
        assert_eq!(loaded.limits.practice_words, 3);
    }

    #[test]
    fn new_profile_copies_main() {
        let dir = tempfile::tempdir().unwrap();
        init_in(dir.path()).unwrap();

        let file = add_in(dir.path(), "commute").unwrap();
        let data = fs::read_to_string(file).unwrap();
        let profile: Profile = serde_json::from_str(&data).unwrap();

        assert_eq!(profile.name, "commute");
        assert_eq!(profile.value.selection.max_chars, 1000);
    }

    #[test]
    fn broken_profile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.json"), "{ not json").unwrap();

        assert!(load_from(dir.path(), "main").is_err());
    }
}
