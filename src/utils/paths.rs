use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub fn get_remotodo_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".remotodo"))
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_remotodo_dir()?.join("config.toml"))
}

pub fn get_theme_pref_path() -> Result<PathBuf> {
    Ok(get_remotodo_dir()?.join("theme"))
}

pub fn get_logs_dir() -> Result<PathBuf> {
    Ok(get_remotodo_dir()?.join("logs"))
}

pub fn get_crash_log_path() -> Result<PathBuf> {
    Ok(get_remotodo_dir()?.join("crash.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_remotodo_dir() {
        let dir = get_remotodo_dir().unwrap();
        assert!(dir.to_string_lossy().ends_with(".remotodo"));
    }

    #[test]
    fn test_get_config_path() {
        let path = get_config_path().unwrap();
        assert!(path.to_string_lossy().contains(".remotodo"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_get_theme_pref_path() {
        let path = get_theme_pref_path().unwrap();
        assert!(path.to_string_lossy().contains(".remotodo"));
        assert!(path.to_string_lossy().ends_with("theme"));
    }

    #[test]
    fn test_get_logs_dir() {
        let dir = get_logs_dir().unwrap();
        assert!(dir.to_string_lossy().ends_with("logs"));
    }
}
