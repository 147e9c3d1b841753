use std::path::PathBuf;

pub fn default_projects_dir() -> PathBuf {
    if let Ok(path) = std::env::var("CCOST_PROJECTS_DIR") {
        return PathBuf::from(path);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".claude").join("projects");
    }
    PathBuf::from(".claude").join("projects")
}
