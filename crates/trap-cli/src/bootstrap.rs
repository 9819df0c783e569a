use std::path::{Path, PathBuf};

use anyhow::Context;
use trap_config::TrapConfig;

/// Resolve the project root: `--project` if given (a `.trapline` directory
/// stands for its parent), otherwise the current directory.
pub fn project_root(project: Option<&str>) -> anyhow::Result<PathBuf> {
    let Some(path) = project else {
        return std::env::current_dir().context("failed to determine current directory");
    };

    let explicit = PathBuf::from(path);
    let root = if explicit.file_name().and_then(|name| name.to_str()) == Some(".trapline") {
        explicit
            .parent()
            .map(Path::to_path_buf)
            .context("invalid --project path: '.trapline' directory has no parent")?
    } else {
        explicit
    };

    if !root.is_dir() {
        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            root.display()
        );
    }
    Ok(root)
}

/// Load `.env` and the layered configuration for the project.
pub fn load_config(project: Option<&str>) -> anyhow::Result<TrapConfig> {
    let root = project_root(project)?;
    load_project_dotenv(&root)?;
    TrapConfig::load_from(&root)
        .with_context(|| format!("failed to load configuration for {}", root.display()))
}

fn load_project_dotenv(root: &Path) -> anyhow::Result<()> {
    let env_path = root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    } else {
        dotenvy::dotenv().ok();
    }
    Ok(())
}
