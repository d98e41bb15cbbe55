//! Initialize command - creates a new Garnet project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use garnet_config::{GarnetConfig, Paths};

pub fn run(path: &str, sample: bool) -> Result<()> {
    let project_dir = Path::new(path);

    if Paths::is_initialized(project_dir) {
        anyhow::bail!(
            "Project already initialized in {}. garnet.toml already exists.",
            project_dir.display()
        );
    }

    println!("Initializing new Garnet project in {}...", project_dir.display());

    // Project structure and configuration
    fs::create_dir_all(project_dir).context("Failed to create project directory")?;
    let config = GarnetConfig::default();
    fs::create_dir_all(project_dir.join(&config.store.data_dir))
        .context("Failed to create data directory")?;

    let config_content =
        toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
    fs::write(Paths::project_config_file(project_dir), config_content)
        .context("Failed to write garnet.toml")?;

    // Collection files
    let data_dir = project_dir.join(&config.store.data_dir);
    let permissions_path = data_dir.join(&config.store.permissions_collection);
    let events_path = data_dir.join(&config.store.events_collection);

    let (permissions, events) = if sample {
        (SAMPLE_PERMISSIONS, SAMPLE_EVENTS)
    } else {
        ("[]\n", "[]\n")
    };
    fs::write(&permissions_path, permissions).context("Failed to write permissions collection")?;
    fs::write(&events_path, events).context("Failed to write event collection")?;

    // .gitignore
    let gitignore_path = project_dir.join(".gitignore");
    if !gitignore_path.exists() {
        fs::write(
            &gitignore_path,
            "# Garnet local state\n.garnet/data/\n\n# Local config overrides (not tracked in git)\ngarnet.local.toml\n",
        )
        .context("Failed to write .gitignore")?;
    }

    println!("Created {}", permissions_path.display());
    println!("Created {}", events_path.display());
    println!("Done. Try: garnet query alice -C {}", project_dir.display());

    Ok(())
}

const SAMPLE_PERMISSIONS: &str = r#"[
  {
    "userId": "alice",
    "filter": {"tenant": "acme"},
    "projection": {"eventDateTime": 1, "action": 1}
  },
  {
    "userId": "carol"
  }
]
"#;

const SAMPLE_EVENTS: &str = r#"[
  {"eventDateTime": "2020-05-10T08:00:00Z", "action": "login",  "tenant": "acme",   "sourceIp": "10.0.0.1"},
  {"eventDateTime": "2020-05-10T09:30:00Z", "action": "export", "tenant": "globex", "sourceIp": "10.0.0.2"},
  {"eventDateTime": "2020-05-10T17:45:00Z", "action": "logout", "tenant": "acme",   "sourceIp": "10.0.0.1"},
  {"eventDateTime": "2020-05-12T10:00:00Z", "action": "login",  "tenant": "acme",   "sourceIp": "10.0.0.3"}
]
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_project_layout() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let project = temp_dir.path().join("demo");

        run(project.to_str().unwrap(), true).expect("init failed");

        assert!(project.join("garnet.toml").exists());
        assert!(project.join(".garnet/data/user_perms.json").exists());
        assert!(project.join(".garnet/data/events.json").exists());
        assert!(project.join(".gitignore").exists());

        // Initializing twice is an error.
        assert!(run(project.to_str().unwrap(), false).is_err());
    }
}
