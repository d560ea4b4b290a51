use colored::*;
use std::{fs, path::Path};

pub const TEMPLATE: &str = r#"# docref Configuration File

# Documentation roots, by source id. Each must serve <root>/objects.inv
[sources]
latest = "https://discordpy.readthedocs.io/en/latest"
python = "https://docs.python.org/3"

# Source used by `docref discordpy` / `docref dpy`
# primary_source = "latest"

# Source used by `docref python` / `docref py`
# secondary_source = "python"

# Inventory project whose keys drop their `discord.` namespaces
# tracked_project = "discord.py"

# Maximum number of links shown per lookup
# max_results = 8

# HTTP timeout when downloading inventories
# timeout_secs = 30
"#;

pub fn init_config(config_path: &Path, force: bool) -> Result<(), String> {
    if config_path.exists() && !force {
        return Err(format!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        ));
    }

    fs::write(config_path, TEMPLATE)
        .map_err(|e| format!("Failed to create {}: {}", config_path.display(), e))?;

    println!("{} Created {}", "✅".green(), config_path.display());
    println!("\n{}", "Configuration file created with defaults:".cyan());
    println!(
        "  {} latest = \"https://discordpy.readthedocs.io/en/latest\"",
        "•".blue()
    );
    println!("  {} python = \"https://docs.python.org/3\"", "•".blue());
    println!(
        "\n{}",
        "Edit the file to add documentation sources.".cyan()
    );

    Ok(())
}
