use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;

const CONFIG_TOML_TEMPLATE: &str = r#"# bb2do configuration
#
# The API key is read from the BB2_API_KEY environment variable and is
# never stored in this file. Without a key, `bb2 refine` uses the
# built-in local rules.

[api]
url = "https://api.openai.com/v1/chat/completions"
model = "gpt-3.5-turbo"
temperature = 0.7
max_tokens = 512
"#;

/// Create the data directory and write a default config.toml.
pub fn cmd_init(dir: &Path, args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;

    let config_path = dir.join("config.toml");
    if config_path.exists() && !args.force {
        println!(
            "already initialized at {} (use --force to rewrite config.toml)",
            dir.display()
        );
        return Ok(());
    }

    fs::write(&config_path, CONFIG_TOML_TEMPLATE)?;
    println!("initialized {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_writes_parseable_config() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("data");
        cmd_init(&dir, InitArgs { force: false }).unwrap();

        let config = crate::io::config_io::read_config(&dir).unwrap();
        assert_eq!(config.api.model, "gpt-3.5-turbo");
        assert_eq!(config.api.max_tokens, 512);
    }

    #[test]
    fn init_twice_preserves_edits_without_force() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().to_path_buf();
        cmd_init(&dir, InitArgs { force: false }).unwrap();
        fs::write(dir.join("config.toml"), "[api]\nmodel = \"custom\"\n").unwrap();

        cmd_init(&dir, InitArgs { force: false }).unwrap();
        let config = crate::io::config_io::read_config(&dir).unwrap();
        assert_eq!(config.api.model, "custom");

        cmd_init(&dir, InitArgs { force: true }).unwrap();
        let config = crate::io::config_io::read_config(&dir).unwrap();
        assert_eq!(config.api.model, "gpt-3.5-turbo");
    }
}
