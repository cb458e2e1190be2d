//! The `edupulse list-models` command.

use std::path::PathBuf;

use anyhow::Result;

use edupulse_providers::create_provider;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = edupulse_providers::config::load_config_from(config_path.as_deref())?;
    let provider = create_provider(&config);

    println!("Provider: {}", provider.name());
    for model in provider.available_models() {
        let marker = if model.id == config.model { " (configured)" } else { "" };
        println!(
            "  {} — {} ({}K context){marker}",
            model.id,
            model.name,
            model.max_context / 1000,
        );
    }

    if !config.has_credential() {
        println!("\nNo API key configured. Set EDUPULSE_API_KEY or run `edupulse init`.");
    }

    Ok(())
}
