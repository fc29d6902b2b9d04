use anyhow::{bail, Result};
use std::env;
use tracing::info;

use crate::Config;

pub async fn run() -> Result<()> {
    let root = env::current_dir()?;

    if Config::is_initialized(&root) {
        bail!(
            "codenote is already initialized in {:?}",
            Config::codenote_dir(&root)
        );
    }

    let config = Config::default();
    config.save(&root)?;

    info!("Initialized codenote in {:?}", Config::codenote_dir(&root));
    println!(
        "✓ Created {} with default configuration",
        Config::codenote_dir(&root).display()
    );
    println!("\nNext steps:");
    println!("  1. Edit .codenote/config.toml to customize settings");
    println!("  2. Export OPENAI_API_KEY (or set completion.api_key in the config)");
    println!("  3. Run 'codenote test' to check the completion service");
    println!("  4. Run 'codenote annotate' to comment your code");

    Ok(())
}
