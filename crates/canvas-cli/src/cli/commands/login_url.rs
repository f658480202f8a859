//! `canvas login-url` - Print the OAuth login dialog URL.

use anyhow::{Context, Result};

use canvas_core::{oauth_login_url, CanvasConfig};

use super::super::args::LoginUrlArgs;

pub fn run(args: LoginUrlArgs) -> Result<()> {
    let config = CanvasConfig::load(args.config.config.as_deref())
        .context("failed to load canvas config")?;
    let url = oauth_login_url(&config)?;
    println!("{url}");
    Ok(())
}
