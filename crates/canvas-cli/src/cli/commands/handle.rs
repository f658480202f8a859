//! `canvas handle` - Show how a canvas page answers a signed request.
//!
//! Prints the HTTP status on the first line and the body after it. The exit
//! code reflects the verification outcome so scripts can branch on it.

use anyhow::{Context, Result};

use canvas_core::{CanvasConfig, CanvasDecision};

use super::super::args::HandleArgs;
use crate::exit_codes::SUCCESS;

pub fn run(args: HandleArgs) -> Result<i32> {
    let config = CanvasConfig::load(args.config.config.as_deref())
        .context("failed to load canvas config")?;

    let decision = CanvasDecision::from_signed_request(args.token.as_deref(), &config)?;

    println!("{}", decision.status_code());
    println!("{}", decision.body());

    Ok(match &decision {
        CanvasDecision::Forbidden { reason } => reason.exit_code(),
        CanvasDecision::Authorized { .. } | CanvasDecision::LoginRequired { .. } => SUCCESS,
    })
}
