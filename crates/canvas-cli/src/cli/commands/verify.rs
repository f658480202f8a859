//! `canvas verify` - Verify a signed request.

use anyhow::{Context, Result};
use std::io::Read;

use canvas_core::{verify_signed_request, AppSecret, SignedRequestPayload, VerifyError};

use super::super::args::VerifyArgs;
use crate::exit_codes::{CONFIG_ERROR, SUCCESS};

pub fn cmd_verify(args: VerifyArgs) -> i32 {
    match run_verify(&args) {
        Ok(payload) => {
            if args.quiet {
                return SUCCESS;
            }
            match print_payload(&payload, args.json) {
                Ok(()) => SUCCESS,
                Err(e) => {
                    eprintln!("error: {e:#}");
                    CONFIG_ERROR
                }
            }
        }
        Err(e) => {
            if !args.quiet {
                eprintln!("error: {e:#}");
            }
            if let Some(verify_err) = e.downcast_ref::<VerifyError>() {
                verify_err.exit_code()
            } else {
                CONFIG_ERROR
            }
        }
    }
}

fn run_verify(args: &VerifyArgs) -> Result<SignedRequestPayload> {
    let token = if args.token == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read token from stdin")?;
        buf.trim().to_string()
    } else {
        args.token.clone()
    };

    if args.secret.secret.is_empty() {
        anyhow::bail!("app secret is empty");
    }
    let secret = AppSecret::from(args.secret.secret.as_str());

    Ok(verify_signed_request(&token, &secret)?)
}

fn print_payload(payload: &SignedRequestPayload, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(payload)?);
        return Ok(());
    }

    println!("Signed request verified");
    println!();
    println!("  algorithm:   {}", payload.algorithm().unwrap_or("-"));
    println!("  user_id:     {}", payload.user_id().as_deref().unwrap_or("-"));
    println!(
        "  oauth_token: {}",
        if payload.oauth_token().is_some() {
            "(present)"
        } else {
            "-"
        }
    );
    println!("  locale:      {}", payload.locale().unwrap_or("-"));
    if let Some(issued_at) = payload.issued_at() {
        println!("  issued_at:   {}", issued_at.to_rfc3339());
    }
    if let Some(expires) = payload.expires() {
        println!("  expires:     {}", expires.to_rfc3339());
    }
    Ok(())
}
