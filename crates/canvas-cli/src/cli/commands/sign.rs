//! `canvas sign` - Produce a signed request.

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::Value;

use canvas_core::{sign_signed_request, AppSecret};

use super::super::args::SignArgs;
use super::read_input;

pub fn run(args: SignArgs) -> Result<()> {
    let mut payload = match &args.payload {
        Some(path) => {
            let text = read_input(path)?;
            serde_json::from_str::<Value>(&text)
                .with_context(|| format!("failed to parse payload JSON: {}", path.display()))?
        }
        None => Value::Object(Default::default()),
    };

    let object = payload
        .as_object_mut()
        .context("payload must be a JSON object")?;
    if let Some(user_id) = &args.user_id {
        object.insert("user_id".into(), Value::from(user_id.as_str()));
    }
    if let Some(token) = &args.oauth_token {
        object.insert("oauth_token".into(), Value::from(token.as_str()));
    }
    if args.issued_now {
        object.insert("issued_at".into(), Value::from(Utc::now().timestamp()));
    }

    if args.secret.secret.is_empty() {
        anyhow::bail!("app secret is empty");
    }
    let secret = AppSecret::from(args.secret.secret.as_str());

    let token = sign_signed_request(&payload, &secret)?;
    tracing::debug!(fields = payload.as_object().map_or(0, |o| o.len()), "signed payload");
    println!("{token}");
    Ok(())
}
