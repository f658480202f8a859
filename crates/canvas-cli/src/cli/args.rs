use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "canvas",
    version,
    about = "Verify and produce canvas app signed requests"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify a signed request and print its payload
    Verify(VerifyArgs),
    /// Produce a signed request for local testing
    Sign(SignArgs),
    /// Print the OAuth login dialog URL
    LoginUrl(LoginUrlArgs),
    /// Print the response a canvas page would send for a signed request
    Handle(HandleArgs),
}

#[derive(Args, Debug)]
pub struct SecretArgs {
    /// App secret (HMAC key)
    #[arg(long, env = "FACEBOOK_SECRET", hide_env_values = true)]
    pub secret: String,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Signed request token, or `-` to read it from stdin
    pub token: String,

    #[command(flatten)]
    pub secret: SecretArgs,

    /// Print the payload as compact JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Quiet mode - only exit code, no output
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    /// Payload JSON file, or `-` for stdin (default: `{}`)
    #[arg(long)]
    pub payload: Option<PathBuf>,

    /// Set `user_id` in the payload
    #[arg(long)]
    pub user_id: Option<String>,

    /// Set `oauth_token` in the payload
    #[arg(long)]
    pub oauth_token: Option<String>,

    /// Set `issued_at` to the current time
    #[arg(long)]
    pub issued_now: bool,

    #[command(flatten)]
    pub secret: SecretArgs,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Canvas config file (YAML); environment variables override its values
    #[arg(long, env = "CANVAS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct LoginUrlArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct HandleArgs {
    /// Value of the `signed_request` POST parameter; omit to simulate a missing parameter
    pub token: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}
