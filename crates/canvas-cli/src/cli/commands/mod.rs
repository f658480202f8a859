use super::args::*;

pub mod handle;
pub mod login_url;
pub mod sign;
pub mod verify;

use crate::exit_codes::SUCCESS;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Verify(args) => Ok(verify::cmd_verify(args)),
        Command::Sign(args) => sign::run(args).map(|_| SUCCESS),
        Command::LoginUrl(args) => login_url::run(args).map(|_| SUCCESS),
        Command::Handle(args) => handle::run(args),
    }
}

/// Read `-` as stdin, anything else as a file path.
pub(crate) fn read_input(path: &std::path::Path) -> anyhow::Result<String> {
    use anyhow::Context;
    use std::io::Read;

    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))
    }
}
