use crate::domain::models::Endpoint;
use crate::services::gateway::Gateway;
use anyhow::Context;
use std::io::Write;

pub fn login(api: &dyn Gateway, out: &mut dyn Write) -> anyhow::Result<()> {
    let envelope = api.get(&Endpoint::Login).context("login failed")?;
    writeln!(
        out,
        "[+] Login: {}",
        envelope.message().unwrap_or_default()
    )?;
    Ok(())
}
