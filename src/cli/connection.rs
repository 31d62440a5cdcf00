use anyhow::{bail, Context, Result};
use clap::Args;
use console::Term;

use omero_isa::store::{ConnectionSettings, Session, SnapshotStore};

use super::config::ConnectionConfig;

/// Object store login flags shared by the commands that connect
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// OMERO host (snapshot path or file:// URL)
    #[arg(long, env = "OMERO_HOST")]
    host: Option<String>,

    /// OMERO username
    #[arg(short = 'u', long, env = "OMERO_USER")]
    username: Option<String>,

    /// OMERO password
    #[arg(long, env = "OMERO_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

/// How a prompted value is read from the terminal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Echo {
    Visible,
    Hidden,
}

impl ConnectionArgs {
    /// Merge flags over config values, prompting for anything still missing
    pub fn resolve(self, config: ConnectionConfig) -> Result<ConnectionSettings> {
        Ok(ConnectionSettings {
            host: pick(self.host, config.host, "OMERO Host", Echo::Visible)?,
            username: pick(self.username, config.username, "OMERO Username", Echo::Visible)?,
            password: pick(self.password, config.password, "OMERO Password", Echo::Hidden)?,
        })
    }
}

fn pick(flag: Option<String>, config: Option<String>, label: &str, echo: Echo) -> Result<String> {
    match flag.or(config) {
        Some(value) => Ok(value),
        None => prompt(label, echo),
    }
}

/// Ask for a required value on the terminal; hidden values are not echoed
fn prompt(label: &str, echo: Echo) -> Result<String> {
    let term = Term::stdout();
    term.write_str(&format!("{label}: "))?;

    let line = match echo {
        Echo::Visible => term.read_line(),
        Echo::Hidden => term.read_secure_line(),
    }
    .with_context(|| format!("Failed to read {label}"))?;

    required(label, &line)
}

fn required(label: &str, input: &str) -> Result<String> {
    let value = input.trim();
    if value.is_empty() {
        bail!("{label} is required");
    }
    Ok(value.to_string())
}

/// Open a session, failing the run if the store cannot be reached
pub fn connect(settings: &ConnectionSettings) -> Result<Session<SnapshotStore>> {
    let store = SnapshotStore::connect(settings)
        .context("Could not connect to OMERO. Check credentials.")?;
    Ok(Session::new(store))
}
