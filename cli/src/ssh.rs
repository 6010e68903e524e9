use std::process::Command;

use anyhow::{Context, bail};
use tracing::{debug, info};

use hoppr_common::config::Settings;
use hoppr_common::host::Host;

use crate::commands::CommandLine;

/// Child exit codes that map to a clean exit: normal close and
/// Ctrl+C.
const CLEAN_EXIT_CODES: &[i32] = &[0, 130];

/// Launches the configured ssh command with inherited stdio and the
/// settings' environment. Without a resolved host the raw command
/// line passes through untouched, unless strict mode forbids it.
pub fn execute(
    settings: &Settings,
    host: Option<&Host>,
    commands: &CommandLine,
) -> anyhow::Result<()> {
    let (program, base_args) = split_command(&settings.ssh_command);

    let args = match host {
        Some(host) => {
            if !host.password.is_empty() {
                info!("ssh password is: {}", host.password);
            }
            if !host.become_password.is_empty() {
                info!("become password is: {}", host.become_password);
            }
            connection_args(host, &commands.ssh_args)
        }
        None => {
            if settings.inventory_only {
                bail!("host not found within inventory");
            }
            let mut passthrough = vec![commands.host.clone()];
            passthrough.extend(commands.ssh_args.iter().cloned());
            passthrough
        }
    };
    debug!("command: {program} {:?}", [&base_args[..], &args[..]].concat());

    let status = Command::new(&program)
        .args(&base_args)
        .args(&args)
        .envs(&settings.environ)
        .status()
        .with_context(|| format!("cannot start {program}"))?;

    let code = status.code().unwrap_or(1);
    if !CLEAN_EXIT_CODES.contains(&code) {
        bail!("command failed with status {code}");
    }
    Ok(())
}

/// The first whitespace-separated word is the program, the rest are
/// its leading arguments (`ssh_command: "ssh -F ~/.ssh/alt"`).
fn split_command(ssh_command: &str) -> (String, Vec<String>) {
    let mut parts = ssh_command.split_whitespace().map(str::to_string);
    let program = parts.next().unwrap_or_else(|| "ssh".to_string());
    (program, parts.collect())
}

/// `-i` per private key, `-p` when a port is set, then the
/// destination. The address falls back to the inventory name.
fn connection_args(host: &Host, extra: &[String]) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();

    for key in &host.private_keys {
        args.push("-i".to_string());
        args.push(key.clone());
    }

    if host.port != 0 {
        args.push("-p".to_string());
        args.push(host.port.to_string());
    }

    let address = if host.address.is_empty() {
        &host.name
    } else {
        &host.address
    };
    if host.user.is_empty() {
        args.push(address.clone());
    } else {
        args.push(format!("{}@{address}", host.user));
    }

    args.extend(extra.iter().cloned());
    args
}
