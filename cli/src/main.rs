mod commands;
mod ssh;
mod terminal;

use std::path::PathBuf;

use tracing::debug;

use commands::CommandLine;
use hoppr_common::config::Settings;
use hoppr_common::host::Host;
use hoppr_core::ansiblecfg::AnsibleCfg;
use hoppr_core::inventory::Inventory;
use terminal::logging;

const ANSIBLE_CFG: &str = "ansible.cfg";

/// Key paths under `inventory/host_vars` are written with a playbook
/// dir template in some inventories; they resolve against whichever
/// inventory file actually contributed the host.
const HOST_VARS_KEY_PREFIX: &str =
    "{{ playbook_dir }}/../../inventory/host_vars/{{ inventory_hostname }}/";

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    let settings = Settings::load()?;
    logging::init(settings.debug);

    let mut defaults = settings.defaults.to_host();
    let mut paths: Vec<PathBuf> = Vec::new();
    if !settings.path.is_empty() {
        paths.push(PathBuf::from(&settings.path));
    }
    match AnsibleCfg::from_path(ANSIBLE_CFG) {
        Ok(cfg) => {
            cfg.apply_defaults(&mut defaults);
            paths.extend(cfg.inventory_paths().into_iter().map(PathBuf::from));
        }
        Err(err) => debug!("{ANSIBLE_CFG} is not available: {err}"),
    }

    let inventory = Inventory::load(&paths, &defaults);

    if commands.list {
        for host in inventory.match_glob(&commands.host) {
            println!("{}", host.name);
        }
        return Ok(());
    }

    if inventory.is_empty() {
        debug!("inventory not found");
        return ssh::execute(&settings, None, &commands);
    }

    let mut host = inventory.match_exact(&commands.host).cloned();
    match host {
        Some(ref mut host) => {
            rewrite_key_paths(host, &inventory.paths);
            debug!("host {} has been found, starting ssh", host.name);
        }
        None => debug!("host {} not found in inventory", commands.host),
    }

    ssh::execute(&settings, host.as_ref(), &commands)
}

fn rewrite_key_paths(host: &mut Host, paths: &[PathBuf]) {
    for path in paths {
        let base = path.to_string_lossy();
        let base = base.strip_suffix("/hosts").unwrap_or(&base);
        for key in &mut host.private_keys {
            if let Some(rest) = key.strip_prefix(HOST_VARS_KEY_PREFIX) {
                *key = format!("{base}/host_vars/{}/{rest}", host.name);
            }
        }
    }
}
