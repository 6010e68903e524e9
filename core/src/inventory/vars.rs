use std::collections::BTreeMap;

use hoppr_common::host::Host;

/// Applies one recognized connection parameter to `host`. Unknown
/// keys are left alone (group vars keep them in the raw map); a port
/// value that does not parse leaves the field unset rather than
/// failing the line.
pub(crate) fn apply(host: &mut Host, key: &str, value: &str) {
    match key {
        "ansible_host" => host.address = value.to_string(),
        "ansible_port" | "ansible_ssh_port" => {
            if let Ok(port) = value.parse::<u16>() {
                host.port = port;
            }
        }
        "ansible_user" => host.user = value.to_string(),
        "ansible_ssh_pass" => host.password = value.to_string(),
        "ansible_become_password" => host.become_password = value.to_string(),
        "ansible_ssh_private_key_file" => host.private_keys = vec![value.to_string()],
        _ => {}
    }
}

/// Parses `key=value` parameter tokens from a host line. Tokens
/// without a `=` are skipped individually.
pub(crate) fn from_tokens(tokens: &[String]) -> Host {
    let mut host = Host::default();
    for token in tokens {
        if let Some((key, value)) = token.split_once('=') {
            apply(&mut host, key.trim(), value);
        }
    }
    host
}

/// Semantic attribute view of a raw group-var map.
pub(crate) fn from_pairs(pairs: &BTreeMap<String, String>) -> Host {
    let mut host = Host::default();
    for (key, value) in pairs {
        apply(&mut host, key, value);
    }
    host
}
