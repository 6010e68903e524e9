use hoppr_common::host::Host;

use super::line::{self, LineKind};
use super::{DEFAULT_GROUP, Group, Inventory, vars};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Hosts,
    Vars,
    Children,
}

/// Parses one inventory source into the raw, un-finalized model.
/// Content never fails: every line degrades to the closest plausible
/// meaning or is dropped on its own.
pub(crate) fn parse(text: &str) -> Inventory {
    let mut inventory = Inventory::new();
    let mut current = DEFAULT_GROUP.to_string();
    let mut section = Section::Hosts;

    for raw in text.lines() {
        match line::classify(raw) {
            LineKind::Ignore => {}
            LineKind::Group(name) => {
                inventory.ensure_group(&name);
                current = name;
                section = Section::Hosts;
            }
            LineKind::GroupVars(name) => {
                inventory.ensure_group(&name);
                current = name;
                section = Section::Vars;
            }
            LineKind::GroupChildren(name) => {
                inventory.ensure_group(&name);
                current = name;
                section = Section::Children;
            }
            LineKind::Var { key, value } => {
                group_mut(&mut inventory, &current).vars.insert(key, value);
            }
            LineKind::Bare(token) => match section {
                Section::Children => {
                    inventory.ensure_group(&token);
                    group_mut(&mut inventory, &current).children.push(token);
                }
                Section::Vars => raw_var(&mut inventory, &current, raw),
                Section::Hosts => insert_host(&mut inventory, &current, &[token]),
            },
            LineKind::Host { fields } => match section {
                // an unquoted value with spaces still parses in a vars
                // section
                Section::Vars => raw_var(&mut inventory, &current, raw),
                Section::Children => {}
                Section::Hosts => insert_host(&mut inventory, &current, &fields),
            },
        }
    }

    inventory
}

fn group_mut<'a>(inventory: &'a mut Inventory, name: &str) -> &'a mut Group {
    inventory.groups.entry(name.to_string()).or_default()
}

fn raw_var(inventory: &mut Inventory, current: &str, raw: &str) {
    if let Some((key, value)) = raw.trim().split_once('=') {
        group_mut(inventory, current)
            .vars
            .insert(key.trim().to_string(), value.trim().to_string());
    }
}

/// The last declaration of a host name wins at record granularity,
/// but direct groups accumulate across declarations.
fn insert_host(inventory: &mut Inventory, current: &str, fields: &[String]) {
    let mut host = parse_host(fields);
    if host.name.is_empty() {
        return;
    }

    let mut direct = inventory
        .hosts
        .remove(&host.name)
        .map(|previous| previous.direct_groups)
        .unwrap_or_default();
    if !direct.iter().any(|group| group == current) {
        direct.push(current.to_string());
    }
    host.direct_groups = direct;

    inventory.hosts.insert(host.name.clone(), host);
}

fn parse_host(fields: &[String]) -> Host {
    let Some((raw_name, params)) = fields.split_first() else {
        return Host::default();
    };

    let (name, shorthand_port) = split_host_port(raw_name);
    let mut host = vars::from_tokens(params);
    host.name = name;
    // an explicit ansible_port parameter beats the name shorthand
    if host.port == 0 {
        host.port = shorthand_port;
    }
    host
}

/// Splits the `name:port` shorthand, including the bracketed
/// `[v6addr]:port` form. A trailing component that does not parse as
/// a port is dropped along with its colon.
fn split_host_port(raw: &str) -> (String, u16) {
    let has_shorthand = match (raw.rfind(']'), raw.rfind(':')) {
        (Some(bracket), Some(colon)) => raw.contains('[') && bracket < colon,
        (None, Some(_)) => true,
        _ => false,
    };
    if !has_shorthand {
        return (raw.to_string(), 0);
    }

    match raw.rsplit_once(':') {
        Some((name, port)) => (
            name.to_string(),
            port.parse::<u16>().unwrap_or(0),
        ),
        None => (raw.to_string(), 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hosts_before_any_header_are_ungrouped() {
        let inventory = parse("web1 ansible_user=app\n");
        let host = &inventory.hosts["web1"];
        assert_eq!(host.direct_groups, vec![DEFAULT_GROUP.to_string()]);
        assert_eq!(host.user, "app");
    }

    #[test]
    fn bare_token_under_a_group_is_a_host() {
        let inventory = parse("[web]\nweb1\n");
        assert!(inventory.hosts.contains_key("web1"));
        assert!(!inventory.groups["web"].children.contains(&"web1".to_string()));
    }

    #[test]
    fn children_section_builds_the_tree_and_vivifies() {
        let inventory = parse("[all:children]\nweb\ndb\n");
        assert_eq!(
            inventory.groups["all"].children,
            vec!["web".to_string(), "db".to_string()]
        );
        // referenced but never declared on their own
        assert!(inventory.groups.contains_key("web"));
        assert!(inventory.groups.contains_key("db"));
    }

    #[test]
    fn group_vars_are_stored_raw() {
        let inventory = parse("[web:vars]\nansible_user=deploy\nmotd=welcome to the fleet\n");
        let vars = &inventory.groups["web"].vars;
        assert_eq!(vars["ansible_user"], "deploy");
        assert_eq!(vars["motd"], "welcome to the fleet");
    }

    #[test]
    fn host_port_shorthand_and_override() {
        let inventory = parse("db1:5432 ansible_user=app\ndb2:5432 ansible_port=9999\n");

        let db1 = &inventory.hosts["db1"];
        assert_eq!((db1.port, db1.user.as_str()), (5432, "app"));

        let db2 = &inventory.hosts["db2"];
        assert_eq!(db2.port, 9999);
    }

    #[test]
    fn bracketed_address_keeps_its_colons() {
        let inventory = parse("[2001:db8::1]:2222\n");
        let host = &inventory.hosts["[2001:db8::1]"];
        assert_eq!(host.port, 2222);
    }

    #[test]
    fn non_numeric_shorthand_port_is_dropped() {
        let inventory = parse("web1:abc ansible_user=app\n");
        let host = &inventory.hosts["web1"];
        assert_eq!(host.port, 0);
        assert_eq!(host.user, "app");
    }

    #[test]
    fn redeclared_host_keeps_accumulated_groups_but_last_record_wins() {
        let inventory = parse("[web]\nweb1 ansible_port=22\n[backup]\nweb1 ansible_port=2222\n");
        let host = &inventory.hosts["web1"];
        assert_eq!(host.port, 2222);
        assert_eq!(
            host.direct_groups,
            vec!["web".to_string(), "backup".to_string()]
        );
    }

    #[test]
    fn malformed_content_never_aborts_the_file() {
        let text = "[web\nweb1 ansible_port=notanumber stray\n===\n[web:vars]\njustaword\n";
        let inventory = parse(text);
        // "[web" is not a header; it parses as a host line
        assert!(inventory.hosts.contains_key("web1"));
        assert_eq!(inventory.hosts["web1"].port, 0);
    }
}
