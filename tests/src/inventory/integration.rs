#![cfg(test)]
use std::fs;
use std::path::PathBuf;

use hoppr_common::host::Host;
use hoppr_core::inventory::Inventory;
use tempfile::TempDir;

fn write_inventory(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("writing inventory fixture");
    path
}

/// The canonical end-to-end scenario: a host with no attributes of
/// its own picks up a group var through a `:vars` section and joins
/// the parent group through a `:children` section.
#[test]
fn group_vars_and_children_resolve_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_inventory(
        &dir,
        "hosts",
        "[web]\nweb1\n[web:vars]\nansible_user=deploy\n[all:children]\nweb\n",
    );

    let inventory = Inventory::load(&[path], &Host::default());
    let web1 = inventory.match_exact("web1").expect("web1 resolved");

    assert!(web1.groups.contains(&"web".to_string()));
    assert!(web1.groups.contains(&"all".to_string()));
    assert_eq!(web1.user, "deploy");
}

#[test]
fn later_sources_override_earlier_ones_per_record() {
    let dir = TempDir::new().unwrap();
    let first = write_inventory(&dir, "hosts.a", "[web]\nweb1 ansible_port=22\n");
    let second = write_inventory(&dir, "hosts.b", "[web]\nweb1 ansible_port=2222\n");

    let inventory = Inventory::load(&[first, second], &Host::default());
    assert_eq!(inventory.match_exact("web1").unwrap().port, 2222);
}

#[test]
fn unreadable_sources_are_skipped() {
    let dir = TempDir::new().unwrap();
    let real = write_inventory(&dir, "hosts", "web1\n");
    let missing = dir.path().join("no-such-file");

    let inventory = Inventory::load(&[missing, real], &Host::default());
    assert_eq!(inventory.hosts.len(), 1);
    assert_eq!(inventory.paths.len(), 1);
}

#[test]
fn no_readable_source_yields_an_empty_inventory() {
    let dir = TempDir::new().unwrap();
    let inventory = Inventory::load(
        &[dir.path().join("a"), dir.path().join("b")],
        &Host::default(),
    );
    assert!(inventory.is_empty());
    assert!(inventory.match_exact("anything").is_none());
}

#[test]
fn host_attributes_survive_group_vars_and_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_inventory(
        &dir,
        "hosts",
        "[web]\nweb1 ansible_user=own-user\n[web:vars]\nansible_user=group-user\n",
    );
    let defaults = Host {
        user: "default-user".to_string(),
        port: 22,
        ..Host::default()
    };

    let inventory = Inventory::load(&[path], &defaults);
    let web1 = inventory.match_exact("web1").unwrap();

    assert_eq!(web1.user, "own-user");
    assert_eq!(web1.port, 22);
}

#[test]
fn glob_lookup_spans_all_groups() {
    let dir = TempDir::new().unwrap();
    let path = write_inventory(&dir, "hosts", "[web]\nweb1\nweb2\n[db]\ndb1\n");

    let inventory = Inventory::load(&[path], &Host::default());
    let mut matched: Vec<String> = inventory
        .match_glob("web*")
        .map(|host| host.name.clone())
        .collect();
    matched.sort();

    assert_eq!(matched, vec!["web1".to_string(), "web2".to_string()]);
}

#[test]
fn port_shorthand_yields_to_an_explicit_parameter() {
    let dir = TempDir::new().unwrap();
    let path = write_inventory(
        &dir,
        "hosts",
        "db1:5432 ansible_user=app\ndb2:5432 ansible_port=9999\n",
    );

    let inventory = Inventory::load(&[path], &Host::default());
    let db1 = inventory.match_exact("db1").unwrap();
    assert_eq!((db1.port, db1.user.as_str()), (5432, "app"));
    assert_eq!(inventory.match_exact("db2").unwrap().port, 9999);
}

#[test]
fn grandparent_groups_contribute_vars() {
    let dir = TempDir::new().unwrap();
    let path = write_inventory(
        &dir,
        "hosts",
        "[web]\nweb1\n[prod:children]\nweb\n[all:children]\nprod\n[all:vars]\nansible_user=fleet\n",
    );

    let inventory = Inventory::load(&[path], &Host::default());
    let web1 = inventory.match_exact("web1").unwrap();

    assert!(web1.groups.contains(&"prod".to_string()));
    assert!(web1.groups.contains(&"all".to_string()));
    assert_eq!(web1.user, "fleet");
}

#[test]
fn cyclic_group_trees_still_load() {
    let dir = TempDir::new().unwrap();
    let path = write_inventory(
        &dir,
        "hosts",
        "[a:children]\nb\n[b:children]\na\n[a]\nhost1\n",
    );

    let inventory = Inventory::load(&[path], &Host::default());
    let host1 = inventory.match_exact("host1").unwrap();
    assert!(host1.groups.contains(&"a".to_string()));
    assert!(host1.groups.contains(&"b".to_string()));
}
