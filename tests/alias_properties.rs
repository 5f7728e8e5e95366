//! Invariants that must hold across arbitrary add sequences.
use std::collections::HashSet;

use rollcall::alias::{canonicalize, AliasRegistry};

const NAMES: &[&str] = &[
    "Goblin",
    "Gobbo",
    "goblin boss",
    "Orc",
    "Orc War Chief",
    "Ogre",
    "Owlbear",
    "Ancient Red Dragon",
    "Red Dragon Wyrmling",
    "Rat Swarm",
    "Ox",
    "A",
    "Aarakocra",
    "Goblin",
    "Owlbear",
];

/// (name, prefix length, always number) requests cycling through NAMES.
fn requests() -> Vec<(&'static str, usize, bool)> {
    (0..60)
        .map(|i| (NAMES[i % NAMES.len()], 1 + i % 10, i % 4 == 0))
        .collect()
}

fn run(registry: &mut AliasRegistry, reqs: &[(&str, usize, bool)]) -> Vec<(String, String)> {
    reqs.iter()
        .map(|&(name, len, always)| {
            let alias = registry.add(name, len, always).unwrap();
            (alias, name.to_string())
        })
        .collect()
}

#[test]
fn aliases_are_unique() {
    let mut registry = AliasRegistry::new();
    let pairs = run(&mut registry, &requests());
    let mut seen = HashSet::new();
    for (alias, name) in &pairs {
        assert!(seen.insert(alias.clone()), "alias {alias} for {name} repeated");
    }
    assert_eq!(registry.len(), pairs.len());
}

#[test]
fn same_name_keeps_its_prefix() {
    let mut registry = AliasRegistry::new();
    let pairs = run(&mut registry, &requests());
    for (alias, name) in &pairs {
        let canonical = canonicalize(name).unwrap();
        let prefix = registry.prefix_of(&canonical).unwrap();
        let parsed = rollcall::alias::parse_alias(alias).unwrap();
        assert_eq!(parsed.prefix, prefix, "{name} changed prefix");
    }
}

#[test]
fn ambiguity_never_decreases() {
    let mut registry = AliasRegistry::new();
    let probes = ["Gob", "O", "Ow", "R", "RD", "A"];
    let mut last = vec![0; probes.len()];
    for (name, len, always) in requests() {
        registry.add(name, len, always).unwrap();
        for (i, probe) in probes.iter().enumerate() {
            let now = registry.check_ambiguity(probe).unwrap();
            assert!(now >= last[i], "{probe} dropped from {} to {now}", last[i]);
            last[i] = now;
        }
    }
}

#[test]
fn assignment_is_reproducible() {
    let reqs = requests();
    let mut a = AliasRegistry::new();
    let mut b = AliasRegistry::new();
    assert_eq!(run(&mut a, &reqs), run(&mut b, &reqs));
}

#[test]
fn reconstruction_round_trips() {
    let reqs = requests();
    let (first, rest) = reqs.split_at(30);

    let mut original = AliasRegistry::new();
    let pairs = run(&mut original, first);

    let mut rebuilt = AliasRegistry::from_pairs(pairs.iter().map(|(a, n)| (a, n))).unwrap();
    assert_eq!(rebuilt.aliases(), original.aliases());
    assert_eq!(run(&mut rebuilt, rest), run(&mut original, rest));
    assert_eq!(rebuilt.aliases(), original.aliases());
}

#[test]
fn aliases_are_ordered_by_prefix_then_number() {
    let mut registry = AliasRegistry::new();
    for _ in 0..11 {
        registry.add("Goblin", 3, false).unwrap();
    }
    registry.add("Aarakocra", 3, false).unwrap();
    registry.add("Zombie", 1, false).unwrap();
    let aliases = registry.aliases();
    assert_eq!(aliases.first().map(String::as_str), Some("Aar"));
    assert_eq!(&aliases[1..4], &["Gob", "Gob1", "Gob2"]);
    // Numeric, not textual, order within a prefix.
    assert_eq!(&aliases[10..12], &["Gob9", "Gob10"]);
    assert_eq!(aliases.last().map(String::as_str), Some("Z"));
}

#[test]
fn canonicalization_is_idempotent() {
    for name in NAMES {
        let once = canonicalize(name).unwrap();
        assert_eq!(canonicalize(once.as_str()).unwrap(), once);
    }
}
