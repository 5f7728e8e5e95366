//! Worked alias assignment scenarios.
use rollcall::alias::{AliasError, AliasRegistry};

#[test]
fn repeated_goblin_bumps_number() {
    let mut registry = AliasRegistry::new();
    assert_eq!(registry.add("Goblin", 3, false).unwrap(), "Gob");
    assert_eq!(registry.add("Goblin", 3, false).unwrap(), "Gob1");
}

#[test]
fn colliding_name_never_reuses_an_alias() {
    let mut registry = AliasRegistry::new();
    assert_eq!(registry.add("Goblin", 3, false).unwrap(), "Gob");
    let gobbo = registry.add("Gobbo", 3, false).unwrap();
    assert_ne!(gobbo, "Gob");

    let mut registry = AliasRegistry::new();
    registry.add("Goblin", 3, false).unwrap();
    registry.add("Goblin", 3, false).unwrap();
    let gobbo = registry.add("Gobbo", 3, false).unwrap();
    assert!(gobbo != "Gob" && gobbo != "Gob1", "Gobbo got {gobbo}");
    // Goblin keeps its own prefix after Gobbo joins.
    assert_eq!(registry.add("Goblin", 3, false).unwrap().get(..3), Some("Gob"));
}

#[test]
fn ambiguity_grows_with_matching_names() {
    let mut registry = AliasRegistry::new();
    registry.add("Goblin", 3, false).unwrap();
    assert_eq!(registry.check_ambiguity("Gob").unwrap(), 1);
    registry.add("Gobbo", 3, false).unwrap();
    assert_eq!(registry.check_ambiguity("Gob").unwrap(), 2);
    // The number suffix does not change what the prefix could mean.
    assert_eq!(registry.check_ambiguity("Gob7").unwrap(), 2);
}

#[test]
fn seeded_registry_continues_numbering() {
    let mut registry =
        AliasRegistry::from_pairs([("Gob", "Goblin"), ("Gob1", "Goblin")]).unwrap();
    assert_eq!(registry.add("Goblin", 3, false).unwrap(), "Gob2");
}

#[test]
fn seeded_gap_is_filled_first() {
    let mut registry =
        AliasRegistry::from_pairs([("Gob", "Goblin"), ("Gob2", "Goblin")]).unwrap();
    assert_eq!(registry.add("Goblin", 3, false).unwrap(), "Gob1");
    assert_eq!(registry.add("Goblin", 3, false).unwrap(), "Gob3");
}

#[test]
fn multi_word_names_avoid_single_word_matches() {
    let mut registry = AliasRegistry::new();
    registry.add("Goblin", 3, false).unwrap();
    let boss = registry.add("Goblin Boss", 3, false).unwrap();
    assert_eq!(boss, "GBo");
    assert_eq!(registry.check_ambiguity(&boss).unwrap(), 1);
}

#[test]
fn swarm_members_are_always_numbered() {
    let mut registry = AliasRegistry::new();
    let first = registry.add("Bat", 3, true).unwrap();
    let second = registry.add("Bat", 3, true).unwrap();
    assert_eq!(first, "Bat1");
    assert_eq!(second, "Bat2");
}

#[test]
fn unknown_alias_has_zero_ambiguity() {
    let mut registry = AliasRegistry::new();
    registry.add("Orc", 3, false).unwrap();
    assert_eq!(registry.check_ambiguity("Kob").unwrap(), 0);
    assert_eq!(registry.check_ambiguity("orc").unwrap(), 0);
}

#[test]
fn errors_are_typed() {
    let mut registry = AliasRegistry::new();
    assert!(matches!(
        registry.add("Orc #1", 3, false),
        Err(AliasError::NotCanonicalizable(_))
    ));
    assert!(matches!(
        registry.check_ambiguity("3Orc"),
        Err(AliasError::InvalidAliasFormat(_))
    ));
    assert!(matches!(
        AliasRegistry::from_pairs([("Orc", "Orc"), ("Or1", "orc")]),
        Err(AliasError::InconsistentPrefix { .. })
    ));
    assert!(registry.is_empty());
}
