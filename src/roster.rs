//! # Encounter Roster
//!
//! The persisted list of participants in one encounter, and the only place
//! the allocator meets the outside world. Each join rebuilds an
//! [`AliasRegistry`] from the roster's `(alias, name)` pairs, adds the new
//! names through it, and appends the resulting participants.
//!
//! Rosters are stored as JSON:
//!
//! ```text
//! {
//!   "participants": [
//!     { "alias": "Gob", "name": "Goblin", "kind": "monster" },
//!     { "alias": "RS1", "name": "Rat Swarm", "kind": "swarm" }
//!   ]
//! }
//! ```
//!
//! Joins on one roster must be serialized by the caller; the roster does no
//! locking of its own.

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::alias::{canonicalize, parse_alias, Alias, AliasError, AliasLimits, AliasRegistry};
use crate::config::Config;
use crate::logutil::escape_log;

/// Which alias policy applies to a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantKind {
    /// A player character.
    Character,
    #[default]
    Monster,
    /// An anonymous member of a group of identical monsters.
    Swarm,
}

impl ParticipantKind {
    pub const ALL: [ParticipantKind; 3] = [
        ParticipantKind::Character,
        ParticipantKind::Monster,
        ParticipantKind::Swarm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantKind::Character => "character",
            ParticipantKind::Monster => "monster",
            ParticipantKind::Swarm => "swarm",
        }
    }
}

impl fmt::Display for ParticipantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipantKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "character" | "pc" => Ok(ParticipantKind::Character),
            "monster" => Ok(ParticipantKind::Monster),
            "swarm" => Ok(ParticipantKind::Swarm),
            other => Err(anyhow!("Unknown participant kind '{}'", other)),
        }
    }
}

/// How aliases are requested for one kind of participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinPolicy {
    pub prefix_length: usize,
    #[serde(default)]
    pub always_number: bool,
}

impl JoinPolicy {
    pub fn character() -> Self {
        JoinPolicy {
            prefix_length: 3,
            always_number: false,
        }
    }

    pub fn monster() -> Self {
        JoinPolicy {
            prefix_length: 3,
            always_number: false,
        }
    }

    pub fn swarm() -> Self {
        JoinPolicy {
            prefix_length: 3,
            always_number: true,
        }
    }
}

/// One persisted participant record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub alias: String,
    /// Canonical name.
    pub name: String,
    #[serde(default)]
    pub kind: ParticipantKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_participants(participants: Vec<Participant>) -> Self {
        Roster { participants }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Rebuild allocator state from the current participants.
    pub fn registry(&self, limits: AliasLimits) -> Result<AliasRegistry, AliasError> {
        AliasRegistry::from_pairs_with_limits(
            self.participants
                .iter()
                .map(|p| (p.alias.as_str(), p.name.as_str())),
            limits,
        )
    }

    /// Add one participant using the configured policy for `kind`.
    pub fn join(&mut self, name: &str, kind: ParticipantKind, config: &Config) -> Result<String, AliasError> {
        let mut registry = self.registry(config.aliases)?;
        let participant = admit(&mut registry, name, kind, config.policies.for_kind(kind))?;
        let alias = participant.alias.clone();
        self.participants.push(participant);
        Ok(alias)
    }

    /// Add several participants of the same kind using the configured policy.
    pub fn join_all<I, S>(&mut self, names: I, kind: ParticipantKind, config: &Config) -> Result<Vec<String>, AliasError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let policy = config.policies.for_kind(kind);
        self.join_with_policy(names, kind, policy, config.aliases)
    }

    /// Add several participants with an explicit policy.
    ///
    /// Either every name joins or none does.
    pub fn join_with_policy<I, S>(
        &mut self,
        names: I,
        kind: ParticipantKind,
        policy: JoinPolicy,
        limits: AliasLimits,
    ) -> Result<Vec<String>, AliasError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = self.registry(limits)?;
        let mut joined = Vec::new();
        for name in names {
            joined.push(admit(&mut registry, name.as_ref(), kind, policy)?);
        }

        let aliases = joined.iter().map(|p| p.alias.clone()).collect();
        self.participants.extend(joined);
        Ok(aliases)
    }

    pub fn find(&self, alias: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.alias == alias)
    }

    /// Ambiguity of `alias` against every participant's name.
    pub fn ambiguity(&self, alias: &str, limits: AliasLimits) -> Result<usize, AliasError> {
        self.registry(limits)?.check_ambiguity(alias)
    }

    /// Participants in alias order (prefix bytes, then number).
    ///
    /// Fails on the same seed errors as [`Roster::registry`], so a corrupt
    /// roster is reported rather than partially listed.
    pub fn sorted(&self, limits: AliasLimits) -> Result<Vec<&Participant>, AliasError> {
        self.registry(limits)?;
        let mut keyed = self
            .participants
            .iter()
            .map(|p| Ok((parse_alias(&p.alias)?, p)))
            .collect::<Result<Vec<(Alias, &Participant)>, AliasError>>()?;
        keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(keyed.into_iter().map(|(_, p)| p).collect())
    }

    /// Load a roster file. A missing file is an empty roster.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path).await {
            Ok(data) => {
                let roster: Roster = serde_json::from_str(&data)
                    .map_err(|e| anyhow!("Failed to parse roster {}: {}", path.display(), e))?;
                debug!("Loaded {} participants from {}", roster.len(), path.display());
                Ok(roster)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No roster at {}; starting empty", path.display());
                Ok(Roster::new())
            }
            Err(e) => Err(anyhow!("Failed reading roster {}: {}", path.display(), e)),
        }
    }

    /// Write the roster via a temp file and rename.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| anyhow!("Failed to serialize roster: {}", e))?;

        let base = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("roster.json");
        let tmp_path = path.with_file_name(format!(".{}.tmp-{}", base, std::process::id()));
        fs::write(&tmp_path, content)
            .await
            .map_err(|e| anyhow!("Failed to write {}: {}", tmp_path.display(), e))?;
        fs::rename(&tmp_path, path)
            .await
            .map_err(|e| anyhow!("Failed to replace roster {}: {}", path.display(), e))?;
        Ok(())
    }
}

fn admit(
    registry: &mut AliasRegistry,
    name: &str,
    kind: ParticipantKind,
    policy: JoinPolicy,
) -> Result<Participant, AliasError> {
    let canonical = canonicalize(name)?;
    let alias = registry.add(name, policy.prefix_length, policy.always_number)?;
    debug!("{} joins as {} ({})", escape_log(name), alias, kind);
    Ok(Participant {
        alias,
        name: canonical.to_string(),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_uses_kind_policy() {
        let config = Config::default();
        let mut roster = Roster::new();
        assert_eq!(roster.join("goblin", ParticipantKind::Monster, &config).unwrap(), "Gob");
        assert_eq!(roster.join("rat swarm", ParticipantKind::Swarm, &config).unwrap(), "RSw1");
        let rats = roster.find("RSw1").unwrap();
        assert_eq!(rats.name, "Rat Swarm");
        assert_eq!(rats.kind, ParticipantKind::Swarm);
    }

    #[test]
    fn failed_batch_leaves_roster_untouched() {
        let config = Config::default();
        let mut roster = Roster::new();
        roster.join("Orc", ParticipantKind::Monster, &config).unwrap();
        let err = roster
            .join_all(["Kobold", "Kobold 2"], ParticipantKind::Monster, &config)
            .unwrap_err();
        assert!(matches!(err, AliasError::NotCanonicalizable(_)));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Swarm".parse::<ParticipantKind>().unwrap(), ParticipantKind::Swarm);
        assert_eq!("pc".parse::<ParticipantKind>().unwrap(), ParticipantKind::Character);
        assert!("dragon".parse::<ParticipantKind>().is_err());
    }

    #[test]
    fn sorted_follows_alias_order() {
        let roster = Roster::from_participants(vec![
            Participant { alias: "Orc".into(), name: "Orc".into(), kind: ParticipantKind::Monster },
            Participant { alias: "Gob1".into(), name: "Goblin".into(), kind: ParticipantKind::Monster },
            Participant { alias: "Gob".into(), name: "Goblin".into(), kind: ParticipantKind::Monster },
        ]);
        let order: Vec<&str> = roster
            .sorted(AliasLimits::default())
            .unwrap()
            .iter()
            .map(|p| p.alias.as_str())
            .collect();
        assert_eq!(order, vec!["Gob", "Gob1", "Orc"]);
    }

    #[test]
    fn sorted_keeps_unrendered_aliases() {
        let roster = Roster::from_participants(vec![
            Participant { alias: "Orc".into(), name: "Orc".into(), kind: ParticipantKind::Monster },
            Participant { alias: "Gob01".into(), name: "Goblin".into(), kind: ParticipantKind::Monster },
            Participant { alias: "Gob0".into(), name: "Goblin".into(), kind: ParticipantKind::Monster },
        ]);
        let order: Vec<&str> = roster
            .sorted(AliasLimits::default())
            .unwrap()
            .iter()
            .map(|p| p.alias.as_str())
            .collect();
        assert_eq!(order, vec!["Gob0", "Gob01", "Orc"]);
    }

    #[test]
    fn sorted_reports_malformed_alias() {
        let roster = Roster::from_participants(vec![Participant {
            alias: "Gob-1".into(),
            name: "Goblin".into(),
            kind: ParticipantKind::Monster,
        }]);
        assert!(matches!(
            roster.sorted(AliasLimits::default()),
            Err(AliasError::InvalidAliasFormat(_))
        ));
    }

    #[test]
    fn join_reports_canonicalization_failure() {
        let mut roster = Roster::new();
        let err = roster
            .join("Orc 2", ParticipantKind::Monster, &Config::default())
            .unwrap_err();
        assert!(matches!(err, AliasError::NotCanonicalizable(_)));
        assert!(roster.is_empty());
    }
}
