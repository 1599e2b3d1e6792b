use log::{debug, info};

use crate::podium::auth::FixedCredentials;
use crate::podium::*;

use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_TITLE: &str = "Onenex Voting System";

pub const DEFAULT_MEMBERS: [&str; 5] = ["Group A", "Group B", "Group C", "Group D", "Group E"];

pub const DEFAULT_GUESTS: [&str; 2] = ["Guess 1", "Guess 2"];

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct VoterConfig {
    pub id: String,
    pub name: Option<String>,
    pub kind: VoterKind,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub username: String,
    pub password: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodiumConfig {
    pub title: Option<String>,
    pub voters: Option<Vec<VoterConfig>>,
    pub candidates: Option<Vec<String>>,
    pub credentials: Option<CredentialsConfig>,
}

impl PodiumConfig {
    pub fn title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    pub fn roster(&self) -> PodiumResult<Roster> {
        let voters: Vec<Voter> = match &self.voters {
            Some(vcs) => vcs
                .iter()
                .map(|vc| Voter {
                    id: vc.id.clone(),
                    name: vc.name.clone().unwrap_or_else(|| vc.id.clone()),
                    kind: vc.kind,
                })
                .collect(),
            None => default_voters(),
        };
        let candidates: Vec<String> = match &self.candidates {
            Some(cs) => cs.clone(),
            // Without an explicit list, everybody who may not vote for themselves is standing.
            None => voters
                .iter()
                .filter(|v| v.kind == VoterKind::Member)
                .map(|v| v.id.clone())
                .collect(),
        };
        debug!("roster: voters: {:?} candidates: {:?}", voters, candidates);
        Roster::new(voters, candidates).context(VotingSnafu {})
    }

    pub fn credentials(&self) -> FixedCredentials {
        match &self.credentials {
            Some(c) => FixedCredentials::new(&c.username, &c.password),
            None => FixedCredentials::default(),
        }
    }
}

pub fn default_voters() -> Vec<Voter> {
    let members = DEFAULT_MEMBERS
        .iter()
        .map(|id| Voter::new(id, id, VoterKind::Member));
    let guests = DEFAULT_GUESTS
        .iter()
        .map(|id| Voter::new(id, id, VoterKind::Guest));
    members.chain(guests).collect()
}

pub fn read_config(path: &str) -> PodiumResult<PodiumConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    let config: PodiumConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    info!("config: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster() {
        let roster = PodiumConfig::default().roster().unwrap();
        assert_eq!(roster.len(), 7);
        assert_eq!(roster.candidates(), &DEFAULT_MEMBERS.map(|s| s.to_string()));
        assert_eq!(roster.voters()[5].kind, VoterKind::Guest);
        assert_eq!(roster.voters()[6].id, "Guess 2");
        assert!(PodiumConfig::default().credentials().login("admin", "password"));
    }

    #[test]
    fn custom_roster() {
        let js = r#"{
            "title": "Class representatives",
            "voters": [
                { "id": "Anna", "kind": "member" },
                { "id": "Bob", "kind": "member" },
                { "id": "Teacher", "name": "Ms. Clara", "kind": "guest" }
            ],
            "credentials": { "username": "root", "password": "secret" }
        }"#;
        let config: PodiumConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.title(), "Class representatives");
        let roster = config.roster().unwrap();
        assert_eq!(roster.candidates(), &["Anna".to_string(), "Bob".to_string()]);
        assert_eq!(roster.voter("Teacher").map(|v| v.name.as_str()), Some("Ms. Clara"));
        assert_eq!(roster.voter("Anna").map(|v| v.name.as_str()), Some("Anna"));
        assert!(config.credentials().login("root", "secret"));
        assert!(!config.credentials().login("admin", "password"));
    }

    #[test]
    fn duplicate_voters() {
        let config = PodiumConfig {
            voters: Some(vec![
                VoterConfig {
                    id: "Anna".to_string(),
                    name: None,
                    kind: VoterKind::Member,
                },
                VoterConfig {
                    id: "Anna".to_string(),
                    name: None,
                    kind: VoterKind::Guest,
                },
            ]),
            ..PodiumConfig::default()
        };
        assert!(matches!(
            config.roster(),
            Err(PodiumError::Voting {
                source: VotingError::InvalidRoster { .. }
            })
        ));
    }

    #[test]
    fn guests_cannot_stand() {
        let js = r#"{
            "voters": [
                { "id": "Anna", "kind": "member" },
                { "id": "Teacher", "kind": "guest" }
            ],
            "candidates": ["Teacher"]
        }"#;
        let config: PodiumConfig = serde_json::from_str(js).unwrap();
        assert!(matches!(
            config.roster(),
            Err(PodiumError::Voting {
                source: VotingError::InvalidRoster { .. }
            })
        ));

        let config = PodiumConfig {
            candidates: Some(vec!["Anna".to_string(), "Teacher".to_string()]),
            ..config
        };
        assert!(matches!(
            config.roster(),
            Err(PodiumError::Voting {
                source: VotingError::InvalidRoster { .. }
            })
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_config("/nonexistent/podium/config.json"),
            Err(PodiumError::OpeningJson { .. })
        ));
    }
}
