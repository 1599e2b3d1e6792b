// ********* Input data structures ***********

use std::collections::HashSet;
use std::error::Error;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The two kinds of voters taking part in a session.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoterKind {
    /// A voter that is also standing as a candidate. It may vote for
    /// anybody except itself.
    Member,
    /// A neutral voter. It is not a candidate, may vote for any candidate,
    /// and its votes are counted a second time in the tie-break subtotal.
    Guest,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Voter {
    pub id: String,
    pub name: String,
    pub kind: VoterKind,
}

impl Voter {
    pub fn new(id: &str, name: &str, kind: VoterKind) -> Voter {
        Voter {
            id: id.to_string(),
            name: name.to_string(),
            kind,
        }
    }

    pub fn is_guest(&self) -> bool {
        self.kind == VoterKind::Guest
    }
}

/// The static definition of who votes, in which order, and for whom.
///
/// The order of the voters is the order in which the session calls them.
/// The order of the candidates is the order used to break residual ties.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Roster {
    voters: Vec<Voter>,
    candidates: Vec<String>,
}

impl Roster {
    pub fn new(voters: Vec<Voter>, candidates: Vec<String>) -> Result<Roster, VotingError> {
        if voters.is_empty() {
            return Err(VotingError::InvalidRoster {
                reason: "no voters".to_string(),
            });
        }
        if candidates.is_empty() {
            return Err(VotingError::InvalidRoster {
                reason: "no candidates".to_string(),
            });
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for v in voters.iter() {
            if !seen.insert(v.id.as_str()) {
                return Err(VotingError::InvalidRoster {
                    reason: format!("duplicate voter {:?}", v.id),
                });
            }
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for c in candidates.iter() {
            if !seen.insert(c.as_str()) {
                return Err(VotingError::InvalidRoster {
                    reason: format!("duplicate candidate {:?}", c),
                });
            }
        }
        // Members stand, guests do not, and nobody else does.
        for c in candidates.iter() {
            match voters.iter().find(|v| &v.id == c) {
                None => {
                    return Err(VotingError::InvalidRoster {
                        reason: format!("candidate {:?} is not a voter", c),
                    });
                }
                Some(v) if v.is_guest() => {
                    return Err(VotingError::InvalidRoster {
                        reason: format!("guest {:?} cannot be a candidate", c),
                    });
                }
                Some(_) => {}
            }
        }
        if let Some(v) = voters
            .iter()
            .find(|v| !v.is_guest() && !seen.contains(v.id.as_str()))
        {
            return Err(VotingError::InvalidRoster {
                reason: format!("member {:?} is not a candidate", v.id),
            });
        }
        Ok(Roster { voters, candidates })
    }

    pub fn voters(&self) -> &[Voter] {
        &self.voters
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// The number of voters, which is also the number of votes in a complete session.
    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    pub fn voter(&self, id: &str) -> Option<&Voter> {
        self.voters.iter().find(|v| v.id == id)
    }

    pub fn is_candidate(&self, id: &str) -> bool {
        self.candidates.iter().any(|c| c == id)
    }
}

/// A single cast vote. Each voter casts at most one.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize, Deserialize)]
pub struct Vote {
    #[serde(rename = "voterId")]
    pub voter_id: String,
    #[serde(rename = "votedForId")]
    pub voted_for_id: String,
}

impl Vote {
    pub fn new(voter_id: &str, voted_for_id: &str) -> Vote {
        Vote {
            voter_id: voter_id.to_string(),
            voted_for_id: voted_for_id.to_string(),
        }
    }
}

/// What gets handed to the persistence collaborator after every transition.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    #[serde(rename = "currentIndex")]
    pub current_index: usize,
    pub votes: Vec<Vote>,
    pub completed: bool,
}

impl SessionSnapshot {
    pub const EMPTY: SessionSnapshot = SessionSnapshot {
        authenticated: false,
        current_index: 0,
        votes: Vec::new(),
        completed: false,
    };
}

// ******** Output data structures *********

/// The standing of one candidate, recomputed from the votes on every read.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct RankingEntry {
    pub candidate: String,
    pub total: u64,
    /// Votes received from guest voters.
    #[serde(rename = "tieBreakCount")]
    pub tie_break_count: u64,
    /// The voters who chose this candidate, in the order the votes were cast.
    pub voters: Vec<String>,
    /// Tied on total with the entry ranked just below, and not behind it on guest votes.
    #[serde(rename = "tieBreakWinner")]
    pub tie_break_winner: bool,
}

/// One of the (at most three) entries shown on the podium.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct PodiumPlace {
    /// 0 for first place, 1 for second, 2 for third.
    pub rank: usize,
    pub entry: RankingEntry,
}

/// The ranking together with what a results view needs to present it.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct Standings {
    pub ranking: Vec<RankingEntry>,
    #[serde(rename = "totalVotes")]
    pub total_votes: usize,
    /// True while voters are still being called.
    pub live: bool,
    pub podium: Vec<PodiumPlace>,
}

/// Errors returned by the session and the booth.
///
/// A rejected operation never modifies the session.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VotingError {
    UnknownCandidate { candidate: String },
    InvalidSelfVote { voter: String },
    InvalidState,
    SessionFinished,
    NotAuthenticated,
    InvalidRoster { reason: String },
    InconsistentSnapshot { reason: String },
}

impl Error for VotingError {}

impl Display for VotingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingError::UnknownCandidate { candidate } => {
                write!(f, "{:?} is not a candidate", candidate)
            }
            VotingError::InvalidSelfVote { voter } => {
                write!(f, "{:?} may not vote for itself", voter)
            }
            VotingError::InvalidState => write!(f, "operation not allowed in the current state"),
            VotingError::SessionFinished => write!(f, "all the voters have voted"),
            VotingError::NotAuthenticated => write!(f, "login required"),
            VotingError::InvalidRoster { reason } => write!(f, "invalid roster: {}", reason),
            VotingError::InconsistentSnapshot { reason } => {
                write!(f, "saved session does not match the roster: {}", reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voters() -> Vec<Voter> {
        vec![
            Voter::new("A", "Group A", VoterKind::Member),
            Voter::new("B", "Group B", VoterKind::Member),
            Voter::new("G", "Guess 1", VoterKind::Guest),
        ]
    }

    fn names(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn is_invalid(res: Result<Roster, VotingError>) -> bool {
        matches!(res, Err(VotingError::InvalidRoster { .. }))
    }

    #[test]
    fn members_stand_and_guests_do_not() {
        let roster = Roster::new(voters(), names(&["B", "A"])).unwrap();
        assert_eq!(roster.candidates(), &names(&["B", "A"]));
        assert!(roster.is_candidate("A"));
        assert!(!roster.is_candidate("G"));
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn guest_candidate_is_rejected() {
        assert!(is_invalid(Roster::new(voters(), names(&["A", "B", "G"]))));
        assert!(is_invalid(Roster::new(
            vec![
                Voter::new("A", "Group A", VoterKind::Member),
                Voter::new("G", "Guess 1", VoterKind::Guest),
            ],
            names(&["G"]),
        )));
    }

    #[test]
    fn member_missing_from_candidates_is_rejected() {
        assert!(is_invalid(Roster::new(voters(), names(&["A"]))));
    }

    #[test]
    fn candidate_without_voter_is_rejected() {
        assert!(is_invalid(Roster::new(voters(), names(&["A", "B", "Z"]))));
    }

    #[test]
    fn empty_and_duplicate_lists_are_rejected() {
        assert!(is_invalid(Roster::new(vec![], names(&["A"]))));
        assert!(is_invalid(Roster::new(voters(), vec![])));
        assert!(is_invalid(Roster::new(voters(), names(&["A", "B", "A"]))));
    }
}
