use log::{debug, info, warn};

use crate::config::*;
use crate::rank_roster;

/// Where a session stands in its voter queue.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SessionState {
    /// Waiting for the vote of the voter at `index` in the roster.
    Voting { index: usize },
    /// Every voter has voted.
    Finished,
}

/// Drives the voters of a roster, one at a time, through casting their vote.
///
/// ```
/// use podium_tally::session::Session;
/// use podium_tally::*;
///
/// let roster = Roster::new(
///     vec![
///         Voter::new("Anna", "Anna", VoterKind::Member),
///         Voter::new("Bob", "Bob", VoterKind::Member),
///     ],
///     vec!["Anna".to_string(), "Bob".to_string()],
/// )?;
/// let mut session = Session::new(roster);
/// session.cast_vote("Bob")?;
/// session.cast_vote("Anna")?;
/// assert!(session.is_complete());
///
/// # Ok::<(), VotingError>(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Session {
    roster: Roster,
    state: SessionState,
    votes: Vec<Vote>,
}

impl Session {
    pub fn new(roster: Roster) -> Session {
        Session {
            roster,
            state: SessionState::Voting { index: 0 },
            votes: Vec::new(),
        }
    }

    /// Rebuilds a session from a saved snapshot.
    ///
    /// The saved votes are replayed one by one, so a snapshot that could not have
    /// been produced with this roster is rejected.
    pub fn restore(roster: Roster, snapshot: &SessionSnapshot) -> Result<Session, VotingError> {
        let mut session = Session::new(roster);
        for (idx, v) in snapshot.votes.iter().enumerate() {
            let expected = session
                .current_voter()
                .map_err(|_| VotingError::InconsistentSnapshot {
                    reason: format!("vote #{} comes after the last voter", idx + 1),
                })?
                .id
                .clone();
            if expected != v.voter_id {
                return Err(VotingError::InconsistentSnapshot {
                    reason: format!(
                        "vote #{} was cast by {:?}, expected {:?}",
                        idx + 1,
                        v.voter_id,
                        expected
                    ),
                });
            }
            session
                .cast_vote(&v.voted_for_id)
                .map_err(|e| VotingError::InconsistentSnapshot {
                    reason: format!("vote #{}: {}", idx + 1, e),
                })?;
        }
        if session.current_index() != snapshot.current_index
            || session.is_complete() != snapshot.completed
        {
            return Err(VotingError::InconsistentSnapshot {
                reason: format!(
                    "{} votes do not lead to voter index {} (completed: {})",
                    snapshot.votes.len(),
                    snapshot.current_index,
                    snapshot.completed
                ),
            });
        }
        debug!("restore: restored session {:?}", session.state);
        Ok(session)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    /// The position of the next voter in the roster, or the roster size once finished.
    pub fn current_index(&self) -> usize {
        match self.state {
            SessionState::Voting { index } => index,
            SessionState::Finished => self.roster.len(),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, SessionState::Finished)
    }

    pub fn current_voter(&self) -> Result<&Voter, VotingError> {
        match self.state {
            SessionState::Voting { index } => Ok(&self.roster.voters()[index]),
            SessionState::Finished => Err(VotingError::SessionFinished),
        }
    }

    /// (1-based position of the current voter, number of voters), while voting.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self.state {
            SessionState::Voting { index } => Some((index + 1, self.roster.len())),
            SessionState::Finished => None,
        }
    }

    /// The candidates the current voter may choose from.
    pub fn eligible_candidates(&self) -> Result<Vec<&str>, VotingError> {
        let voter = self.current_voter()?;
        Ok(self
            .roster
            .candidates()
            .iter()
            .map(|c| c.as_str())
            .filter(|c| voter.kind == VoterKind::Guest || *c != voter.id)
            .collect())
    }

    /// Records the vote of the current voter and calls the next one.
    pub fn cast_vote(&mut self, candidate: &str) -> Result<(), VotingError> {
        let index = match self.state {
            SessionState::Voting { index } => index,
            SessionState::Finished => {
                warn!("cast_vote: session finished, rejecting vote for {:?}", candidate);
                return Err(VotingError::InvalidState);
            }
        };
        let voter = &self.roster.voters()[index];
        if !self.roster.is_candidate(candidate) {
            warn!("cast_vote: {:?} is not a candidate", candidate);
            return Err(VotingError::UnknownCandidate {
                candidate: candidate.to_string(),
            });
        }
        if voter.kind == VoterKind::Member && voter.id == candidate {
            warn!("cast_vote: {:?} tried to vote for itself", voter.id);
            return Err(VotingError::InvalidSelfVote {
                voter: voter.id.clone(),
            });
        }

        info!("cast_vote: {:?} votes for {:?}", voter.id, candidate);
        self.votes.push(Vote::new(&voter.id, candidate));
        self.state = if index + 1 >= self.roster.len() {
            info!("cast_vote: all {} voters have voted", self.roster.len());
            SessionState::Finished
        } else {
            SessionState::Voting { index: index + 1 }
        };
        Ok(())
    }

    /// Drops all the votes and calls the first voter again.
    pub fn reset(&mut self) {
        info!("reset: discarding {} votes", self.votes.len());
        self.votes.clear();
        self.state = SessionState::Voting { index: 0 };
    }

    pub fn ranking(&self) -> Vec<RankingEntry> {
        rank_roster(&self.votes, &self.roster)
    }

    pub fn standings(&self) -> Standings {
        Standings::compute(&self.votes, &self.roster, !self.is_complete())
    }

    pub fn snapshot(&self, authenticated: bool) -> SessionSnapshot {
        SessionSnapshot {
            authenticated,
            current_index: self.current_index(),
            votes: self.votes.clone(),
            completed: self.is_complete(),
        }
    }
}
