use log::{debug, info, warn};

use crate::config::*;
use crate::session::Session;
use crate::store::SnapshotStore;

/// A voting session behind a login gate, saved after every transition.
///
/// The booth does not check credentials itself: it is told whether a login
/// attempt succeeded. Votes and resets are refused while logged out.
/// If saving fails, the in-memory session stays authoritative.
#[derive(Debug)]
pub struct Booth<S: SnapshotStore> {
    session: Session,
    authenticated: bool,
    store: S,
}

impl<S: SnapshotStore> Booth<S> {
    /// Opens the booth, resuming from the store when it holds a usable snapshot.
    pub fn open(roster: Roster, store: S) -> Booth<S> {
        let (session, authenticated) = match store.load() {
            Ok(Some(snapshot)) => match Session::restore(roster.clone(), &snapshot) {
                Ok(session) => {
                    info!(
                        "open: resuming session at voter {} with {} votes",
                        snapshot.current_index,
                        snapshot.votes.len()
                    );
                    (session, snapshot.authenticated)
                }
                Err(e) => {
                    warn!("open: discarding saved session: {}", e);
                    (Session::new(roster), false)
                }
            },
            Ok(None) => {
                debug!("open: no saved session");
                (Session::new(roster), false)
            }
            Err(e) => {
                warn!("open: could not load the saved session: {}", e);
                (Session::new(roster), false)
            }
        };
        Booth {
            session,
            authenticated,
            store,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Applies the outcome of a credential check. Returns `granted`.
    ///
    /// A rejected attempt closes the gate, even when it was open.
    pub fn login(&mut self, granted: bool) -> bool {
        if granted {
            info!("login: access granted");
        } else {
            warn!("login: access denied");
        }
        if granted || self.authenticated {
            self.authenticated = granted;
            self.persist();
        }
        granted
    }

    /// Closes the gate. The votes are kept.
    pub fn logout(&mut self) {
        info!("logout");
        self.authenticated = false;
        self.persist();
    }

    pub fn cast_vote(&mut self, candidate: &str) -> Result<(), VotingError> {
        self.ensure_authenticated()?;
        self.session.cast_vote(candidate)?;
        self.persist();
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), VotingError> {
        self.ensure_authenticated()?;
        self.session.reset();
        self.persist();
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    pub fn current_voter(&self) -> Result<&Voter, VotingError> {
        self.session.current_voter()
    }

    pub fn ranking(&self) -> Vec<RankingEntry> {
        self.session.ranking()
    }

    pub fn standings(&self) -> Standings {
        self.session.standings()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot(self.authenticated)
    }

    fn ensure_authenticated(&self) -> Result<(), VotingError> {
        if self.authenticated {
            Ok(())
        } else {
            warn!("booth: operation refused, not logged in");
            Err(VotingError::NotAuthenticated)
        }
    }

    fn persist(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.store.save(&snapshot) {
            warn!("persist: could not save the session: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn roster() -> Roster {
        Roster::new(
            vec![
                Voter::new("A", "Group A", VoterKind::Member),
                Voter::new("B", "Group B", VoterKind::Member),
                Voter::new("G", "Guess 1", VoterKind::Guest),
            ],
            vec!["A".to_string(), "B".to_string()],
        )
        .unwrap()
    }

    struct BrokenStore;

    impl SnapshotStore for BrokenStore {
        fn load(&self) -> Result<Option<SessionSnapshot>, StoreError> {
            Err(StoreError::new("disk on fire"))
        }

        fn save(&mut self, _snapshot: &SessionSnapshot) -> Result<(), StoreError> {
            Err(StoreError::new("disk on fire"))
        }
    }

    #[test]
    fn votes_need_a_login() {
        init();
        let mut booth = Booth::open(roster(), MemoryStore::new());
        assert!(!booth.is_authenticated());
        assert_eq!(booth.cast_vote("B"), Err(VotingError::NotAuthenticated));
        assert_eq!(booth.reset(), Err(VotingError::NotAuthenticated));
        assert_eq!(booth.store().saves(), 0);

        assert!(!booth.login(false));
        assert!(!booth.is_authenticated());

        assert!(booth.login(true));
        booth.cast_vote("B").unwrap();
        assert_eq!(booth.current_voter().unwrap().id, "B");
        assert_eq!(booth.store().saves(), 2);
    }

    #[test]
    fn rejected_login_closes_the_gate() {
        init();
        let mut booth = Booth::open(roster(), MemoryStore::new());
        booth.login(true);
        booth.cast_vote("B").unwrap();
        assert!(!booth.login(false));
        assert!(!booth.is_authenticated());
        assert_eq!(booth.store().snapshot().map(|s| s.authenticated), Some(false));
        assert_eq!(booth.store().saves(), 3);
        assert_eq!(booth.cast_vote("A"), Err(VotingError::NotAuthenticated));
        assert_eq!(booth.session().votes().len(), 1);
    }

    #[test]
    fn every_transition_is_saved() {
        init();
        let mut booth = Booth::open(roster(), MemoryStore::new());
        booth.login(true);
        booth.cast_vote("B").unwrap();
        assert_eq!(booth.store().snapshot(), Some(&booth.snapshot()));
        assert!(booth.cast_vote("B").is_err());
        assert_eq!(booth.store().saves(), 2);

        booth.cast_vote("A").unwrap();
        booth.cast_vote("A").unwrap();
        assert!(booth.is_complete());
        assert_eq!(booth.store().snapshot().map(|s| s.completed), Some(true));

        booth.logout();
        let saved = booth.store().snapshot().cloned().unwrap();
        assert!(!saved.authenticated);
        assert_eq!(saved.votes.len(), 3);

        booth.login(true);
        booth.reset().unwrap();
        let saved = booth.store().snapshot().cloned().unwrap();
        assert_eq!(
            saved,
            SessionSnapshot {
                authenticated: true,
                ..SessionSnapshot::EMPTY
            }
        );
    }

    #[test]
    fn resumes_from_the_store() {
        init();
        let mut booth = Booth::open(roster(), MemoryStore::new());
        booth.login(true);
        booth.cast_vote("B").unwrap();
        booth.cast_vote("A").unwrap();
        let store = booth.store().clone();

        let resumed = Booth::open(roster(), store);
        assert!(resumed.is_authenticated());
        assert_eq!(resumed.current_voter().unwrap().id, "G");
        assert_eq!(resumed.session(), booth.session());
        assert_eq!(resumed.ranking(), booth.ranking());
    }

    #[test]
    fn bad_snapshot_starts_over() {
        init();
        let store = MemoryStore::with_snapshot(SessionSnapshot {
            authenticated: true,
            current_index: 1,
            votes: vec![Vote::new("A", "Nobody")],
            completed: false,
        });
        let booth = Booth::open(roster(), store);
        assert!(!booth.is_authenticated());
        assert_eq!(booth.snapshot(), SessionSnapshot::EMPTY);
    }

    #[test]
    fn failed_saves_keep_the_session() {
        init();
        let mut booth = Booth::open(roster(), BrokenStore);
        assert!(booth.login(true));
        booth.cast_vote("B").unwrap();
        booth.cast_vote("A").unwrap();
        assert_eq!(booth.session().votes().len(), 2);
        let standings = booth.standings();
        assert!(standings.live);
        assert_eq!(standings.total_votes, 2);
    }
}
