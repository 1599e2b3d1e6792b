mod config;
pub mod booth;
pub mod manual;
pub mod session;
pub mod store;

use log::{debug, info};

use std::{
    collections::{HashMap, HashSet},
    ops::AddAssign,
};

pub use crate::config::*;

// **** Private structures ****

#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash)]
struct VoteCount(u64);

impl VoteCount {
    const EMPTY: VoteCount = VoteCount(0);
    const ONE: VoteCount = VoteCount(1);
}

impl std::iter::Sum for VoteCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        VoteCount(iter.map(|vc| vc.0).sum())
    }
}

impl AddAssign for VoteCount {
    fn add_assign(&mut self, rhs: VoteCount) {
        self.0 += rhs.0;
    }
}

// The tally of a single candidate before the final ordering.
#[derive(Eq, PartialEq, Debug, Clone)]
struct CandidateTally<'a> {
    candidate: &'a str,
    total: VoteCount,
    guest: VoteCount,
    voters: Vec<&'a str>,
}

/// Ranks the candidates from the votes cast so far.
///
/// Arguments:
/// * `votes` the votes, in the order they were cast
/// * `candidates` the candidates, in roster order. Candidates that are equal on
/// both the total and the guest votes keep this order.
/// * `voters` the registered voters. Only the votes of the guest voters count
/// toward the tie-break subtotal.
///
/// The ranking is recomputed from scratch on every call. Votes for an id that is
/// not in `candidates` are ignored.
pub fn rank(votes: &[Vote], candidates: &[String], voters: &[Voter]) -> Vec<RankingEntry> {
    debug!(
        "rank: {:?} votes, {:?} candidates, {:?} voters",
        votes.len(),
        candidates.len(),
        voters.len()
    );
    let guests: HashSet<&str> = voters
        .iter()
        .filter(|v| v.is_guest())
        .map(|v| v.id.as_str())
        .collect();

    // Initialize with every candidate to capture the ones that do not have a vote yet.
    let mut tallies: Vec<CandidateTally> = candidates
        .iter()
        .map(|c| CandidateTally {
            candidate: c.as_str(),
            total: VoteCount::EMPTY,
            guest: VoteCount::EMPTY,
            voters: Vec::new(),
        })
        .collect();
    let positions: HashMap<&str, usize> = candidates
        .iter()
        .enumerate()
        .map(|(idx, c)| (c.as_str(), idx))
        .collect();

    for v in votes.iter() {
        match positions.get(v.voted_for_id.as_str()) {
            Some(&idx) => {
                let t = &mut tallies[idx];
                t.total += VoteCount::ONE;
                if guests.contains(v.voter_id.as_str()) {
                    t.guest += VoteCount::ONE;
                }
                t.voters.push(v.voter_id.as_str());
            }
            None => {
                debug!(
                    "rank: skipping vote of {:?} for unknown candidate {:?}",
                    v.voter_id, v.voted_for_id
                );
            }
        }
    }
    debug!("rank: tallies: {:?}", tallies);

    // sort_by is stable: full ties stay in roster order.
    tallies.sort_by(|a, b| b.total.cmp(&a.total).then(b.guest.cmp(&a.guest)));

    let counted: VoteCount = tallies.iter().map(|t| t.total).sum();
    let mut entries: Vec<RankingEntry> = tallies
        .into_iter()
        .map(|t| RankingEntry {
            candidate: t.candidate.to_string(),
            total: t.total.0,
            tie_break_count: t.guest.0,
            voters: t.voters.iter().map(|s| s.to_string()).collect(),
            tie_break_winner: false,
        })
        .collect();

    // Nothing to break when nobody has voted.
    if counted > VoteCount::EMPTY {
        let flags: Vec<bool> = (0..entries.len())
            .map(|idx| is_tie_break_winner(&entries, idx))
            .collect();
        for (entry, flag) in entries.iter_mut().zip(flags) {
            entry.tie_break_winner = flag;
        }
    }
    entries
}

/// Same as [rank], with the candidates and voters taken from the roster.
pub fn rank_roster(votes: &[Vote], roster: &Roster) -> Vec<RankingEntry> {
    rank(votes, roster.candidates(), roster.voters())
}

/// True if the entry at `idx` shares its total with the entry ranked right
/// below it and received at least as many guest votes.
///
/// Only the immediate neighbour is considered, not the whole group of tied
/// entries. The last entry is never a tie-break winner.
pub fn is_tie_break_winner(ranking: &[RankingEntry], idx: usize) -> bool {
    match (ranking.get(idx), ranking.get(idx + 1)) {
        (Some(cur), Some(next)) => {
            cur.total == next.total && cur.tie_break_count >= next.tie_break_count
        }
        _ => false,
    }
}

/// The top three entries of a ranking, excluding the ones without any vote.
///
/// The rank of each place is its position in the ranking.
pub fn podium(ranking: &[RankingEntry]) -> Vec<PodiumPlace> {
    ranking
        .iter()
        .take(3)
        .enumerate()
        .filter(|(_, e)| e.total > 0)
        .map(|(rank, e)| PodiumPlace {
            rank,
            entry: e.clone(),
        })
        .collect()
}

/// Rearranges the podium places for display: second, first, third.
///
/// Missing places are skipped. The ranks are left untouched.
pub fn podium_display_order(places: &[PodiumPlace]) -> Vec<&PodiumPlace> {
    [1, 0, 2]
        .iter()
        .filter_map(|rank| places.iter().find(|p| p.rank == *rank))
        .collect()
}

impl Standings {
    pub fn compute(votes: &[Vote], roster: &Roster, live: bool) -> Standings {
        let ranking = rank_roster(votes, roster);
        let podium = podium(&ranking);
        info!(
            "Standings: {:?} votes, leader: {:?}",
            votes.len(),
            podium.first().map(|p| p.entry.candidate.as_str())
        );
        Standings {
            ranking,
            total_votes: votes.len(),
            live,
            podium,
        }
    }

    /// False when no vote went to a candidate: renderers show a waiting state instead of a podium.
    pub fn has_votes(&self) -> bool {
        self.ranking.iter().any(|e| e.total > 0)
    }

    pub fn winner(&self) -> Option<&RankingEntry> {
        self.ranking.first().filter(|e| e.total > 0)
    }
}
