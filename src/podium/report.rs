// Text and JSON renderings of the session.

use podium_tally::session::Session;
use podium_tally::*;

use serde_json::json;
use serde_json::Value as JSValue;

fn place_label(rank: usize) -> &'static str {
    match rank {
        0 => "1st Place",
        1 => "2nd Place",
        2 => "3rd Place",
        _ => "Winner",
    }
}

/// Who votes next, and for whom they may vote.
pub fn status(session: &Session) -> String {
    match (session.current_voter(), session.progress()) {
        (Ok(voter), Some((position, total))) => {
            let choices = session.eligible_candidates().unwrap_or_default();
            let kind = match voter.kind {
                VoterKind::Member => "group",
                VoterKind::Guest => "guest",
            };
            format!(
                "Voter {} of {}: {} ({})\nCandidates: {}",
                position,
                total,
                voter.name,
                kind,
                choices.join(", ")
            )
        }
        _ => "All the voters have voted. Run `results` to see the podium.".to_string(),
    }
}

pub fn render_standings(standings: &Standings, roster: &Roster, title: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(title.to_string());
    if standings.live {
        lines.push("== Live Ranking == Real-time voting updates".to_string());
    } else {
        lines.push("== Winners Podium == Official Results".to_string());
    }
    lines.push(String::new());

    if !standings.has_votes() {
        lines.push("Waiting for votes...".to_string());
    } else {
        for place in podium_display_order(&standings.podium) {
            let e = &place.entry;
            let mut line = format!(
                "  {:<10} {:<20} {} Votes",
                place_label(place.rank),
                e.candidate,
                e.total
            );
            if e.tie_break_count > 0 {
                line.push_str(&format!(" (+{} Guest Votes)", e.tie_break_count));
            }
            if e.tie_break_winner {
                line.push_str(" [Guest Choice]");
            }
            lines.push(line);
        }
    }
    lines.push(String::new());

    lines.push("Full Ranking & Details".to_string());
    for (idx, e) in standings.ranking.iter().enumerate() {
        let mut line = format!("{:>3}. {:<20} {} Votes", idx + 1, e.candidate, e.total);
        if e.tie_break_count > 0 {
            line.push_str(&format!(" ({} from Guests)", e.tie_break_count));
        }
        if e.tie_break_winner {
            line.push_str("  * Guest Preference");
        }
        lines.push(line);
        if e.voters.is_empty() {
            lines.push("     No votes".to_string());
        } else {
            let voters: Vec<String> = e
                .voters
                .iter()
                .map(|id| match roster.voter(id) {
                    Some(v) if v.is_guest() => format!("{} (guest)", v.name),
                    Some(v) => v.name.clone(),
                    None => id.clone(),
                })
                .collect();
            lines.push(format!("     {}", voters.join(", ")));
        }
    }
    lines.join("\n")
}

pub fn standings_to_json(standings: &Standings, title: &str) -> JSValue {
    let results: Vec<JSValue> = standings
        .ranking
        .iter()
        .enumerate()
        .map(|(idx, e)| {
            json!({
                "rank": idx + 1,
                "candidate": e.candidate,
                "votes": e.total,
                "guestVotes": e.tie_break_count,
                "voters": e.voters,
                "tieBreakWinner": e.tie_break_winner,
            })
        })
        .collect();
    let podium: Vec<JSValue> = podium_display_order(&standings.podium)
        .iter()
        .map(|p| json!({"place": p.rank + 1, "candidate": p.entry.candidate}))
        .collect();
    json!({
        "config": { "title": title },
        "live": standings.live,
        "totalVotes": standings.total_votes,
        "results": results,
        "podium": podium,
    })
}
