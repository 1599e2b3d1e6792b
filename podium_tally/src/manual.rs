/*!

This is the long-form manual for `podium_tally` and the `podium` command.

## Voters and candidates

A session is defined by a roster:
* the voters, in the order in which they are called to vote
* the candidates, in a fixed order

Voters come in two kinds:
* `member` voters are also candidates. They may vote for anybody but themselves.
* `guest` voters are not candidates. They may vote for any candidate, and their votes
  are used to separate candidates that end up with the same number of votes.

Every voter votes exactly once, in roster order. A vote cannot be changed or withdrawn.
The only way to start over is to reset the whole session.

## Counting

The ranking is computed again from the complete list of votes every time it is requested.
For each candidate, the count gives:
* the total number of votes
* the number of votes received from guest voters (the tie-break count)
* the voters who chose this candidate, in the order in which they voted

The candidates are sorted by total, highest first. Candidates with the same total are
sorted by tie-break count, highest first. Candidates that are equal on both counts stay
in roster order: there is no further tie-break, and such a tie is a normal outcome.

### Guest preference

An entry is marked as a tie-break winner (shown as *Guest Preference* / *Guest Choice*)
when the entry ranked directly below it has the same total and no more guest votes.

Note that the comparison is "at least as many", not "strictly more": with equal totals and
equal guest votes, the entry placed higher by roster order is still marked. Only the
immediate neighbour is looked at, so in a group of three tied entries the first two may be
marked. Nothing is marked while no vote has been cast.

## Podium

The podium shows the first three entries of the ranking, leaving out entries that have
not received any vote. For layout, the places are shown in the order second, first, third.
This order is cosmetic: the place of each entry always comes from the ranking.
With no vote at all, the results show a waiting message instead of a podium.

## The `podium` command

The command line front-end keeps the session in a JSON file (`podium_state.json` by default,
see `--state`) and performs one action per invocation:

```bash
podium login --username admin --password password
podium status
podium vote "Group B"
podium results --out stdout
podium reset
podium logout
```

`reset` is refused while voters are still waiting to vote, unless `--force` is passed.

## Configuration

By default, the roster is the one of the original session: voters `Group A` to `Group E`
(member kind) then `Guess 1` and `Guess 2` (guest kind), with `Group A` to `Group E` as
candidates. It can be replaced with a JSON file passed with `--config`:

```json
{
  "title": "Class representatives",
  "voters": [
    { "id": "Anna", "kind": "member" },
    { "id": "Bob", "kind": "member" },
    { "id": "Teacher", "name": "Ms. Clara", "kind": "guest" }
  ],
  "candidates": ["Anna", "Bob"],
  "credentials": { "username": "admin", "password": "secret" }
}
```

All fields are optional. When `candidates` is missing, the member voters are the candidates.
When `name` is missing, the id is used.

 */
