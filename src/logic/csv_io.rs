//! CSV player lists in, standings out.

use crate::logic::standings::compute_standings;
use crate::models::Tournament;
use std::io::Read;

/// Read player names from CSV: first column of each record, blank rows skipped.
/// A leading `name` header row is ignored.
pub fn import_players_csv<R: Read>(reader: R) -> Result<Vec<String>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut names = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let Some(name) = record.get(0).filter(|n| !n.is_empty()) else {
            continue;
        };
        if i == 0 && name.eq_ignore_ascii_case("name") {
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}

/// Standings as CSV: `rank,player,played,won,drawn,lost,points`.
pub fn standings_csv(tournament: &Tournament) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["rank", "player", "played", "won", "drawn", "lost", "points"])?;
    for (rank, s) in compute_standings(tournament).iter().enumerate() {
        let name = tournament
            .get_player(s.player_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| s.player_id.to_string());
        wtr.write_record([
            (rank + 1).to_string(),
            name,
            s.played.to_string(),
            s.won.to_string(),
            s.drawn.to_string(),
            s.lost.to_string(),
            s.points.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
