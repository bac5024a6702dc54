//! CSV export of a tournament ranking.

use crate::logic::Standings;
use std::io::Write;

/// Write `position,player_id,name,total_points` rows, header first.
pub fn write_standings_csv<W: Write>(standings: &Standings, writer: W) -> Result<(), csv::Error> {
    let mut out = csv::WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in &standings.entries {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}
