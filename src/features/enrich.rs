//! Opponent enrichment
//!
//! Joins feature rows against season-keyed opponent reference data.
//! Opponents outside the reference's team coverage are discarded rather
//! than guessed; values missing after the join are imputed with the
//! column mean over the current player's own rows.

use crate::data::reference::{canonical_name, ReferenceTables};
use crate::features::FeatureRow;

/// Joins feature rows against static opponent reference tables
pub struct OpponentEnricher<'a> {
    tables: &'a ReferenceTables,
}

impl<'a> OpponentEnricher<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        OpponentEnricher { tables }
    }

    /// Enrich rows with the four opponent columns.
    ///
    /// Rows whose opponent is not covered by the defensive-rating table
    /// are dropped; the caller decides what an empty result means.
    pub fn enrich(&self, rows: Vec<FeatureRow>) -> Vec<FeatureRow> {
        let before = rows.len();
        let mut rows: Vec<FeatureRow> = rows
            .into_iter()
            .map(|mut row| {
                // Franchise renames are folded in before any join
                row.opponent = row.opponent.map(|name| canonical_name(&name));
                row
            })
            .filter(|row| {
                row.opponent
                    .as_deref()
                    .map_or(false, |name| self.tables.is_known_team(name))
            })
            .collect();

        if rows.len() < before {
            log::debug!(
                "Dropped {} of {} rows with opponents outside reference coverage",
                before - rows.len(),
                before
            );
        }

        for row in &mut rows {
            let opponent = row.opponent.as_deref().expect("filtered above");
            row.opp_def_rating = self.tables.defensive_rating(opponent, &row.season);
            if let Some(stats) = self.tables.team_stats(opponent, &row.season) {
                row.opp_team_stl = Some(stats.steals);
                row.opp_team_blk = Some(stats.blocks);
                row.opp_team_win_pct = Some(stats.win_pct);
            }
        }

        impute_column(&mut rows, |r| r.opp_def_rating, |r, v| r.opp_def_rating = Some(v));
        impute_column(&mut rows, |r| r.opp_team_stl, |r, v| r.opp_team_stl = Some(v));
        impute_column(&mut rows, |r| r.opp_team_blk, |r, v| r.opp_team_blk = Some(v));
        impute_column(
            &mut rows,
            |r| r.opp_team_win_pct,
            |r, v| r.opp_team_win_pct = Some(v),
        );

        rows
    }
}

/// Fill a column's missing values with its mean over this player's rows.
/// A column with no values at all is left empty and excluded downstream.
fn impute_column<G, S>(rows: &mut [FeatureRow], get: G, set: S)
where
    G: Fn(&FeatureRow) -> Option<f64>,
    S: Fn(&mut FeatureRow, f64),
{
    let (sum, count) = rows
        .iter()
        .filter_map(|row| get(row))
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        return;
    }
    let mean = sum / count as f64;
    for row in rows.iter_mut() {
        if get(row).is_none() {
            set(row, mean);
        }
    }
}
