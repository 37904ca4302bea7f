//! Static team abbreviation table
//!
//! Maps the matchup-string abbreviations used by the stats provider to
//! franchise full names. Includes historical abbreviations for relocated
//! franchises; those names are folded into their current franchise by the
//! reference-table aliases.

use std::collections::HashMap;

pub const TEAM_ABBREVIATIONS: &[(&str, &str)] = &[
    ("ATL", "Atlanta Hawks"),
    ("BOS", "Boston Celtics"),
    ("BKN", "Brooklyn Nets"),
    ("CHA", "Charlotte Hornets"),
    ("CHI", "Chicago Bulls"),
    ("CLE", "Cleveland Cavaliers"),
    ("DAL", "Dallas Mavericks"),
    ("DEN", "Denver Nuggets"),
    ("DET", "Detroit Pistons"),
    ("GSW", "Golden State Warriors"),
    ("HOU", "Houston Rockets"),
    ("IND", "Indiana Pacers"),
    ("LAC", "Los Angeles Clippers"),
    ("LAL", "Los Angeles Lakers"),
    ("MEM", "Memphis Grizzlies"),
    ("MIA", "Miami Heat"),
    ("MIL", "Milwaukee Bucks"),
    ("MIN", "Minnesota Timberwolves"),
    ("NOP", "New Orleans Pelicans"),
    ("NYK", "New York Knicks"),
    ("OKC", "Oklahoma City Thunder"),
    ("ORL", "Orlando Magic"),
    ("PHI", "Philadelphia 76ers"),
    ("PHX", "Phoenix Suns"),
    ("POR", "Portland Trail Blazers"),
    ("SAC", "Sacramento Kings"),
    ("SAS", "San Antonio Spurs"),
    ("TOR", "Toronto Raptors"),
    ("UTA", "Utah Jazz"),
    ("WAS", "Washington Wizards"),
    // Historical
    ("CHB", "Charlotte Bobcats"),
    ("NJN", "New Jersey Nets"),
    ("NOH", "New Orleans Hornets"),
    ("NOK", "New Orleans/Oklahoma City Hornets"),
    ("SEA", "Seattle SuperSonics"),
    ("VAN", "Vancouver Grizzlies"),
];

/// Owned abbreviation -> full-name map for the feature builder
pub fn abbreviation_map() -> HashMap<String, String> {
    TEAM_ABBREVIATIONS
        .iter()
        .map(|(abbr, name)| (abbr.to_string(), name.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_franchises_are_present() {
        let map = abbreviation_map();
        assert_eq!(map.get("BOS").map(String::as_str), Some("Boston Celtics"));
        assert_eq!(map.get("OKC").map(String::as_str), Some("Oklahoma City Thunder"));
        assert!(map.len() >= 30);
    }
}
