//! Player-name and stat-alias resolution
//!
//! Free-text inputs from the CLI are mapped to directory entries and
//! canonical stat columns through enumerated alias tables.

use crate::data::provider::PlayerInfo;
use crate::{PredictionError, Result, Stat};

/// Common shorthand names mapped to directory full names
const PLAYER_NAME_ALIASES: &[(&str, &str)] = &[
    ("lebron", "LeBron James"),
    ("luka", "Luka Dončić"),
    ("giannis", "Giannis Antetokounmpo"),
    ("steph curry", "Stephen Curry"),
    ("kd", "Kevin Durant"),
    ("jokic", "Nikola Jokić"),
];

/// Free-form stat aliases mapped to canonical stats
const STAT_ALIASES: &[(&str, Stat)] = &[
    ("pts", Stat::Pts),
    ("points", Stat::Pts),
    ("reb", Stat::Reb),
    ("rebound", Stat::Reb),
    ("rebounds", Stat::Reb),
    ("ast", Stat::Ast),
    ("assist", Stat::Ast),
    ("assists", Stat::Ast),
    ("stl", Stat::Stl),
    ("steal", Stat::Stl),
    ("steals", Stat::Stl),
    ("blk", Stat::Blk),
    ("block", Stat::Blk),
    ("blocks", Stat::Blk),
    ("fg3m", Stat::Fg3m),
    ("threes", Stat::Fg3m),
    ("3pm", Stat::Fg3m),
    ("ftm", Stat::Ftm),
    ("free throws made", Stat::Ftm),
    ("fg_pct", Stat::FgPct),
    ("fg%", Stat::FgPct),
    ("fg3_pct", Stat::Fg3Pct),
    ("3p%", Stat::Fg3Pct),
    ("ft_pct", Stat::FtPct),
    ("ft%", Stat::FtPct),
];

/// Maximum candidate names echoed back in an ambiguity error
const MAX_CANDIDATES: usize = 5;

/// Resolve a free-form stat string to a canonical stat
pub fn resolve_stat(input: &str) -> Result<Stat> {
    let needle = input.trim().to_lowercase();
    STAT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == needle)
        .map(|(_, stat)| *stat)
        .ok_or_else(|| PredictionError::UnknownStat(input.trim().to_string()))
}

/// Normalize a free-text player name before directory lookup
pub fn normalize_player_name(name: &str) -> String {
    let trimmed = name.trim();
    let lower = trimmed.to_lowercase();
    if let Some((_, full)) = PLAYER_NAME_ALIASES.iter().find(|(alias, _)| *alias == lower) {
        return full.to_string();
    }
    title_case(trimmed)
}

/// Resolve a player name against the directory.
///
/// Exact case-insensitive match first; otherwise a single unambiguous
/// partial match on the query's first token is accepted.
pub fn resolve_player<'a>(name: &str, players: &'a [PlayerInfo]) -> Result<&'a PlayerInfo> {
    let target = normalize_player_name(name).to_uppercase();

    if let Some(player) = players
        .iter()
        .find(|p| p.full_name.to_uppercase() == target)
    {
        return Ok(player);
    }

    let first_token = match target.split_whitespace().next() {
        Some(token) => token,
        None => return Err(PredictionError::PlayerNotFound(name.trim().to_string())),
    };

    let candidates: Vec<&PlayerInfo> = players
        .iter()
        .filter(|p| p.full_name.to_uppercase().contains(first_token))
        .collect();

    match candidates.as_slice() {
        [only] => Ok(only),
        [] => Err(PredictionError::PlayerNotFound(name.trim().to_string())),
        many => Err(PredictionError::AmbiguousPlayerMatch {
            name: name.trim().to_string(),
            candidates: many
                .iter()
                .take(MAX_CANDIDATES)
                .map(|p| p.full_name.clone())
                .collect(),
        }),
    }
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
