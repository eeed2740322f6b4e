//! Loaders for the class membership JSON and the network TSV.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::config::{ClassDefinition, ClassesFile, Effect, Interaction};
use crate::error::{Result, StatsError};

/// Read class definitions from a JSON document.
pub fn read_classes<R: Read>(reader: R) -> Result<Vec<ClassDefinition>> {
    let file: ClassesFile = serde_json::from_reader(reader)?;
    Ok(file.classes)
}

pub fn load_classes(path: impl AsRef<Path>) -> Result<Vec<ClassDefinition>> {
    let classes = read_classes(BufReader::new(File::open(path.as_ref())?))?;
    log::info!(
        "Loaded {} classes from `{}`.",
        classes.len(),
        path.as_ref().display()
    );
    Ok(classes)
}

fn parse_directed(field: &str) -> Option<bool> {
    match field.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn parse_effect(field: Option<&str>) -> Option<Effect> {
    match field.map(str::trim) {
        None | Some("") => Some(Effect::Neutral),
        Some(s) => s
            .trim_start_matches('+')
            .parse::<i8>()
            .ok()
            .and_then(Effect::from_sign),
    }
}

/// Parse a tab-separated edge list: `source target directed [effect]`.
///
/// Blank lines and lines starting with `#` are skipped, as is a header line
/// whose third column reads `directed`. Exact duplicate records are kept once.
pub fn read_network<R: BufRead>(reader: R) -> Result<Vec<Interaction>> {
    let mut interactions = Vec::new();
    let mut seen: HashSet<Interaction> = HashSet::new();
    let mut first_record = true;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split('\t').collect();
        if first_record {
            first_record = false;
            if fields.get(2).map(|f| f.trim().eq_ignore_ascii_case("directed")) == Some(true) {
                continue;
            }
        }

        if fields.len() < 3 {
            return Err(StatsError::InvalidEdge {
                line: line_no,
                reason: format!("expected at least 3 columns, found {}", fields.len()),
            });
        }
        let (source, target) = (fields[0].trim(), fields[1].trim());
        if source.is_empty() || target.is_empty() {
            return Err(StatsError::InvalidEdge {
                line: line_no,
                reason: "empty entity identifier".to_string(),
            });
        }
        let directed = parse_directed(fields[2]).ok_or_else(|| StatsError::InvalidEdge {
            line: line_no,
            reason: format!("invalid directed flag `{}`", fields[2]),
        })?;
        let effect = parse_effect(fields.get(3).copied()).ok_or_else(|| StatsError::InvalidEdge {
            line: line_no,
            reason: format!("invalid effect `{}`", fields[3]),
        })?;

        let interaction = Interaction {
            source: source.to_string(),
            target: target.to_string(),
            directed,
            effect: if directed { effect } else { Effect::Neutral },
        };
        if seen.insert(interaction.clone()) {
            interactions.push(interaction);
        }
    }

    Ok(interactions)
}

pub fn load_network(path: impl AsRef<Path>) -> Result<Vec<Interaction>> {
    let interactions = read_network(BufReader::new(File::open(path.as_ref())?))?;
    log::info!(
        "Loaded {} interactions from `{}`.",
        interactions.len(),
        path.as_ref().display()
    );
    Ok(interactions)
}
