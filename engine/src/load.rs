use std::fmt;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::TournamentData;

pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error, String),
    Parse(serde_json::Error),
    /// Well-formed JSON that is not a round -> match list mapping.
    Shape(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e, path) => write!(f, "could not read {path}: {e}"),
            LoadError::Parse(e) => write!(f, "invalid tournament json: {e}"),
            LoadError::Shape(msg) => write!(f, "unexpected tournament layout: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e, _) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Shape(_) => None,
        }
    }
}

/// Parse a `{ "Round-01": [match, ...], ... }` document.
///
/// The shape is checked first so a wrong document names the offending round
/// instead of surfacing a bare serde message.
pub fn parse_tournament(json: &str) -> LoadResult<TournamentData> {
    let value: Value = serde_json::from_str(json).map_err(LoadError::Parse)?;
    check_shape(&value)?;
    // Deserialize from the text, not the Value: the Value map does not keep key order.
    let data: TournamentData = serde_json::from_str(json).map_err(LoadError::Parse)?;
    debug!(
        "parsed tournament: {} rounds, {} matches",
        data.round_count(),
        data.match_count()
    );
    Ok(data)
}

pub fn load_tournament_file(path: impl AsRef<Path>) -> LoadResult<TournamentData> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| LoadError::Io(e, path.display().to_string()))?;
    parse_tournament(&content)
}

fn check_shape(value: &Value) -> LoadResult<()> {
    let Some(rounds) = value.as_object() else {
        return Err(LoadError::Shape("top level must be an object of rounds".into()));
    };
    for (name, matches) in rounds {
        let Some(matches) = matches.as_array() else {
            return Err(LoadError::Shape(format!("round {name:?} is not a list of matches")));
        };
        for (i, game) in matches.iter().enumerate() {
            let Some(fields) = game.as_object() else {
                return Err(LoadError::Shape(format!("round {name:?} match {i} is not an object")));
            };
            for required in ["seed", "player1"] {
                if !fields.get(required).is_some_and(Value::is_string) {
                    return Err(LoadError::Shape(format!(
                        "round {name:?} match {i} is missing {required:?}"
                    )));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatchStatus;

    const SAMPLE: &str = r#"{
        "Round-02": [
            { "seed": "1", "player1": "Ana", "player2": "Bo", "winner": "Ana", "status": "finished" },
            { "seed": "2", "player1": "Cy", "isBye": true }
        ],
        "Round-01": [
            { "seed": "3", "player1": "Ana", "status": "ongoing" }
        ]
    }"#;

    #[test]
    fn test_parse_keeps_document_round_order() {
        let data = parse_tournament(SAMPLE).unwrap();
        let names: Vec<&str> = data.round_names().collect();
        assert_eq!(names, vec!["Round-02", "Round-01"]);
        assert_eq!(data.match_count(), 3);
    }

    #[test]
    fn test_parse_match_fields() {
        let data = parse_tournament(SAMPLE).unwrap();
        let (_, first) = data.rounds().next().unwrap();
        assert_eq!(first[0].status, Some(MatchStatus::Finished));
        assert!(first[0].is_winner("Ana"));
        assert!(!first[0].is_walkover());
        assert!(first[1].is_bye);
        assert!(first[1].is_walkover());
        assert_eq!(first[1].status, None);
    }

    #[test]
    fn test_empty_document_and_empty_rounds_are_fine() {
        assert!(parse_tournament("{}").unwrap().is_empty());
        let data = parse_tournament(r#"{ "Round-01": [] }"#).unwrap();
        assert_eq!(data.round_count(), 1);
        assert!(data.is_empty());
    }

    #[test]
    fn test_wrong_shapes_are_rejected() {
        for bad in [
            "[]",
            r#"{ "Round-01": {} }"#,
            r#"{ "Round-01": [1] }"#,
            r#"{ "Round-01": [ { "player1": "A" } ] }"#,
            r#"{ "Round-01": [ { "seed": "1", "player1": 5 } ] }"#,
        ] {
            assert!(
                matches!(parse_tournament(bad), Err(LoadError::Shape(_))),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn test_bad_status_is_a_parse_error() {
        let doc = r#"{ "R": [ { "seed": "1", "player1": "A", "status": "paused" } ] }"#;
        assert!(matches!(parse_tournament(doc), Err(LoadError::Parse(_))));
        assert!(matches!(parse_tournament("{"), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_tournament_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
