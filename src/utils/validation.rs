//! Centralized input limits and argument parsing helpers.

use std::collections::HashSet;

/// Maximum number of cards allowed in a single deck file (DOS protection)
pub const MAX_CARDS: usize = 100_000;

/// Check if adding another card would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new card.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_card_limit(count: usize) -> Option<String> {
    if count >= MAX_CARDS {
        Some(format!(
            "Too many cards: adding another would exceed maximum of {MAX_CARDS}"
        ))
    } else {
        None
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("Invalid card position: '{0}'")]
    NotANumber(String),
    #[error("Card position {position} is out of range for a deck of {deck_size} cards")]
    OutOfRange { position: usize, deck_size: usize },
    #[error("Card position {0} is given more than once")]
    Duplicate(usize),
    #[error("No card positions given")]
    Empty,
}

/// Parse card positions given as separate arguments and/or dash-joined
/// (`0 3 5`, `0-3-5`). Positions are returned sorted ascending.
///
/// # Errors
///
/// Returns a `PositionError` for non-numeric, out-of-range, repeated or
/// missing positions.
pub fn parse_positions<S: AsRef<str>>(
    args: &[S],
    deck_size: usize,
) -> Result<Vec<usize>, PositionError> {
    let mut positions = Vec::new();
    let mut seen = HashSet::new();

    for token in args
        .iter()
        .flat_map(|arg| arg.as_ref().split(['-', ',']))
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        let position: usize = token
            .parse()
            .map_err(|_| PositionError::NotANumber(token.to_string()))?;
        if position >= deck_size {
            return Err(PositionError::OutOfRange {
                position,
                deck_size,
            });
        }
        if !seen.insert(position) {
            return Err(PositionError::Duplicate(position));
        }
        positions.push(position);
    }

    if positions.is_empty() {
        return Err(PositionError::Empty);
    }

    positions.sort_unstable();
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_card_limit() {
        assert!(check_card_limit(0).is_none());
        assert!(check_card_limit(MAX_CARDS - 1).is_none());
        assert!(check_card_limit(MAX_CARDS).is_some());
    }

    #[test]
    fn test_parse_positions_forms() {
        assert_eq!(parse_positions(&["0-3-5"], 6).unwrap(), vec![0, 3, 5]);
        assert_eq!(parse_positions(&["5", "0", "3"], 6).unwrap(), vec![0, 3, 5]);
        assert_eq!(parse_positions(&["1,2", "4"], 6).unwrap(), vec![1, 2, 4]);
    }

    #[test]
    fn test_parse_positions_errors() {
        assert_eq!(
            parse_positions(&["0-x"], 6).unwrap_err(),
            PositionError::NotANumber("x".to_string())
        );
        assert_eq!(
            parse_positions(&["0-6"], 6).unwrap_err(),
            PositionError::OutOfRange {
                position: 6,
                deck_size: 6
            }
        );
        assert_eq!(
            parse_positions(&["2", "2"], 6).unwrap_err(),
            PositionError::Duplicate(2)
        );
        assert_eq!(
            parse_positions::<&str>(&[], 6).unwrap_err(),
            PositionError::Empty
        );
    }
}
