use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use flate2::read::MultiGzDecoder;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::card::Card;
use crate::core::deck::Deck;
use crate::core::schema::{Schema, SchemaError};
use crate::utils::validation::check_card_limit;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid deck format: {0}")]
    InvalidFormat(String),

    #[error("Invalid feature header on line {line}: {source}")]
    InvalidHeader { line: usize, source: SchemaError },

    #[error("Too many cards: {0} exceeds maximum allowed (100000)")]
    TooManyCards(usize),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Load a deck from a tab-delimited file, gzip-compressed or not.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or the errors of
/// [`parse_deck_text`] for invalid content.
pub fn parse_deck_file(path: &Path) -> Result<Deck, ParseError> {
    let text = if is_gzipped(path) {
        let file = std::fs::File::open(path)?;
        let mut text = String::new();
        MultiGzDecoder::new(file).read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(path)?
    };

    debug!("Read {} bytes from {}", text.len(), path.display());
    parse_deck_text(&text)
}

/// Parse a deck from tab-delimited text.
///
/// Blank lines are ignored and `#` lines are kept as deck comments. The first
/// remaining line names the features; every later line is one card. Fields are
/// trimmed. Lines with the wrong number of fields are skipped with a warning.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if there is no header line,
/// `ParseError::InvalidHeader` if the feature names are empty or repeated, or
/// `ParseError::TooManyCards` if the limit is exceeded.
pub fn parse_deck_text(text: &str) -> Result<Deck, ParseError> {
    let mut header: Option<Arc<Schema>> = None;
    let mut cards = Vec::new();
    let mut comments = Vec::new();
    let mut skipped = 0usize;

    for (i, line) in text.lines().enumerate() {
        // Line numbers in messages are 1-based for user friendliness
        let line_num = i + 1;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            comments.push(line.to_string());
            continue;
        }

        // Header names and values are trimmed alike
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();

        // First data line names the features
        let Some(schema) = header.as_ref().map(Arc::clone) else {
            let schema = Schema::new(fields.iter().copied()).map_err(|source| {
                ParseError::InvalidHeader {
                    line: line_num,
                    source,
                }
            })?;
            header = Some(Arc::new(schema));
            continue;
        };

        let card = match Card::new(schema, fields) {
            Ok(card) => card,
            Err(e) => {
                warn!("Skipping corrupt line {line_num} ({e}): {line}");
                skipped += 1;
                continue;
            }
        };

        if check_card_limit(cards.len()).is_some() {
            return Err(ParseError::TooManyCards(cards.len()));
        }

        cards.push(card);
    }

    let Some(schema) = header else {
        return Err(ParseError::InvalidFormat(
            "No feature header line found".to_string(),
        ));
    };

    if skipped > 0 {
        warn!("Skipped {skipped} corrupt line(s)");
    }

    let mut deck = Deck::with_schema(schema);
    for card in cards {
        // Every card was built against the header schema
        deck.add_card(card);
    }
    for comment in comments {
        deck.push_comment(comment);
    }

    debug!("Loaded {} cards", deck.len());
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::MAX_CARDS;

    const DECK: &str = "# 0-1-2
Color\tNumber\tShape\tFill
purple\t1\tsquare\tsolid
green\t2\tsquare\tsolid

red\t3\tsquare\tsolid
";

    #[test]
    fn test_parse_deck_text() {
        let deck = parse_deck_text(DECK).unwrap();
        assert_eq!(deck.len(), 3);
        assert_eq!(
            deck.schema().unwrap().names(),
            &["Color", "Number", "Shape", "Fill"]
        );
        assert_eq!(deck.card(2).unwrap().get("Color"), Some("red"));
        assert_eq!(deck.comments(), &["# 0-1-2"]);
    }

    #[test]
    fn test_skips_corrupt_lines() {
        let text = "Color\tNumber\nred\t1\ngreen\nblue\t3\textra\npurple\t2\n";
        let deck = parse_deck_text(text).unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.card(1).unwrap().get("Color"), Some("purple"));
    }

    #[test]
    fn test_comments_anywhere() {
        let text = "# first\nColor\n# second\nred\n";
        let deck = parse_deck_text(text).unwrap();
        assert_eq!(deck.comments(), &["# first", "# second"]);
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_header_only_is_empty_deck() {
        let deck = parse_deck_text("Color\tShape\n").unwrap();
        assert!(deck.is_empty());
        assert_eq!(deck.schema().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_header() {
        let err = parse_deck_text("# only a comment\n\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_duplicate_feature_header() {
        let err = parse_deck_text("\nColor\tColor\nred\tred\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidHeader {
                line: 2,
                source: SchemaError::DuplicateFeature(_)
            }
        ));
    }

    #[test]
    fn test_fields_trimmed_like_header() {
        let text = "Color \tNumber\nred \t1\nred\t 2\nred\t3\n";
        let mut deck = parse_deck_text(text).unwrap();
        assert_eq!(deck.schema().unwrap().names(), &["Color", "Number"]);
        assert_eq!(deck.card(0).unwrap().get("Color"), Some("red"));
        assert_eq!(deck.card(1).unwrap().get("Number"), Some("2"));
        assert_eq!(deck.feature_values()[0], ("Color", vec!["red"]));
        assert_eq!(deck.solve(3).len(), 1);
    }

    fn rows(count: usize) -> String {
        let mut text = String::from("Color\n");
        for _ in 0..count {
            text.push_str("a\n");
        }
        text
    }

    #[test]
    fn test_card_limit() {
        let deck = parse_deck_text(&rows(MAX_CARDS)).unwrap();
        assert_eq!(deck.len(), MAX_CARDS);

        let err = parse_deck_text(&rows(MAX_CARDS + 1)).unwrap_err();
        assert!(matches!(err, ParseError::TooManyCards(n) if n == MAX_CARDS));
    }

    #[test]
    fn test_parse_gzipped_file() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.set.gz");

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(DECK.as_bytes()).unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        let deck = parse_deck_file(&path).unwrap();
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.comments(), &["# 0-1-2"]);
    }
}
