//! Маркер `T#[<digits>]` в описании проводки.
//!
//! API возвращает и чужие проводки; «наши» отмечены маркером. Поиск и
//! извлечение идентификатора делает одно и то же выражение.

use crate::error::{ConscriboError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MARKER_PATTERN: &str = r"T#\[(\d*)\]";

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(MARKER_PATTERN).unwrap());

pub fn format(identifier: u64) -> String {
    format!("T#[{identifier}]")
}

pub fn is_marked(description: &str) -> bool {
    MARKER.is_match(description)
}

/// `Ok(None)`: маркера нет (чужая проводка).
/// Пустой маркер, несколько маркеров или переполнение: ошибка сопоставления.
pub fn identifier(description: &str) -> Result<Option<u64>> {
    let mut found = MARKER.captures_iter(description);
    let Some(caps) = found.next() else {
        return Ok(None);
    };
    if found.next().is_some() {
        return Err(ConscriboError::Mapping(format!(
            "more than one marker in description {description:?}"
        )));
    }

    let digits = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    if digits.is_empty() {
        return Err(ConscriboError::Mapping(format!(
            "empty marker in description {description:?}"
        )));
    }
    digits
        .parse::<u64>()
        .map(Some)
        .map_err(|e| ConscriboError::Mapping(format!("marker identifier {digits}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_marker_anywhere() {
        assert!(is_marked("T#[42]"));
        assert!(is_marked("Refund T#[7] applied"));
        assert!(is_marked("T#[]"));
        assert!(!is_marked("Groceries"));
        assert!(!is_marked("T#7"));
    }

    #[test]
    fn extracts_identifier() {
        assert_eq!(identifier("Refund T#[7] applied").unwrap(), Some(7));
        assert_eq!(identifier(&format(123)).unwrap(), Some(123));
        assert_eq!(identifier("Groceries").unwrap(), None);
    }

    #[test]
    fn rejects_ambiguous_markers() {
        assert!(matches!(identifier("T#[]"), Err(ConscriboError::Mapping(_))));
        assert!(matches!(identifier("T#[1] T#[2]"), Err(ConscriboError::Mapping(_))));
        assert!(matches!(
            identifier("T#[99999999999999999999999]"),
            Err(ConscriboError::Mapping(_))
        ));
    }
}
