// Identifier Domain Model
//
// A user-facing identifier is either an already-parsed UUID or a token typed
// by the operator, which may be a full UUID (with or without hyphens) or a
// prefix of one.

use uuid::Uuid;

const GROUP_LENGTHS: [usize; 5] = [8, 4, 4, 4, 12];

/// UUID-typed argument before resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UuidExpansion {
    Parsed(Uuid),
    Token(String),
}

impl From<Uuid> for UuidExpansion {
    fn from(value: Uuid) -> Self {
        UuidExpansion::Parsed(value)
    }
}

impl From<&Uuid> for UuidExpansion {
    fn from(value: &Uuid) -> Self {
        UuidExpansion::Parsed(*value)
    }
}

impl From<String> for UuidExpansion {
    fn from(value: String) -> Self {
        UuidExpansion::Token(value)
    }
}

impl From<&str> for UuidExpansion {
    fn from(value: &str) -> Self {
        UuidExpansion::Token(value.to_string())
    }
}

impl From<&String> for UuidExpansion {
    fn from(value: &String) -> Self {
        UuidExpansion::Token(value.clone())
    }
}

impl std::fmt::Display for UuidExpansion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UuidExpansion::Parsed(id) => write!(f, "{}", id),
            UuidExpansion::Token(token) => f.write_str(token),
        }
    }
}

/// Canonical UUID check: 32 lowercase hex digits in 8-4-4-4-12 groups,
/// each of the four separating hyphens independently optional.
pub fn is_uuid(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut pos = 0;

    for (i, len) in GROUP_LENGTHS.iter().enumerate() {
        let end = pos + len;
        if end > bytes.len() {
            return false;
        }
        if !bytes[pos..end]
            .iter()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
        {
            return false;
        }
        pos = end;

        if i + 1 < GROUP_LENGTHS.len() && bytes.get(pos) == Some(&b'-') {
            pos += 1;
        }
    }

    pos == bytes.len()
}

/// Parse a resolved identifier, tolerating any subset of the four hyphens
pub fn parse_uuid(value: &str) -> Option<Uuid> {
    let simple: String = value.chars().filter(|c| *c != '-').collect();
    if simple.len() != 32 {
        return None;
    }
    Uuid::try_parse(&simple).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "83267e88-efdd-4b1d-92c0-6b80d01887f8";

    #[test]
    fn test_is_uuid_hyphenated_and_simple() {
        assert!(is_uuid(ID));
        assert!(is_uuid("83267e88efdd4b1d92c06b80d01887f8"));
        // only some hyphens present
        assert!(is_uuid("83267e88efdd-4b1d-92c06b80d01887f8"));
    }

    #[test]
    fn test_is_uuid_rejects_prefixes_and_noise() {
        assert!(!is_uuid("83267e88"));
        assert!(!is_uuid(""));
        assert!(!is_uuid("83267E88-EFDD-4B1D-92C0-6B80D01887F8"));
        assert!(!is_uuid(&format!("{}0", ID)));
        assert!(!is_uuid(&format!("{{{}}}", ID)));
        assert!(!is_uuid("83267e88--efdd-4b1d-92c0-6b80d01887f8"));
    }

    #[test]
    fn test_parse_uuid_partial_hyphens() {
        let expected = Uuid::parse_str(ID).unwrap();
        assert_eq!(parse_uuid("83267e88efdd-4b1d-92c06b80d01887f8"), Some(expected));
        assert_eq!(parse_uuid(ID), Some(expected));
        assert_eq!(parse_uuid("pool-a"), None);
    }

    #[test]
    fn test_expansion_from() {
        let id = Uuid::parse_str(ID).unwrap();
        assert_eq!(UuidExpansion::from(id), UuidExpansion::Parsed(id));
        assert_eq!(UuidExpansion::from("8326"), UuidExpansion::Token("8326".into()));
    }
}
