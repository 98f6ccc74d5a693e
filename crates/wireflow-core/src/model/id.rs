// ── Opaque prefix-tagged identifiers ──
//
// Every entity carries an `Id` of the form `<prefix>-<9 base-36 chars>`.
// The suffix is random, not cryptographically unique -- the stores
// enforce uniqueness with presence checks on insert.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

const SUFFIX_LEN: usize = 9;
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque identifier for any wireflow entity.
///
/// Freshly generated ids carry a prefix naming the entity class
/// (`req`, `res`, `connection`, `node`, `connector`); ids accepted from
/// callers are stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    fn generate(prefix: &str) -> Self {
        let mut rng = rand::rng();
        let mut value = String::with_capacity(prefix.len() + 1 + SUFFIX_LEN);
        value.push_str(prefix);
        value.push('-');
        for _ in 0..SUFFIX_LEN {
            value.push(ALPHABET[rng.random_range(0..ALPHABET.len())] as char);
        }
        Self(value)
    }

    /// Fresh identifier for a request descriptor.
    pub fn request() -> Self {
        Self::generate("req")
    }

    /// Fresh identifier for a response record.
    pub fn response() -> Self {
        Self::generate("res")
    }

    /// Fresh identifier for a connection.
    pub fn connection() -> Self {
        Self::generate("connection")
    }

    /// Fresh identifier for a node.
    pub fn node() -> Self {
        Self::generate("node")
    }

    /// Fresh identifier for a connector.
    pub fn connector() -> Self {
        Self::generate("connector")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_prefix_and_suffix() {
        let id = Id::connection();
        let (prefix, suffix) = id.as_str().split_once('-').unwrap();
        assert_eq!(prefix, "connection");
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn every_prefix_is_distinct() {
        let prefixes: Vec<String> = [
            Id::request(),
            Id::response(),
            Id::connection(),
            Id::node(),
            Id::connector(),
        ]
        .iter()
        .map(|id| id.as_str().split_once('-').unwrap().0.to_owned())
        .collect();
        assert_eq!(prefixes, ["req", "res", "connection", "node", "connector"]);
    }

    #[test]
    fn consecutive_ids_differ() {
        assert_ne!(Id::node(), Id::node());
    }

    #[test]
    fn id_round_trips_through_display_and_from() {
        let id = Id::from("connector-abc123xyz");
        assert_eq!(id.to_string(), "connector-abc123xyz");
        let parsed: Id = "connector-abc123xyz".parse().unwrap();
        assert_eq!(parsed, id);
    }
}
