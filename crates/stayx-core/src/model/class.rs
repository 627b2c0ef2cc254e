use serde::{Deserialize, Serialize};

/// The closed set of recognized entity classes
///
/// Class dispatch is a tagged variant resolved statically, not string-keyed
/// reflection: a class token either parses to one of these tags or the command
/// fails validation. The registry also drives reloading - persisted entries
/// carrying a tag outside this set are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassName {
    BaseModel,
    User,
    State,
    City,
    Place,
    Amenity,
    Review,
}

impl ClassName {
    /// The fixed class registry, in canonical order
    pub const ALL: [ClassName; 7] = [
        ClassName::BaseModel,
        ClassName::User,
        ClassName::State,
        ClassName::City,
        ClassName::Place,
        ClassName::Amenity,
        ClassName::Review,
    ];

    /// Look up a class token in the registry
    ///
    /// Returns `None` for anything outside the closed set (lookup is
    /// case-sensitive).
    pub fn parse(name: &str) -> Option<ClassName> {
        match name {
            "BaseModel" => Some(ClassName::BaseModel),
            "User" => Some(ClassName::User),
            "State" => Some(ClassName::State),
            "City" => Some(ClassName::City),
            "Place" => Some(ClassName::Place),
            "Amenity" => Some(ClassName::Amenity),
            "Review" => Some(ClassName::Review),
            _ => None,
        }
    }

    /// Canonical spelling of the class tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassName::BaseModel => "BaseModel",
            ClassName::User => "User",
            ClassName::State => "State",
            ClassName::City => "City",
            ClassName::Place => "Place",
            ClassName::Amenity => "Amenity",
            ClassName::Review => "Review",
        }
    }
}

impl std::fmt::Display for ClassName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_class() {
        for class in ClassName::ALL {
            assert_eq!(ClassName::parse(class.as_str()), Some(class));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_case_variants() {
        assert_eq!(ClassName::parse("Bogus"), None);
        assert_eq!(ClassName::parse("user"), None);
        assert_eq!(ClassName::parse(""), None);
    }

    #[test]
    fn test_serde_uses_canonical_spelling() {
        let json = serde_json::to_string(&ClassName::BaseModel).unwrap();
        assert_eq!(json, "\"BaseModel\"");
        let back: ClassName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ClassName::BaseModel);
    }
}
