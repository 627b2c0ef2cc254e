use thiserror::Error;

/// Result type alias using StayXError
pub type Result<T> = std::result::Result<T, StayXError>;

/// Error taxonomy for console command validation
///
/// Every variant maps to exactly one diagnostic line via [`StayXError::diagnostic`].
/// These errors never abort the shell: the dispatcher prints the diagnostic and
/// returns to the prompt. Storage failures are a separate type in `stayx-store`
/// and do propagate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StayXError {
    /// Command requires a class name and none was given
    #[error("class name missing")]
    ClassNameMissing,

    /// Class token is not in the recognized registry
    #[error("class doesn't exist: {class}")]
    UnknownClass { class: String },

    /// Command requires an instance id and none was given
    #[error("instance id missing")]
    InstanceIdMissing,

    /// No entity registered under the composite key
    #[error("no instance found: {key}")]
    InstanceNotFound { key: String },

    /// Update requires an attribute name
    #[error("attribute name missing")]
    AttributeNameMissing,

    /// Update requires an attribute value
    #[error("value missing")]
    ValueMissing,

    /// Line matched neither the canonical nor the dotted-call grammar
    #[error("unknown syntax: {line}")]
    UnknownSyntax { line: String },
}

impl StayXError {
    /// The exact single-line diagnostic the shell prints for this error
    ///
    /// These strings are part of the scriptable surface and must stay stable.
    pub fn diagnostic(&self) -> String {
        match self {
            StayXError::ClassNameMissing => "** class name missing **".to_string(),
            StayXError::UnknownClass { .. } => "** class doesn't exist **".to_string(),
            StayXError::InstanceIdMissing => "** instance id missing **".to_string(),
            StayXError::InstanceNotFound { .. } => "** no instance found **".to_string(),
            StayXError::AttributeNameMissing => "** attribute name missing **".to_string(),
            StayXError::ValueMissing => "** value missing **".to_string(),
            StayXError::UnknownSyntax { line } => format!("*** Unknown syntax: {}", line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_lines_are_stable() {
        let cases = [
            (StayXError::ClassNameMissing, "** class name missing **"),
            (
                StayXError::UnknownClass {
                    class: "Bogus".to_string(),
                },
                "** class doesn't exist **",
            ),
            (StayXError::InstanceIdMissing, "** instance id missing **"),
            (
                StayXError::InstanceNotFound {
                    key: "User.123".to_string(),
                },
                "** no instance found **",
            ),
            (StayXError::AttributeNameMissing, "** attribute name missing **"),
            (StayXError::ValueMissing, "** value missing **"),
        ];
        for (err, expected) in cases {
            assert_eq!(err.diagnostic(), expected, "Wrong diagnostic for {:?}", err);
        }
    }

    #[test]
    fn test_unknown_syntax_echoes_line() {
        let err = StayXError::UnknownSyntax {
            line: "User.create()".to_string(),
        };
        assert_eq!(err.diagnostic(), "*** Unknown syntax: User.create()");
    }
}
