use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a string-backed identifier newtype.
///
/// Identifiers serialize as plain strings so case records and graph files
/// stay readable.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Opaque identifier of a case, immutable once allocated.
    CaseId
);

string_id!(
    /// Key selecting the stage graph a case follows
    /// (e.g. `land-regularization`).
    CaseType
);

string_id!(
    /// Identifier of a stage within a case type's graph.
    StageId
);

string_id!(
    /// Document-type tag, unique per case (e.g. `cpf`, `medical-report`).
    DocumentTag
);

impl CaseId {
    /// Allocate a fresh case id.
    ///
    /// Format: `case-<32 hex chars>`, which passes id validation and is safe
    /// to use as a file name.
    pub fn generate() -> Self {
        Self(format!("case-{}", Uuid::new_v4().simple()))
    }
}
