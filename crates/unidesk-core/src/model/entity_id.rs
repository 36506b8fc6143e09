// ── Identity types ──
//
// Every record carries a server-assigned integer id. Each entity gets its
// own newtype so a course id can never be passed where a student id is
// expected.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// The raw integer as the backend knows it.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Student`](super::Student).
    StudentId
);
entity_id!(
    /// Identifier of a [`Course`](super::Course).
    CourseId
);
entity_id!(
    /// Identifier of a [`Department`](super::Department).
    DepartmentId
);
entity_id!(
    /// Identifier of an enrollment record.
    EnrollmentId
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays() {
        let id: StudentId = " 42 ".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_non_numeric() {
        assert!("abc".parse::<CourseId>().is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&DepartmentId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
