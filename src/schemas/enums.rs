use serde::{Deserialize, Serialize};

/// Raised when a string is outside a choice set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{value}\" is not a valid choice.")]
pub struct InvalidChoice {
    pub value: String,
}

/// Macro to generate a choice enum with `as_str`, `CHOICES` and `FromStr`
macro_rules! choice_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            /// Accepted wire values, in declaration order.
            pub const CHOICES: &'static [&'static str] = &[$($s),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidChoice { value: s.into() }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum!(Role {
    Patient => "patient",
    Provider => "provider",
    Admin => "admin",
});

impl Default for Role {
    fn default() -> Self {
        Self::Patient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_parses_every_choice() {
        for (variant, s) in [
            (Role::Patient, "patient"),
            (Role::Provider, "provider"),
            (Role::Admin, "admin"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Role::from_str(s).unwrap(), variant);
        }
        assert_eq!(Role::CHOICES, &["patient", "provider", "admin"]);
    }

    #[test]
    fn role_rejects_unknown_and_case_variants() {
        assert_eq!(
            Role::from_str("doctor").unwrap_err().to_string(),
            "\"doctor\" is not a valid choice."
        );
        assert!(Role::from_str("Patient").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn role_defaults_to_patient() {
        assert_eq!(Role::default(), Role::Patient);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::Provider).unwrap(), "provider");
    }
}
