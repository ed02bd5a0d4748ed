//! Macro for implementing Display, FromStr and serde for code-backed enums
//!
//! The backend encodes statuses as single-letter codes (`"P"`, `"E"`, ...).
//! This macro maps each variant to its wire code once and derives every
//! conversion from that table: `Display`, case-insensitive `FromStr`, and
//! serde (de)serialization through the code.
//!
//! # Example
//!
//! ```rust
//! use asodi_domain::impl_status_codes;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Approval {
//!     Approved,
//!     Pending,
//! }
//!
//! impl_status_codes!(Approval {
//!     Approved => "A",
//!     Pending => "P",
//! });
//!
//! assert_eq!(Approval::Pending.to_string(), "P");
//! assert_eq!("a".parse::<Approval>().unwrap(), Approval::Approved);
//! ```

/// Implements code conversions for status enums
///
/// This macro generates:
/// - `code()`: the wire code of the variant
/// - `Display`: writes the wire code
/// - `FromStr`: case-insensitive, whitespace-trimmed parsing of the code
/// - `Serialize`/`Deserialize`: through the wire code
#[macro_export]
macro_rules! impl_status_codes {
    ($enum_name:ident { $($variant:ident => $code:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire code used by the backend.
            pub const fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($code) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.code())
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}
