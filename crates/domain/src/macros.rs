//! Macro for implementing Display and FromStr for closed label enums
//!
//! Member attributes are stored remotely as fixed Portuguese labels
//! (`"Masculino"`, `"Membro Normal"`, `"SUDUESTE"`). This macro ties each
//! variant to its label once and derives both conversions from the table.
//!
//! # Example
//!
//! ```rust
//! use congregate_domain::impl_domain_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Shift {
//!     Morning,
//!     Evening,
//! }
//!
//! impl_domain_label_conversions!(Shift {
//!     Morning => "Manhã",
//!     Evening => "Noite",
//! });
//!
//! assert_eq!(Shift::Morning.to_string(), "Manhã");
//! assert_eq!("noite".parse::<Shift>().unwrap(), Shift::Evening);
//! assert_eq!(Shift::ALL.len(), 2);
//! ```

/// Implements Display, FromStr, `label()` and `ALL` for label enums
///
/// This macro generates:
/// - `label()`: the canonical stored label
/// - `ALL`: every variant in declaration order
/// - Display trait: writes the canonical label
/// - FromStr trait: case-insensitive, whitespace-trimmed match on the label
#[macro_export]
macro_rules! impl_domain_label_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical label as stored remotely.
            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                $(
                    if wanted == $str.to_lowercase() {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
