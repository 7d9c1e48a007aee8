pub mod address;
pub mod assurance;
pub mod date;
pub mod error_object;
pub mod identifier;
pub mod object;

/// Defines an open-world wire string enum: a curated set of named constants
/// plus an `Other` variant preserving any unknown value, so the type never
/// rejects a forward-compatible wire value.
macro_rules! wire_string_enum {
    (
        $(#[$doc:meta])*
        $name:ident {
            $($(#[$vdoc:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vdoc])* $variant,)+
            /// A value outside the curated set.
            Other(String),
        }

        impl $name {
            pub fn from_name(name: std::borrow::Cow<str>) -> Self {
                match name.as_ref() {
                    $($wire => Self::$variant,)+
                    _ => Self::Other(name.into_owned()),
                }
            }

            pub fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(other) => other,
                }
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from_name(std::borrow::Cow::Borrowed(s))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::from_name(std::borrow::Cow::Owned(value))
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(s.into())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => $wire.to_owned(),)+
                    $name::Other(other) => other,
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                self.name().fmt(f)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                self.name().serialize(serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                String::deserialize(deserializer).map(Into::into)
            }
        }

        impl TryFrom<serde_json::Value> for $name {
            type Error = anyhow::Error;

            fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
                let s: String = serde_json::from_value(value)?;
                Ok(s.into())
            }
        }

        impl From<$name> for serde_json::Value {
            fn from(value: $name) -> Self {
                serde_json::Value::String(value.into())
            }
        }
    };
}
pub(crate) use wire_string_enum;
