/// Defines a closed integer status domain with a lossless fallback variant.
///
/// Generates:
/// - an enum with the listed variants plus `Unknown(i32)`
/// - serde as a bare integer (`from`/`into` `i32`)
/// - `code()`, `label()`, `is_known()`, `KNOWN`
/// - `Default` (the named default variant) and `Display` (the label)
///
/// Codes outside the set deserialize to `Unknown` and render as `"unknown"`.
///
/// Usage:
///   status_code!(DriverStatus, default = Active { Resigned = 0 => "resigned", Active = 1 => "active" });
macro_rules! status_code {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident {
            $($variant:ident = $code:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "i32", into = "i32")]
        pub enum $name {
            $($variant,)+
            Unknown(i32),
        }

        impl $name {
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            pub fn code(&self) -> i32 {
                match self {
                    $($name::$variant => $code,)+
                    $name::Unknown(code) => *code,
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Unknown(_) => "unknown",
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Unknown(_))
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl ::std::convert::From<i32> for $name {
            fn from(code: i32) -> Self {
                match code {
                    $($code => $name::$variant,)+
                    other => $name::Unknown(other),
                }
            }
        }

        impl ::std::convert::From<$name> for i32 {
            fn from(status: $name) -> i32 {
                status.code()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}
