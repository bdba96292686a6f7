// symbolic_enum
/// Declare a Rust enum whose variants carry a symbolic name and an integer
/// code, and implement `SymbolicEnum` for it.
///
/// The enum derives `Clone`, `Copy`, `Debug`, `Eq`, `Hash`, `PartialEq`,
/// `Ord` and `PartialOrd`; codes become `#[repr(i64)]` discriminants, so a
/// repeated code is a compile error.
///
/// ```
/// use symbolic_enum_core::{symbolic_enum, traits::SymbolicEnum};
///
/// symbolic_enum! {
///     pub enum OrderState {
///         Pending = 1 => "pending",
///         Shipped = 2 => "shipped",
///     }
/// }
///
/// assert_eq!(OrderState::Shipped.code(), 2);
/// assert_eq!(OrderState::from_name("pending"), Some(OrderState::Pending));
/// ```
#[macro_export]
macro_rules! symbolic_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $code:expr => $symbol:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[repr(i64)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $code,
            )+
        }

        impl $crate::traits::SymbolicEnum for $name {
            const VALUES: &'static [(&'static str, $crate::mapping::Code)] =
                &[$(($symbol, $code)),+];

            fn code(self) -> $crate::mapping::Code {
                self as $crate::mapping::Code
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $symbol,)+
                }
            }

            fn from_code(code: $crate::mapping::Code) -> Option<Self> {
                [$(Self::$variant),+]
                    .into_iter()
                    .find(|variant| *variant as $crate::mapping::Code == code)
            }

            fn from_name(name: &str) -> Option<Self> {
                [$(Self::$variant),+]
                    .into_iter()
                    .find(|variant| <Self as $crate::traits::SymbolicEnum>::name(*variant) == name)
            }
        }
    };
}
