//! Macro for declaring port error enums.
//!
//! Every variant carries named fields. Each variant gets a snake_case
//! constructor whose parameters accept anything convertible into the field
//! type, so adapters can pass `&str` or `String` alike.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident {
                    $(
                        $(#[$field_meta:meta])*
                        $field:ident : $ty:ty
                    ),+ $(,)?
                } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $( $(#[$field_meta])* $field : $ty ),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    /// Construct the matching variant.
                    pub fn [<$variant:snake>]($( $field: impl Into<$ty> ),+) -> Self {
                        Self::$variant { $( $field: $field.into() ),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;
