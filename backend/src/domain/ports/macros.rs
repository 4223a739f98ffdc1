//! Helper macro for declaring port error enums with snake-case constructors.
//!
//! Every variant carries named fields; each gets a constructor taking
//! `impl Into<_>` per field, so adapters can pass `&str` for `String`.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum SamplePortError {
            Rejected { reason: String } => "rejected: {reason}",
            Retry { reason: String, attempts: u32 } => "retry {attempts}: {reason}",
        }
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = SamplePortError::rejected("duplicate key");
        assert_eq!(
            err,
            SamplePortError::Rejected {
                reason: "duplicate key".to_owned()
            }
        );
        assert_eq!(err.to_string(), "rejected: duplicate key");
    }

    #[rstest]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::retry("timeout", 3_u32);
        assert_eq!(err.to_string(), "retry 3: timeout");
    }
}
