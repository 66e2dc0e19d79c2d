/// Declares an entity type and its column descriptor.
///
/// Each field is `name: Type` with `Type` one of `Integer`, `Real`, `Text`,
/// `Blob`, `Boolean`, `Date`, `DateTime`, or `name: PrimaryKey(Type)` for the
/// identity column. The generated unit type implements [`Schema`](crate::Schema);
/// its schema is derived and validated on first access and memoized.
///
/// ```
/// use roomdb::{Args, entity};
///
/// entity! {
///     pub struct Food {
///         uid: PrimaryKey(Integer),
///         name: Text,
///         calories: Real,
///     }
/// }
///
/// let apple = Food::build(Args::new().arg(1).arg("Apple").arg(52.0)).unwrap();
/// assert_eq!(apple.to_string(), "<Food: uid=1, name=\"Apple\", calories=52.0>");
/// ```
#[macro_export]
macro_rules! entity {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($field:ident : $kind:ident $(($inner:ident))?),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Schema for $name {
            fn schema() -> ::std::result::Result<&'static $crate::EntitySchema, $crate::SchemaError> {
                $crate::__private::lazy_static! {
                    static ref SCHEMA: ::std::result::Result<$crate::EntitySchema, $crate::SchemaError> =
                        (|| -> ::std::result::Result<$crate::EntitySchema, $crate::SchemaError> {
                            let fields = ::std::vec![
                                $( $crate::__entity_field!($field : $kind $(($inner))?)?, )*
                            ];
                            $crate::EntitySchema::new(stringify!($name), fields)
                        })();
                }
                SCHEMA.as_ref().map_err(::std::clone::Clone::clone)
            }
        }

        impl $name {
            /// Builds a validated instance from constructor arguments.
            #[allow(dead_code)]
            pub fn build(args: $crate::Args) -> $crate::Result<$crate::EntityInstance<Self>> {
                $crate::EntityInstance::new(args)
            }
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! __entity_field {
    ($field:ident : PrimaryKey($inner:ident)) => {
        $crate::FieldSpec::primary_key(stringify!($field), $crate::FieldType::$inner)
    };
    ($field:ident : $kind:ident) => {
        ::std::result::Result::<$crate::FieldSpec, $crate::SchemaError>::Ok(
            $crate::FieldSpec::new(stringify!($field), $crate::FieldType::$kind),
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{FieldType, SchemaError};
    use crate::{Schema, entity};

    entity! {
        struct Reading {
            sensor: PrimaryKey(Text),
            _raw: Blob,
            value: Real,
            ok: Boolean,
            day: Date,
            at: DateTime,
        }
    }

    entity! {
        struct TwoKeys {
            a: PrimaryKey(Integer),
            b: PrimaryKey(Text),
        }
    }

    entity! {
        struct RealKey {
            id: PrimaryKey(Real),
        }
    }

    #[test]
    fn test_macro_builds_ordered_schema() {
        let schema = Reading::schema().unwrap();
        let columns: Vec<(&str, FieldType)> = schema
            .columns()
            .iter()
            .map(|c| (c.name(), c.field_type()))
            .collect();
        assert_eq!(
            columns,
            vec![
                ("sensor", FieldType::Text),
                ("value", FieldType::Real),
                ("ok", FieldType::Boolean),
                ("day", FieldType::Date),
                ("at", FieldType::DateTime),
            ]
        );
        assert_eq!(Reading::table_name().unwrap(), "Reading");
    }

    #[test]
    fn test_schema_is_memoized() {
        let first = Reading::schema().unwrap();
        let second = Reading::schema().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_two_keys_fail_on_every_lookup() {
        for _ in 0..2 {
            let err = TwoKeys::schema().unwrap_err();
            assert!(matches!(err, SchemaError::MultiplePrimaryKeys { .. }));
        }
    }

    #[test]
    fn test_real_key_is_invalid() {
        assert_eq!(
            RealKey::schema().unwrap_err(),
            SchemaError::InvalidKeyType(FieldType::Real)
        );
    }
}
