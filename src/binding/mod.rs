//! Bindings that attach SQL behavior to DAO operations.
//!
//! There are two kinds, kept as distinct types:
//!
//! - [`QueryBinding`] formats a template by **literal substitution**. Argument
//!   values are pasted into the SQL text, so it must only ever receive values
//!   the caller trusts or has sanitized.
//! - [`InsertBinding`] writes entity instances through **bound parameters**
//!   and is safe for arbitrary values.
//!
//! Every call runs EnsureTableExists → BuildStatement → Execute →
//! (insert only: Commit) → ReturnResult, with no retries.

mod insert;
mod query;
mod template;

pub use insert::InsertBinding;
pub use query::QueryBinding;
pub use template::{TABLE_PLACEHOLDER, Template};

use crate::core::Value;

/// A strongly typed argument record for a [`QueryBinding`].
///
/// `PARAMS` is the fixed list of placeholder names the record can fill.
/// Usually declared with [`template_args!`](crate::template_args).
pub trait TemplateArgs {
    const PARAMS: &'static [&'static str];

    fn value(&self, name: &str) -> Option<Value>;
}

/// The empty argument record, for templates that only use `{table}`.
impl TemplateArgs for () {
    const PARAMS: &'static [&'static str] = &[];

    fn value(&self, _name: &str) -> Option<Value> {
        None
    }
}

/// Declares an argument record and its [`TemplateArgs`] impl.
///
/// ```
/// use roomdb::{TemplateArgs, template_args};
///
/// template_args! {
///     pub struct SearchFood {
///         pub query: String,
///     }
/// }
///
/// assert_eq!(SearchFood::PARAMS, &["query"]);
/// ```
#[macro_export]
macro_rules! template_args {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($fvis:vis $field:ident : $ty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $($fvis $field: $ty,)*
        }

        impl $crate::TemplateArgs for $name {
            const PARAMS: &'static [&'static str] = &[$(stringify!($field)),*];

            fn value(&self, name: &str) -> ::std::option::Option<$crate::Value> {
                $(
                    if name == stringify!($field) {
                        return ::std::option::Option::Some($crate::Value::from(
                            ::std::clone::Clone::clone(&self.$field),
                        ));
                    }
                )*
                let _ = name;
                ::std::option::Option::None
            }
        }
    };
}
