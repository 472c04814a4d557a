//! Primitive element types a variable may hold.

use std::fmt;

/// A value type that can be read from and written as a single token.
///
/// Implemented for every integer width, `f32`, `f64`, `char` and `String`.
pub trait Primitive:
    Clone + Default + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Human-readable type name, used in diagnostics.
    const TYPE_NAME: &'static str;

    /// Convert a token, returning `None` when it is not a valid value of this type.
    fn parse_token(token: &str) -> Option<Self>;
}

macro_rules! impl_primitive_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn parse_token(token: &str) -> Option<Self> {
                    token.parse().ok()
                }
            }
        )*
    };
}

impl_primitive_from_str!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64
);

impl Primitive for char {
    const TYPE_NAME: &'static str = "char";

    fn parse_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl Primitive for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_token(token: &str) -> Option<Self> {
        Some(token.to_owned())
    }
}
