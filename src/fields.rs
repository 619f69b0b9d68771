/// Declares named field accessors for [`Value`](crate::Value).
///
/// Each line `getter / setter / typed: Type = "key";` generates three trait
/// methods implemented for `Value`:
///
/// - `getter(&self) -> &Value`, an alias of `get("key")`
/// - `setter(&mut self, v)`, an alias of `set("key", v)`
/// - `typed(&self) -> Type`, the getter followed by a defaulting coercion
///
/// ```
/// use plaindoc::{value_fields, Value};
///
/// value_fields! {
///     pub trait MovieFields {
///         title / set_title / title_value: String = "title";
///         is_favorite / set_is_favorite / is_favorite_value: bool = "isFavorite";
///     }
/// }
///
/// let mut movie = Value::empty_object();
/// movie.set_title("Groundhog Day");
/// assert_eq!(movie.title_value(), "Groundhog Day");
/// assert!(!movie.is_favorite_value());
/// assert!(movie.is_favorite().is_null());
/// ```
#[macro_export]
macro_rules! value_fields {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident {
            $(
                $(#[$field_meta:meta])*
                $getter:ident / $setter:ident / $typed:ident : $ty:ty = $key:literal;
            )*
        }
    ) => {
        $(#[$meta])*
        $vis trait $name {
            $(
                $(#[$field_meta])*
                fn $getter(&self) -> &$crate::Value;

                fn $setter<V: ::core::convert::Into<$crate::Value>>(&mut self, value: V);

                fn $typed(&self) -> $ty;
            )*
        }

        impl $name for $crate::Value {
            $(
                fn $getter(&self) -> &$crate::Value {
                    self.get($key)
                }

                fn $setter<V: ::core::convert::Into<$crate::Value>>(&mut self, value: V) {
                    self.set($key, value)
                }

                fn $typed(&self) -> $ty {
                    $crate::Coerce::coerce_or_default(self.$getter())
                }
            )*
        }
    };
}
