//! Attribute-reflected typed properties.
//!
//! Every typed property is a view over a string attribute. Reading parses the
//! attribute and falls back to a documented default whenever it is absent or
//! malformed; writing serializes the value back to the attribute. Booleans are
//! presence-only: `true` writes an empty attribute, `false` removes it.
//!
//! ```
//! use aui::attr_enum;
//! use aui::dom::Attributes;
//! use aui::element::{Prop, Property};
//!
//! attr_enum! {
//!     pub enum Size { Sm => "sm", Md => "md", Lg => "lg" }
//! }
//!
//! const SIZE: Prop<Size> = Prop::new("size", Size::Md);
//!
//! let mut attrs = Attributes::new();
//! attrs.set("size", "huge");
//! assert_eq!(SIZE.read(&attrs), Size::Md);
//! attrs.set("size", "lg");
//! assert_eq!(SIZE.read(&attrs), Size::Lg);
//! ```

use serde_json::Value;

use crate::dom::Attributes;

// ---------------------------------------------------------------------------
// AttrValue
// ---------------------------------------------------------------------------

/// A value that can be parsed from, and serialized to, an attribute.
pub trait AttrValue: Sized {
    /// Parse the raw attribute (`None` when absent). `None` means "use the
    /// default".
    fn parse_attr(raw: Option<&str>) -> Option<Self>;

    /// Serialize for writing. `None` removes the attribute.
    fn to_attr(&self) -> Option<String>;
}

impl AttrValue for bool {
    fn parse_attr(raw: Option<&str>) -> Option<Self> {
        Some(raw.is_some())
    }

    fn to_attr(&self) -> Option<String> {
        self.then(String::new)
    }
}

macro_rules! int_attr_value {
    ($($ty:ty),*) => {$(
        impl AttrValue for $ty {
            fn parse_attr(raw: Option<&str>) -> Option<Self> {
                let raw = raw?.trim();
                raw.parse::<$ty>().ok().or_else(|| {
                    // Accept "3.0"-style integral floats.
                    raw.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite() && f.fract() == 0.0)
                        .filter(|f| *f >= <$ty>::MIN as f64 && *f <= <$ty>::MAX as f64)
                        .map(|f| f as $ty)
                })
            }

            fn to_attr(&self) -> Option<String> {
                Some(self.to_string())
            }
        }
    )*};
}

int_attr_value!(i32, i64, u32, u64, usize);

impl AttrValue for f64 {
    fn parse_attr(raw: Option<&str>) -> Option<Self> {
        raw?.trim().parse::<f64>().ok().filter(|f| f.is_finite())
    }

    fn to_attr(&self) -> Option<String> {
        Some(self.to_string())
    }
}

// ---------------------------------------------------------------------------
// Property
// ---------------------------------------------------------------------------

/// A named, typed view over one attribute.
pub trait Property {
    type Value;

    /// Attribute name.
    fn name(&self) -> &'static str;

    /// Current value, or the default when absent or malformed.
    fn read(&self, attrs: &Attributes) -> Self::Value;

    /// Serialized attribute value; `None` removes the attribute.
    fn write(&self, value: &Self::Value) -> Option<String>;
}

/// A `Copy` property: boolean, numeric, or enum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prop<T> {
    pub name: &'static str,
    pub default: T,
}

impl<T: AttrValue + Copy> Prop<T> {
    pub const fn new(name: &'static str, default: T) -> Self {
        Self { name, default }
    }

    /// Shorthand for [`Property::read`].
    pub fn get(&self, attrs: &Attributes) -> T {
        T::parse_attr(attrs.get(self.name)).unwrap_or(self.default)
    }
}

impl<T: AttrValue + Copy> Property for Prop<T> {
    type Value = T;

    fn name(&self) -> &'static str {
        self.name
    }

    fn read(&self, attrs: &Attributes) -> T {
        self.get(attrs)
    }

    fn write(&self, value: &T) -> Option<String> {
        value.to_attr()
    }
}

/// A string property with a static default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrProp {
    pub name: &'static str,
    pub default: &'static str,
}

impl StrProp {
    pub const fn new(name: &'static str, default: &'static str) -> Self {
        Self { name, default }
    }

    /// Borrow the current value.
    pub fn get<'a>(&self, attrs: &'a Attributes) -> &'a str {
        attrs.get(self.name).unwrap_or(self.default)
    }

    /// The current value, or `None` when the attribute is absent or empty.
    pub fn non_empty<'a>(&self, attrs: &'a Attributes) -> Option<&'a str> {
        attrs.get(self.name).filter(|s| !s.is_empty())
    }
}

impl Property for StrProp {
    type Value = String;

    fn name(&self) -> &'static str {
        self.name
    }

    fn read(&self, attrs: &Attributes) -> String {
        self.get(attrs).to_owned()
    }

    fn write(&self, value: &String) -> Option<String> {
        Some(value.clone())
    }
}

/// A JSON-valued property. Absent or malformed JSON reads as `Null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonProp {
    pub name: &'static str,
}

impl JsonProp {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// The attribute parsed as a JSON array; anything else is empty.
    pub fn array(&self, attrs: &Attributes) -> Vec<Value> {
        match self.read(attrs) {
            Value::Array(items) => items,
            _ => Vec::new(),
        }
    }
}

impl Property for JsonProp {
    type Value = Value;

    fn name(&self) -> &'static str {
        self.name
    }

    fn read(&self, attrs: &Attributes) -> Value {
        attrs
            .get(self.name)
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or(Value::Null)
    }

    fn write(&self, value: &Value) -> Option<String> {
        match value {
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// attr_enum!
// ---------------------------------------------------------------------------

/// Declare an enum whose variants map to attribute literals.
///
/// Parsing is ASCII case-insensitive and ignores surrounding whitespace;
/// unrecognized strings fall back to the property default.
#[macro_export]
macro_rules! attr_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The attribute literal for this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $lit ),+
                }
            }
        }

        impl $crate::element::AttrValue for $name {
            fn parse_attr(raw: ::std::option::Option<&str>) -> ::std::option::Option<Self> {
                let raw = raw?.trim();
                $(
                    if raw.eq_ignore_ascii_case($lit) {
                        return ::std::option::Option::Some($name::$variant);
                    }
                )+
                ::std::option::Option::None
            }

            fn to_attr(&self) -> ::std::option::Option<::std::string::String> {
                ::std::option::Option::Some(self.as_str().to_owned())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    attr_enum! {
        enum Variant { Primary => "primary", Danger => "danger" }
    }

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().map(|&(n, v)| (n, v)).collect()
    }

    #[test]
    fn bool_is_presence() {
        let prop = Prop::new("disabled", false);
        assert!(!prop.get(&attrs(&[])));
        assert!(prop.get(&attrs(&[("disabled", "")])));
        assert!(prop.get(&attrs(&[("disabled", "false")])));
        assert_eq!(prop.write(&true), Some(String::new()));
        assert_eq!(prop.write(&false), None);
    }

    #[test]
    fn numbers_fall_back_on_garbage() {
        let max = Prop::new("max", 99i64);
        assert_eq!(max.get(&attrs(&[])), 99);
        assert_eq!(max.get(&attrs(&[("max", "abc")])), 99);
        assert_eq!(max.get(&attrs(&[("max", "")])), 99);
        assert_eq!(max.get(&attrs(&[("max", " 12 ")])), 12);
        assert_eq!(max.get(&attrs(&[("max", "7.0")])), 7);
        assert_eq!(max.get(&attrs(&[("max", "7.5")])), 99);
    }

    #[test]
    fn unsigned_rejects_negative() {
        let size = Prop::new("page-size", 10usize);
        assert_eq!(size.get(&attrs(&[("page-size", "-3")])), 10);
        assert_eq!(size.write(&25), Some("25".to_owned()));
    }

    #[test]
    fn float_rejects_non_finite() {
        let value = Prop::new("value", 0.0f64);
        assert_eq!(value.get(&attrs(&[("value", "NaN")])), 0.0);
        assert_eq!(value.get(&attrs(&[("value", "inf")])), 0.0);
        assert_eq!(value.get(&attrs(&[("value", "42.5")])), 42.5);
    }

    #[test]
    fn enum_parse_and_fallback() {
        let variant = Prop::new("variant", Variant::Primary);
        assert_eq!(variant.get(&attrs(&[("variant", "DANGER")])), Variant::Danger);
        assert_eq!(variant.get(&attrs(&[("variant", "bogus")])), Variant::Primary);
        assert_eq!(variant.write(&Variant::Danger), Some("danger".to_owned()));
        assert_eq!(Variant::ALL.len(), 2);
        assert_eq!(Variant::Danger.to_string(), "danger");
    }

    #[test]
    fn string_prop_default_and_empty() {
        let label = StrProp::new("label", "");
        let ty = StrProp::new("type", "text");
        assert_eq!(ty.get(&attrs(&[])), "text");
        assert_eq!(ty.get(&attrs(&[("type", "email")])), "email");
        assert_eq!(label.non_empty(&attrs(&[("label", "")])), None);
        assert_eq!(label.write(&"x".to_owned()), Some("x".to_owned()));
    }

    #[test]
    fn json_prop_malformed_is_null() {
        let rows = JsonProp::new("rows");
        assert_eq!(rows.read(&attrs(&[("rows", "[1,")])), Value::Null);
        assert!(rows.array(&attrs(&[("rows", "{\"a\":1}")])).is_empty());
        assert_eq!(rows.array(&attrs(&[("rows", "[1,2]")])), vec![json!(1), json!(2)]);
        assert_eq!(rows.write(&Value::Null), None);
        assert_eq!(rows.write(&json!([1])), Some("[1]".to_owned()));
    }
}
