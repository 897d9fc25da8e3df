//! Element properties.
//!
//! Properties are an open mapping from attribute name to [`PropValue`]. The
//! core never interprets them (apart from the synthetic key and the
//! `children` property of leaf elements); renderers own their meaning.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Name of the property that carries a leaf element's literal content.
pub const CHILDREN_PROP: &str = "children";

/// An event handler attached as a property.
///
/// Two callbacks are equal only if they share the same closure.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn()>);

impl Callback {
    pub fn new<F: Fn() + 'static>(f: F) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// A single property value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum PropValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Callback(Callback),
}

impl PropValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            PropValue::Callback(cb) => Some(cb),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<&String> for PropValue {
    fn from(value: &String) -> Self {
        PropValue::Text(value.clone())
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Int(i64::from(value))
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<u32> for PropValue {
    fn from(value: u32) -> Self {
        PropValue::Int(i64::from(value))
    }
}

// Saturates instead of wrapping past `i64::MAX`.
impl From<usize> for PropValue {
    fn from(value: usize) -> Self {
        PropValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f32> for PropValue {
    fn from(value: f32) -> Self {
        PropValue::Float(f64::from(value))
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<Callback> for PropValue {
    fn from(value: Callback) -> Self {
        PropValue::Callback(value)
    }
}

// `None` is an explicit null, not an absent value.
impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropValue::Null, Into::into)
    }
}

/// Ordered attribute map of an element.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Props {
    entries: BTreeMap<String, PropValue>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a property, returning the value it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PropValue>,
    ) -> Option<PropValue> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, PropValue> {
        self.entries.iter()
    }

    /// The literal content of a leaf element, if any.
    pub fn children(&self) -> Option<&PropValue> {
        self.get(CHILDREN_PROP)
    }
}

impl<'a> IntoIterator for &'a Props {
    type Item = (&'a String, &'a PropValue);
    type IntoIter = btree_map::Iter<'a, String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Props {
    type Item = (String, PropValue);
    type IntoIter = btree_map::IntoIter<String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (name, value) in iter {
            props.insert(name, value);
        }
        props
    }
}

/// Build a [`Props`] map from `name => value` pairs.
///
/// ```
/// use stackdom::props;
///
/// let props = props! { "href" => "/docs", "hidden" => false };
/// assert_eq!(props.len(), 2);
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::Props::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::Props::new()$(.with($name, $value))+
    };
}
