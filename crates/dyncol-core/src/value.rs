//! Document tree consumed by the encoder.
//!
//! A `Value` mirrors a parsed JSON document with two simplifications that match
//! what dynamic columns can store:
//!
//! - Arrays become mappings keyed by the element index (`"0"`, `"1"`, ...).
//!   Reading such a column back yields an object, not an array.
//! - Integers and floats share one `Number(f64)` case, since every number is
//!   stored `AS double`.
//!
//! Conversion, cloning, comparison and dropping walk the tree with explicit
//! stacks, so they accept any nesting depth. `Debug` output is derived and
//! recurses once per level.

use indexmap::IndexMap;
use serde_json::Value as Json;

/// A node of the document tree.
#[derive(Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Key-value pairs in insertion order. Keys are unique within a mapping.
    Mapping(Vec<(String, Value)>),
}

impl Value {
    /// Build a mapping from key-value pairs, keeping insertion order.
    ///
    /// A repeated key keeps the position of its first occurrence and the
    /// value of its last one, the same way a JSON object parser would.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        // `IndexMap::insert` replaces the value in place for an existing key.
        let unique: IndexMap<String, Value> = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Value::Mapping(unique.into_iter().collect())
    }

    /// Convert a parsed JSON document. Object key order is preserved
    /// (serde_json is built with `preserve_order`).
    ///
    /// The walk uses an explicit stack, so arbitrarily deep documents do not
    /// grow the call stack.
    pub fn from_json(json: &Json) -> Self {
        let children = match Children::of(json) {
            Some(children) => children,
            None => return scalar_from_json(json),
        };

        let mut stack = vec![Frame {
            key: String::new(),
            children,
            entries: Vec::new(),
        }];

        while let Some(frame) = stack.last_mut() {
            match frame.children.next() {
                Some((key, child)) => match Children::of(child) {
                    Some(children) => stack.push(Frame {
                        key,
                        children,
                        entries: Vec::new(),
                    }),
                    None => frame.entries.push((key, scalar_from_json(child))),
                },
                None => {
                    let Some(done) = stack.pop() else { break };
                    let value = Value::Mapping(done.entries);
                    match stack.last_mut() {
                        Some(parent) => parent.entries.push((done.key, value)),
                        None => return value,
                    }
                }
            }
        }

        unreachable!("the root frame returns once drained")
    }

    /// The entries of a mapping, or `None` for any other case.
    pub fn as_mapping(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Mapping(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    fn has_children(&self) -> bool {
        matches!(self, Value::Mapping(entries) if !entries.is_empty())
    }

    /// Copy of a scalar. An empty mapping copies to an empty mapping; callers
    /// expand non-empty mappings themselves.
    fn clone_shallow(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Number(n) => Value::Number(*n),
            Value::Text(s) => Value::Text(s.clone()),
            Value::Mapping(_) => Value::Mapping(Vec::new()),
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Mapping(_) => "mapping",
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        let entries = match self {
            Value::Mapping(entries) if !entries.is_empty() => entries,
            _ => return self.clone_shallow(),
        };

        let mut stack = vec![CloneFrame {
            key: String::new(),
            source: entries.iter(),
            entries: Vec::with_capacity(entries.len()),
        }];

        while let Some(frame) = stack.last_mut() {
            match frame.source.next() {
                Some((key, Value::Mapping(children))) if !children.is_empty() => {
                    stack.push(CloneFrame {
                        key: key.clone(),
                        source: children.iter(),
                        entries: Vec::with_capacity(children.len()),
                    })
                }
                Some((key, child)) => frame.entries.push((key.clone(), child.clone_shallow())),
                None => {
                    let Some(done) = stack.pop() else { break };
                    let value = Value::Mapping(done.entries);
                    match stack.last_mut() {
                        Some(parent) => parent.entries.push((done.key, value)),
                        None => return value,
                    }
                }
            }
        }

        unreachable!("the root frame returns once drained")
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            match (left, right) {
                (Value::Mapping(left), Value::Mapping(right)) => {
                    if left.len() != right.len() {
                        return false;
                    }
                    for ((left_key, left_value), (right_key, right_value)) in left.iter().zip(right)
                    {
                        if left_key != right_key {
                            return false;
                        }
                        pending.push((left_value, right_value));
                    }
                }
                (Value::Null, Value::Null) => {}
                (Value::Bool(a), Value::Bool(b)) if a == b => {}
                (Value::Number(a), Value::Number(b)) if a == b => {}
                (Value::Text(a), Value::Text(b)) if a == b => {}
                _ => return false,
            }
        }
        true
    }
}

// The derived drop glue recurses once per nesting level. Flatten nested
// mappings onto a heap stack instead so dropping deep trees is bounded.
impl Drop for Value {
    fn drop(&mut self) {
        let Value::Mapping(entries) = self else {
            return;
        };
        if entries.iter().all(|(_, child)| !child.has_children()) {
            return;
        }
        let mut stack: Vec<Value> = entries.drain(..).map(|(_, child)| child).collect();
        while let Some(mut value) = stack.pop() {
            if let Value::Mapping(entries) = &mut value {
                stack.extend(entries.drain(..).map(|(_, child)| child));
            }
        }
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Value::from_json(&json)
    }
}

impl From<&Json> for Value {
    fn from(json: &Json) -> Self {
        Value::from_json(json)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// A mapping being cloned: its remaining source entries and the copies made
/// so far.
struct CloneFrame<'a> {
    key: String,
    source: std::slice::Iter<'a, (String, Value)>,
    entries: Vec<(String, Value)>,
}

/// A JSON container being converted: its remaining children and the
/// entries converted so far.
struct Frame<'a> {
    key: String,
    children: Children<'a>,
    entries: Vec<(String, Value)>,
}

/// Child iterator over a JSON object or array. Array children are keyed by
/// their stringified index.
enum Children<'a> {
    Object(serde_json::map::Iter<'a>),
    Array(std::iter::Enumerate<std::slice::Iter<'a, Json>>),
}

impl<'a> Children<'a> {
    fn of(json: &'a Json) -> Option<Self> {
        match json {
            Json::Object(map) => Some(Children::Object(map.iter())),
            Json::Array(items) => Some(Children::Array(items.iter().enumerate())),
            _ => None,
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = (String, &'a Json);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Children::Object(iter) => iter.next().map(|(key, value)| (key.clone(), value)),
            Children::Array(iter) => iter.next().map(|(index, value)| (index.to_string(), value)),
        }
    }
}

fn scalar_from_json(json: &Json) -> Value {
    match json {
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        Json::String(s) => Value::Text(s.clone()),
        // Containers are handled by the caller; null maps to itself.
        _ => Value::Null,
    }
}
