//! `serde` support for [`Value`].
//!
//! Tagged instances serialize as `{"tag": <name>, "fields": {<field>: <value>, ...}}`
//! so the field names survive the round trip into foreign formats. Functions
//! cannot be serialized.

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use super::Value;
use crate::tagged::TaggedInstance;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Boolean(flag) => serializer.serialize_bool(*flag),
            Self::Number(number) => serializer.serialize_f64(*number),
            Self::String(text) => serializer.serialize_str(text),
            Self::Array(elements) => {
                let mut sequence = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements.iter() {
                    sequence.serialize_element(element)?;
                }
                sequence.end()
            }
            Self::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Tagged(instance) => instance.serialize(serializer),
            Self::Function(function) => Err(S::Error::custom(format!(
                "cannot serialize {function}"
            ))),
        }
    }
}

struct Fields<'a>(&'a TaggedInstance);

impl Serialize for Fields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.fields().len()))?;
        for (field, value) in self.0.fields().iter().zip(self.0.values()) {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

impl Serialize for TaggedInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("tag", self.name())?;
        map.serialize_entry("fields", &Fields(self))?;
        map.end()
    }
}
