//
//  bitbucket-api
//  codec/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Entity Codec
//!
//! Two-way mapping between typed entity records and JSON trees.
//!
//! ## Overview
//!
//! Every wire shape in the API is an [`Entity`]: an optional `type`
//! discriminator, a fixed set of declared fields, and an overflow map that
//! captures any keys the shape does not declare. The overflow map is what
//! keeps this client usable against a server that has grown new response
//! fields since the bindings were generated: unknown keys survive a
//! decode/encode round trip untouched.
//!
//! ## Encoding
//!
//! [`encode`] writes the literal type tag, then each declared field in
//! declaration order (omitting `Unset` fields), then merges the overflow map.
//! Overflow keys that name the discriminator or a declared field are
//! skipped: the typed value always wins.
//!
//! ## Decoding
//!
//! [`decode`] checks and removes the discriminator, lets the entity pop each
//! declared field from an [`ObjectReader`], and only then moves whatever is
//! left into the overflow map. The order matters: capturing overflow before
//! popping declared fields would duplicate them, capturing it never would
//! drop server-added fields on re-encode.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_api::api::cloud::Error;
//! use bitbucket_api::codec::{decode, encode};
//! use serde_json::json;
//!
//! let wire = json!({
//!     "type": "error",
//!     "error": {"message": "Repository not found"},
//!     "request_id": "abc-123"
//! });
//!
//! let error: Error = decode(wire.clone()).unwrap();
//! assert_eq!(error.message(), Some("Repository not found"));
//! assert_eq!(error.additional_properties["request_id"], json!("abc-123"));
//! assert_eq!(serde_json::Value::Object(encode(&error)), wire);
//! ```

mod error;
mod field;
mod value;

pub use error::*;
pub use field::*;
pub use value::*;

use serde_json::{Map, Value};

/// Keys present on the wire that an entity does not declare.
pub type Overflow = Map<String, Value>;

/// The key every discriminated entity carries.
pub const DISCRIMINATOR: &str = "type";

/// A named wire shape with declared fields and an overflow map.
///
/// Implementations are mechanical: `write_fields` emits each declared field
/// through an [`ObjectWriter`], `read_fields` pops each declared field from
/// an [`ObjectReader`]. The discriminator and the overflow map are handled
/// by [`encode`] and [`decode`], never by the implementation.
pub trait Entity: Sized {
    /// The literal `type` tag, or `None` for shapes without a discriminator.
    const TYPE_TAG: Option<&'static str>;

    /// Every declared wire key, set or not.
    const FIELDS: &'static [&'static str];

    /// Writes declared fields in declaration order.
    fn write_fields(&self, out: &mut ObjectWriter);

    /// Pops declared fields. The overflow map of the returned entity is
    /// replaced by [`decode`] afterwards.
    fn read_fields(input: &mut ObjectReader) -> Result<Self, DecodeError>;

    fn additional_properties(&self) -> &Overflow;

    fn additional_properties_mut(&mut self) -> &mut Overflow;
}

/// Encodes an entity into a JSON object.
pub fn encode<E: Entity>(entity: &E) -> Map<String, Value> {
    let mut out = ObjectWriter::new();
    if let Some(tag) = E::TYPE_TAG {
        out.map.insert(DISCRIMINATOR.to_string(), Value::from(tag));
    }
    entity.write_fields(&mut out);
    for (key, value) in entity.additional_properties() {
        if is_reserved::<E>(key) {
            continue;
        }
        out.map.insert(key.clone(), value.clone());
    }
    out.map
}

fn is_reserved<E: Entity>(key: &str) -> bool {
    (E::TYPE_TAG.is_some() && key == DISCRIMINATOR) || E::FIELDS.iter().any(|field| *field == key)
}

/// Decodes an entity from a JSON tree.
///
/// # Errors
///
/// * the tree is not an object
/// * the entity declares a discriminator and the `type` key is missing
///   ([`DecodeErrorKind::MissingDiscriminator`]) or names another entity
/// * any declared field fails to decode; the error names its path
pub fn decode<E: Entity>(value: Value) -> Result<E, DecodeError> {
    let map = match value {
        Value::Object(map) => map,
        other => return Err(DecodeError::invalid_type("object", &other)),
    };
    let mut input = ObjectReader::new(map);

    if let Some(expected) = E::TYPE_TAG {
        match input.map.remove(DISCRIMINATOR) {
            None => {
                return Err(DecodeError::new(DecodeErrorKind::MissingDiscriminator {
                    expected,
                }))
            }
            Some(Value::String(found)) if found == expected => {}
            Some(Value::String(found)) => {
                return Err(DecodeError::new(
                    DecodeErrorKind::UnexpectedDiscriminator { expected, found },
                )
                .at_key(DISCRIMINATOR))
            }
            Some(other) => {
                return Err(DecodeError::invalid_type("string", &other).at_key(DISCRIMINATOR))
            }
        }
    }

    let mut entity = E::read_fields(&mut input)?;
    *entity.additional_properties_mut() = input.into_overflow();
    Ok(entity)
}

impl<E: Entity> WireValue for E {
    fn to_wire(&self) -> Value {
        Value::Object(encode(self))
    }

    fn from_wire(value: Value) -> Result<Self, DecodeError> {
        decode(value)
    }
}

/// Accumulates the declared fields of an entity being encoded.
#[derive(Debug, Default)]
pub struct ObjectWriter {
    map: Map<String, Value>,
}

impl ObjectWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a required field.
    pub fn required<T: WireValue>(&mut self, key: &str, value: &T) {
        self.map.insert(key.to_string(), value.to_wire());
    }

    /// Writes an optional field; `Unset` emits nothing, `Null` emits `null`.
    pub fn optional<T: WireValue>(&mut self, key: &str, value: &FieldValue<T>) {
        if let Some(wire) = value.to_wire() {
            self.map.insert(key.to_string(), wire);
        }
    }
}

/// The remaining keys of an object being decoded.
///
/// Each accessor removes the key it reads, so after an entity has read all
/// of its declared fields the reader holds exactly the overflow.
#[derive(Debug)]
pub struct ObjectReader {
    map: Map<String, Value>,
}

impl ObjectReader {
    pub fn new(map: Map<String, Value>) -> Self {
        Self { map }
    }

    /// Pops a required, non-nullable field.
    pub fn required<T: WireValue>(&mut self, key: &str) -> Result<T, DecodeError> {
        match self.map.remove(key) {
            None => Err(DecodeError::new(DecodeErrorKind::MissingField).at_key(key)),
            Some(Value::Null) => Err(DecodeError::new(DecodeErrorKind::UnexpectedNull).at_key(key)),
            Some(value) => T::from_wire(value).map_err(|e| e.at_key(key)),
        }
    }

    /// Pops an optional field whose schema forbids `null`.
    pub fn optional<T: WireValue>(&mut self, key: &str) -> Result<FieldValue<T>, DecodeError> {
        self.field(key, false)
    }

    /// Pops an optional field whose schema allows `null`.
    pub fn nullable<T: WireValue>(&mut self, key: &str) -> Result<FieldValue<T>, DecodeError> {
        self.field(key, true)
    }

    fn field<T: WireValue>(&mut self, key: &str, nullable: bool) -> Result<FieldValue<T>, DecodeError> {
        let raw = self.map.remove(key);
        FieldValue::from_wire(key, raw, nullable).map_err(|e| e.at_key(key))
    }

    pub fn into_overflow(self) -> Overflow {
        self.map
    }
}
