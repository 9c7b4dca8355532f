//! Field-by-field JSON decoding.
//!
//! Records are decoded from a [`serde_json::Value`] rather than through a derived
//! `Deserialize` so that every failure names the field (and list index) it came from.
//! Encoding goes through the derived `Serialize` impls, which fixes the field order.

use alloy_primitives::{FixedBytes, U256};
use ethereum_utils::{ensure::ensure, error::EthereumUtilsError, hex};
use serde::Serialize;
use serde_json::{Map, Value};
use ssz_types::{typenum::Unsigned, FixedVector, VariableList};

use crate::{consensus::branch::Branch, error::LightClientError};

/// A record with a strict JSON representation.
pub trait JsonCodec: Serialize + Sized {
    /// Decodes `value`, qualifying any error with `path`, the dotted location of `value`
    /// inside the enclosing document (empty for the document root).
    ///
    /// # Errors
    /// Returns an error if a field is missing, empty, or malformed.
    fn from_json_value_at(value: &Value, path: &str) -> Result<Self, LightClientError>;

    /// Decodes a document root.
    ///
    /// # Errors
    /// Returns an error if a field is missing, empty, or malformed.
    fn from_json_value(value: &Value) -> Result<Self, LightClientError> {
        Self::from_json_value_at(value, "")
    }

    /// Decodes raw JSON bytes.
    ///
    /// # Errors
    /// Returns an error if the bytes are not JSON, or if a field is missing, empty, or malformed.
    fn from_json(bytes: &[u8]) -> Result<Self, LightClientError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| LightClientError::Json(e.to_string()))?;
        Self::from_json_value(&value)
    }

    /// Renders the canonical JSON encoding.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    fn to_json(&self) -> Result<Vec<u8>, LightClientError> {
        serde_json::to_vec(self).map_err(|e| LightClientError::Json(e.to_string()))
    }
}

/// Joins `path` and `name` into a dotted field path.
#[must_use]
pub fn field_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

/// Typed, field-qualified accessors over one JSON object.
pub struct JsonObject<'a> {
    path: &'a str,
    fields: &'a Map<String, Value>,
}

impl<'a> JsonObject<'a> {
    /// Views `value` as an object located at `path`.
    ///
    /// # Errors
    /// Returns an error if `value` is not an object.
    pub fn new(value: &'a Value, path: &'a str) -> Result<Self, LightClientError> {
        let fields = value
            .as_object()
            .ok_or_else(|| LightClientError::UnexpectedType {
                field: if path.is_empty() {
                    "<root>".to_string()
                } else {
                    path.to_string()
                },
                expected: "an object",
            })?;
        Ok(Self { path, fields })
    }

    /// Returns the path of the field `name` of this object.
    #[must_use]
    pub fn path_of(&self, name: &str) -> String {
        field_path(self.path, name)
    }

    /// Returns the field `name`, treating `null` as absent.
    ///
    /// # Errors
    /// Returns [`LightClientError::MissingField`] if the field is absent or `null`.
    pub fn required(&self, name: &str) -> Result<&'a Value, LightClientError> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Err(LightClientError::MissingField(self.path_of(name))),
            Some(value) => Ok(value),
        }
    }

    /// Decodes the nested record `name`.
    ///
    /// # Errors
    /// Returns an error if the field is missing or the nested record fails to decode.
    pub fn decode<T: JsonCodec>(&self, name: &str) -> Result<T, LightClientError> {
        T::from_json_value_at(self.required(name)?, &self.path_of(name))
    }

    /// Decodes the decimal string `name` as a `u64`.
    ///
    /// # Errors
    /// Returns an error if the field is missing or not an unsigned decimal string.
    pub fn uint(&self, name: &str) -> Result<u64, LightClientError> {
        let field = self.path_of(name);
        parse_decimal(self.required(name)?, &field)?
            .parse::<u64>()
            .map_err(|e| LightClientError::InvalidNumber {
                field,
                reason: e.to_string(),
            })
    }

    /// Decodes the decimal string `name` as a `U256`.
    ///
    /// # Errors
    /// Returns an error if the field is missing or not an unsigned decimal string.
    pub fn u256(&self, name: &str) -> Result<U256, LightClientError> {
        let field = self.path_of(name);
        let digits = parse_decimal(self.required(name)?, &field)?;
        U256::from_str_radix(digits, 10).map_err(|e| LightClientError::InvalidNumber {
            field,
            reason: e.to_string(),
        })
    }

    /// Decodes the hex string `name` into exactly `N` bytes.
    ///
    /// # Errors
    /// Returns an error if the field is missing, not hex, or not `N` bytes long.
    pub fn fixed_bytes<const N: usize>(&self, name: &str) -> Result<FixedBytes<N>, LightClientError> {
        decode_fixed_hex(self.required(name)?, &self.path_of(name))
    }

    /// Decodes the hex string `name` into a byte list of at most `M` bytes.
    ///
    /// # Errors
    /// Returns an error if the field is missing, not hex, or longer than `M` bytes.
    pub fn byte_list<M: Unsigned>(
        &self,
        name: &str,
    ) -> Result<VariableList<u8, M>, LightClientError> {
        let field = self.path_of(name);
        let bytes = decode_hex(self.required(name)?, &field)?;
        VariableList::new(bytes).map_err(|_| LightClientError::InvalidLength(field))
    }

    /// Decodes the list `name` of exactly `M` hex strings of `N` bytes each.
    ///
    /// Elements are checked before the element count, so a malformed element is reported
    /// with its index even when the list also has the wrong length.
    ///
    /// An empty or `null` element counts as missing.
    ///
    /// # Errors
    /// Returns an error if the field is missing, empty, holds a missing or malformed element,
    /// or does not hold exactly `M` elements.
    pub fn fixed_bytes_vector<const N: usize, M: Unsigned>(
        &self,
        name: &str,
    ) -> Result<FixedVector<FixedBytes<N>, M>, LightClientError> {
        let field = self.path_of(name);
        let elements = self
            .required(name)?
            .as_array()
            .ok_or_else(|| LightClientError::UnexpectedType {
                field: field.clone(),
                expected: "an array",
            })?;
        ensure(
            !elements.is_empty(),
            LightClientError::EmptyField(field.clone()),
        )?;

        let decoded = elements
            .iter()
            .enumerate()
            .map(|(i, element)| {
                let element_path = format!("{field}[{i}]");
                match element {
                    Value::Null => Err(LightClientError::MissingField(element_path)),
                    Value::String(s) if s.is_empty() => {
                        Err(LightClientError::MissingField(element_path))
                    }
                    _ => decode_fixed_hex(element, &element_path),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let actual = decoded.len();
        FixedVector::new(decoded).map_err(|_| LightClientError::InvalidElementCount {
            field,
            expected: M::USIZE,
            actual,
        })
    }

    /// Decodes the merkle branch `name`.
    ///
    /// # Errors
    /// Returns an error if the field is missing, empty, holds a malformed root,
    /// or does not hold exactly `N` roots.
    pub fn branch<N: Unsigned>(&self, name: &str) -> Result<Branch<N>, LightClientError> {
        self.fixed_bytes_vector::<32, N>(name)
    }
}

fn parse_decimal<'v>(value: &'v Value, field: &str) -> Result<&'v str, LightClientError> {
    let digits = value.as_str().ok_or_else(|| LightClientError::InvalidNumber {
        field: field.to_string(),
        reason: "expected a decimal string".to_string(),
    })?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LightClientError::InvalidNumber {
            field: field.to_string(),
            reason: format!("{digits:?} is not an unsigned decimal integer"),
        });
    }
    Ok(digits)
}

fn decode_hex(value: &Value, field: &str) -> Result<Vec<u8>, LightClientError> {
    let s = value.as_str().ok_or_else(|| LightClientError::InvalidHex {
        field: field.to_string(),
        reason: "expected a hex string".to_string(),
    })?;
    hex::decode(s).map_err(|e| LightClientError::InvalidHex {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

fn decode_fixed_hex<const N: usize>(
    value: &Value,
    field: &str,
) -> Result<FixedBytes<N>, LightClientError> {
    let s = value.as_str().ok_or_else(|| LightClientError::InvalidHex {
        field: field.to_string(),
        reason: "expected a hex string".to_string(),
    })?;
    match hex::decode_fixed::<N>(s) {
        Ok(bytes) => Ok(FixedBytes(bytes)),
        Err(EthereumUtilsError::InvalidHexLength { .. }) => {
            Err(LightClientError::InvalidLength(field.to_string()))
        }
        Err(e) => Err(LightClientError::InvalidHex {
            field: field.to_string(),
            reason: e.to_string(),
        }),
    }
}
