//! The store's tagged-value model and its conversion to plain values
//!
//! Items come out of the record store in a wire form where every attribute is a
//! single-key object naming its type (`{"S": ...}`, `{"N": ...}`, `{"BOOL": ...}`,
//! `{"NULL": true}`, `{"L": [...]}`, `{"M": {...}}`). Decoding turns that into a
//! [`TaggedValue`]; anything that doesn't fit one of the six variants is a
//! [`DecodingError`](crate::error::DecodingError). [`normalize`] then flattens a
//! tagged value into an ordinary JSON tree.

mod normalize;
mod tagged_value;

pub use normalize::{normalize, normalize_members};
pub use tagged_value::{TaggedValue, decode_members};
