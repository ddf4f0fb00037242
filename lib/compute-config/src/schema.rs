// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Declarative descriptions of configuration attributes and blocks.
//!
//! These types carry enough structure for a frontend to validate and
//! document a configuration surface.  They serialize to JSON so tooling
//! can render them without linking against this crate.

use serde::Serialize;

/// Scalar types an attribute can take.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    Int,
}

/// A single named attribute within a block.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: AttributeType,
    pub required: bool,
}

impl Attribute {
    pub fn required(name: &'static str, ty: AttributeType) -> Self {
        Self { name, ty, required: true }
    }

    pub fn optional(name: &'static str, ty: AttributeType) -> Self {
        Self { name, ty, required: false }
    }
}

/// A repeatable block of attributes nested under a resource.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BlockSchema {
    pub name: &'static str,
    /// Whether the block may be omitted entirely.
    pub optional: bool,
    /// Upper bound on repetitions of the block, if bounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    /// Attributes that may not be set alongside this block.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicts_with: Vec<&'static str>,
    pub attributes: Vec<Attribute>,
}

impl BlockSchema {
    /// Looks up a declared attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}
