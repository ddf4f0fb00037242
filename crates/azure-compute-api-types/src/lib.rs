// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Definitions for image types exchanged with the Azure Compute API

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Compute management API version these types are modeled on.
pub const API_VERSION: &str = "2019-07-01";

/// Identifies the image backing a virtual machine's OS disk.
///
/// A reference names either a managed image directly by resource `id` or a
/// platform image by `publisher`/`offer`/`sku`/`version`.  When both forms
/// are present the service honors `id` and ignores the descriptive fields.
#[derive(
    Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
pub struct ImageReference {
    /// Organization publishing the image, e.g. `Canonical`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Product line of the image, e.g. `UbuntuServer`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer: Option<String>,
    /// Flavor within the offer, e.g. `18.04-LTS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Image version, or `latest` to track the newest at deploy time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Resource ID of a managed image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ImageReference {
    /// Builds a reference naming a managed image resource.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), ..Default::default() }
    }
}

#[cfg(test)]
mod test {
    use super::ImageReference;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn reference_skips_absent_fields() {
        let reference = ImageReference {
            publisher: Some("Canonical".to_string()),
            offer: Some("UbuntuServer".to_string()),
            sku: Some("18.04-LTS".to_string()),
            version: Some("latest".to_string()),
            id: None,
        };
        assert_tokens(
            &reference,
            &[
                Token::Struct { name: "ImageReference", len: 4 },
                Token::Str("publisher"),
                Token::Some,
                Token::Str("Canonical"),
                Token::Str("offer"),
                Token::Some,
                Token::Str("UbuntuServer"),
                Token::Str("sku"),
                Token::Some,
                Token::Str("18.04-LTS"),
                Token::Str("version"),
                Token::Some,
                Token::Str("latest"),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn reference_by_id_serializes_id_alone() {
        let reference = ImageReference::from_id(
            "/subscriptions/0000/resourceGroups/group1/providers/\
             Microsoft.Compute/images/image1",
        );
        let doc = serde_json::to_value(&reference).unwrap();
        assert_eq!(
            doc,
            serde_json::json!({
                "id": "/subscriptions/0000/resourceGroups/group1/providers/\
                       Microsoft.Compute/images/image1",
            })
        );
    }

    #[test]
    fn reference_tolerates_unknown_response_fields() {
        // Responses may carry fields from newer API versions.
        let doc = r#"{
            "publisher": "Canonical",
            "offer": "UbuntuServer",
            "sku": "18.04-LTS",
            "version": "latest",
            "exactVersion": "18.04.202006101"
        }"#;
        let reference: ImageReference = serde_json::from_str(doc).unwrap();
        assert_eq!(reference.publisher.as_deref(), Some("Canonical"));
        assert_eq!(reference.version.as_deref(), Some("latest"));
        assert_eq!(reference.id, None);
    }

    #[test]
    fn reference_reads_null_fields_as_absent() {
        let doc = r#"{"publisher": null, "version": "latest"}"#;
        let reference: ImageReference = serde_json::from_str(doc).unwrap();
        assert_eq!(reference.publisher, None);
        assert_eq!(reference.offer, None);
        assert_eq!(reference.version.as_deref(), Some("latest"));
    }
}
