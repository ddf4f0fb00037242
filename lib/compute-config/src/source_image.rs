// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `source_image_reference` block and its wire conversions.
//!
//! Platform image IDs are not accepted by the API's image `id` field, so
//! the image source is split across two configuration surfaces: a
//! `source_image_id` attribute for managed images and a
//! `source_image_reference` block for platform images.

use azure_compute_api_types::ImageReference;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::{Attribute, AttributeType, BlockSchema};

/// Name of the block describing a platform image.
pub const SOURCE_IMAGE_REFERENCE: &str = "source_image_reference";

/// Name of the attribute naming a managed image by resource ID.
pub const SOURCE_IMAGE_ID: &str = "source_image_id";

/// A `source_image_reference` block as written in configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourceImageReference {
    pub publisher: String,
    pub offer: String,
    pub sku: String,
    pub version: String,
}

#[derive(Debug, Error)]
#[error(
    "either `source_image_id` or a `source_image_reference` block must be \
     specified"
)]
pub struct MissingImageSource;

/// Describes the `source_image_reference` block: at most one occurrence,
/// mutually exclusive with `source_image_id`, all fields required.
pub fn source_image_reference_schema() -> BlockSchema {
    BlockSchema {
        name: SOURCE_IMAGE_REFERENCE,
        optional: true,
        max_items: Some(1),
        conflicts_with: vec![SOURCE_IMAGE_ID],
        attributes: vec![
            Attribute::required("publisher", AttributeType::String),
            Attribute::required("offer", AttributeType::String),
            Attribute::required("sku", AttributeType::String),
            Attribute::required("version", AttributeType::String),
        ],
    }
}

/// Builds the wire reference for a machine's configured image source.
///
/// A nonempty `image_id` names a managed image and takes precedence over
/// any reference block; the descriptive fields stay unset in that case.
/// With no ID and no block there is no image to boot from, which is an
/// error.
pub fn expand_source_image_reference(
    reference_blocks: &[SourceImageReference],
    image_id: &str,
) -> Result<ImageReference, MissingImageSource> {
    if !image_id.is_empty() {
        return Ok(ImageReference::from_id(image_id));
    }

    let Some(block) = reference_blocks.first() else {
        return Err(MissingImageSource);
    };

    Ok(ImageReference {
        publisher: Some(block.publisher.clone()),
        offer: Some(block.offer.clone()),
        sku: Some(block.sku.clone()),
        version: Some(block.version.clone()),
        id: None,
    })
}

/// Renders a wire reference back into configuration blocks.
///
/// A reference naming a managed image surfaces through `source_image_id`
/// rather than here, so an absent reference and one carrying an `id` both
/// produce no blocks.  Descriptive fields the API left unset render as
/// empty strings.
pub fn flatten_source_image_reference(
    input: Option<&ImageReference>,
) -> Vec<SourceImageReference> {
    let Some(reference) = input else {
        return Vec::new();
    };
    if reference.id.is_some() {
        return Vec::new();
    }

    vec![SourceImageReference {
        publisher: reference.publisher.clone().unwrap_or_default(),
        offer: reference.offer.clone().unwrap_or_default(),
        sku: reference.sku.clone().unwrap_or_default(),
        version: reference.version.clone().unwrap_or_default(),
    }]
}
