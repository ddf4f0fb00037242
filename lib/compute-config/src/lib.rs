// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration-side modeling of virtual machine image sources.
//!
//! Image sources are written in configuration either as a bare managed
//! image ID or as a `source_image_reference` block naming a platform
//! image.  This crate declares the block's schema and converts between
//! the block form and the [`azure_compute_api_types::ImageReference`]
//! payload the compute API expects.  "Expanding" goes from configuration
//! to the wire type; "flattening" goes back.

pub mod schema;
pub mod source_image;

pub use source_image::{
    expand_source_image_reference, flatten_source_image_reference,
    source_image_reference_schema, MissingImageSource, SourceImageReference,
    SOURCE_IMAGE_ID, SOURCE_IMAGE_REFERENCE,
};
