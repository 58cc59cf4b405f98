//! Output shape normalizer
//!
//! Reduces a [`ProviderOutput`] to a single absolute image URL in two stages:
//! shape resolution (first matching rule wins), then format validation.
//!
//! 1. string: taken as the candidate
//! 2. `url()` accessor: invoked once, its value reduced to a string
//! 3. object with a string `url` attribute
//! 4. non-empty list: rules 1-3 applied to the first element only
//! 5. anything else fails with `UnrecognizedProviderShape`
//!
//! The candidate must be non-empty and start with `http`.

use crate::core::output::ProviderOutput;
use crate::core::types::NormalizedResult;
use crate::utils::error::{GatewayError, Result};
use tracing::debug;

/// Normalize a provider output into a [`NormalizedResult`]
pub fn normalize(output: &ProviderOutput) -> Result<NormalizedResult> {
    let candidate = resolve(output)?;
    validate(candidate)
}

/// Shape resolution: rules 1-5
pub fn resolve(output: &ProviderOutput) -> Result<String> {
    if let Some(candidate) = resolve_element(output) {
        return Ok(candidate);
    }

    if let Some(first) = output.first_element() {
        debug!(kind = first.kind(), "Resolving first element of list output");
        return resolve_element(first).ok_or_else(|| {
            GatewayError::unrecognized_shape(format!(
                "list element of type {} has no URL",
                first.kind()
            ))
        });
    }

    Err(GatewayError::unrecognized_shape(format!(
        "output of type {}",
        output.kind()
    )))
}

/// Rules 1-3 on a single value
fn resolve_element(output: &ProviderOutput) -> Option<String> {
    if let Some(text) = output.as_text() {
        return Some(text.to_string());
    }

    if let Some(accessor) = output.url_accessor() {
        return Some(accessor.url().into_candidate());
    }

    output.url_attribute().map(str::to_string)
}

/// Format validation: non-empty and starts with `http`
pub fn validate(candidate: String) -> Result<NormalizedResult> {
    if candidate.is_empty() {
        return Err(GatewayError::invalid_image_url("empty URL"));
    }

    if !candidate.starts_with("http") {
        return Err(GatewayError::invalid_image_url(candidate));
    }

    Ok(NormalizedResult {
        image_url: candidate,
    })
}
