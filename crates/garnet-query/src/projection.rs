//! Field projection over result documents.

use garnet_types::{Document, Projection, ProjectionMode};

/// Applies a projection to a matched document.
///
/// - `None` returns the document unchanged (full visibility)
/// - a projection with any include entry keeps exactly the included fields
/// - an exclusion-only projection drops the excluded fields
///
/// Fields the projection names but the document lacks are simply absent
/// from the output; projection never invents fields.
pub fn apply_projection(document: &Document, projection: Option<&Projection>) -> Document {
    let Some(projection) = projection else {
        return document.clone();
    };

    if projection.has_includes() {
        document
            .iter()
            .filter(|(field, _)| projection.get(field) == Some(ProjectionMode::Include))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect()
    } else {
        document
            .iter()
            .filter(|(field, _)| projection.get(field) != Some(ProjectionMode::Exclude))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect()
    }
}
