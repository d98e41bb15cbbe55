//! Filter merging.
//!
//! The merge is a field-key union with a hard-coded precedence: the
//! mandatory filter wins every collision. A shallow "caller over mandatory"
//! update would let a caller erase their row restriction by naming the same
//! field, so the precedence is not configurable.

use garnet_types::Filter;

/// Merges a caller filter with a user's mandatory filter.
///
/// For each field present in either input, the result takes the mandatory
/// condition if the mandatory filter names that field, otherwise the
/// caller's. No field from either side is dropped.
///
/// Pure and deterministic: same inputs, same (ordered) output.
pub fn merge_filters(caller: &Filter, mandatory: &Filter) -> Filter {
    let mut merged: Filter = caller
        .iter()
        .map(|(field, condition)| (field.clone(), condition.clone()))
        .collect();

    // Mandatory entries last, overwriting any caller entry on the same key.
    for (field, condition) in mandatory.iter() {
        merged.insert(field.clone(), condition.clone());
    }

    merged
}
