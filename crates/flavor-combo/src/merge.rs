//! Spec cloning and merging for the prepare fold.

use flavor_spi::InstanceSpec;

/// Produce an isolated copy of `spec`.
///
/// Tags, attachments and the logical id are copied element by element so that
/// subsequent mutation of either the source or the copy cannot be observed by
/// the other. This is what lets every combo member run prepare against the
/// same base spec without interfering with its peers.
pub fn clone_spec(spec: &InstanceSpec) -> InstanceSpec {
    InstanceSpec {
        properties: spec.properties.clone(),
        tags: spec
            .tags
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        init: spec.init.clone(),
        logical_id: spec.logical_id.clone(),
        attachments: spec.attachments.to_vec(),
    }
}

/// Fold per-member prepare outputs onto a fresh copy of `initial`.
///
/// Applied once per output, in list order:
/// - tags overlay the accumulator; on collision the later output wins
/// - a non-empty init is appended, newline-separated once the accumulator
///   has content; an empty init inserts nothing
/// - attachments are appended with no deduplication or reordering
/// - properties and the logical id are never altered
pub fn merge_specs(initial: &InstanceSpec, outputs: &[InstanceSpec]) -> InstanceSpec {
    let mut result = clone_spec(initial);

    for spec in outputs {
        for (key, value) in &spec.tags {
            result.tags.insert(key.clone(), value.clone());
        }

        if !spec.init.is_empty() {
            if !result.init.is_empty() {
                result.init.push('\n');
            }
            result.init.push_str(&spec.init);
        }

        result
            .attachments
            .extend(spec.attachments.iter().cloned());
    }

    result
}
