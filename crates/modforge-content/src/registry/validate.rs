//! Registry validation orchestration.

use crate::{prelude::*, registry::ContentRegistry, traits::Validate};

/// Run full registry validation in a staged, deterministic order.
pub(crate) fn validate_registry(registry: &ContentRegistry) -> Result<(), ErrorTree> {
    // Phase 1: validate each descriptor (local invariants).
    let mut errors = validate_descriptors(registry);

    // Phase 2: enforce population-wide invariants.
    validate_identity(registry, &mut errors);

    errors.result()
}

// Validate all registered kinds, keyed so messages name the offender.
fn validate_descriptors(registry: &ContentRegistry) -> ErrorTree {
    let mut errors = ErrorTree::new();

    for (ty, kind) in registry.iter() {
        if let Err(e) = kind.descriptor().validate() {
            err!(errors, "content type {ty}: {e}");
        }
    }

    errors
}

// The registry key must agree with the descriptor it indexes.
fn validate_identity(registry: &ContentRegistry, errors: &mut ErrorTree) {
    for (ty, kind) in registry.iter() {
        let declared = kind.descriptor().content_type();

        if declared != ty {
            err!(
                errors,
                "registry key {ty} does not match declared content type {declared}"
            );
        }
    }
}

///
/// TESTS
///
