//! Eligibility filter
//!
//! Decides, per landscape, which components are probed at all.

use crate::core::registry::{Component, Landscape};

/// Whether `component` should be probed in `landscape`.
///
/// Rules, in order:
/// 1. components without a health endpoint are never probed;
/// 2. central-service components are skipped in non-central landscapes, but
///    only when a central landscape exists somewhere in the registry;
/// 3. everything else is probed.
pub fn is_eligible(
    component: &Component,
    landscape: &Landscape,
    landscapes_exist_central: bool,
) -> bool {
    if !component.health_enabled {
        return false;
    }

    // With no central landscape anywhere, central services stay checkable everywhere.
    if component.central_service && !landscape.is_central && landscapes_exist_central {
        return false;
    }

    true
}

/// Components to dispatch for `landscape`, in registry order
pub fn eligible_components<'a>(
    components: &'a [Component],
    landscape: &Landscape,
    landscapes_exist_central: bool,
) -> Vec<&'a Component> {
    components
        .iter()
        .filter(|c| is_eligible(c, landscape, landscapes_exist_central))
        .collect()
}

/// Split components into `(eligible, ineligible)`, preserving order
pub fn partition_components<'a>(
    components: &'a [Component],
    landscape: &Landscape,
    landscapes_exist_central: bool,
) -> (Vec<&'a Component>, Vec<&'a Component>) {
    components
        .iter()
        .partition(|c| is_eligible(c, landscape, landscapes_exist_central))
}
