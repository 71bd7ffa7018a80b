use moneta_core::{Capability, MonetaError};

/// Run `tasks` concurrently and return their outputs in input order.
///
/// With a `deadline`, nothing is returned unless every task finishes in time;
/// the error carries the generic `request` label and callers relabel it.
///
/// # Errors
/// `RequestTimeout` once `deadline` elapses.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<std::time::Duration>,
) -> Result<Vec<T>, MonetaError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    crate::core::with_request_deadline(deadline, futures::future::join_all(tasks)).await
}

/// Reduce the failures of a multi-source attempt to one error.
///
/// - nothing attempted: `Unsupported(capability)`
/// - only timeouts: `AllProvidersTimedOut(capability)`
/// - only `NotFound` (or nothing) with `not_found_what` given: `NotFound(what)`
/// - otherwise `AllProvidersFailed(errors)`
#[must_use]
pub fn collapse_errors(
    capability: Capability,
    attempted_any: bool,
    errors: Vec<MonetaError>,
    not_found_what: Option<String>,
) -> MonetaError {
    if !attempted_any {
        return MonetaError::unsupported(capability);
    }
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, MonetaError::ProviderTimeout { .. }))
    {
        return MonetaError::AllProvidersTimedOut {
            capability: capability.to_string(),
        };
    }
    if let Some(what) = not_found_what
        && errors
            .iter()
            .all(|e| matches!(e, MonetaError::NotFound { .. }))
    {
        return MonetaError::not_found(what);
    }
    MonetaError::AllProvidersFailed(errors)
}
