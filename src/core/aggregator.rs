use crate::core::{Address, BatchOutcome, Classification, LookupSlots};
use crate::utils::error::{LocateError, Result};

/// Rejects a batch with nothing to look up, before any provider call.
pub fn ensure_public(classification: &Classification) -> Result<()> {
    if classification.public.is_empty() {
        return Err(LocateError::AllPrivate {
            addresses: literals(&classification.private),
        });
    }
    Ok(())
}

/// Folds joined slots into a batch outcome.
///
/// Partial success is still success: failures ride along in `errors`. Only
/// a batch with zero successes becomes `NoSuccessfulResults`.
pub fn aggregate(slots: LookupSlots, excluded: &[Address]) -> Result<BatchOutcome> {
    let mut results = Vec::new();
    let mut errors = Vec::new();

    for slot in slots.into_inner() {
        match slot {
            Ok(result) => results.push(result),
            Err(error) => errors.push(error),
        }
    }

    if results.is_empty() {
        return Err(LocateError::NoSuccessfulResults {
            errors: errors.iter().map(ToString::to_string).collect(),
        });
    }

    tracing::info!(
        "Batch finished: {} succeeded, {} failed, {} excluded",
        results.len(),
        errors.len(),
        excluded.len()
    );

    Ok(BatchOutcome {
        results,
        errors,
        excluded: literals(excluded),
    })
}

fn literals(addresses: &[Address]) -> Vec<String> {
    addresses.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::{classify, validate};
    use crate::core::{LookupError, LookupResult, OutcomeStatus};

    #[test]
    fn test_all_private_is_rejected() {
        let addresses = validate(&["10.0.0.1"]).unwrap();
        let classification = classify(&addresses);

        match ensure_public(&classification).unwrap_err() {
            LocateError::AllPrivate { addresses } => assert_eq!(addresses, vec!["10.0.0.1"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_partial_success_keeps_both_sides() {
        let slots = LookupSlots::new(vec![
            Err(LookupError::new("9.9.9.9", "HTTP 500")),
            Ok(LookupResult::new("8.8.8.8")),
        ]);

        let outcome = aggregate(slots, &[]).unwrap();

        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].ip, "8.8.8.8");
        assert_eq!(
            outcome.error_messages(),
            vec!["Error looking up 9.9.9.9: HTTP 500".to_string()]
        );
        assert_eq!(outcome.status(), OutcomeStatus::SuccessWithWarnings);
    }

    #[test]
    fn test_excluded_addresses_are_not_errors() {
        let addresses = validate(&["8.8.8.8", "10.0.0.5"]).unwrap();
        let classification = classify(&addresses);
        let slots = LookupSlots::new(vec![Ok(LookupResult::new("8.8.8.8"))]);

        let outcome = aggregate(slots, &classification.private).unwrap();

        assert_eq!(outcome.excluded, vec!["10.0.0.5"]);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.status(), OutcomeStatus::Success);
        assert_eq!(outcome.total(), addresses.len());
    }

    #[test]
    fn test_zero_successes_is_batch_failure() {
        let slots = LookupSlots::new(vec![
            Err(LookupError::new("8.8.8.8", "timeout")),
            Err(LookupError::new("1.1.1.1", "HTTP 429")),
        ]);

        match aggregate(slots, &[]).unwrap_err() {
            LocateError::NoSuccessfulResults { errors } => {
                assert_eq!(
                    errors,
                    vec![
                        "Error looking up 8.8.8.8: timeout".to_string(),
                        "Error looking up 1.1.1.1: HTTP 429".to_string(),
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
