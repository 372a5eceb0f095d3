// Identifier Resolver
//
// Expands a short, user-typed identifier prefix against a live Candidate Set.

use crate::domain::identifier::{is_uuid, parse_uuid, UuidExpansion};
use crate::error::{AppError, Result};
use crate::port::CandidateSource;
use tracing::debug;
use uuid::Uuid;

/// Resolve `token` to exactly one full identifier.
///
/// # Arguments
///
/// * `field` - Field name, used only in diagnostics
/// * `token` - Full identifier or prefix typed by the operator
/// * `check` - Fast path; when it accepts `token` the source is not consulted
/// * `source` - Enumerates the Candidate Set, called at most once
///
/// # Errors
///
/// * `AppError::NotFound` when no candidate starts with `token`
/// * `AppError::Ambiguous` when several do and none equals `token`
/// * whatever `source` fails with, unchanged
pub async fn resolve<C>(
    field: &str,
    token: &str,
    check: impl Fn(&str) -> bool,
    source: &C,
) -> Result<String>
where
    C: CandidateSource + ?Sized,
{
    if check(token) {
        return Ok(token.to_string());
    }

    debug!("expanding {}: {}", field, token);

    let matches: Vec<String> = source
        .list_candidates()
        .await?
        .into_iter()
        .filter(|candidate| candidate.starts_with(token))
        .collect();

    match matches.as_slice() {
        [] => Err(AppError::not_found(field, token)),
        [only] => Ok(only.clone()),
        _ if matches.iter().any(|m| m == token) => Ok(token.to_string()),
        _ => Err(AppError::Ambiguous {
            field: field.to_string(),
            token: token.to_string(),
            matches,
        }),
    }
}

/// Resolve a name-typed field (pools); there is no syntactic fast path
pub async fn resolve_name<C>(field: &str, token: &str, source: &C) -> Result<String>
where
    C: CandidateSource + ?Sized,
{
    resolve(field, token, |_| false, source).await
}

/// Resolve a UUID-typed field.
///
/// An already-parsed UUID is returned as-is; a token matching the canonical
/// UUID pattern skips enumeration. The resolved value is parsed into a
/// structured [`Uuid`].
pub async fn resolve_uuid<C>(
    field: &str,
    value: impl Into<UuidExpansion>,
    source: &C,
) -> Result<Uuid>
where
    C: CandidateSource + ?Sized,
{
    let token = match value.into() {
        UuidExpansion::Parsed(id) => return Ok(id),
        UuidExpansion::Token(token) => token,
    };

    let resolved = resolve(field, &token, is_uuid, source).await?;

    parse_uuid(&resolved).ok_or_else(|| AppError::InvalidIdentifierSyntax {
        field: field.to_string(),
        value: resolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    const JOB_A: &str = "83267e88-efdd-4b1d-92c0-6b80d01887f8";
    const JOB_B: &str = "8326ffff-efdd-4b1d-92c0-6b80d01887f8";
    const JOB_C: &str = "eb8ee6b8-6f2d-43b1-aec2-022e9813e86b";

    /// Stub source that records how often it is enumerated
    fn counting(
        items: &[&str],
    ) -> (
        Arc<AtomicUsize>,
        impl Fn() -> std::future::Ready<Result<Vec<String>>> + Send + Sync,
    ) {
        let calls = Arc::new(AtomicUsize::new(0));
        let items: Vec<String> = items.iter().map(|s| s.to_string()).collect();
        let counter = calls.clone();
        let source = move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(items.clone()))
        };
        (calls, source)
    }

    #[tokio::test]
    async fn test_unique_prefix() {
        let (calls, source) = counting(&["abc1", "xyz"]);

        let resolved = assert_ok!(resolve_name("name", "ab", &source).await);

        assert_eq!(resolved, "abc1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sole_match_is_returned_verbatim() {
        let (_, source) = counting(&["linux-pool-large", "windows"]);

        let resolved = assert_ok!(resolve_name("name", "linux", &source).await);

        assert_eq!(resolved, "linux-pool-large");
    }

    #[tokio::test]
    async fn test_exact_match_wins_over_ambiguity() {
        let (_, source) = counting(&["abc1", "abc12", "abc123"]);

        let resolved = resolve_name("name", "abc12", &source).await.unwrap();

        assert_eq!(resolved, "abc12");
    }

    #[tokio::test]
    async fn test_ambiguous_carries_all_matches() {
        let (_, source) = counting(&["abc1", "abc12", "xyz"]);

        let err = assert_err!(resolve_name("pool name", "abc", &source).await);

        match err {
            AppError::Ambiguous {
                field,
                token,
                matches,
            } => {
                assert_eq!(field, "pool name");
                assert_eq!(token, "abc");
                assert_eq!(matches, vec!["abc1".to_string(), "abc12".to_string()]);
            }
            other => panic!("expected Ambiguous, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_found() {
        let (_, source) = counting(&["abc1"]);

        let err = resolve_name("name", "zz", &source).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::NotFound { ref field, ref token } if field == "name" && token == "zz"
        ));
    }

    #[tokio::test]
    async fn test_prefix_is_case_sensitive() {
        let (_, source) = counting(&["Pool-A"]);

        assert!(resolve_name("name", "pool", &source).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_candidate_set() {
        let (_, source) = counting(&[]);

        let err = resolve_name("name", "a", &source).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_full_uuid_skips_enumeration() {
        let (calls, source) = counting(&[JOB_A, JOB_B]);

        let id = resolve_uuid("job_id", JOB_C, &source).await.unwrap();

        assert_eq!(id, Uuid::parse_str(JOB_C).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_simple_form_uuid_skips_enumeration() {
        let (calls, source) = counting(&[]);

        let id = resolve_uuid("job_id", "eb8ee6b86f2d43b1aec2022e9813e86b", &source)
            .await
            .unwrap();

        assert_eq!(id, Uuid::parse_str(JOB_C).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_parsed_uuid_skips_enumeration() {
        let (calls, source) = counting(&[]);
        let parsed = Uuid::parse_str(JOB_A).unwrap();

        let id = resolve_uuid("job_id", parsed, &source).await.unwrap();

        assert_eq!(id, parsed);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_uuid_prefix_resolution() {
        let (calls, source) = counting(&[JOB_A, JOB_B, JOB_C]);

        let id = resolve_uuid("job_id", "eb8", &source).await.unwrap();
        assert_eq!(id, Uuid::parse_str(JOB_C).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let err = resolve_uuid("job_id", "8326", &source).await.unwrap_err();
        assert!(matches!(err, AppError::Ambiguous { ref matches, .. } if matches.len() == 2));
    }

    #[tokio::test]
    async fn test_uppercase_token_falls_back_to_prefix_search() {
        let (calls, source) = counting(&[JOB_A]);

        let err = resolve_uuid("job_id", JOB_A.to_uppercase(), &source)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_uuid_candidate_is_syntax_error() {
        let (_, source) = counting(&["not-a-uuid"]);

        let err = resolve_uuid("webhook_id", "not", &source).await.unwrap_err();

        assert!(matches!(err, AppError::InvalidIdentifierSyntax { .. }));
    }

    #[tokio::test]
    async fn test_source_failure_propagates() {
        let source = || async { Err::<Vec<String>, _>(AppError::RemoteFailure("401".into())) };

        let err = resolve_name("name", "a", &source).await.unwrap_err();

        assert!(matches!(err, AppError::RemoteFailure(ref m) if m == "401"));
    }
}
