//! Task-local request id for web requests.
//!
//! The request-context middleware establishes the scope; anything on the
//! request path (notably the error translation in `error.rs`) can read the
//! current id without threading it through every signature. Code outside a
//! request scope simply sees `None`.

use std::cell::RefCell;

use tokio::task_local;

task_local! {
    static REQUEST_ID: RefCell<Option<String>>;
}

/// The request id for the current task, if one is in scope.
pub fn request_id() -> Option<String> {
    REQUEST_ID
        .try_with(|cell| cell.borrow().clone())
        .unwrap_or(None)
}

/// Run a future with the given request id in scope.
pub async fn with_request_id<F, R>(request_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    REQUEST_ID
        .scope(RefCell::new(Some(request_id)), future)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn outside_scope_is_none() {
        assert_eq!(request_id(), None);
    }

    #[tokio::test]
    async fn inside_scope_returns_id() {
        let out = with_request_id("req-123".to_string(), async {
            assert_eq!(request_id().as_deref(), Some("req-123"));
            "done"
        })
        .await;
        assert_eq!(out, "done");
        assert_eq!(request_id(), None);
    }
}
