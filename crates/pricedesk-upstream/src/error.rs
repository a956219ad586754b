use pricedesk_core::{ClassifyFailure, FailureKind};
use thiserror::Error;

/// Failures talking to the upstream service.
///
/// Display text is handed back to API callers, so it never carries the
/// upstream URL. The `url` fields are for logs.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by upstream (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("upstream rejected the credentials (HTTP {status})")]
    Unauthorized { status: u16, url: String },

    #[error("unexpected HTTP status {status} from upstream")]
    UnexpectedStatus { status: u16, url: String },

    #[error("upstream response has no \"{field}\" field")]
    MissingField { field: &'static str, url: String },

    #[error("invalid upstream base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        UpstreamError::Http(e.without_url())
    }
}

impl ClassifyFailure for UpstreamError {
    fn kind(&self) -> FailureKind {
        match self {
            UpstreamError::Http(e) if e.is_decode() => FailureKind::DataShape,
            UpstreamError::Http(e) if e.status().is_some() => FailureKind::UpstreamRejection,
            UpstreamError::Http(_) | UpstreamError::InvalidBaseUrl { .. } => FailureKind::Transport,
            UpstreamError::Unauthorized { .. }
            | UpstreamError::MissingField {
                field: "accessToken",
                ..
            } => FailureKind::Auth,
            UpstreamError::Deserialize { .. } | UpstreamError::MissingField { .. } => {
                FailureKind::DataShape
            }
            UpstreamError::RateLimited { .. } | UpstreamError::UnexpectedStatus { .. } => {
                FailureKind::UpstreamRejection
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_status_errors_as_rejections() {
        let err = UpstreamError::UnexpectedStatus {
            status: 500,
            url: "https://dummyjson.com/auth/products".to_owned(),
        };
        assert_eq!(err.kind(), FailureKind::UpstreamRejection);
        assert_eq!(
            UpstreamError::RateLimited {
                retry_after_secs: 5
            }
            .kind(),
            FailureKind::UpstreamRejection
        );
    }

    #[test]
    fn classifies_shape_errors() {
        let source = serde_json::from_str::<()>("nope").unwrap_err();
        let err = UpstreamError::Deserialize {
            context: "test".to_owned(),
            source,
        };
        assert_eq!(err.kind(), FailureKind::DataShape);
        let err = UpstreamError::MissingField {
            field: "products",
            url: "u".to_owned(),
        };
        assert_eq!(err.kind(), FailureKind::DataShape);
    }

    #[test]
    fn classifies_missing_token_as_auth() {
        let err = UpstreamError::MissingField {
            field: "accessToken",
            url: "u".to_owned(),
        };
        assert_eq!(err.kind(), FailureKind::Auth);
    }

    #[test]
    fn classifies_unauthorized_as_auth() {
        let err = UpstreamError::Unauthorized {
            status: 400,
            url: "https://dummyjson.com/auth/login".to_owned(),
        };
        assert_eq!(err.kind(), FailureKind::Auth);
    }

    #[test]
    fn display_leaves_out_the_upstream_url() {
        let url = "https://dummyjson.com/auth/products?limit=30&skip=0".to_owned();
        let errors = [
            UpstreamError::Unauthorized {
                status: 401,
                url: url.clone(),
            },
            UpstreamError::UnexpectedStatus {
                status: 500,
                url: url.clone(),
            },
            UpstreamError::MissingField {
                field: "products",
                url,
            },
        ];
        for err in errors {
            let shown = err.to_string();
            assert!(!shown.contains("dummyjson"), "leaked url: {shown}");
        }
    }
}
