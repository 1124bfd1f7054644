use thiserror::Error;

/// Failure of a single HTTP exchange with the backend or the map provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl RequestError {
    /// Passes the body of a 2xx response through; any other status becomes
    /// [`RequestError::Status`], keeping whatever body could be read.
    pub fn check_status(status: u16, body: Result<String, RequestError>) -> Result<String, RequestError> {
        if (200..300).contains(&status) {
            return body;
        }
        Err(RequestError::Status {
            status,
            body: body.unwrap_or_default(),
        })
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Decode(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("trip is missing locations (current: {current:?}, pickup: {pickup:?}, dropoff: {dropoff:?})")]
    MissingLocations {
        current: Option<String>,
        pickup: Option<String>,
        dropoff: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_status_passes_body() {
        assert_eq!(RequestError::check_status(200, Ok("{}".into())), Ok("{}".to_owned()));
        assert_eq!(RequestError::check_status(201, Ok("created".into())), Ok("created".to_owned()));
    }

    #[test]
    fn success_status_keeps_read_failure() {
        let err = RequestError::Network("connection reset".into());
        assert_eq!(RequestError::check_status(200, Err(err.clone())), Err(err));
    }

    #[test]
    fn error_status_keeps_body() {
        assert_eq!(
            RequestError::check_status(400, Ok(r#"{"error":"bad location"}"#.into())),
            Err(RequestError::Status {
                status: 400,
                body: r#"{"error":"bad location"}"#.to_owned()
            })
        );
        assert_eq!(
            RequestError::check_status(302, Ok(String::new())),
            Err(RequestError::Status { status: 302, body: String::new() })
        );
    }

    #[test]
    fn error_status_with_unreadable_body() {
        let result = RequestError::check_status(503, Err(RequestError::Network("aborted".into())));
        assert_eq!(result, Err(RequestError::Status { status: 503, body: String::new() }));
        assert_eq!(result.unwrap_err().to_string(), "request failed with status 503");
    }
}
