use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};
use std::io;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

const STORAGE_UNAVAILABLE: i32 = 1;
const BUSY: i32 = 2;
const CONFIG: i32 = 3;
const UNEXPECTED: i32 = 5;

const NO_MATCH_FOUND: i32 = 100;
const INVALID_INPUT: i32 = 101;
const UNKNOWN_DRIVER: i32 = 102;
const UNKNOWN_PLACE: i32 = 103;
const CORRUPT_RECORD: i32 = 104;
const DUPLICATE_DRIVER: i32 = 105;
const UNKNOWN_RIDER: i32 = 106;
const DUPLICATE_RIDER: i32 = 107;

impl Error {
    pub fn storage_unavailable_error<T: Display>(cause: T) -> Self {
        Self {
            code: STORAGE_UNAVAILABLE,
            message: format!("storage unavailable: {}", cause),
        }
    }

    pub fn busy_error() -> Self {
        Self {
            code: BUSY,
            message: "driver directory is busy".into(),
        }
    }

    pub fn config_error<T: Display>(cause: T) -> Self {
        Self {
            code: CONFIG,
            message: format!("configuration error: {}", cause),
        }
    }

    pub fn unexpected_error() -> Self {
        Self {
            code: UNEXPECTED,
            message: "unexpected error".into(),
        }
    }

    pub fn no_match_found_error(vehicle_class: &str) -> Self {
        Self {
            code: NO_MATCH_FOUND,
            message: format!("no available driver of class {:?}", vehicle_class),
        }
    }

    pub fn invalid_input_error() -> Self {
        Self {
            code: INVALID_INPUT,
            message: "invalid input".into(),
        }
    }

    pub fn unknown_driver_error(id: &str) -> Self {
        Self {
            code: UNKNOWN_DRIVER,
            message: format!("unknown driver {:?}", id),
        }
    }

    pub fn unknown_place_error(name: &str) -> Self {
        Self {
            code: UNKNOWN_PLACE,
            message: format!("unknown place {:?}", name),
        }
    }

    pub fn corrupt_record_error<T: Display>(reason: T) -> Self {
        Self {
            code: CORRUPT_RECORD,
            message: format!("corrupt record: {}", reason),
        }
    }

    pub fn duplicate_driver_error(id: &str) -> Self {
        Self {
            code: DUPLICATE_DRIVER,
            message: format!("driver {:?} already exists", id),
        }
    }

    pub fn unknown_rider_error(id: &str) -> Self {
        Self {
            code: UNKNOWN_RIDER,
            message: format!("unknown rider {:?}", id),
        }
    }

    pub fn duplicate_rider_error(id: &str) -> Self {
        Self {
            code: DUPLICATE_RIDER,
            message: format!("rider {:?} already exists", id),
        }
    }

    pub fn is_storage_unavailable_error(&self) -> bool {
        self.code == STORAGE_UNAVAILABLE
    }

    pub fn is_busy_error(&self) -> bool {
        self.code == BUSY
    }

    pub fn is_invalid_input_error(&self) -> bool {
        self.code == INVALID_INPUT
    }

    pub fn is_no_match_found_error(&self) -> bool {
        self.code == NO_MATCH_FOUND
    }

    pub fn is_unknown_driver_error(&self) -> bool {
        self.code == UNKNOWN_DRIVER
    }

    pub fn is_unknown_place_error(&self) -> bool {
        self.code == UNKNOWN_PLACE
    }

    pub fn is_corrupt_record_error(&self) -> bool {
        self.code == CORRUPT_RECORD
    }

    pub fn is_duplicate_driver_error(&self) -> bool {
        self.code == DUPLICATE_DRIVER
    }

    pub fn is_unknown_rider_error(&self) -> bool {
        self.code == UNKNOWN_RIDER
    }

    pub fn is_duplicate_rider_error(&self) -> bool {
        self.code == DUPLICATE_RIDER
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        Error::config_error(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::storage_unavailable_error(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::corrupt_record_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            BUSY => (StatusCode::SERVICE_UNAVAILABLE, "Service Busy"),
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            NO_MATCH_FOUND => (StatusCode::NOT_FOUND, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[test]
fn internal_errors_hide_their_message() {
    let response = Error::storage_unavailable_error("disk on fire").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = Error::busy_error().into_response();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn client_errors_map_to_client_statuses() {
    let response = Error::no_match_found_error("Car").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = Error::unknown_place_error("Moon").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn io_errors_are_storage_unavailable() {
    let err: Error = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
    assert!(err.is_storage_unavailable_error());
}
