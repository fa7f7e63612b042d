// Copyright 2024, The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Status returned by every service method.

use std::fmt;
use thiserror::Error;

/// Exception carried by a failed [`Status`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExceptionCode {
    IllegalArgument,
    IllegalState,
    UnsupportedOperation,
    NullPointer,
    /// The service reported an interface specific error code, see
    /// [`Status::service_specific_error`].
    ServiceSpecific,
    TransactionFailed,
}

impl fmt::Display for ExceptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExceptionCode::IllegalArgument => "EX_ILLEGAL_ARGUMENT",
            ExceptionCode::IllegalState => "EX_ILLEGAL_STATE",
            ExceptionCode::UnsupportedOperation => "EX_UNSUPPORTED_OPERATION",
            ExceptionCode::NullPointer => "EX_NULL_POINTER",
            ExceptionCode::ServiceSpecific => "EX_SERVICE_SPECIFIC",
            ExceptionCode::TransactionFailed => "EX_TRANSACTION_FAILED",
        };
        f.write_str(name)
    }
}

/// A failed service call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Status({exception}, {service_specific}): '{}'", .message.as_deref().unwrap_or_default())]
pub struct Status {
    exception: ExceptionCode,
    service_specific: i32,
    message: Option<String>,
}

impl Status {
    /// Creates a status for a generic exception.
    pub fn new_exception(exception: ExceptionCode, message: Option<&str>) -> Self {
        Self { exception, service_specific: 0, message: message.map(str::to_owned) }
    }

    /// Creates a status carrying an interface specific error code.
    pub fn new_service_specific_error(code: i32, message: Option<&str>) -> Self {
        Self {
            exception: ExceptionCode::ServiceSpecific,
            service_specific: code,
            message: message.map(str::to_owned),
        }
    }

    pub fn exception_code(&self) -> ExceptionCode {
        self.exception
    }

    /// Returns the service specific error code, or 0 if this is not a service specific error.
    pub fn service_specific_error(&self) -> i32 {
        self.service_specific
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Result of a service method.
pub type Result<T> = std::result::Result<T, Status>;

/// Converts library errors into a [`Status`] at the service boundary.
pub trait IntoBinderResult<T> {
    /// Maps the error to the generic `exception`, keeping the error's message.
    fn or_binder_exception(self, exception: ExceptionCode) -> Result<T>;
}

impl<T, E: fmt::Display> IntoBinderResult<T> for std::result::Result<T, E> {
    fn or_binder_exception(self, exception: ExceptionCode) -> Result<T> {
        self.map_err(|e| Status::new_exception(exception, Some(&e.to_string())))
    }
}
