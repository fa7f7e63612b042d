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

//! In-process plumbing shared by the HAL service interfaces: service handles with object
//! identity, the [`Status`] every method returns, a registry of named instances and the dispatch
//! thread pool that delivers asynchronous callbacks.

mod process_state;
mod service_manager;
mod status;
mod strong;

pub use process_state::ProcessState;
pub use service_manager::{instance_name, ServiceError, ServiceManager, GET_SERVICE_TIMEOUT};
pub use status::{ExceptionCode, IntoBinderResult, Result, Status};
pub use strong::{Interface, Strong};
