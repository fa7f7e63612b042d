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

//! Interfaces and parcelable types of the framework HAL services.
//!
//! Each module mirrors one interface package: a `DESCRIPTOR` naming the service, the value types
//! passed across it, and one trait per service or callback interface.

pub mod altitude;
pub mod automotive_display;
pub mod devicestate;
pub mod stats;
pub mod vibrator;
