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

//! `android.frameworks.stats`: lets vendor code push atoms into statsd.
//!
//! [`v1_0`] is the original HIDL interface with one method per atom; [`aidl`] replaces it with a
//! single generic vendor atom.

pub mod aidl;
pub mod v1_0;
