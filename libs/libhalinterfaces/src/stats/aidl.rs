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

//! AIDL `android.frameworks.stats`.

use hal_binder::{Interface, Result};

pub const DESCRIPTOR: &str = "android.frameworks.stats.IStats";

/// One field of a [`VendorAtom`]. Array fields, and strings inside string arrays, are nullable.
#[derive(Clone, Debug, PartialEq)]
pub enum VendorAtomValue {
    IntValue(i32),
    LongValue(i64),
    FloatValue(f32),
    StringValue(String),
    BoolValue(bool),
    RepeatedIntValue(Option<Vec<i32>>),
    RepeatedLongValue(Option<Vec<i64>>),
    RepeatedFloatValue(Option<Vec<f32>>),
    RepeatedStringValue(Option<Vec<Option<String>>>),
    RepeatedBoolValue(Option<Vec<bool>>),
    ByteArrayValue(Option<Vec<u8>>),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VendorAtom {
    /// Vendor or OEM reverse domain name, at most [`MAX_REVERSE_DOMAIN_NAME_LEN`] bytes.
    pub reverse_domain_name: String,
    /// Must be in [`VENDOR_ATOM_ID_RANGE`].
    pub atom_id: i32,
    pub values: Vec<VendorAtomValue>,
}

/// Atom ids reserved for vendor atoms.
pub const VENDOR_ATOM_ID_RANGE: std::ops::Range<i32> = 100_000..200_000;

pub const MAX_REVERSE_DOMAIN_NAME_LEN: usize = 50;

pub trait IStats: Interface {
    fn report_vendor_atom(&self, vendor_atom: &VendorAtom) -> Result<()>;
}
