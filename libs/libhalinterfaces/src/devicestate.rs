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

//! `android.frameworks.devicestate`: notifies a single listener of device state changes.

use bitflags::bitflags;
use hal_binder::{ExceptionCode, Interface, Result, Status, Strong};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

pub const DESCRIPTOR: &str = "android.frameworks.devicestate.IDeviceStateService";

bitflags! {
    /// Publicly visible properties of a device state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DeviceStatePropertyValue: i64 {
        const FOLDABLE_HARDWARE_CONFIGURATION_FOLD_IN_CLOSED = 1 << 0;
        const FOLDABLE_HARDWARE_CONFIGURATION_FOLD_IN_HALF_OPEN = 1 << 1;
        const FOLDABLE_HARDWARE_CONFIGURATION_FOLD_IN_OPEN = 1 << 2;
        const FOLDABLE_DISPLAY_CONFIGURATION_OUTER_PRIMARY = 1 << 3;
        const FOLDABLE_DISPLAY_CONFIGURATION_INNER_PRIMARY = 1 << 4;
        const FEATURE_REAR_DISPLAY = 1 << 5;
        const FEATURE_DUAL_DISPLAY = 1 << 6;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceStateConfiguration {
    /// Bitwise OR of [`DeviceStatePropertyValue`] bits.
    pub device_properties: i64,
}

impl DeviceStateConfiguration {
    pub fn new(properties: DeviceStatePropertyValue) -> Self {
        Self { device_properties: properties.bits() }
    }

    /// Returns the properties, or `None` if any bit outside the public set is present.
    pub fn properties(&self) -> Option<DeviceStatePropertyValue> {
        DeviceStatePropertyValue::from_bits(self.device_properties)
    }
}

/// Service specific error codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(i32)]
pub enum ErrorCode {
    Ok = 0,
    AlreadyExists = 1,
    BadInput = 2,
}

impl ErrorCode {
    /// Extracts the error code carried by a service specific `status`.
    pub fn from_status(status: &Status) -> Option<Self> {
        if status.exception_code() != ExceptionCode::ServiceSpecific {
            return None;
        }
        Self::from_i32(status.service_specific_error())
    }

    pub fn into_status(self, message: &str) -> Status {
        Status::new_service_specific_error(self as i32, Some(message))
    }
}

/// Callback receiving device state changes.
pub trait IDeviceStateListener: Interface {
    fn on_device_state_changed(&self, device_state: &DeviceStateConfiguration) -> Result<()>;
}

pub trait IDeviceStateService: Interface {
    /// Registers `listener`. The service notifies it of the current state asynchronously.
    ///
    /// Fails with [`ErrorCode::AlreadyExists`] if a listener is already registered.
    fn register_listener(&self, listener: &Strong<dyn IDeviceStateListener>) -> Result<()>;

    /// Unregisters `listener`.
    ///
    /// Fails with [`ErrorCode::BadInput`] if `listener` is not the registered listener.
    fn unregister_listener(&self, listener: &Strong<dyn IDeviceStateListener>) -> Result<()>;
}
