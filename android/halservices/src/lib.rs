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

//! Default instances of the framework HAL services, run in-process so that the conformance
//! suites have something to talk to.

pub mod altitude;
pub mod automotive_display;
pub mod devicestate;
pub mod geoid;
pub mod stats;
pub mod vibrator;

use crate::altitude::AltitudeService;
use crate::automotive_display::CarWindowService;
use crate::devicestate::DeviceStateService;
use crate::geoid::GeoidGrid;
use crate::stats::StatsService;
use crate::vibrator::VibratorControlService;
use hal_binder::{instance_name, ServiceError, ServiceManager};
use hal_interfaces::automotive_display::DisplayInfo;
use hal_interfaces::devicestate::{DeviceStateConfiguration, DeviceStatePropertyValue};
use hal_interfaces as hal;
use log::info;
use std::sync::Arc;

/// Instance name every default service is published under.
pub const DEFAULT_INSTANCE: &str = "default";

/// Handles to the published default services.
pub struct DefaultServices {
    pub altitude: Arc<AltitudeService>,
    pub car_window: Arc<CarWindowService>,
    pub device_state: Arc<DeviceStateService>,
    pub stats: Arc<StatsService>,
    pub vibrator_control: Arc<VibratorControlService>,
}

impl DefaultServices {
    pub fn new() -> Self {
        Self {
            altitude: AltitudeService::new(GeoidGrid::hawaii_tile()),
            car_window: CarWindowService::new(DisplayInfo {
                width: 1920,
                height: 720,
                refresh_rate_hz: 60.0,
            }),
            device_state: DeviceStateService::new(DeviceStateConfiguration::new(
                DeviceStatePropertyValue::FOLDABLE_HARDWARE_CONFIGURATION_FOLD_IN_OPEN
                    | DeviceStatePropertyValue::FOLDABLE_DISPLAY_CONFIGURATION_INNER_PRIMARY,
            )),
            stats: StatsService::new(),
            vibrator_control: VibratorControlService::new(),
        }
    }

    /// Publishes every service as the `default` instance of its descriptor in `sm`.
    pub fn register(&self, sm: &ServiceManager) -> Result<(), ServiceError> {
        let name = |descriptor: &str| instance_name(descriptor, DEFAULT_INSTANCE);
        sm.add_service(&name(hal::altitude::DESCRIPTOR), self.altitude.as_binder())?;
        sm.add_service(
            &name(hal::automotive_display::DESCRIPTOR),
            self.car_window.as_binder(),
        )?;
        sm.add_service(&name(hal::devicestate::DESCRIPTOR), self.device_state.as_binder())?;
        sm.add_service(&name(hal::stats::v1_0::DESCRIPTOR), self.stats.as_hidl_binder())?;
        sm.add_service(&name(hal::stats::aidl::DESCRIPTOR), self.stats.as_aidl_binder())?;
        sm.add_service(&name(hal::vibrator::DESCRIPTOR), self.vibrator_control.as_binder())?;
        info!("Registered default HAL services");
        Ok(())
    }
}

impl Default for DefaultServices {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates the default services and publishes them in `sm`.
pub fn register_default_services(sm: &ServiceManager) -> Result<DefaultServices, ServiceError> {
    let services = DefaultServices::new();
    services.register(sm)?;
    Ok(services)
}
