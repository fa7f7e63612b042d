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

//! `android.frameworks.stats@1.0`.

use hal_binder::{Interface, Result};

pub const DESCRIPTOR: &str = "android.frameworks.stats@1.0::IStats";

/// statsd atom ids logged for each report.
pub mod atoms {
    pub const SPEAKER_IMPEDANCE_REPORTED: i32 = 125;
    pub const HARDWARE_FAILED: i32 = 126;
    pub const CHARGE_CYCLES_REPORTED: i32 = 128;
    pub const BATTERY_HEALTH_SNAPSHOT: i32 = 129;
    pub const SLOW_IO: i32 = 130;
    pub const BATTERY_CAUSED_SHUTDOWN: i32 = 131;
    pub const USB_PORT_OVERHEAT_EVENT_REPORTED: i32 = 150;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpeakerImpedance {
    pub speaker_location: i32,
    pub milli_ohms: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(i32)]
pub enum HardwareType {
    #[default]
    Unknown = 0,
    Microphone = 1,
    Codec = 2,
    Speaker = 3,
    Fingerprint = 4,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(i32)]
pub enum HardwareErrorCode {
    #[default]
    Unknown = 0,
    Complete = 1,
    SpeakerHighZ = 2,
    SpeakerShort = 3,
    FingerprintSensorBroken = 4,
    FingerprintTooManyDeadPixels = 5,
    Degrade = 6,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HardwareFailed {
    pub hardware_type: HardwareType,
    pub hardware_location: i32,
    pub error_code: HardwareErrorCode,
}

/// Number of buckets in [`ChargeCycles::cycle_bucket`].
pub const CHARGE_CYCLE_BUCKETS: usize = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChargeCycles {
    pub cycle_bucket: Vec<i32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(i32)]
pub enum BatterySnapshotType {
    #[default]
    MinTemp = 0,
    MaxTemp = 1,
    MinResistance = 2,
    MaxResistance = 3,
    MinVoltage = 4,
    MaxVoltage = 5,
    MinCurrent = 6,
    MaxCurrent = 7,
    MinBattLevel = 8,
    MaxBattLevel = 9,
    Avg = 10,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatteryHealthSnapshotArgs {
    pub snapshot_type: BatterySnapshotType,
    pub temperature_deci_c: i32,
    pub voltage_micro_v: i32,
    pub current_micro_a: i32,
    pub open_circuit_voltage_micro_v: i32,
    pub resistance_micro_ohm: i32,
    pub level_percent: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(i32)]
pub enum IoOperation {
    #[default]
    Unknown = 0,
    Read = 1,
    Write = 2,
    Unmap = 3,
    Sync = 4,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlowIo {
    pub operation: IoOperation,
    pub count: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatteryCausedShutdown {
    pub voltage_micro_v: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsbPortOverheatEvent {
    pub plug_temperature_deci_c: i32,
    pub max_temperature_deci_c: i32,
    pub time_to_overheat: i32,
    pub time_to_hysteresis: i32,
    pub time_to_inactive: i32,
}

pub trait IStats: Interface {
    fn report_speaker_impedance(&self, speaker_impedance: &SpeakerImpedance) -> Result<()>;
    fn report_hardware_failed(&self, hardware_failed: &HardwareFailed) -> Result<()>;
    fn report_charge_cycles(&self, charge_cycles: &ChargeCycles) -> Result<()>;
    fn report_battery_health_snapshot(&self, args: &BatteryHealthSnapshotArgs) -> Result<()>;
    fn report_slow_io(&self, slow_io: &SlowIo) -> Result<()>;
    fn report_battery_caused_shutdown(&self, shutdown: &BatteryCausedShutdown) -> Result<()>;
    fn report_usb_port_overheat_event(&self, event: &UsbPortOverheatEvent) -> Result<()>;
}
