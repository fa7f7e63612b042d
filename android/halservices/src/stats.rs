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

//! Implementation of both stats interfaces. Every accepted report is logged as a statsd event
//! and kept for inspection.

use hal_binder::{ExceptionCode, Interface, Result, Status, Strong};
use hal_interfaces::stats::aidl::{
    self, VendorAtom, VendorAtomValue, MAX_REVERSE_DOMAIN_NAME_LEN, VENDOR_ATOM_ID_RANGE,
};
use hal_interfaces::stats::v1_0::{
    self, atoms, BatteryCausedShutdown, BatteryHealthSnapshotArgs, ChargeCycles, HardwareFailed,
    SlowIo, SpeakerImpedance, UsbPortOverheatEvent, CHARGE_CYCLE_BUCKETS,
};
use log::info;
use std::sync::{Arc, Mutex};

/// An event pushed to statsd.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggedEvent {
    pub atom_id: i32,
    pub field_count: usize,
}

#[derive(Default)]
pub struct StatsService {
    events: Mutex<Vec<LoggedEvent>>,
}

impl StatsService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn as_hidl_binder(self: &Arc<Self>) -> Strong<dyn v1_0::IStats> {
        let service: Arc<dyn v1_0::IStats> = self.clone();
        Strong::new(service)
    }

    pub fn as_aidl_binder(self: &Arc<Self>) -> Strong<dyn aidl::IStats> {
        let service: Arc<dyn aidl::IStats> = self.clone();
        Strong::new(service)
    }

    /// Events logged so far, oldest first.
    pub fn logged_events(&self) -> Vec<LoggedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn log_event(&self, atom_id: i32, field_count: usize) -> Result<()> {
        info!("statsd ({atom_id})0x10000->");
        self.events.lock().unwrap().push(LoggedEvent { atom_id, field_count });
        Ok(())
    }
}

fn illegal_argument(message: &str) -> Status {
    Status::new_exception(ExceptionCode::IllegalArgument, Some(message))
}

fn check_vendor_atom(atom: &VendorAtom) -> Result<()> {
    if !VENDOR_ATOM_ID_RANGE.contains(&atom.atom_id) {
        return Err(illegal_argument(&format!("Atom id {} is not a vendor atom", atom.atom_id)));
    }
    if atom.reverse_domain_name.len() > MAX_REVERSE_DOMAIN_NAME_LEN {
        return Err(illegal_argument("Reverse domain name is too long"));
    }
    for value in &atom.values {
        if let VendorAtomValue::FloatValue(f) = value {
            if !f.is_finite() {
                return Err(illegal_argument("Float field is not finite"));
            }
        }
    }
    Ok(())
}

impl Interface for StatsService {}

impl v1_0::IStats for StatsService {
    fn report_speaker_impedance(&self, _speaker_impedance: &SpeakerImpedance) -> Result<()> {
        self.log_event(atoms::SPEAKER_IMPEDANCE_REPORTED, 2)
    }

    fn report_hardware_failed(&self, _hardware_failed: &HardwareFailed) -> Result<()> {
        self.log_event(atoms::HARDWARE_FAILED, 3)
    }

    fn report_charge_cycles(&self, charge_cycles: &ChargeCycles) -> Result<()> {
        if charge_cycles.cycle_bucket.len() > CHARGE_CYCLE_BUCKETS {
            return Err(illegal_argument("Too many charge cycle buckets"));
        }
        // Missing buckets are logged as zero.
        self.log_event(atoms::CHARGE_CYCLES_REPORTED, CHARGE_CYCLE_BUCKETS)
    }

    fn report_battery_health_snapshot(&self, _args: &BatteryHealthSnapshotArgs) -> Result<()> {
        self.log_event(atoms::BATTERY_HEALTH_SNAPSHOT, 7)
    }

    fn report_slow_io(&self, slow_io: &SlowIo) -> Result<()> {
        if slow_io.count < 0 {
            return Err(illegal_argument("Negative slow IO count"));
        }
        self.log_event(atoms::SLOW_IO, 2)
    }

    fn report_battery_caused_shutdown(&self, _shutdown: &BatteryCausedShutdown) -> Result<()> {
        self.log_event(atoms::BATTERY_CAUSED_SHUTDOWN, 1)
    }

    fn report_usb_port_overheat_event(&self, _event: &UsbPortOverheatEvent) -> Result<()> {
        self.log_event(atoms::USB_PORT_OVERHEAT_EVENT_REPORTED, 5)
    }
}

impl aidl::IStats for StatsService {
    fn report_vendor_atom(&self, vendor_atom: &VendorAtom) -> Result<()> {
        check_vendor_atom(vendor_atom)?;
        self.log_event(vendor_atom.atom_id, vendor_atom.values.len())
    }
}
