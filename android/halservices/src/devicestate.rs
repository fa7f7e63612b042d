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

//! Implementation of IDeviceStateService.

use hal_binder::{Interface, ProcessState, Result, Strong};
use hal_interfaces::devicestate::{
    DeviceStateConfiguration, ErrorCode, IDeviceStateListener, IDeviceStateService,
};
use log::{error, info, warn};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

/// Tracks the current device state and notifies at most one listener of changes.
pub struct DeviceStateService {
    state: Mutex<State>,
}

struct State {
    current: DeviceStateConfiguration,
    listener: Option<Arc<Delivery>>,
}

/// Notifications for one listener, delivered on the dispatch pool one at a time in the order
/// they were queued.
struct Delivery {
    listener: Strong<dyn IDeviceStateListener>,
    queue: Mutex<DeliveryQueue>,
}

#[derive(Default)]
struct DeliveryQueue {
    pending: VecDeque<DeviceStateConfiguration>,
    /// A drain job is queued or running for this listener.
    draining: bool,
}

impl Delivery {
    fn new(listener: Strong<dyn IDeviceStateListener>) -> Arc<Self> {
        Arc::new(Self { listener, queue: Mutex::new(DeliveryQueue::default()) })
    }

    fn push(self: &Arc<Self>, device_state: DeviceStateConfiguration) {
        let mut queue = self.queue.lock().unwrap();
        queue.pending.push_back(device_state);
        if !queue.draining {
            queue.draining = true;
            let delivery = self.clone();
            ProcessState::dispatch(move || delivery.drain());
        }
    }

    fn drain(&self) {
        loop {
            let device_state = {
                let mut queue = self.queue.lock().unwrap();
                let Some(device_state) = queue.pending.pop_front() else {
                    queue.draining = false;
                    return;
                };
                device_state
            };
            let call = AssertUnwindSafe(|| self.listener.on_device_state_changed(&device_state));
            match panic::catch_unwind(call) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Listener failed to handle device state change: {e}"),
                Err(_) => error!("Listener panicked handling device state change"),
            }
        }
    }
}

impl DeviceStateService {
    pub fn new(initial: DeviceStateConfiguration) -> Arc<Self> {
        Arc::new(Self { state: Mutex::new(State { current: initial, listener: None }) })
    }

    pub fn as_binder(self: &Arc<Self>) -> Strong<dyn IDeviceStateService> {
        let service: Arc<dyn IDeviceStateService> = self.clone();
        Strong::new(service)
    }

    pub fn current_state(&self) -> DeviceStateConfiguration {
        self.state.lock().unwrap().current.clone()
    }

    /// Moves to `device_state`, notifying the registered listener if the state changed.
    pub fn set_device_state(&self, device_state: DeviceStateConfiguration) {
        let mut state = self.state.lock().unwrap();
        if state.current == device_state {
            return;
        }
        info!("Device state changed to {:#x}", device_state.device_properties);
        state.current = device_state.clone();
        if let Some(delivery) = &state.listener {
            delivery.push(device_state);
        }
    }
}

impl Interface for DeviceStateService {}

impl IDeviceStateService for DeviceStateService {
    fn register_listener(&self, listener: &Strong<dyn IDeviceStateListener>) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.listener.is_some() {
            return Err(ErrorCode::AlreadyExists.into_status("A listener is already registered"));
        }
        let delivery = Delivery::new(listener.clone());
        info!("Registered device state listener {listener:?}");
        delivery.push(state.current.clone());
        state.listener = Some(delivery);
        Ok(())
    }

    fn unregister_listener(&self, listener: &Strong<dyn IDeviceStateListener>) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        match &state.listener {
            Some(delivery) if delivery.listener.same_object(listener) => {
                state.listener = None;
                info!("Unregistered device state listener {listener:?}");
                Ok(())
            }
            _ => Err(ErrorCode::BadInput.into_status("Listener is not registered")),
        }
    }
}
