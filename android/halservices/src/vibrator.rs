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

//! Implementation of IVibratorControlService.
//!
//! Params set by the registered controller are kept as one scale per usage type. Calls carrying
//! a token that is not the registered controller are ignored rather than rejected, so that
//! clients holding a stale or default controller do not fail.

use callback_ack::NotificationFlag;
use hal_binder::{ExceptionCode, Interface, ProcessState, Result, Status, Strong};
use hal_interfaces::vibrator::{
    IVibratorControlService, IVibratorController, ScaleParam, VibrationParam,
};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock, Mutex, Weak};
use std::time::{Duration, Instant};

static BOOT: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Milliseconds on the clock used for request deadlines.
pub fn elapsed_realtime_millis() -> i64 {
    BOOT.elapsed().as_millis().try_into().unwrap_or(i64::MAX)
}

pub struct VibratorControlService {
    this: Weak<VibratorControlService>,
    state: Mutex<ControlState>,
}

#[derive(Default)]
struct ControlState {
    controller: Option<Strong<dyn IVibratorController>>,
    /// Scale per single usage type bit.
    scales: BTreeMap<i32, f32>,
    pending: Option<PendingRequest>,
}

struct PendingRequest {
    types_mask: i32,
    deadline_elapsed_realtime_millis: i64,
    completed: Arc<NotificationFlag>,
}

impl VibratorControlService {
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|this| Self { this: this.clone(), state: Default::default() })
    }

    pub fn as_binder(self: &Arc<Self>) -> Strong<dyn IVibratorControlService> {
        let service: Arc<dyn IVibratorControlService> = self.clone();
        Strong::new(service)
    }

    /// Returns the scale currently applied to `usage_type`, a single `ScaleParam::TYPE_*` bit.
    pub fn scale_for(&self, usage_type: i32) -> Option<f32> {
        self.state.lock().unwrap().scales.get(&usage_type).copied()
    }

    pub fn has_controller(&self) -> bool {
        self.state.lock().unwrap().controller.is_some()
    }

    /// Asks the registered controller for params for `types_mask`, to be answered within
    /// `timeout`. The returned flag is signaled when a timely answer has been applied.
    pub fn request_vibration_params(
        &self,
        types_mask: i32,
        timeout: Duration,
    ) -> Result<Arc<NotificationFlag>> {
        check_types_mask(types_mask)?;
        let this = self.this.upgrade().ok_or_else(|| {
            Status::new_exception(ExceptionCode::IllegalState, Some("Service is shutting down"))
        })?;

        let mut state = self.state.lock().unwrap();
        let controller = state.controller.clone().ok_or_else(|| {
            Status::new_exception(ExceptionCode::IllegalState, Some("No vibrator controller"))
        })?;
        let timeout_millis: i64 = timeout.as_millis().try_into().unwrap_or(i64::MAX);
        let deadline = elapsed_realtime_millis().saturating_add(timeout_millis);
        let completed = Arc::new(NotificationFlag::new());
        state.pending = Some(PendingRequest {
            types_mask,
            deadline_elapsed_realtime_millis: deadline,
            completed: completed.clone(),
        });
        drop(state);

        let token = this.as_binder();
        ProcessState::dispatch(move || {
            if let Err(e) = controller.request_vibration_params(types_mask, deadline, Some(&token))
            {
                warn!("Vibrator controller rejected request for {types_mask:#x}: {e}");
            }
        });
        Ok(completed)
    }

    fn is_from_controller(
        state: &ControlState,
        token: Option<&Strong<dyn IVibratorController>>,
    ) -> bool {
        match (&state.controller, token) {
            (Some(controller), Some(token)) => controller.same_object(token),
            _ => false,
        }
    }
}

fn check_types_mask(types_mask: i32) -> Result<()> {
    if types_mask == 0 || types_mask & !ScaleParam::ALL_TYPES != 0 {
        return Err(Status::new_exception(
            ExceptionCode::IllegalArgument,
            Some(&format!("Invalid vibration types mask {types_mask:#x}")),
        ));
    }
    Ok(())
}

fn check_params(params: &[VibrationParam]) -> Result<()> {
    for param in params {
        let VibrationParam::Scale(scale) = param;
        check_types_mask(scale.types_mask)?;
        if !scale.scale.is_finite() || scale.scale < 0.0 {
            return Err(Status::new_exception(
                ExceptionCode::IllegalArgument,
                Some(&format!("Invalid vibration scale {}", scale.scale)),
            ));
        }
    }
    Ok(())
}

fn apply_params(scales: &mut BTreeMap<i32, f32>, params: &[VibrationParam]) {
    for VibrationParam::Scale(scale) in params {
        for bit in type_bits(scale.types_mask) {
            scales.insert(bit, scale.scale);
        }
    }
}

fn type_bits(types_mask: i32) -> impl Iterator<Item = i32> {
    (0..i32::BITS).map(|shift| 1 << shift).filter(move |bit| types_mask & bit != 0)
}

impl Interface for VibratorControlService {}

impl IVibratorControlService for VibratorControlService {
    fn register_vibrator_controller(
        &self,
        controller: &Strong<dyn IVibratorController>,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        match &state.controller {
            Some(registered) if registered.same_object(controller) => Ok(()),
            Some(_) => Err(Status::new_exception(
                ExceptionCode::IllegalState,
                Some("A vibrator controller is already registered"),
            )),
            None => {
                info!("Registered vibrator controller {controller:?}");
                state.controller = Some(controller.clone());
                Ok(())
            }
        }
    }

    fn unregister_vibrator_controller(
        &self,
        controller: &Strong<dyn IVibratorController>,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !Self::is_from_controller(&state, Some(controller)) {
            return Err(Status::new_exception(
                ExceptionCode::IllegalArgument,
                Some("Vibrator controller is not registered"),
            ));
        }
        info!("Unregistered vibrator controller {controller:?}");
        *state = ControlState::default();
        Ok(())
    }

    fn set_vibration_params(
        &self,
        params: &[VibrationParam],
        token: Option<&Strong<dyn IVibratorController>>,
    ) -> Result<()> {
        check_params(params)?;
        let mut state = self.state.lock().unwrap();
        if !Self::is_from_controller(&state, token) {
            debug!("Ignoring vibration params from unregistered controller");
            return Ok(());
        }
        apply_params(&mut state.scales, params);
        Ok(())
    }

    fn clear_vibration_params(
        &self,
        types_mask: i32,
        token: Option<&Strong<dyn IVibratorController>>,
    ) -> Result<()> {
        check_types_mask(types_mask)?;
        let mut state = self.state.lock().unwrap();
        if !Self::is_from_controller(&state, token) {
            debug!("Ignoring clear request from unregistered controller");
            return Ok(());
        }
        state.scales.retain(|bit, _| types_mask & bit == 0);
        Ok(())
    }

    fn on_request_vibration_params_complete(
        &self,
        request_token: &Strong<dyn IVibratorControlService>,
        result: &[VibrationParam],
    ) -> Result<()> {
        let is_own_token = self
            .this
            .upgrade()
            .is_some_and(|this| request_token.same_object(&Strong::new(this)));
        if !is_own_token {
            return Err(Status::new_exception(
                ExceptionCode::IllegalArgument,
                Some("Unknown request token"),
            ));
        }
        check_params(result)?;

        let mut state = self.state.lock().unwrap();
        let Some(pending) = state.pending.take() else {
            debug!("No pending vibration params request, ignoring result");
            return Ok(());
        };
        if elapsed_realtime_millis() > pending.deadline_elapsed_realtime_millis {
            warn!("Vibration params for {:#x} arrived after the deadline", pending.types_mask);
            return Ok(());
        }
        apply_params(&mut state.scales, result);
        pending.completed.signal();
        Ok(())
    }
}
