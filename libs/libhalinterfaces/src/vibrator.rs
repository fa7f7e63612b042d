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

//! `android.frameworks.vibrator`: lets a vendor controller adjust vibration intensity per usage.

use hal_binder::{Interface, Result, Strong};

pub const DESCRIPTOR: &str = "android.frameworks.vibrator.IVibratorControlService";

/// Scale applied to vibrations of the usages in `types_mask`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaleParam {
    pub types_mask: i32,
    pub scale: f32,
}

impl ScaleParam {
    pub const TYPE_ALARM: i32 = 1 << 0;
    pub const TYPE_NOTIFICATION: i32 = 1 << 1;
    pub const TYPE_RINGTONE: i32 = 1 << 2;
    pub const TYPE_INTERACTIVE: i32 = 1 << 3;
    pub const TYPE_MEDIA: i32 = 1 << 4;

    /// Union of every usage type.
    pub const ALL_TYPES: i32 = Self::TYPE_ALARM
        | Self::TYPE_NOTIFICATION
        | Self::TYPE_RINGTONE
        | Self::TYPE_INTERACTIVE
        | Self::TYPE_MEDIA;

    pub fn new(types_mask: i32, scale: f32) -> Self {
        Self { types_mask, scale }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum VibrationParam {
    Scale(ScaleParam),
}

/// Returns a single scale param for `types_mask`.
pub fn generate_vibration_params(types_mask: i32, scale: f32) -> Vec<VibrationParam> {
    vec![VibrationParam::Scale(ScaleParam::new(types_mask, scale))]
}

/// Vendor callback that supplies vibration params on request.
pub trait IVibratorController: Interface {
    /// Asks the controller for params for `types_mask`. The controller answers asynchronously by
    /// calling [`IVibratorControlService::on_request_vibration_params_complete`] on
    /// `request_token`, which identifies the request. A missing token is rejected with
    /// `IllegalArgument`.
    fn request_vibration_params(
        &self,
        types_mask: i32,
        deadline_elapsed_realtime_millis: i64,
        request_token: Option<&Strong<dyn IVibratorControlService>>,
    ) -> Result<()>;
}

pub trait IVibratorControlService: Interface {
    fn register_vibrator_controller(&self, controller: &Strong<dyn IVibratorController>)
        -> Result<()>;

    fn unregister_vibrator_controller(
        &self,
        controller: &Strong<dyn IVibratorController>,
    ) -> Result<()>;

    /// Applies `params` until they are cleared. `token` identifies the calling controller.
    fn set_vibration_params(
        &self,
        params: &[VibrationParam],
        token: Option<&Strong<dyn IVibratorController>>,
    ) -> Result<()>;

    /// Drops any params set for the usages in `types_mask`.
    fn clear_vibration_params(
        &self,
        types_mask: i32,
        token: Option<&Strong<dyn IVibratorController>>,
    ) -> Result<()>;

    /// Completes a request started by [`IVibratorController::request_vibration_params`].
    fn on_request_vibration_params_complete(
        &self,
        request_token: &Strong<dyn IVibratorControlService>,
        result: &[VibrationParam],
    ) -> Result<()>;
}
