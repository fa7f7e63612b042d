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

//! Implementation of IAltitudeService backed by a [`GeoidGrid`].

use crate::geoid::{GeoidError, GeoidGrid, GeoidSample};
use hal_binder::{ExceptionCode, Interface, IntoBinderResult, Result, Strong};
use hal_interfaces::altitude::{
    AddMslAltitudeToLocationRequest, AddMslAltitudeToLocationResponse, GetGeoidHeightRequest,
    GetGeoidHeightResponse, IAltitudeService, VERSION,
};
use log::warn;
use std::sync::Arc;

pub struct AltitudeService {
    grid: GeoidGrid,
}

impl AltitudeService {
    pub fn new(grid: GeoidGrid) -> Arc<Self> {
        Arc::new(Self { grid })
    }

    pub fn as_binder(self: &Arc<Self>) -> Strong<dyn IAltitudeService> {
        let service: Arc<dyn IAltitudeService> = self.clone();
        Strong::new(service)
    }

    /// Returns `None` for locations the grid does not cover; those are reported as unsuccessful
    /// responses rather than errors.
    fn sample(&self, latitude: f64, longitude: f64) -> Result<Option<GeoidSample>> {
        match self.grid.interpolate(latitude, longitude) {
            Ok(sample) => Ok(Some(sample)),
            Err(e @ GeoidError::OutOfCoverage { .. }) => {
                warn!("{e}");
                Ok(None)
            }
            Err(e) => Err(e).or_binder_exception(ExceptionCode::IllegalArgument),
        }
    }
}

impl Interface for AltitudeService {}

impl IAltitudeService for AltitudeService {
    fn add_msl_altitude_to_location(
        &self,
        request: &AddMslAltitudeToLocationRequest,
    ) -> Result<AddMslAltitudeToLocationResponse> {
        let Some(sample) = self.sample(request.latitude_degrees, request.longitude_degrees)? else {
            return Ok(AddMslAltitudeToLocationResponse::default());
        };
        Ok(AddMslAltitudeToLocationResponse {
            msl_altitude_meters: request.altitude_meters - sample.height_meters,
            msl_altitude_accuracy_meters: request
                .vertical_accuracy_meters
                .hypot(sample.height_error_meters),
            success: true,
        })
    }

    fn get_geoid_height(&self, request: &GetGeoidHeightRequest) -> Result<GetGeoidHeightResponse> {
        let Some(sample) = self.sample(request.latitude_degrees, request.longitude_degrees)? else {
            return Ok(GetGeoidHeightResponse::default());
        };
        Ok(GetGeoidHeightResponse {
            geoid_height_meters: sample.height_meters,
            geoid_height_error_meters: sample.height_error_meters,
            expiration_distance_meters: sample.expiration_distance_meters,
            additional_geoid_height_error_meters: sample.additional_error_meters,
            success: true,
        })
    }

    fn get_interface_version(&self) -> Result<i32> {
        Ok(VERSION)
    }
}
