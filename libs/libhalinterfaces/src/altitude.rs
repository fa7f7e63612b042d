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

//! `android.frameworks.location.altitude`: converts WGS84 altitudes to mean sea level.

use hal_binder::{ExceptionCode, Interface, Result, Status};

pub const DESCRIPTOR: &str = "android.frameworks.location.altitude.IAltitudeService";

/// Current interface version. Version 2 added `success` flags and `get_geoid_height`.
pub const VERSION: i32 = 2;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddMslAltitudeToLocationRequest {
    pub latitude_degrees: f64,
    pub longitude_degrees: f64,
    /// WGS84 altitude.
    pub altitude_meters: f64,
    pub vertical_accuracy_meters: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddMslAltitudeToLocationResponse {
    pub msl_altitude_meters: f64,
    pub msl_altitude_accuracy_meters: f32,
    /// Since version 2.
    pub success: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetGeoidHeightRequest {
    pub latitude_degrees: f64,
    pub longitude_degrees: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetGeoidHeightResponse {
    /// Height of the geoid above the WGS84 ellipsoid.
    pub geoid_height_meters: f64,
    pub geoid_height_error_meters: f32,
    /// Distance from the request location beyond which the response should be refreshed.
    pub expiration_distance_meters: f64,
    /// Error to add when the response is reused anywhere within the expiration distance.
    pub additional_geoid_height_error_meters: f32,
    pub success: bool,
}

pub trait IAltitudeService: Interface {
    fn add_msl_altitude_to_location(
        &self,
        request: &AddMslAltitudeToLocationRequest,
    ) -> Result<AddMslAltitudeToLocationResponse>;

    /// Since version 2. Older services reject it as unsupported.
    fn get_geoid_height(&self, _request: &GetGeoidHeightRequest) -> Result<GetGeoidHeightResponse> {
        Err(Status::new_exception(
            ExceptionCode::UnsupportedOperation,
            Some("getGeoidHeight is introduced in V2"),
        ))
    }

    fn get_interface_version(&self) -> Result<i32>;
}
