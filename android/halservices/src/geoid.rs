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

//! Geoid heights sampled on a regular latitude/longitude grid.

use thiserror::Error;

const METERS_PER_DEGREE_LATITUDE: f64 = 111_320.0;

/// Slack, in grid cells, for locations that fall on the grid's outer edge.
const EDGE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoidError {
    #[error("invalid geoid grid: {0}")]
    InvalidGrid(&'static str),
    #[error("location ({latitude}, {longitude}) is not a valid coordinate")]
    InvalidLocation { latitude: f64, longitude: f64 },
    #[error("location ({latitude}, {longitude}) is outside the geoid model")]
    OutOfCoverage { latitude: f64, longitude: f64 },
}

/// Geoid height at a location, interpolated from the surrounding grid samples.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoidSample {
    pub height_meters: f64,
    pub height_error_meters: f32,
    /// Half the spread of the enclosing cell's samples: the worst case error of reusing this
    /// sample anywhere in the cell.
    pub additional_error_meters: f32,
    pub expiration_distance_meters: f64,
}

/// Row-major grid of geoid heights, rows going north from `south_latitude` and columns going
/// east from `west_longitude`.
#[derive(Debug, Clone)]
pub struct GeoidGrid {
    south_latitude: f64,
    west_longitude: f64,
    spacing_degrees: f64,
    rows: usize,
    cols: usize,
    heights: Vec<f64>,
    height_error_meters: f32,
}

impl GeoidGrid {
    pub fn new(
        south_latitude: f64,
        west_longitude: f64,
        spacing_degrees: f64,
        cols: usize,
        heights: Vec<f64>,
        height_error_meters: f32,
    ) -> Result<Self, GeoidError> {
        if !(spacing_degrees.is_finite() && spacing_degrees > 0.0) {
            return Err(GeoidError::InvalidGrid("spacing must be positive"));
        }
        if cols < 2 || heights.len() % cols != 0 || heights.len() / cols < 2 {
            return Err(GeoidError::InvalidGrid("grid needs at least 2x2 complete rows"));
        }
        let rows = heights.len() / cols;
        Ok(Self {
            south_latitude,
            west_longitude,
            spacing_degrees,
            rows,
            cols,
            heights,
            height_error_meters,
        })
    }

    /// A 2x2 tile around the Big Island of Hawaii, used by the default altitude service.
    pub fn hawaii_tile() -> Self {
        Self {
            south_latitude: 19.44,
            west_longitude: -156.06,
            spacing_degrees: 0.18,
            rows: 2,
            cols: 2,
            heights: vec![17.6, 18.3, 18.2, 19.0],
            height_error_meters: 0.27,
        }
    }

    fn height(&self, row: usize, col: usize) -> f64 {
        self.heights[row * self.cols + col]
    }

    /// Bilinearly interpolates the geoid height at the given location.
    pub fn interpolate(&self, latitude: f64, longitude: f64) -> Result<GeoidSample, GeoidError> {
        if !(latitude.is_finite() && longitude.is_finite())
            || latitude.abs() > 90.0
            || longitude.abs() > 180.0
        {
            return Err(GeoidError::InvalidLocation { latitude, longitude });
        }
        let y = (latitude - self.south_latitude) / self.spacing_degrees;
        let x = (longitude - self.west_longitude) / self.spacing_degrees;
        let max_y = (self.rows - 1) as f64;
        let max_x = (self.cols - 1) as f64;
        let covers = |v: f64, max: f64| (-EDGE_TOLERANCE..=max + EDGE_TOLERANCE).contains(&v);
        if !covers(y, max_y) || !covers(x, max_x) {
            return Err(GeoidError::OutOfCoverage { latitude, longitude });
        }
        let y = y.clamp(0.0, max_y);
        let x = x.clamp(0.0, max_x);

        // Points on the north or east edge belong to the last cell.
        let row = (y.floor() as usize).min(self.rows - 2);
        let col = (x.floor() as usize).min(self.cols - 2);
        let fy = y - row as f64;
        let fx = x - col as f64;

        let corners = [
            self.height(row, col),
            self.height(row, col + 1),
            self.height(row + 1, col),
            self.height(row + 1, col + 1),
        ];
        let south = corners[0] * (1.0 - fx) + corners[1] * fx;
        let north = corners[2] * (1.0 - fx) + corners[3] * fx;
        let height_meters = south * (1.0 - fy) + north * fy;

        let min = corners.iter().copied().fold(f64::INFINITY, f64::min);
        let max = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(GeoidSample {
            height_meters,
            height_error_meters: self.height_error_meters,
            additional_error_meters: ((max - min) / 2.0) as f32,
            expiration_distance_meters: self.spacing_degrees * METERS_PER_DEGREE_LATITUDE / 2.0,
        })
    }
}
