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

//! `android.frameworks.automotive.display@1.0`: a window on the car display that vendor
//! processes can render into.

use hal_binder::{Interface, Result, Strong};

pub const DESCRIPTOR: &str = "android.frameworks.automotive.display@1.0::ICarWindowService";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferQuery {
    Width,
    Height,
    Format,
}

/// Producer side of the window's buffer queue.
pub trait IGraphicBufferProducer: Interface {
    fn query(&self, what: BufferQuery) -> Result<i32>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayInfo {
    pub width: u32,
    pub height: u32,
    pub refresh_rate_hz: f32,
}

pub trait ICarWindowService: Interface {
    /// Returns the producer for the window's buffers, if the window has a surface.
    fn get_graphic_buffer_producer(&self) -> Result<Option<Strong<dyn IGraphicBufferProducer>>>;

    /// Returns true if the window is now shown.
    fn show_window(&self) -> Result<bool>;

    /// Returns true if the window is now hidden.
    fn hide_window(&self) -> Result<bool>;

    fn get_display_info(&self) -> Result<DisplayInfo>;
}
