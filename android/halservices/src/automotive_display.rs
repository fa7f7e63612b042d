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

//! Implementation of ICarWindowService for a single fixed size display.

use hal_binder::{ExceptionCode, Interface, IntoBinderResult, Result, Strong};
use hal_interfaces::automotive_display::{
    BufferQuery, DisplayInfo, ICarWindowService, IGraphicBufferProducer,
};
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// `HAL_PIXEL_FORMAT_RGBA_8888`.
const PIXEL_FORMAT_RGBA_8888: i32 = 1;

struct BufferProducer {
    width: u32,
    height: u32,
}

impl Interface for BufferProducer {}

impl IGraphicBufferProducer for BufferProducer {
    fn query(&self, what: BufferQuery) -> Result<i32> {
        match what {
            BufferQuery::Width => {
                i32::try_from(self.width).or_binder_exception(ExceptionCode::IllegalState)
            }
            BufferQuery::Height => {
                i32::try_from(self.height).or_binder_exception(ExceptionCode::IllegalState)
            }
            BufferQuery::Format => Ok(PIXEL_FORMAT_RGBA_8888),
        }
    }
}

pub struct CarWindowService {
    info: DisplayInfo,
    producer: Strong<dyn IGraphicBufferProducer>,
    visible: AtomicBool,
}

impl CarWindowService {
    pub fn new(info: DisplayInfo) -> Arc<Self> {
        let producer: Arc<dyn IGraphicBufferProducer> =
            Arc::new(BufferProducer { width: info.width, height: info.height });
        Arc::new(Self { info, producer: Strong::new(producer), visible: AtomicBool::new(false) })
    }

    pub fn as_binder(self: &Arc<Self>) -> Strong<dyn ICarWindowService> {
        let service: Arc<dyn ICarWindowService> = self.clone();
        Strong::new(service)
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

impl Interface for CarWindowService {}

impl ICarWindowService for CarWindowService {
    fn get_graphic_buffer_producer(&self) -> Result<Option<Strong<dyn IGraphicBufferProducer>>> {
        Ok(Some(self.producer.clone()))
    }

    fn show_window(&self) -> Result<bool> {
        info!("Showing car window");
        self.visible.store(true, Ordering::SeqCst);
        Ok(true)
    }

    fn hide_window(&self) -> Result<bool> {
        info!("Hiding car window");
        self.visible.store(false, Ordering::SeqCst);
        Ok(true)
    }

    fn get_display_info(&self) -> Result<DisplayInfo> {
        Ok(self.info.clone())
    }
}
