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

//! Stats HAL client: reports one canned `IStats` 1.0 event per flag.

use anyhow::{Context, Result};
use hal_binder::{instance_name, ServiceManager, Strong};
use hal_interfaces::stats::v1_0::{IStats, DESCRIPTOR};
use hal_services::{register_default_services, DEFAULT_INSTANCE};
use log::{error, warn, LevelFilter};
use vts_hal::stats_client::{expect_message, Args, HELP};

fn try_main() -> Result<()> {
    let events = Args::parse_events(std::env::args_os()).unwrap_or_else(|e| e.exit());
    vts_hal::logging::init("stats_client", LevelFilter::Info);

    let sm = ServiceManager::global();
    let _services =
        register_default_services(sm).context("Failed to register default services")?;
    let client: Strong<dyn IStats> = sm
        .get_interface(&instance_name(DESCRIPTOR, DEFAULT_INSTANCE))
        .context("No Stats HAL")?;

    let mut hal_calls = 0;
    for event in events {
        if let Err(e) = event.report(&*client) {
            warn!("Failed to report {event:?}: {e}");
        }
        print!("{}", expect_message(event.atom_id()));
        hal_calls += 1;
    }

    if hal_calls == 0 {
        print!("{HELP}");
    } else {
        println!("{hal_calls} HAL methods called.");
        println!("try: logcat | grep \"statsd.*0x1000\"");
    }
    Ok(())
}

fn main() {
    if let Err(e) = try_main() {
        error!("{:?}", e);
        eprintln!("{e:?}");
        std::process::exit(1)
    }
}
