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

//! Logger set up for the binaries.

use log::LevelFilter;

/// Routes the `log` facade to logcat on Android and to stderr elsewhere. On the host, `RUST_LOG`
/// overrides `level`.
pub fn init(tag: &'static str, level: LevelFilter) {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default().with_tag(tag).with_max_level(level),
    );

    #[cfg(not(target_os = "android"))]
    {
        use std::io::Write;

        // A second initialisation fails harmlessly.
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format(move |buf, record| {
                writeln!(buf, "{} {:5} {tag}: {}", buf.timestamp(), record.level(), record.args())
            })
            .try_init();
    }
}

/// Logs panics before the default hook prints them, so they end up next to the test output.
pub fn log_panics() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        log::error!("{panic_info}");
        default_hook(panic_info);
    }));
}
