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

//! Registry of named service instances.
//!
//! Services are published as `<descriptor>/<instance>`, e.g.
//! `android.frameworks.devicestate.IDeviceStateService/default`, and looked up by the interface
//! they were published with.

use crate::strong::Strong;
use log::{debug, info};
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::{Arc, Condvar, LazyLock, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;

/// How long [`ServiceManager::get_interface`] waits for a service that is not yet published.
pub const GET_SERVICE_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors returned by service lookups and publication.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("service {0} is not registered")]
    NameNotFound(String),
    #[error("service {0} was registered with a different interface")]
    WrongInterface(String),
    #[error("service {0} is already registered")]
    AlreadyRegistered(String),
    #[error("timed out after {timeout:?} waiting for service {name}")]
    TimedOut { name: String, timeout: Duration },
}

type Entry = Arc<dyn Any + Send + Sync>;

/// A set of published services.
#[derive(Default)]
pub struct ServiceManager {
    services: Mutex<BTreeMap<String, Entry>>,
    published: Condvar,
}

static GLOBAL: LazyLock<ServiceManager> = LazyLock::new(ServiceManager::default);

/// Returns the full service name for `instance` of `descriptor`.
pub fn instance_name(descriptor: &str, instance: &str) -> String {
    format!("{descriptor}/{instance}")
}

impl ServiceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process wide registry used by the free functions of this module.
    pub fn global() -> &'static ServiceManager {
        &GLOBAL
    }

    /// Publishes `service` under `name`.
    pub fn add_service<T>(&self, name: &str, service: Strong<T>) -> Result<(), ServiceError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut services = self.services.lock().unwrap();
        if services.contains_key(name) {
            return Err(ServiceError::AlreadyRegistered(name.to_owned()));
        }
        services.insert(name.to_owned(), Arc::new(service));
        self.published.notify_all();
        info!("Registered service {name}");
        Ok(())
    }

    /// Looks up `name` without waiting.
    pub fn check_interface<T>(&self, name: &str) -> Result<Strong<T>, ServiceError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let services = self.services.lock().unwrap();
        let entry = services.get(name).ok_or_else(|| ServiceError::NameNotFound(name.to_owned()))?;
        Self::downcast(name, entry)
    }

    /// Looks up `name`, waiting up to [`GET_SERVICE_TIMEOUT`] for it to be published.
    pub fn get_interface<T>(&self, name: &str) -> Result<Strong<T>, ServiceError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.wait_for_interface(name, GET_SERVICE_TIMEOUT)
    }

    /// Looks up `name`, blocking until it is published or `timeout` has elapsed.
    pub fn wait_for_interface<T>(
        &self,
        name: &str,
        timeout: Duration,
    ) -> Result<Strong<T>, ServiceError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let deadline = Instant::now() + timeout;
        let mut services = self.services.lock().unwrap();
        loop {
            if let Some(entry) = services.get(name) {
                return Self::downcast(name, entry);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(ServiceError::TimedOut { name: name.to_owned(), timeout });
            }
            debug!("Waiting for service {name}");
            services = self.published.wait_timeout(services, remaining).unwrap().0;
        }
    }

    /// Returns true if a service is published under `name`.
    pub fn is_declared(&self, name: &str) -> bool {
        self.services.lock().unwrap().contains_key(name)
    }

    /// Returns the instance names published for `descriptor`, in sorted order.
    pub fn get_declared_instances(&self, descriptor: &str) -> Vec<String> {
        let prefix = format!("{descriptor}/");
        self.services
            .lock()
            .unwrap()
            .keys()
            .filter_map(|name| name.strip_prefix(&prefix))
            .map(str::to_owned)
            .collect()
    }

    fn downcast<T>(name: &str, entry: &Entry) -> Result<Strong<T>, ServiceError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        entry
            .downcast_ref::<Strong<T>>()
            .cloned()
            .ok_or_else(|| ServiceError::WrongInterface(name.to_owned()))
    }
}
