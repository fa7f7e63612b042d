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

//! Parameterized test runner.
//!
//! A [`Suite`] is a list of test cases run once per declared instance of a service descriptor.
//! Test bodies return `anyhow::Result<()>`: an error is a fatal assertion that ends the case,
//! while [`Expectations`] collects non-fatal failures and lets the case carry on. A body may
//! return [`Skipped`] to skip the case for an instance.

use anyhow::{bail, Context, Result};
use callback_ack::NOTIFY_TIMEOUT;
use hal_binder::{instance_name, ProcessState, ServiceManager, Strong, GET_SERVICE_TIMEOUT};
use log::{debug, info, warn};
use std::fmt::{self, Display};
use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Returned by a test body that does not apply to the instance under test.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Skipped(pub String);

/// Non-fatal failures recorded while running one test case.
///
/// Clones share the same record, so an expectation handed to a callback object reports into the
/// case that created it.
#[derive(Clone, Debug, Default)]
pub struct Expectations {
    failures: Arc<Mutex<Vec<String>>>,
}

impl Expectations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure tagged with the caller's location unless `condition` holds. Returns
    /// `condition`.
    #[track_caller]
    pub fn expect(&self, condition: bool, what: impl Display) -> bool {
        if !condition {
            self.add_failure(Location::caller(), what);
        }
        condition
    }

    /// Records a failure unless `result` is `Ok`. Returns whether it was.
    #[track_caller]
    pub fn expect_ok<T, E: Display>(&self, result: &Result<T, E>, what: impl Display) -> bool {
        match result {
            Ok(_) => true,
            Err(e) => {
                self.add_failure(Location::caller(), format!("{what}: {e}"));
                false
            }
        }
    }

    fn add_failure(&self, location: &Location, what: impl Display) {
        let failure = format!("{}:{}: {what}", location.file(), location.line());
        warn!("Expectation failed: {failure}");
        self.failures.lock().unwrap().push(failure);
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.lock().unwrap().is_empty()
    }
}

/// Fails unless `actual` is within `tolerance` of `expected`.
pub fn ensure_near(actual: f64, expected: f64, tolerance: f64, what: &str) -> Result<()> {
    if (actual - expected).abs() > tolerance {
        bail!("{what} is {actual}, expected {expected} +/- {tolerance}");
    }
    Ok(())
}

/// Settings shared by every test case of a run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// How long fixtures wait for a callback.
    pub notify_timeout: Duration,
    /// How long set up waits for a declared service to be published.
    pub service_timeout: Duration,
    /// Only run against this instance, e.g. `default`.
    pub instance: Option<String>,
    /// Overrides each suite's dispatch thread count.
    pub thread_pool_size: Option<u32>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            notify_timeout: NOTIFY_TIMEOUT,
            service_timeout: GET_SERVICE_TIMEOUT,
            instance: None,
            thread_pool_size: None,
        }
    }
}

/// What a test body gets to work with.
pub struct TestContext<'a> {
    pub sm: &'a ServiceManager,
    pub config: &'a RunConfig,
    /// Full name of the service instance under test.
    pub service_name: String,
    pub expect: Expectations,
}

impl TestContext<'_> {
    /// Resolves the instance under test. A missing service fails the case.
    pub fn service<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Strong<T>> {
        self.sm
            .wait_for_interface(&self.service_name, self.config.service_timeout)
            .with_context(|| format!("Failed to get {}", self.service_name))
    }
}

pub type TestBody = fn(&TestContext) -> Result<()>;

pub struct TestCase {
    pub name: &'static str,
    pub body: TestBody,
}

/// Test cases run against every declared instance of `descriptor`.
pub struct Suite {
    /// Short name used to select the suite on the command line.
    pub key: &'static str,
    /// Instantiation prefix, e.g. `PerInstance`.
    pub prefix: &'static str,
    pub name: &'static str,
    pub descriptor: &'static str,
    /// Dispatch threads the suite's callbacks need.
    pub thread_pool_size: u32,
    pub cases: Vec<TestCase>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Passed,
    Failed(Vec<String>),
    Skipped(String),
}

#[derive(Clone, Debug)]
pub struct CaseResult {
    /// `<prefix>/<suite>.<case>/<instance>`, as printed by gtest.
    pub id: String,
    pub outcome: Outcome,
    pub duration: Duration,
}

impl Display for CaseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.duration.as_millis();
        match &self.outcome {
            Outcome::Passed => write!(f, "[       OK ] {} ({millis} ms)", self.id),
            Outcome::Skipped(reason) => {
                write!(f, "[  SKIPPED ] {} ({millis} ms): {reason}", self.id)
            }
            Outcome::Failed(failures) => {
                for failure in failures {
                    writeln!(f, "{failure}")?;
                }
                write!(f, "[  FAILED  ] {} ({millis} ms)", self.id)
            }
        }
    }
}

/// Turns a service instance name into a test name component.
pub fn print_instance_name_to_string(name: &str) -> String {
    name.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect()
}

impl Suite {
    /// Runs every case against every declared instance. A descriptor with no declared instance
    /// yields no results.
    pub fn run(&self, sm: &ServiceManager, config: &RunConfig) -> Vec<CaseResult> {
        let instances: Vec<String> = sm
            .get_declared_instances(self.descriptor)
            .into_iter()
            .filter(|instance| config.instance.as_ref().map_or(true, |only| only == instance))
            .collect();
        if instances.is_empty() {
            info!("{} is not instantiated: no {} declared", self.name, self.descriptor);
            return vec![];
        }

        let threads = config.thread_pool_size.unwrap_or(self.thread_pool_size);
        if !ProcessState::set_thread_pool_max_thread_count(threads) {
            debug!("Thread pool already running with {} threads", ProcessState::thread_pool_size());
        }
        ProcessState::start_thread_pool();

        let mut results = vec![];
        for instance in &instances {
            let service_name = instance_name(self.descriptor, instance);
            for case in &self.cases {
                results.push(self.run_case(case, sm, config, &service_name));
            }
        }
        results
    }

    fn run_case(
        &self,
        case: &TestCase,
        sm: &ServiceManager,
        config: &RunConfig,
        service_name: &str,
    ) -> CaseResult {
        let id = format!(
            "{}/{}.{}/{}",
            self.prefix,
            self.name,
            case.name,
            print_instance_name_to_string(service_name)
        );
        info!("[ RUN      ] {id}");
        let ctx = TestContext {
            sm,
            config,
            service_name: service_name.to_owned(),
            expect: Expectations::new(),
        };

        let start = Instant::now();
        let res = panic::catch_unwind(AssertUnwindSafe(|| (case.body)(&ctx)));
        let duration = start.elapsed();

        let mut failures = ctx.expect.failures();
        let outcome = match res {
            Ok(Ok(())) if failures.is_empty() => Outcome::Passed,
            Ok(Ok(())) => Outcome::Failed(failures),
            Ok(Err(e)) => match e.downcast_ref::<Skipped>() {
                Some(Skipped(reason)) if failures.is_empty() => Outcome::Skipped(reason.clone()),
                _ => {
                    failures.push(format!("{e:#}"));
                    Outcome::Failed(failures)
                }
            },
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "test panicked".to_owned());
                failures.push(message);
                Outcome::Failed(failures)
            }
        };
        CaseResult { id, outcome, duration }
    }
}

/// Results of a whole run.
#[derive(Debug, Default)]
pub struct Report {
    pub results: Vec<CaseResult>,
}

impl Report {
    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn passed(&self) -> usize {
        self.count(|o| *o == Outcome::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[==========] {} tests ran.", self.results.len())?;
        writeln!(f, "[  PASSED  ] {} tests.", self.passed())?;
        if self.skipped() > 0 {
            writeln!(f, "[  SKIPPED ] {} tests.", self.skipped())?;
        }
        if self.failed() > 0 {
            writeln!(f, "[  FAILED  ] {} tests, listed below:", self.failed())?;
            for result in &self.results {
                if matches!(result.outcome, Outcome::Failed(_)) {
                    writeln!(f, "[  FAILED  ] {}", result.id)?;
                }
            }
        }
        Ok(())
    }
}

/// Runs `suites` and collects their results.
pub fn run_suites(suites: &[Suite], sm: &ServiceManager, config: &RunConfig) -> Report {
    Report { results: suites.iter().flat_map(|suite| suite.run(sm, config)).collect() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::ensure;
    use hal_binder::Interface;

    trait IPing: Interface {
        fn ping(&self) -> i32;
    }

    struct Ping;

    impl Interface for Ping {}

    impl IPing for Ping {
        fn ping(&self) -> i32 {
            7
        }
    }

    const DESCRIPTOR: &str = "test.IPing";

    fn sm_with_instances(instances: &[&str]) -> ServiceManager {
        let sm = ServiceManager::new();
        for instance in instances {
            let ping: Arc<dyn IPing> = Arc::new(Ping);
            sm.add_service(&instance_name(DESCRIPTOR, instance), Strong::new(ping)).unwrap();
        }
        sm
    }

    fn suite(cases: Vec<TestCase>) -> Suite {
        Suite {
            key: "ping",
            prefix: "PerInstance",
            name: "PingTest",
            descriptor: DESCRIPTOR,
            thread_pool_size: 1,
            cases,
        }
    }

    fn passes(ctx: &TestContext) -> Result<()> {
        let service: Strong<dyn IPing> = ctx.service()?;
        ensure!(service.ping() == 7);
        Ok(())
    }

    fn expects_twice(ctx: &TestContext) -> Result<()> {
        ctx.expect.expect(false, "first");
        ctx.expect.expect_ok(&Err::<(), _>("boom"), "second");
        Ok(())
    }

    fn asserts(_: &TestContext) -> Result<()> {
        bail!("fatal")
    }

    fn skips(_: &TestContext) -> Result<()> {
        Err(Skipped("not supported".into()).into())
    }

    fn panics(_: &TestContext) -> Result<()> {
        panic!("kaboom")
    }

    fn case(name: &'static str, body: TestBody) -> TestCase {
        TestCase { name, body }
    }

    #[test]
    fn runs_each_case_per_instance() {
        let sm = sm_with_instances(&["a", "b"]);
        let results = suite(vec![case("Passes", passes)]).run(&sm, &RunConfig::default());

        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["PerInstance/PingTest.Passes/test_IPing_a", "PerInstance/PingTest.Passes/test_IPing_b"]);
        assert!(results.iter().all(|r| r.outcome == Outcome::Passed));
    }

    #[test]
    fn instance_filter_limits_run() {
        let sm = sm_with_instances(&["a", "b"]);
        let config = RunConfig { instance: Some("b".into()), ..Default::default() };
        let results = suite(vec![case("Passes", passes)]).run(&sm, &config);
        assert_eq!(results.len(), 1);
        assert!(results[0].id.ends_with("_b"));
    }

    #[test]
    fn uninstantiated_suite_is_empty() {
        let sm = ServiceManager::new();
        assert!(suite(vec![case("Passes", passes)]).run(&sm, &RunConfig::default()).is_empty());
    }

    #[test]
    fn outcomes() {
        let sm = sm_with_instances(&["default"]);
        let cases = vec![
            case("ExpectsTwice", expects_twice),
            case("Asserts", asserts),
            case("Skips", skips),
            case("Panics", panics),
        ];
        let report = run_suites(&[suite(cases)], &sm, &RunConfig::default());

        let outcomes: Vec<_> = report.results.iter().map(|r| r.outcome.clone()).collect();
        match &outcomes[0] {
            Outcome::Failed(failures) => {
                assert_eq!(failures.len(), 2);
                assert!(failures[0].ends_with(": first"), "{failures:?}");
                assert!(failures[1].ends_with(": second: boom"), "{failures:?}");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(outcomes[1], Outcome::Failed(vec!["fatal".into()]));
        assert_eq!(outcomes[2], Outcome::Skipped("not supported".into()));
        assert_eq!(outcomes[3], Outcome::Failed(vec!["kaboom".into()]));

        assert_eq!((report.passed(), report.failed(), report.skipped()), (0, 3, 1));
        assert!(!report.all_passed());
        assert!(report.to_string().contains("[  FAILED  ] PerInstance/PingTest.Asserts/"));
    }

    #[test]
    fn missing_service_fails_set_up() {
        let sm = ServiceManager::new();
        let config = RunConfig { service_timeout: Duration::from_millis(10), ..Default::default() };
        let ctx = TestContext {
            sm: &sm,
            config: &config,
            service_name: instance_name(DESCRIPTOR, "default"),
            expect: Expectations::new(),
        };
        assert!(passes(&ctx).is_err());
    }

    #[test]
    fn near() {
        assert!(ensure_near(-19.0, -19.2359, 2.0, "altitude").is_ok());
        assert!(ensure_near(1.0, 10.0, 1.0, "altitude").is_err());
    }

    #[test]
    fn sanitizes_instance_names() {
        assert_eq!(
            print_instance_name_to_string("android.frameworks.stats@1.0::IStats/default"),
            "android_frameworks_stats_1_0__IStats_default"
        );
    }
}
