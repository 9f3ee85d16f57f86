//! The spec catalogue.
//!
//! Each [`SpecCase`] names one end-to-end scenario and points at the
//! feature helper that runs it. Specs are grouped into suites (one per
//! admin area, plus `auth`) and the quick ones are tagged `smoke`.

use crate::context::TestContext;
use crate::features::{
    attendance, dashboard, donations, forms, groups, people, plans, profile, reports, settings,
    tasks, FeatureOutcome,
};
use crate::helpers::auth::is_login_url;
use crate::helpers::generic::expect_url;
use crate::page_object::UrlPattern;
use crate::result::{HarnessError, HarnessResult};
use futures::future::BoxFuture;

/// Person expected in the demo data
pub const SEED_PERSON: &str = "Dorothy Jackson";

/// Fund created by the funds spec
pub const NEW_FUND: &str = "Octavian Fund";

/// Names typed into the people search sweep
pub const SEARCH_TERMS: [&str; 4] = ["Dorothy", "Jackson", "Smith", "zzz-no-match"];

/// Suite of sign-in specs
pub const AUTH_SUITE: &str = "auth";

/// Boxed spec body
pub type SpecFn = fn(TestContext) -> BoxFuture<'static, HarnessResult<FeatureOutcome>>;

/// One runnable spec
#[derive(Clone, Copy)]
pub struct SpecCase {
    /// Unique name, `suite::scenario`
    pub name: &'static str,
    /// Suite it belongs to
    pub suite: &'static str,
    /// Part of the quick smoke run
    pub smoke: bool,
    /// Scenario body
    pub run: SpecFn,
}

impl SpecCase {
    /// Whether the case belongs to `suite` (`smoke` selects tagged cases)
    #[must_use]
    pub fn in_suite(&self, suite: &str) -> bool {
        self.suite == suite || (suite == "smoke" && self.smoke)
    }
}

impl std::fmt::Debug for SpecCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecCase")
            .field("name", &self.name)
            .field("suite", &self.suite)
            .field("smoke", &self.smoke)
            .finish_non_exhaustive()
    }
}

/// The full catalogue, filterable by suite and name
#[derive(Debug, Clone)]
pub struct SpecRegistry {
    cases: Vec<SpecCase>,
}

impl Default for SpecRegistry {
    fn default() -> Self {
        Self::catalogue()
    }
}

impl SpecRegistry {
    /// Registry over an explicit set of cases
    #[must_use]
    pub fn new(cases: Vec<SpecCase>) -> Self {
        Self { cases }
    }

    /// Every built-in spec
    #[must_use]
    pub fn catalogue() -> Self {
        Self::new(catalogue())
    }

    /// All cases in catalogue order
    #[must_use]
    pub fn cases(&self) -> &[SpecCase] {
        &self.cases
    }

    /// Suite names, in first-seen order
    #[must_use]
    pub fn suites(&self) -> Vec<&'static str> {
        let mut suites: Vec<&'static str> = Vec::new();
        for case in &self.cases {
            if !suites.contains(&case.suite) {
                suites.push(case.suite);
            }
        }
        suites
    }

    /// Case by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SpecCase> {
        self.cases.iter().find(|c| c.name == name)
    }

    /// Cases in `suite` whose name contains `filter`
    #[must_use]
    pub fn select(&self, suite: Option<&str>, filter: Option<&str>) -> Vec<SpecCase> {
        self.cases
            .iter()
            .filter(|c| suite.map_or(true, |s| c.in_suite(s)))
            .filter(|c| filter.map_or(true, |f| c.name.contains(f)))
            .copied()
            .collect()
    }
}

async fn login_leaves_login_screen(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    ctx.login().await?;
    let url = ctx.page().url().await?;
    if is_login_url(&url) {
        return Err(HarnessError::assertion(format!("still on login at {url}")));
    }
    Ok(FeatureOutcome::Completed)
}

async fn navigate_twice(ctx: &TestContext, path: &str) -> HarnessResult<FeatureOutcome> {
    for _ in 0..2 {
        match ctx.navigate(path).await {
            Err(e) if e.is_session_expired() => {
                return Ok(FeatureOutcome::Degraded {
                    reason: format!("{path} not accessible"),
                })
            }
            other => other?,
        }
        expect_url(ctx.page(), &UrlPattern::exact(path)).await?;
    }
    Ok(FeatureOutcome::Completed)
}

async fn session_persists(ctx: &TestContext, paths: &[&str]) -> HarnessResult<FeatureOutcome> {
    ctx.login().await?;
    let signed_in_at = ctx.page().url().await?;
    for path in paths {
        ctx.page().goto(path).await?;
        let url = ctx.page().url().await?;
        if is_login_url(&url) {
            return Err(HarnessError::assertion(format!(
                "login form shown again at {path} after signing in at {signed_in_at}"
            )));
        }
    }
    Ok(FeatureOutcome::Completed)
}

fn catalogue() -> Vec<SpecCase> {
    vec![
        SpecCase {
            name: "auth::login_and_select_church",
            suite: AUTH_SUITE,
            smoke: true,
            run: |ctx| Box::pin(async move { login_leaves_login_screen(&ctx).await }),
        },
        SpecCase {
            name: "auth::navigate_directly_twice",
            suite: AUTH_SUITE,
            smoke: false,
            run: |ctx| Box::pin(async move { navigate_twice(&ctx, "/people").await }),
        },
        SpecCase {
            name: "auth::session_persists",
            suite: AUTH_SUITE,
            smoke: false,
            run: |ctx| Box::pin(async move { session_persists(&ctx, &["/", "/people", "/profile"]).await }),
        },
        SpecCase {
            name: "dashboard::display",
            suite: "dashboard",
            smoke: true,
            run: |ctx| Box::pin(async move { dashboard::display(&ctx).await }),
        },
        SpecCase {
            name: "dashboard::search_and_open_person",
            suite: "dashboard",
            smoke: true,
            run: |ctx| Box::pin(async move { dashboard::search_and_open_person(&ctx, SEED_PERSON).await }),
        },
        SpecCase {
            name: "people::display",
            suite: "people",
            smoke: true,
            run: |ctx| Box::pin(async move { people::display(&ctx).await }),
        },
        SpecCase {
            name: "people::via_dashboard",
            suite: "people",
            smoke: false,
            run: |ctx| Box::pin(async move { people::via_dashboard(&ctx).await }),
        },
        SpecCase {
            name: "people::search_sweep",
            suite: "people",
            smoke: false,
            run: |ctx| Box::pin(async move { people::search_sweep(&ctx, &SEARCH_TERMS).await }),
        },
        SpecCase {
            name: "people::open_person",
            suite: "people",
            smoke: false,
            run: |ctx| Box::pin(async move { people::open_person(&ctx, SEED_PERSON).await }),
        },
        SpecCase {
            name: "people::crud",
            suite: "people",
            smoke: false,
            run: |ctx| Box::pin(async move { people::crud(&ctx, "Test", "Person").await }),
        },
        SpecCase {
            name: "groups::display",
            suite: "groups",
            smoke: true,
            run: |ctx| Box::pin(async move { groups::display(&ctx).await }),
        },
        SpecCase {
            name: "groups::search",
            suite: "groups",
            smoke: false,
            run: |ctx| Box::pin(async move { groups::search(&ctx, "Youth").await }),
        },
        SpecCase {
            name: "groups::open_first",
            suite: "groups",
            smoke: false,
            run: |ctx| Box::pin(async move { groups::open_first(&ctx).await }),
        },
        SpecCase {
            name: "groups::crud",
            suite: "groups",
            smoke: false,
            run: |ctx| Box::pin(async move { groups::crud(&ctx, "Test Category", "Test Group").await }),
        },
        SpecCase {
            name: "groups::members",
            suite: "groups",
            smoke: false,
            run: |ctx| Box::pin(async move { groups::members(&ctx, "Youth Group", SEED_PERSON).await }),
        },
        SpecCase {
            name: "donations::display_batches",
            suite: "donations",
            smoke: true,
            run: |ctx| Box::pin(async move { donations::display_batches(&ctx).await }),
        },
        SpecCase {
            name: "donations::add_batch",
            suite: "donations",
            smoke: false,
            run: |ctx| Box::pin(async move { donations::add_batch(&ctx, "Test Batch").await }),
        },
        SpecCase {
            name: "donations::display_funds",
            suite: "donations",
            smoke: false,
            run: |ctx| Box::pin(async move { donations::display_funds(&ctx).await }),
        },
        SpecCase {
            name: "donations::create_non_deductible_fund",
            suite: "donations",
            smoke: false,
            run: |ctx| Box::pin(async move { donations::create_fund(&ctx, NEW_FUND, false).await }),
        },
        SpecCase {
            name: "donations::fund_crud",
            suite: "donations",
            smoke: false,
            run: |ctx| Box::pin(async move { donations::fund_crud(&ctx, "Test Fund").await }),
        },
        SpecCase {
            name: "forms::display",
            suite: "forms",
            smoke: true,
            run: |ctx| Box::pin(async move { forms::display(&ctx).await }),
        },
        SpecCase {
            name: "forms::open_first",
            suite: "forms",
            smoke: false,
            run: |ctx| Box::pin(async move { forms::open_first(&ctx).await }),
        },
        SpecCase {
            name: "forms::crud",
            suite: "forms",
            smoke: false,
            run: |ctx| Box::pin(async move { forms::crud(&ctx, "Test Form", "Favorite hymn?").await }),
        },
        SpecCase {
            name: "plans::display",
            suite: "plans",
            smoke: true,
            run: |ctx| Box::pin(async move { plans::display(&ctx).await }),
        },
        SpecCase {
            name: "plans::open_first",
            suite: "plans",
            smoke: false,
            run: |ctx| Box::pin(async move { plans::open_first(&ctx).await }),
        },
        SpecCase {
            name: "plans::build_plan",
            suite: "plans",
            smoke: false,
            run: |ctx| {
                Box::pin(async move { plans::build_plan(&ctx, "Test Ministry", "Sunday Service", "Greeter").await })
            },
        },
        SpecCase {
            name: "settings::display",
            suite: "settings",
            smoke: true,
            run: |ctx| Box::pin(async move { settings::display(&ctx).await }),
        },
        SpecCase {
            name: "settings::open_first_role",
            suite: "settings",
            smoke: false,
            run: |ctx| Box::pin(async move { settings::open_first_role(&ctx).await }),
        },
        SpecCase {
            name: "settings::role_members",
            suite: "settings",
            smoke: false,
            run: |ctx| {
                Box::pin(async move { settings::role_members(&ctx, "Test Role", SEED_PERSON, "Edit People").await })
            },
        },
        SpecCase {
            name: "tasks::display",
            suite: "tasks",
            smoke: true,
            run: |ctx| Box::pin(async move { tasks::display(&ctx).await }),
        },
        SpecCase {
            name: "tasks::add_task",
            suite: "tasks",
            smoke: false,
            run: |ctx| Box::pin(async move { tasks::add_task(&ctx, "Follow up with visitor").await }),
        },
        SpecCase {
            name: "tasks::display_automations",
            suite: "tasks",
            smoke: false,
            run: |ctx| Box::pin(async move { tasks::display_automations(&ctx).await }),
        },
        SpecCase {
            name: "tasks::add_automation",
            suite: "tasks",
            smoke: false,
            run: |ctx| Box::pin(async move { tasks::add_automation(&ctx, "Welcome new members").await }),
        },
        SpecCase {
            name: "profile::display",
            suite: "profile",
            smoke: true,
            run: |ctx| Box::pin(async move { profile::display(&ctx).await }),
        },
        SpecCase {
            name: "profile::update_name",
            suite: "profile",
            smoke: false,
            run: |ctx| Box::pin(async move { profile::update_name(&ctx, "Demo", "User").await }),
        },
        SpecCase {
            name: "profile::display_devices",
            suite: "profile",
            smoke: false,
            run: |ctx| Box::pin(async move { profile::display_devices(&ctx).await }),
        },
        SpecCase {
            name: "profile::pair_device",
            suite: "profile",
            smoke: false,
            run: |ctx| Box::pin(async move { profile::pair_device(&ctx, "ABC123").await }),
        },
        SpecCase {
            name: "reports::display",
            suite: "reports",
            smoke: true,
            run: |ctx| Box::pin(async move { reports::display(&ctx).await }),
        },
        SpecCase {
            name: "reports::birthdays",
            suite: "reports",
            smoke: false,
            run: |ctx| Box::pin(async move { reports::run_report(&ctx, "birthdays").await }),
        },
        SpecCase {
            name: "attendance::tabs",
            suite: "attendance",
            smoke: true,
            run: |ctx| Box::pin(async move { attendance::tabs(&ctx).await }),
        },
        SpecCase {
            name: "attendance::add_campus",
            suite: "attendance",
            smoke: false,
            run: |ctx| Box::pin(async move { attendance::add_campus(&ctx, "North Campus").await }),
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::features::Feature;
    use std::collections::HashSet;

    mod catalogue_tests {
        use super::*;

        #[test]
        fn test_names_are_unique_and_prefixed() {
            let registry = SpecRegistry::catalogue();
            let names: HashSet<&str> = registry.cases().iter().map(|c| c.name).collect();
            assert_eq!(names.len(), registry.cases().len());
            for case in registry.cases() {
                assert!(case.name.starts_with(&format!("{}::", case.suite)), "{}", case.name);
            }
        }

        #[test]
        fn test_every_suite_has_a_smoke_case() {
            let registry = SpecRegistry::catalogue();
            for suite in registry.suites() {
                assert!(
                    registry.select(Some(suite), None).iter().any(|c| c.smoke),
                    "{suite} has no smoke case"
                );
            }
        }

        #[test]
        fn test_suites_cover_feature_areas() {
            let suites = SpecRegistry::catalogue().suites();
            for feature in [Feature::People, Feature::Groups, Feature::Donations, Feature::Reports] {
                assert!(suites.contains(&feature.label()));
            }
            assert_eq!(suites[0], AUTH_SUITE);
        }
    }

    mod select_tests {
        use super::*;

        #[test]
        fn test_select_by_suite_and_filter() {
            let registry = SpecRegistry::catalogue();
            let funds = registry.select(Some("donations"), Some("fund"));
            assert!(funds.iter().all(|c| c.suite == "donations" && c.name.contains("fund")));
            assert!(funds.iter().any(|c| c.name == "donations::create_non_deductible_fund"));
        }

        #[test]
        fn test_smoke_spans_suites() {
            let registry = SpecRegistry::catalogue();
            let smoke = registry.select(Some("smoke"), None);
            assert!(smoke.iter().all(|c| c.smoke));
            assert_eq!(smoke.len(), registry.suites().len() + 1);
        }

        #[test]
        fn test_unknown_suite_is_empty() {
            assert!(SpecRegistry::catalogue().select(Some("nope"), None).is_empty());
            assert!(SpecRegistry::catalogue().get("people::crud").is_some());
        }
    }

    mod spawn_tests {
        use super::*;
        use crate::config::{HarnessConfig, Timeouts};
        use crate::driver::DriverFactory;
        use crate::page::Page;
        use crate::simulated::SimulatedChms;

        #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
        async fn test_every_case_runs_on_a_spawned_task() {
            let sim = SimulatedChms::new();
            let config = HarnessConfig::default().with_timeouts(Timeouts::fast());
            for case in SpecRegistry::catalogue().cases() {
                let driver = sim.factory().new_driver().await.unwrap();
                let ctx = TestContext::new(Page::new(driver, config.clone()), case.name);
                let outcome = tokio::spawn((case.run)(ctx)).await.unwrap();
                assert!(outcome.is_ok(), "{}: {:?}", case.name, outcome.err());
            }
        }
    }
}
