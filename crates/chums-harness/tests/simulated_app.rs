//! End-to-end behaviour of the harness against the simulated ChuMS app.
//!
//! Every scenario here drives real page objects and feature helpers through
//! `MockDriver`, so no browser is needed.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chums_harness::config::Timeouts;
use chums_harness::features::{
    attendance, dashboard, donations, forms, groups, people, plans, profile, reports, settings,
    tasks, FeatureOutcome,
};
use chums_harness::prelude::*;
use chums_harness::report::SpecStatus;
use chums_harness::specs::{NEW_FUND, SEED_PERSON};
use chums_harness::{DriverFactory, HarnessConfig, SimulatedChms, SpecRunner};
use std::sync::Arc;

fn config() -> HarnessConfig {
    HarnessConfig::default().with_timeouts(Timeouts::fast())
}

async fn context(sim: &SimulatedChms) -> TestContext {
    let driver = sim.factory().new_driver().await.unwrap();
    TestContext::new(Page::new(driver, config()), "simulated")
}

// ============================================================================
// Missing controls and gated features
// ============================================================================

#[tokio::test]
async fn test_absent_control_returns_false() {
    let ctx = context(&SimulatedChms::new().empty()).await;
    ctx.navigate("/people").await.unwrap();

    let people = PeoplePage::new(ctx.page().clone());
    assert!(!people.click_first_person().await.unwrap());
    assert!(!people.click_person(SEED_PERSON).await.unwrap());
    assert!(ctx.page().find(&button("Launch Rocket")).await.is_none());
}

macro_rules! assert_absent {
    ($($action:expr),+ $(,)?) => {
        $(
            assert!(
                !$action.await.unwrap(),
                "{} acted on a blank screen",
                stringify!($action)
            );
        )+
    };
}

#[tokio::test]
async fn test_every_page_object_tolerates_a_blank_screen() {
    let ctx = context(&SimulatedChms::new()).await;
    ctx.page().goto("/maintenance").await.unwrap();
    let page = ctx.page();

    let attendance = AttendancePage::new(page.clone());
    let automations = AutomationsPage::new(page.clone());
    let dashboard = DashboardPage::new(page.clone());
    let devices = DevicesPage::new(page.clone());
    let donations = DonationsPage::new(page.clone());
    let form = FormDetailsPage::new(page.clone());
    let forms = FormsPage::new(page.clone());
    let funds = FundsPage::new(page.clone());
    let group = GroupDetailsPage::new(page.clone());
    let groups = GroupsPage::new(page.clone());
    let login = LoginPage::new(page.clone());
    let ministry = MinistryPage::new(page.clone());
    let people = PeoplePage::new(page.clone());
    let person = PersonPage::new(page.clone());
    let plan = PlanPage::new(page.clone());
    let plans = PlansPage::new(page.clone());
    let profile = ProfilePage::new(page.clone());
    let report = ReportPage::new(page.clone());
    let reports = ReportsPage::new(page.clone());
    let role = RolePage::new(page.clone());
    let settings = SettingsPage::new(page.clone());
    let tasks = TasksPage::new(page.clone());

    assert_absent!(
        attendance.open_tab("Setup"),
        attendance.add_campus("North Campus"),
        automations.add_automation("Weekly follow-up"),
        automations.click_first_automation(),
        dashboard.search_people("Dorothy"),
        dashboard.click_result(SEED_PERSON),
        devices.pair_device("123456"),
        donations.add_batch("Sunday Offering"),
        donations.click_first_batch(),
        form.open_questions(),
        form.add_question("Favourite hymn"),
        form.edit_form_name("Visitor Card"),
        form.delete_form(),
        forms.add_form("Visitor Card"),
        forms.click_first_form(),
        forms.open_archived(),
        funds.add_fund(NEW_FUND, true),
        funds.rename_fund("General Fund", NEW_FUND),
        funds.delete_fund("General Fund"),
        group.open_members_tab(),
        group.add_member(SEED_PERSON),
        group.remove_first_member(),
        group.delete_group(),
        groups.search_groups("Youth"),
        groups.click_first_group(),
        groups.add_group("Youth", "Youth Group"),
        login.wait_for_church_choice(),
        login.select_church("Grace Community Church"),
        ministry.click_first_plan(),
        ministry.add_plan("Sunday Service"),
        people.search_people("Dorothy"),
        people.click_first_person(),
        people.add_person("Test", "Person", "test@example.com"),
        person.edit_person(),
        person.update_name("Dot", "Jackson"),
        person.delete_person(),
        person.remove_household_member(),
        plan.add_position("Usher"),
        plan.open_service_order(),
        plans.click_first_ministry(),
        plans.add_ministry("Worship"),
        profile.update_name("Demo", "User"),
        report.run_report(),
        reports.open_report("attendanceTrend"),
        reports.click_first_report(),
        role.add_member(SEED_PERSON),
        role.remove_first_member(),
        role.set_permission("Edit People", true),
        settings.click_first_role(),
        settings.add_role("Greeters"),
        settings.edit_church_settings(),
        tasks.add_task("Call Dorothy"),
        tasks.click_first_task(),
        tasks.show_closed(),
    );
}

/// A scenario whose first step opens `feature`'s own screen
async fn scenario_rooted_at(ctx: &TestContext, feature: Feature) -> HarnessResult<FeatureOutcome> {
    match feature {
        Feature::Dashboard => dashboard::display(ctx).await,
        Feature::People => people::display(ctx).await,
        Feature::Groups => groups::display(ctx).await,
        Feature::Donations => donations::display_batches(ctx).await,
        Feature::Funds => donations::create_fund(ctx, NEW_FUND, true).await,
        Feature::Forms => forms::display(ctx).await,
        Feature::Plans => plans::display(ctx).await,
        Feature::Settings => settings::display(ctx).await,
        Feature::Tasks => tasks::display(ctx).await,
        Feature::Automations => tasks::add_automation(ctx, "Weekly follow-up").await,
        Feature::Profile => profile::display(ctx).await,
        Feature::Devices => profile::pair_device(ctx, "123456").await,
        Feature::Reports => reports::display(ctx).await,
        Feature::Attendance => attendance::tabs(ctx).await,
    }
}

#[tokio::test]
async fn test_every_gated_feature_is_not_accessible() {
    for feature in Feature::ALL {
        let ctx = context(&SimulatedChms::new().forbid(feature.path())).await;
        let result = scenario_rooted_at(&ctx, feature).await;

        if feature == Feature::Dashboard {
            // signing in lands on the dashboard, so gating it means sign-in never completes
            let err = result.unwrap_err();
            assert!(err.to_string().contains("login screen"), "got {err}");
            continue;
        }
        let outcome = result.unwrap();
        assert_eq!(
            outcome,
            FeatureOutcome::NotAccessible { feature },
            "{feature} at {}",
            feature.path()
        );
    }
}

#[tokio::test]
async fn test_gated_feature_is_not_accessible() {
    let ctx = context(&SimulatedChms::new().forbid("/groups")).await;
    let outcome = groups::display(&ctx).await.unwrap();
    assert!(outcome.is_not_accessible(), "got {outcome}");
}

#[tokio::test]
async fn test_gated_path_raises_session_expired() {
    let ctx = context(&SimulatedChms::new().forbid("/donations/funds")).await;
    let err = navigate_directly(ctx.page(), "/donations/funds").await.unwrap_err();
    assert!(err.is_session_expired());
}

// ============================================================================
// Navigation and session
// ============================================================================

#[tokio::test]
async fn test_navigate_directly_twice_stays_on_path() {
    let ctx = context(&SimulatedChms::new()).await;
    for _ in 0..2 {
        navigate_directly(ctx.page(), "/groups").await.unwrap();
        assert_eq!(ctx.page().path().await.unwrap(), "/groups");
    }
}

#[tokio::test]
async fn test_login_then_navigation_never_shows_login() {
    let ctx = context(&SimulatedChms::new()).await;
    login_and_select_church(ctx.page()).await.unwrap();

    for path in ["/people", "/donations/funds", "/settings", "/profile/devices"] {
        navigate_directly(ctx.page(), path).await.unwrap();
        let url = ctx.page().url().await.unwrap();
        assert!(!is_login_url(&url), "{path} showed login at {url}");
        let login = LoginPage::new(ctx.page().clone());
        assert!(!ctx.page().is_visible(&login.email_input).await.unwrap());
    }
}

#[tokio::test]
async fn test_login_leaves_login_screen() {
    let ctx = context(&SimulatedChms::new()).await;
    ctx.login().await.unwrap();
    assert!(!is_login_url(&ctx.page().url().await.unwrap()));
}

#[tokio::test]
async fn test_login_with_unknown_church_fails() {
    let sim = SimulatedChms::new().with_churches(&["Hillside Chapel"]);
    let ctx = context(&sim).await;
    let err = ctx.login().await.unwrap_err();
    assert!(err.to_string().contains("not offered"), "got {err}");
}

// ============================================================================
// Empty application
// ============================================================================

#[tokio::test]
async fn test_empty_lists_satisfy_display_assertions() {
    let ctx = context(&SimulatedChms::new().empty()).await;

    let people = people::display(&ctx).await.unwrap();
    assert!(!people.is_not_accessible());
    let groups = groups::display(&ctx).await.unwrap();
    assert!(!groups.is_not_accessible());
    let funds = donations::display_funds(&ctx).await.unwrap();
    assert!(!funds.is_not_accessible());
}

#[tokio::test]
async fn test_every_list_screen_displays_when_empty() {
    let ctx = context(&SimulatedChms::new().empty()).await;
    let page = ctx.page();
    let screens: Vec<(&str, Box<dyn ListScreen>)> = vec![
        (AttendancePage::PATH, Box::new(AttendancePage::new(page.clone()))),
        (AutomationsPage::PATH, Box::new(AutomationsPage::new(page.clone()))),
        (DevicesPage::PATH, Box::new(DevicesPage::new(page.clone()))),
        (DonationsPage::PATH, Box::new(DonationsPage::new(page.clone()))),
        (FormsPage::PATH, Box::new(FormsPage::new(page.clone()))),
        (FundsPage::PATH, Box::new(FundsPage::new(page.clone()))),
        (GroupsPage::PATH, Box::new(GroupsPage::new(page.clone()))),
        ("/plans/ministries/MIN00000001", Box::new(MinistryPage::new(page.clone()))),
        (PeoplePage::PATH, Box::new(PeoplePage::new(page.clone()))),
        (PlansPage::PATH, Box::new(PlansPage::new(page.clone()))),
        ("/reports/attendanceTrend", Box::new(ReportPage::new(page.clone()))),
        (ReportsPage::PATH, Box::new(ReportsPage::new(page.clone()))),
        (SettingsPage::PATH, Box::new(SettingsPage::new(page.clone()))),
        (TasksPage::PATH, Box::new(TasksPage::new(page.clone()))),
    ];
    assert_eq!(screens.len(), 14);

    for (path, screen) in screens {
        ctx.navigate(path).await.unwrap();
        screen.expect_displayed().await.unwrap();
        assert!(!screen.has_data().await, "{} shows a table", screen.page_name());
        assert_eq!(screen.row_count().await.unwrap(), 0, "{}", screen.page_name());
    }
}

// ============================================================================
// Canonical flows
// ============================================================================

#[tokio::test]
async fn test_dashboard_search_opens_person() {
    let ctx = context(&SimulatedChms::new()).await;
    let outcome = dashboard::search_and_open_person(&ctx, SEED_PERSON).await.unwrap();
    assert!(outcome.is_completed(), "got {outcome}");

    let page = ctx.page();
    assert!(page.is_on(&UrlPattern::regex(r"/people/PER\d+$")).await.unwrap());
    assert_eq!(page.count(&Locator::exact_text(SEED_PERSON)).await.unwrap(), 1);
}

#[tokio::test]
async fn test_non_deductible_fund_is_listed_once() {
    let ctx = context(&SimulatedChms::new()).await;
    let outcome = donations::create_fund(&ctx, NEW_FUND, false).await.unwrap();
    assert!(outcome.is_completed(), "got {outcome}");

    let funds = FundsPage::new(ctx.page().clone());
    assert_eq!(funds.fund_link_count(NEW_FUND).await.unwrap(), 1);
    assert_eq!(ctx.page().count(&funds.non_deductible_label).await.unwrap(), 1);
}

// ============================================================================
// Whole catalogue
// ============================================================================

#[tokio::test]
async fn test_catalogue_passes_against_simulated_app() {
    let tmp = tempfile::tempdir().unwrap();
    let factory: Arc<dyn DriverFactory> = Arc::new(SimulatedChms::new().factory());
    let runner = SpecRunner::new(factory, config().with_artifacts_dir(tmp.path())).with_jobs(4);

    let registry = SpecRegistry::catalogue();
    let report = runner.run(registry.cases()).await;

    assert_eq!(report.total(), registry.cases().len());
    let failures: Vec<String> = report
        .failures()
        .iter()
        .map(|r| format!("{}: {}", r.name, r.error.as_deref().unwrap_or_default()))
        .collect();
    assert!(failures.is_empty(), "failures: {failures:#?}");
    assert_eq!(report.count(SpecStatus::NotAccessible), 0);
}

#[tokio::test]
async fn test_smoke_suite_reports_gated_areas() {
    let tmp = tempfile::tempdir().unwrap();
    let sim = SimulatedChms::new().forbid("/donations").forbid("/plans");
    let factory: Arc<dyn DriverFactory> = Arc::new(sim.factory());
    let runner = SpecRunner::new(factory, config().with_artifacts_dir(tmp.path()));

    let cases = SpecRegistry::catalogue().select(Some("smoke"), None);
    let report = runner.run(&cases).await;

    assert!(report.all_passed(), "{}", report.summary());
    assert!(report.count(SpecStatus::NotAccessible) >= 1);
}

// ============================================================================
// Live app (needs Chromium and a running ChuMS)
// ============================================================================

#[cfg(feature = "browser")]
#[tokio::test]
#[ignore = "needs Chromium and CHUMS_BASE_URL pointing at a running app"]
async fn test_live_smoke_suite() {
    use chums_harness::CdpDriverFactory;

    if std::env::var("CHUMS_BASE_URL").is_err() {
        return;
    }
    let config = HarnessConfig::load(None).unwrap();
    let factory: Arc<dyn DriverFactory> = Arc::new(CdpDriverFactory::launch(&config).await.unwrap());
    let runner = SpecRunner::new(factory, config);

    let report = runner.run(&SpecRegistry::catalogue().select(Some("smoke"), None)).await;
    runner.shutdown().await;
    assert!(report.all_passed(), "{}", report.summary());
}
