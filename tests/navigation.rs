//! End-to-end navigation over the helpdesk route table.

use std::sync::Arc;

use helpdesk_router::config::ConfigError;
use helpdesk_router::loading::{LoadError, ScreenRegistry};
use helpdesk_router::navigation::NavigationEvent;
use helpdesk_router::{helpdesk, NavigationError, NavigationOutcome, Navigator, RouteError, RouteTable};

mod common;

use common::{eventually, Fixture};

fn ids(outcome: &NavigationOutcome) -> Vec<String> {
    outcome
        .route()
        .expect("navigation should have activated")
        .screen_ids()
        .into_iter()
        .map(String::from)
        .collect()
}

#[tokio::test]
async fn test_supported_paths_resolve_to_expected_screens() {
    let cases: [(&str, &str, &[&str]); 6] = [
        ("", "login", &["login"]),
        ("login", "login", &["login"]),
        ("dashboard", "dashboard", &["dashboard", "home"]),
        ("dashboard/mytickets", "dashboard/mytickets", &["dashboard", "my-tickets"]),
        ("dashboard/alltickets", "dashboard/alltickets", &["dashboard", "all-tickets"]),
        ("dashboard/submitticket", "dashboard/submitticket", &["dashboard", "submit-ticket"]),
    ];

    for (path, url, expected) in cases {
        // Fresh navigator per path so no state carries over.
        let fixture = Fixture::new();
        let navigator = fixture.navigator();

        let outcome = navigator.navigate(path).await.unwrap();
        assert_eq!(ids(&outcome), expected, "path '{}'", path);
        assert_eq!(outcome.route().unwrap().url, url);
    }
}

#[tokio::test]
async fn test_repeat_navigation_reuses_cached_screens() {
    let fixture = Fixture::new();
    let navigator = fixture.navigator();

    let first = navigator.navigate("dashboard/mytickets").await.unwrap();
    let second = navigator.navigate("dashboard/mytickets").await.unwrap();

    assert_eq!(fixture.loads("dashboard"), 1);
    assert_eq!(fixture.loads("my-tickets"), 1);
    assert_eq!(navigator.modules().invocations(&"my-tickets".into()), 1);

    let a = &first.route().unwrap().screens[1].screen;
    let b = &second.route().unwrap().screens[1].screen;
    assert!(Arc::ptr_eq(a, b));

    // Already in place: no hooks fire the second time.
    assert_eq!(
        fixture.entries(),
        vec![
            "load:dashboard",
            "activate:dashboard",
            "load:my-tickets",
            "activate:my-tickets",
        ]
    );
}

#[tokio::test]
async fn test_root_redirects_straight_to_login() {
    let fixture = Fixture::new();
    let navigator = fixture.navigator();
    let mut events = navigator.subscribe();

    let outcome = navigator.navigate("").await.unwrap();
    assert_eq!(ids(&outcome), vec!["login"]);
    assert_eq!(fixture.entries(), vec!["load:login", "activate:login"]);

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert!(seen.contains(&NavigationEvent::Resolved {
        generation: 1,
        url: "login".into(),
        screens: 1,
    }));
}

#[tokio::test]
async fn test_default_child_is_not_addressable_by_name() {
    let fixture = Fixture::new();
    let navigator = fixture.navigator();

    let outcome = navigator.navigate("dashboard").await.unwrap();
    assert_eq!(ids(&outcome), vec!["dashboard", "home"]);

    fixture.clear();
    let err = navigator.navigate("dashboard/home").await.unwrap_err();
    assert!(matches!(
        err,
        NavigationError::Route(RouteError::NoMatch { ref path }) if path == "dashboard/home"
    ));
    // Failed navigation leaves the outlets alone.
    assert!(fixture.entries().is_empty());
    assert_eq!(navigator.current().screen_ids(), vec!["dashboard", "home"]);
}

#[tokio::test]
async fn test_unknown_path_activates_nothing() {
    let fixture = Fixture::new();
    let navigator = fixture.navigator();
    let mut events = navigator.subscribe();

    let err = navigator.navigate("foo/bar").await.unwrap_err();
    assert_eq!(err.to_string(), "no route matches 'foo/bar'");
    assert!(fixture.entries().is_empty());
    assert!(navigator.current().is_empty());
    assert_eq!(navigator.modules().loaded(), 0);

    assert!(matches!(events.try_recv(), Ok(NavigationEvent::Started { .. })));
    assert!(matches!(events.try_recv(), Ok(NavigationEvent::Failed { generation: 1, .. })));
}

#[tokio::test]
async fn test_newer_navigation_supersedes_pending_one() {
    let fixture = Fixture::new().gate("my-tickets");
    let navigator = fixture.navigator();

    let nav = navigator.clone();
    let pending = tokio::spawn(async move { nav.navigate("dashboard/mytickets").await });
    fixture.wait_for("load:my-tickets").await;

    let outcome = navigator.navigate("dashboard/alltickets").await.unwrap();
    assert_eq!(ids(&outcome), vec!["dashboard", "all-tickets"]);

    fixture.open("my-tickets");
    let stale = pending.await.unwrap().unwrap();
    match stale {
        NavigationOutcome::Superseded { generation, latest } => {
            assert_eq!(generation, 1);
            assert_eq!(latest, 2);
        }
        other => panic!("expected superseded, got {:?}", other),
    }

    assert!(!fixture.entries().contains(&"activate:my-tickets".to_string()));
    assert_eq!(navigator.current().screen_ids(), vec!["dashboard", "all-tickets"]);
    assert_eq!(navigator.current().url, "dashboard/alltickets");
}

#[tokio::test]
async fn test_superseded_load_is_cached_for_later() {
    let fixture = Fixture::new().gate("my-tickets");
    let navigator = fixture.navigator();

    let nav = navigator.clone();
    let pending = tokio::spawn(async move { nav.navigate("dashboard/mytickets").await });
    fixture.wait_for("load:my-tickets").await;

    navigator.navigate("dashboard/alltickets").await.unwrap();
    fixture.open("my-tickets");
    assert!(pending.await.unwrap().unwrap().is_superseded());

    // Loaded but never shown.
    assert!(navigator.modules().get(&"my-tickets".into()).is_some());
    assert!(!fixture.entries().contains(&"activate:my-tickets".to_string()));

    let outcome = navigator.navigate("dashboard/mytickets").await.unwrap();
    assert_eq!(ids(&outcome), vec!["dashboard", "my-tickets"]);
    assert_eq!(fixture.loads("my-tickets"), 1);
}

#[tokio::test]
async fn test_superseded_load_failure_is_not_an_error() {
    let fixture = Fixture::new().gate("my-tickets").failing("my-tickets");
    let navigator = fixture.navigator();
    let mut events = navigator.subscribe();

    let nav = navigator.clone();
    let pending = tokio::spawn(async move { nav.navigate("dashboard/mytickets").await });
    fixture.wait_for("load:my-tickets").await;

    navigator.navigate("dashboard/alltickets").await.unwrap();
    fixture.open("my-tickets");

    match pending.await.unwrap() {
        Ok(NavigationOutcome::Superseded { generation, latest }) => {
            assert_eq!((generation, latest), (1, 2));
        }
        other => panic!("expected superseded, got {:?}", other),
    }
    assert_eq!(navigator.current().screen_ids(), vec!["dashboard", "all-tickets"]);

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert!(seen.contains(&NavigationEvent::Superseded { generation: 1, latest: 2 }));
    assert!(!seen.iter().any(|e| matches!(e, NavigationEvent::Failed { .. })));
}

#[tokio::test]
async fn test_partial_failure_publishes_url_of_screens_in_place() {
    let fixture = Fixture::new().failing("all-tickets");
    let navigator = fixture.navigator();

    navigator.navigate("login").await.unwrap();
    assert_eq!(navigator.current().url, "login");

    assert!(navigator.navigate("dashboard/alltickets").await.is_err());
    let current = navigator.current();
    assert_eq!(current.screen_ids(), vec!["dashboard"]);
    assert_eq!(current.url, "dashboard");
}

#[tokio::test]
async fn test_concurrent_navigations_share_one_load() {
    let fixture = Fixture::new().gate("submit-ticket");
    let navigator = fixture.navigator();

    let first = {
        let nav = navigator.clone();
        tokio::spawn(async move { nav.navigate("dashboard/submitticket").await })
    };
    fixture.wait_for("load:submit-ticket").await;

    let second = {
        let nav = navigator.clone();
        tokio::spawn(async move { nav.navigate("dashboard/submitticket").await })
    };
    eventually(|| navigator.generation() == 2).await;

    fixture.open("submit-ticket");
    assert!(first.await.unwrap().unwrap().is_superseded());
    let settled = second.await.unwrap().unwrap();
    assert_eq!(ids(&settled), vec!["dashboard", "submit-ticket"]);
    assert_eq!(fixture.loads("submit-ticket"), 1);
}

#[tokio::test]
async fn test_parent_activates_before_child_loads() {
    let fixture = Fixture::new();
    let navigator = fixture.navigator();

    navigator.navigate("dashboard/mytickets").await.unwrap();
    assert_eq!(
        fixture.entries(),
        vec![
            "load:dashboard",
            "activate:dashboard",
            "load:my-tickets",
            "activate:my-tickets",
        ]
    );
}

#[tokio::test]
async fn test_switching_children_keeps_the_shell() {
    let fixture = Fixture::new();
    let navigator = fixture.navigator();

    navigator.navigate("dashboard/mytickets").await.unwrap();
    fixture.clear();
    navigator.navigate("dashboard/alltickets").await.unwrap();

    assert_eq!(
        fixture.entries(),
        vec!["load:all-tickets", "deactivate:my-tickets", "activate:all-tickets"]
    );
}

#[tokio::test]
async fn test_leaving_the_shell_deactivates_innermost_first() {
    let fixture = Fixture::new();
    let navigator = fixture.navigator();

    navigator.navigate("dashboard/mytickets").await.unwrap();
    fixture.clear();
    let outcome = navigator.navigate("login").await.unwrap();

    assert_eq!(ids(&outcome), vec!["login"]);
    assert_eq!(
        fixture.entries(),
        vec![
            "load:login",
            "deactivate:my-tickets",
            "deactivate:dashboard",
            "activate:login",
        ]
    );
}

#[tokio::test]
async fn test_loader_failure_surfaces_without_retry() {
    let fixture = Fixture::new().failing("all-tickets");
    let navigator = fixture.navigator();

    let err = navigator.navigate("dashboard/alltickets").await.unwrap_err();
    match &err {
        NavigationError::Load { screen, source } => {
            assert_eq!(screen.as_str(), "all-tickets");
            assert!(matches!(source, LoadError::Unavailable { .. }));
        }
        other => panic!("expected load failure, got {:?}", other),
    }
    assert_eq!(fixture.loads("all-tickets"), 1);
    // The shell was already in place before the child failed.
    assert_eq!(navigator.current().screen_ids(), vec!["dashboard"]);
    assert_eq!(navigator.current().url, "dashboard");

    // A later navigation asks the provider again.
    assert!(navigator.navigate("dashboard/alltickets").await.is_err());
    assert_eq!(fixture.loads("all-tickets"), 2);
}

#[tokio::test]
async fn test_event_sequence_for_nested_route() {
    let fixture = Fixture::new();
    let navigator = fixture.navigator();
    let mut events = navigator.subscribe();

    navigator.navigate("dashboard").await.unwrap();

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert_eq!(
        seen,
        vec![
            NavigationEvent::Started { generation: 1, path: "dashboard".into() },
            NavigationEvent::Resolved { generation: 1, url: "dashboard".into(), screens: 2 },
            NavigationEvent::Activated { generation: 1, depth: 0, screen: "dashboard".into() },
            NavigationEvent::Activated { generation: 1, depth: 1, screen: "home".into() },
            NavigationEvent::Completed { generation: 1, url: "dashboard".into() },
        ]
    );
}

#[tokio::test]
async fn test_normalised_paths() {
    let fixture = Fixture::new();
    let navigator = fixture.navigator();

    let outcome = navigator.navigate("/dashboard/alltickets/?status=open").await.unwrap();
    assert_eq!(ids(&outcome), vec!["dashboard", "all-tickets"]);
    assert_eq!(outcome.route().unwrap().url, "dashboard/alltickets");
}

#[test]
fn test_unregistered_screens_are_rejected_up_front() {
    let config = helpdesk::config();
    let table = Arc::new(RouteTable::from_config(&config).unwrap());
    let registry = ScreenRegistry::new();

    let err = Navigator::new(table, registry, &config.navigation).unwrap_err();
    assert!(matches!(err, LoadError::NotRegistered(_)));

    let err = Navigator::from_config(&config, ScreenRegistry::new()).unwrap_err();
    assert!(matches!(err, ConfigError::Screen(LoadError::NotRegistered(_))));
}
