use git_autoversion::domain::pattern::ReleasePatterns;
use git_autoversion::domain::{Branch, SemanticRef};
use git_autoversion::environment::Environment;
use git_autoversion::error::{AutoVersionError, Result};
use git_autoversion::git::{commands, CommandRunner, GitShell, MockTable, RefRepository, StubRunner};
use git_autoversion::migration;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const RELEASE_BRANCHES: &str = "\
  origin/releases/2.1.1
  origin/releases/2.0.1
  origin/releases/2.1
  origin/releases/2.0.2";

fn mocked(current: &str, behind: &[(&str, u32)]) -> MockTable {
    let mut mocks = MockTable::new();
    mocks.insert(
        commands::release_branches("*origin/releases/*"),
        RELEASE_BRANCHES,
    );
    for (to, count) in behind {
        mocks.insert_divergence(current, to, 0, *count);
    }
    mocks
}

fn mock_merges(mocks: &mut MockTable, current: &str, sources: &[&str]) {
    for source in sources {
        mocks.insert(commands::merge(&Branch::new(*source)), "SUCCESS");
    }
    mocks.insert(commands::push(&Branch::new(current)), "SUCCESS");
}

fn pulled_from(current: &str, mocks: MockTable) -> Vec<String> {
    let repo = RefRepository::new(
        GitShell::with_mocks(StubRunner::new(), mocks),
        Environment::local(),
        ReleasePatterns::default(),
    );
    migration::migrate(&repo, &Branch::new(current))
        .unwrap()
        .iter()
        .filter_map(|b| b.semantic_version())
        .collect()
}

#[test]
fn test_develop_up_to_date() {
    let mocks = mocked(
        "develop",
        &[
            ("origin/master", 0),
            ("origin/releases/2.0.1", 0),
            ("origin/releases/2.0.2", 0),
            ("origin/releases/2.1", 0),
            ("origin/releases/2.1.1", 0),
        ],
    );
    assert!(pulled_from("develop", mocks).is_empty());
}

#[test]
fn test_develop_behind_latest() {
    let mut mocks = mocked(
        "develop",
        &[
            ("origin/master", 0),
            ("origin/releases/2.0.1", 0),
            ("origin/releases/2.0.2", 0),
            ("origin/releases/2.1", 0),
            ("origin/releases/2.1.1", 10),
        ],
    );
    mock_merges(&mut mocks, "develop", &["origin/releases/2.1.1"]);
    assert_eq!(pulled_from("develop", mocks), vec!["2.1.1"]);
}

#[test]
fn test_develop_behind_last_two_merges_oldest_first() {
    for (older, newer) in [(5, 10), (10, 5)] {
        let mut mocks = mocked(
            "develop",
            &[
                ("origin/master", 0),
                ("origin/releases/2.0.1", 0),
                ("origin/releases/2.0.2", 0),
                ("origin/releases/2.1", older),
                ("origin/releases/2.1.1", newer),
            ],
        );
        mock_merges(
            &mut mocks,
            "develop",
            &["origin/releases/2.1", "origin/releases/2.1.1"],
        );
        assert_eq!(pulled_from("develop", mocks), vec!["2.1.0", "2.1.1"]);
    }
}

#[test]
fn test_latest_release_up_to_date() {
    let mocks = mocked(
        "releases/2.1.1",
        &[
            ("origin/master", 0),
            ("origin/releases/2.0.1", 0),
            ("origin/releases/2.0.2", 0),
            ("origin/releases/2.1", 0),
        ],
    );
    assert!(pulled_from("releases/2.1.1", mocks).is_empty());
}

#[test]
fn test_latest_release_behind_hotfix() {
    let mut mocks = mocked(
        "releases/2.1.1",
        &[
            ("origin/master", 0),
            ("origin/releases/2.0.1", 0),
            ("origin/releases/2.0.2", 0),
            ("origin/releases/2.1", 5),
        ],
    );
    mock_merges(&mut mocks, "releases/2.1.1", &["origin/releases/2.1"]);
    assert_eq!(pulled_from("releases/2.1.1", mocks), vec!["2.1.0"]);
}

#[test]
fn test_latest_release_behind_two_hotfixes() {
    let mut mocks = mocked(
        "releases/2.1.1",
        &[
            ("origin/master", 0),
            ("origin/releases/2.0.1", 0),
            ("origin/releases/2.0.2", 10),
            ("origin/releases/2.1", 5),
        ],
    );
    mock_merges(
        &mut mocks,
        "releases/2.1.1",
        &["origin/releases/2.0.2", "origin/releases/2.1"],
    );
    assert_eq!(
        pulled_from("releases/2.1.1", mocks),
        vec!["2.0.2", "2.1.0"]
    );
}

#[test]
fn test_unmocked_push_is_refused_while_mocking() {
    let mut mocks = mocked(
        "develop",
        &[
            ("origin/master", 0),
            ("origin/releases/2.0.1", 0),
            ("origin/releases/2.0.2", 0),
            ("origin/releases/2.1", 0),
            ("origin/releases/2.1.1", 10),
        ],
    );
    mocks.insert(
        commands::merge(&Branch::new("origin/releases/2.1.1")),
        "SUCCESS",
    );
    let stub = StubRunner::new();
    let repo = RefRepository::new(
        GitShell::with_mocks(stub.clone(), mocks),
        Environment::local(),
        ReleasePatterns::default(),
    );

    let err = migration::migrate(&repo, &Branch::new("develop")).unwrap_err();
    assert!(matches!(err, AutoVersionError::UnsafeMockOperation { .. }));
    assert!(stub.executed().is_empty());
}

#[test]
fn test_feature_branch_cannot_migrate() {
    let stub = StubRunner::new();
    let repo = RefRepository::new(
        GitShell::new(stub.clone()),
        Environment::build_server(),
        ReleasePatterns::default(),
    );

    let err = migration::migrate(&repo, &Branch::new("feature/login")).unwrap_err();
    assert!(matches!(err, AutoVersionError::Configuration(_)));
    assert!(stub.executed().is_empty());
}

#[test]
fn test_local_run_without_mocks_is_refused() {
    let stub = StubRunner::new();
    let repo = RefRepository::new(
        GitShell::new(stub.clone()),
        Environment::local(),
        ReleasePatterns::default(),
    );

    let err = migration::migrate(&repo, &Branch::new("develop")).unwrap_err();
    assert!(err.to_string().contains("expected to be run on build server"));
    assert!(stub.executed().is_empty());
}

#[test]
fn test_unpublished_release_branch_is_refused() {
    let stub = StubRunner::new();
    stub.respond(
        commands::release_branches("*origin/releases/*"),
        RELEASE_BRANCHES,
    );
    let repo = RefRepository::new(
        GitShell::new(stub.clone()),
        Environment::build_server(),
        ReleasePatterns::default(),
    );

    let err = migration::migrate(&repo, &Branch::new("releases/3.0")).unwrap_err();
    assert!(matches!(err, AutoVersionError::Configuration(_)));
    assert_eq!(
        stub.executed(),
        vec![commands::release_branches("*origin/releases/*")]
    );
}

#[test]
fn test_merge_conflict_stops_before_push() {
    let stub = StubRunner::new();
    stub.respond(
        commands::release_branches("*origin/releases/*"),
        RELEASE_BRANCHES,
    );
    let develop = Branch::new("develop");
    for (to, behind) in [
        ("origin/master", "0"),
        ("origin/releases/2.0.1", "3"),
        ("origin/releases/2.0.2", "0"),
    ] {
        stub.respond(commands::commits_behind(&develop, &Branch::new(to)), behind);
    }
    stub.fail(
        commands::merge(&Branch::new("origin/releases/2.0.1")),
        "CONFLICT (content): Merge conflict in app/build.gradle",
    );
    let repo = RefRepository::new(
        GitShell::new(stub.clone()),
        Environment::build_server(),
        ReleasePatterns::default(),
    );

    let err = migration::migrate(&repo, &develop).unwrap_err();
    match err {
        AutoVersionError::MergeConflict { output, .. } => {
            assert!(output.contains("Merge conflict in app/build.gradle"))
        }
        other => panic!("expected merge conflict, got {:?}", other),
    }
    assert!(!stub.executed().contains(&commands::push(&develop)));
}

/// Remote whose divergence counts drop to zero once merged
#[derive(Clone, Default)]
struct FakeRemote {
    behind: Arc<Mutex<HashMap<String, u32>>>,
    log: Arc<Mutex<Vec<String>>>,
}

impl FakeRemote {
    fn with_behind(counts: &[(&str, u32)]) -> Self {
        let remote = FakeRemote::default();
        {
            let mut behind = remote.behind.lock().unwrap();
            for (branch, count) in counts {
                behind.insert(branch.to_string(), *count);
            }
        }
        remote
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRemote {
    fn run(&self, command: &str) -> Result<String> {
        self.log.lock().unwrap().push(command.to_string());

        if command == commands::release_branches("*origin/releases/*") {
            return Ok(RELEASE_BRANCHES.to_string());
        }
        if let Some(source) = command.strip_prefix("git merge ") {
            self.behind.lock().unwrap().insert(source.to_string(), 0);
            return Ok(String::new());
        }
        if command.starts_with("git push") {
            return Ok(String::new());
        }
        if let Some(range) = command.strip_prefix("git rev-list --right-only --count ") {
            let to = range.split("...").nth(1).unwrap_or_default();
            let behind = self.behind.lock().unwrap().get(to).copied().unwrap_or(0);
            return Ok(behind.to_string());
        }
        Err(AutoVersionError::Command {
            command: command.to_string(),
            exit_code: Some(1),
            stdout: String::new(),
            stderr: "unexpected command".to_string(),
        })
    }
}

#[test]
fn test_second_migration_is_a_no_op() {
    let remote = FakeRemote::with_behind(&[
        ("origin/master", 2),
        ("origin/releases/2.1", 5),
    ]);
    let repo = RefRepository::new(
        GitShell::new(remote.clone()),
        Environment::build_server(),
        ReleasePatterns::default(),
    );
    let develop = Branch::new("develop");

    let first = migration::migrate(&repo, &develop).unwrap();
    let names: Vec<&str> = first.iter().map(|b| b.name()).collect();
    assert_eq!(names, vec!["origin/master", "origin/releases/2.1"]);
    let pushes_after_first = remote
        .log()
        .iter()
        .filter(|c| c.starts_with("git push"))
        .count();
    assert_eq!(pushes_after_first, 1);

    let second = migration::migrate(&repo, &develop).unwrap();
    assert!(second.is_empty());
    let pushes_after_second = remote
        .log()
        .iter()
        .filter(|c| c.starts_with("git push"))
        .count();
    assert_eq!(pushes_after_second, 1);
}
