//! End-to-end runs against a mock Jira and a scripted prompt

use crate::common::{ScriptedPrompt, TestFixture, search_body};
use jira_branch::git::BranchManager;
use jira_branch::jira::Client;
use jira_branch::switch::{self, Switched};
use mockito::Matcher;
use pretty_assertions::assert_eq;
use std::time::Duration;

fn assigned_issues() -> String {
    search_body(&[
        ("X-1", "Existing work", "Bug", "High"),
        ("X-2", "Critical fix", "Bug", "Critical"),
        ("X-9", "New work", "Story", "Low"),
    ])
}

fn mock_search(server: &mut mockito::ServerGuard, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/rest/api/2/search")
        .match_query(Matcher::UrlEncoded(
            "jql".into(),
            "assignee = currentUser()".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create()
}

fn client_for(server: &mockito::ServerGuard) -> Client {
    Client::new(
        &server.url(),
        " dev@example.com ",
        " token ",
        Duration::from_secs(5),
        50,
    )
}

#[test]
fn test_existing_branch_is_checked_out() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    fixture.create_branch("X-1-existing-work")?;
    let mut server = mockito::Server::new();
    let mock = mock_search(&mut server, &assigned_issues());
    let mut prompt = ScriptedPrompt::new(&["X-1"], &[]);

    let switched = switch::run(
        &fixture.config(&server.url()),
        &client_for(&server),
        &mut prompt,
    )?;
    mock.assert();

    assert_eq!(switched, Switched::Existing("X-1-existing-work".to_string()));
    assert!(prompt.input_defaults.is_empty());

    let repo = fixture.repo()?;
    let manager = BranchManager::new(&repo);
    assert_eq!(manager.current()?, "X-1-existing-work");
    assert!(!manager.exists("X-1"));
    Ok(())
}

#[test]
fn test_choices_mark_existing_branches_in_tracker_order() -> Result<(), Box<dyn std::error::Error>>
{
    let fixture = TestFixture::new()?;
    fixture.create_branch("X-2")?;
    let mut server = mockito::Server::new();
    let _mock = mock_search(&mut server, &assigned_issues());
    let mut prompt = ScriptedPrompt::new(&["X-2"], &[]);

    switch::run(
        &fixture.config(&server.url()),
        &client_for(&server),
        &mut prompt,
    )?;

    assert_eq!(
        prompt.offered,
        vec![
            "X-1 High (Bug): Existing work".to_string(),
            "*X-2 Critical (Bug): Critical fix".to_string(),
            "X-9 Low (Story): New work".to_string(),
        ]
    );
    Ok(())
}

#[test]
fn test_new_branch_starts_at_upstream() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut server = mockito::Server::new();
    let _mock = mock_search(&mut server, &assigned_issues());
    let mut prompt = ScriptedPrompt::new(&["X-9"], &["X-9"]);

    let switched = switch::run(
        &fixture.config(&server.url()),
        &client_for(&server),
        &mut prompt,
    )?;

    assert_eq!(switched, Switched::Created("X-9".to_string()));
    assert_eq!(prompt.input_defaults, vec!["X-9".to_string()]);

    let repo = fixture.repo()?;
    let manager = BranchManager::new(&repo);
    assert_eq!(manager.current()?, "X-9");
    assert_eq!(manager.tip("X-9")?, fixture.upstream_tip);
    assert!(repo.head()?.is_branch());
    assert_eq!(fixture.read_file("README.md")?, "# Upstream README\n");
    Ok(())
}

#[test]
fn test_new_branch_with_custom_name() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut server = mockito::Server::new();
    let _mock = mock_search(&mut server, &assigned_issues());
    let mut prompt = ScriptedPrompt::new(&["X-9"], &["X-9-new-work"]);

    let switched = switch::run(
        &fixture.config(&server.url()),
        &client_for(&server),
        &mut prompt,
    )?;

    assert_eq!(switched.branch(), "X-9-new-work");
    let repo = fixture.repo()?;
    assert!(!BranchManager::new(&repo).exists("X-9"));
    Ok(())
}

#[test]
fn test_second_run_reuses_created_branch() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut server = mockito::Server::new();
    let _mock = mock_search(&mut server, &assigned_issues());
    let config = fixture.config(&server.url());
    let client = client_for(&server);

    let mut first = ScriptedPrompt::new(&["X-9"], &["X-9-work"]);
    switch::run(&config, &client, &mut first)?;

    let mut second = ScriptedPrompt::new(&["X-9"], &[]);
    let switched = switch::run(&config, &client, &mut second)?;

    assert_eq!(switched, Switched::Existing("X-9-work".to_string()));
    assert!(second.offered.contains(&"*X-9 Low (Story): New work".to_string()));
    Ok(())
}

#[test]
fn test_tracker_failure_aborts_before_prompting() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/rest/api/2/search")
        .match_query(Matcher::Any)
        .with_status(401)
        .create();
    let mut prompt = ScriptedPrompt::new(&["X-9"], &["X-9"]);

    let result = switch::run(
        &fixture.config(&server.url()),
        &client_for(&server),
        &mut prompt,
    );

    let Err(err) = result else {
        return Err("expected the run to fail".into());
    };
    assert!(format!("{err:#}").contains("401"));
    assert!(prompt.offered.is_empty());
    let repo = fixture.repo()?;
    assert_eq!(BranchManager::new(&repo).current()?, "master");
    Ok(())
}

#[test]
fn test_missing_upstream_aborts() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut server = mockito::Server::new();
    let _mock = mock_search(&mut server, &assigned_issues());
    let mut config = fixture.config(&server.url());
    config.upstream_branch = "origin/does-not-exist".to_string();
    let mut prompt = ScriptedPrompt::new(&["X-9"], &["X-9"]);

    let result = switch::run(&config, &client_for(&server), &mut prompt);

    assert!(result.is_err());
    let repo = fixture.repo()?;
    let manager = BranchManager::new(&repo);
    assert!(!manager.exists("X-9"));
    assert_eq!(manager.current()?, "master");
    Ok(())
}

#[test]
fn test_empty_search_fails_before_prompting() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut server = mockito::Server::new();
    let _mock = mock_search(&mut server, &search_body(&[]));
    let mut prompt = ScriptedPrompt::new(&[], &[]);

    let result = switch::run(
        &fixture.config(&server.url()),
        &client_for(&server),
        &mut prompt,
    );

    let Err(err) = result else {
        return Err("expected the run to fail".into());
    };
    assert!(err.to_string().contains("No issues found"));
    assert!(prompt.offered.is_empty());
    Ok(())
}

#[test]
fn test_malformed_keys_are_not_offered() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut server = mockito::Server::new();
    let body = search_body(&[
        ("X-1", "Existing work", "Bug", "High"),
        ("bad key", "Unparseable", "Bug", "Low"),
    ]);
    let _mock = mock_search(&mut server, &body);
    let mut prompt = ScriptedPrompt::new(&["X-1"], &["X-1"]);

    switch::run(
        &fixture.config(&server.url()),
        &client_for(&server),
        &mut prompt,
    )?;

    assert_eq!(prompt.offered, vec!["X-1 High (Bug): Existing work".to_string()]);
    Ok(())
}
