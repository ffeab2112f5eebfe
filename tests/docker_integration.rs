//! Integration tests against a live Docker daemon.
//!
//! All tests are ignored by default; run with `cargo test -- --ignored`
//! when a daemon is available.

use dockdash::core::ConnectionSettings;
use dockdash::docker::DockerClient;

#[tokio::test]
#[ignore = "requires Docker daemon"]
async fn connects_with_default_settings() {
    let client = DockerClient::from_settings(&ConnectionSettings::default())
        .await
        .expect("daemon should be reachable on the local socket");

    let info = client.connection_info();
    assert!(!info.version.is_empty());
    assert!(!info.api_version.is_empty());

    client.ping().await.expect("ping should succeed");
}

#[tokio::test]
#[ignore = "requires Docker daemon"]
async fn lists_all_resource_kinds() {
    let client = DockerClient::from_env().await.unwrap();

    client.list_containers(true).await.expect("containers");
    client.list_images().await.expect("images");
    client.list_volumes().await.expect("volumes");
    client.list_networks().await.expect("networks");
}

#[tokio::test]
#[ignore = "requires Docker daemon"]
async fn volume_create_list_remove_round_trip() {
    let client = DockerClient::from_env().await.unwrap();
    let name = format!("dockdash-test-{}", uuid::Uuid::new_v4());

    let created = client.create_volume(&name).await.expect("create");
    assert_eq!(created.name, name);

    let volumes = client.list_volumes().await.expect("list");
    assert_eq!(volumes.iter().filter(|v| v.name == name).count(), 1);

    client.remove_volume(&name, false).await.expect("remove");

    let volumes = client.list_volumes().await.expect("list after remove");
    assert!(volumes.iter().all(|v| v.name != name));
}

#[tokio::test]
#[ignore = "requires Docker daemon"]
async fn removing_missing_container_reports_not_found() {
    let client = DockerClient::from_env().await.unwrap();

    let err = client
        .remove_container("no-such-container-dockdash", false)
        .await
        .expect_err("remove of a missing container must fail");
    assert!(err.is_not_found());
}
