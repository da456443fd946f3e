//! Integration tests for `MongoUserRepository` against a live MongoDB.
//!
//! Set `USER_API_TEST_MONGO_URI` to a disposable server to run them; they
//! are skipped otherwise. Each run writes to a freshly named database.

use std::time::Duration;

use rstest::rstest;
use user_service::domain::ports::{UpdateCounts, UserRepository};
use user_service::domain::{User, UserId, UserProfile};
use user_service::outbound::persistence::{
    GatewayError, GatewaySettings, MongoGateway, MongoUserRepository,
};

#[expect(
    dead_code,
    reason = "Shared helpers include functions used only by other integration suites."
)]
mod support;

use support::test_mongo_uri;

fn profile(name: &str, location: &str) -> UserProfile {
    UserProfile::try_new(
        Some(name.to_owned()),
        Some(location.to_owned()),
        Some("Analyst".to_owned()),
    )
    .expect("valid profile")
}

async fn repository(uri: &str) -> (MongoGateway, MongoUserRepository) {
    let database = format!("user_service_test_{}", UserId::generate());
    let gateway = MongoGateway::connect(&GatewaySettings::new(uri, database))
        .await
        .expect("test store reachable");
    let repo = MongoUserRepository::new(&gateway).with_operation_timeout(Duration::from_secs(5));
    (gateway, repo)
}

#[rstest]
#[tokio::test]
async fn crud_round_trip_against_mongo() {
    let Some(uri) = test_mongo_uri() else {
        return;
    };
    let (gateway, repo) = repository(&uri).await;

    let user = User::new(UserId::generate(), profile("Ada", "London"));
    let id = repo.insert(&user).await.expect("insert");
    assert_eq!(&id, user.id());
    assert_eq!(repo.find_by_id(&id).await.expect("find"), Some(user));

    let counts = repo
        .replace_profile(&id, &profile("Ada", "Paris"))
        .await
        .expect("replace");
    assert_eq!(counts, UpdateCounts { matched: 1, modified: 1 });
    let again = repo
        .replace_profile(&id, &profile("Ada", "Paris"))
        .await
        .expect("replace again");
    assert_eq!(again, UpdateCounts { matched: 1, modified: 0 });

    let second = User::new(UserId::generate(), profile("Grace", "Arlington"));
    repo.insert(&second).await.expect("insert second");
    let listed = repo.list_all().await.expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].profile().location(), "Paris");

    assert_eq!(repo.delete_by_id(&id).await.expect("delete"), 1);
    assert_eq!(repo.delete_by_id(&id).await.expect("delete again"), 0);
    assert_eq!(repo.find_by_id(&id).await.expect("find"), None);

    gateway.ping().await.expect("still reachable");
}

#[rstest]
#[tokio::test]
async fn unreachable_stores_fail_within_the_budget() {
    let settings = GatewaySettings::new("mongodb://127.0.0.1:1/?directConnection=true", "golangAPI")
        .with_connect_timeout(Duration::from_millis(300));

    let err = MongoGateway::connect(&settings)
        .await
        .expect_err("nothing listens on port 1");

    assert!(matches!(
        err,
        GatewayError::Connect { .. } | GatewayError::Timeout { .. }
    ));
}
