//! End-to-end tests for `ApiClient` against the real router served on an
//! ephemeral port.

mod common;

use job_tracker::client::ApiClient;
use job_tracker::models::application::{
    ApplicationStatus, CreateApplicationRequest, UpdateApplicationRequest,
};
use job_tracker::services::stats::StatusFilter;

fn request(company: &str, status: &str) -> CreateApplicationRequest {
    CreateApplicationRequest {
        company: Some(company.to_string()),
        position: Some("QA".to_string()),
        status: Some(status.to_string()),
        applied_date: Some("2024-03-01".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn client_round_trips_every_operation() {
    let (_dir, base_url) = common::spawn_server().await;
    let client = ApiClient::new(base_url);

    assert!(client.get_applications().await.unwrap().is_empty());

    let created = client
        .create_application(&request("Initech", "Applied"))
        .await
        .unwrap();
    assert_eq!(created.company, "Initech");
    assert_eq!(created.notes, "");

    assert_eq!(client.get_applications().await.unwrap(), vec![created.clone()]);

    let updated = client
        .update_application(
            created.id,
            &UpdateApplicationRequest {
                status: Some("Interview".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, ApplicationStatus::Interview);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);

    client.delete_application(created.id).await.unwrap();
    assert!(client.get_applications().await.unwrap().is_empty());
}

#[tokio::test]
async fn server_errors_carry_response_text() {
    let (_dir, base_url) = common::spawn_server().await;
    let client = ApiClient::new(base_url);

    let err = client.delete_application(42).await.unwrap_err();
    assert!(
        err.message.contains("Application not found"),
        "unexpected message: {}",
        err.message
    );

    let err = client
        .create_application(&CreateApplicationRequest {
            company: None,
            ..request("Initech", "Applied")
        })
        .await
        .unwrap_err();
    assert!(err.message.contains("Missing required fields"));
}

#[tokio::test]
async fn filtered_listing_and_stats() {
    let (_dir, base_url) = common::spawn_server().await;
    let client = ApiClient::new(base_url);

    client.create_application(&request("Acme", "Applied")).await.unwrap();
    client.create_application(&request("Globex", "Offer")).await.unwrap();
    client.create_application(&request("Initech", "Applied")).await.unwrap();

    let applied = client
        .list_filtered(StatusFilter::Only(ApplicationStatus::Applied))
        .await
        .unwrap();
    let companies: Vec<_> = applied.iter().map(|a| a.company.as_str()).collect();
    assert_eq!(companies, vec!["Acme", "Initech"]);

    let stats = client.stats().await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.count_for(ApplicationStatus::Offer), 1);
    assert_eq!(stats.count_for(ApplicationStatus::Withdrawn), 0);
}
