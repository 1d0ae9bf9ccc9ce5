//! Client round trips against an in-memory transport.

mod common;

use std::sync::Arc;

use common::{
    MockTransport, NumberTransport, RecordingFormatter, envelope, naptr, number_document,
    profile_document, tn_data,
};
use pathfinder_provisioning::{
    ErrorKind, Profile, ProfileOptions, ProvisioningClient, ProvisioningError, Record, Regexp,
    TelephoneNumber,
};
use serde_json::json;

fn record() -> Record {
    Record {
        ttl: 900,
        domain: "e164enum.net".to_string(),
        order: 10,
        preference: 50,
        flags: "u".to_string(),
        service: "E2U+pstn:tel".to_string(),
        regexp: Regexp {
            pattern: "^(.*)$".to_string(),
            replace: "tel:\\1".to_string(),
        },
        replacement: ".".to_string(),
        partner_id: 10305,
    }
}

#[tokio::test]
async fn query_profile_sends_profile_id() {
    let transport = Arc::new(
        MockTransport::new().respond("QueryDNSProfile", profile_document("TestDFSP", naptr(10, 50))),
    );
    let client = ProvisioningClient::new(Arc::clone(&transport));

    let found = require_ok!(client.query_profile("TestDFSP").await);
    let data = require_some!(found.data);
    assert_eq!(data.profile.id, "TestDFSP");

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "QueryDNSProfile");
    assert_eq!(calls[0].1, json!({ "ProfileID": "TestDFSP" }));
}

#[tokio::test]
async fn create_profile_submits_soap_shape() {
    let transport = Arc::new(
        MockTransport::new().respond("DefineDNSProfile", envelope(200, &["OK"], None)),
    );
    let client = ProvisioningClient::new(Arc::clone(&transport));
    let profile = Profile::new(ProfileOptions::new("TestDFSP").tier(3));
    profile.add_record(record());

    let found = require_ok!(client.create_profile(&profile).await);
    assert_eq!(found.messages, vec!["OK"]);

    let calls = transport.calls();
    let body = &calls[0].1["DNSProfileData"];
    assert_eq!(body["ProfileID"], "TestDFSP");
    assert_eq!(body["Tier"], 3);
    assert_eq!(
        body["NAPTR"],
        json!([require_ok!(serde_json::to_value(record().to_soap()))])
    );
}

#[tokio::test]
async fn update_profile_rejects_invalid_value() {
    let transport = MockTransport::new().respond(
        "UpdateDNSProfile",
        envelope(420, &["Invalid Value", "Order out of range"], None),
    );
    let client = ProvisioningClient::new(transport);
    let profile = Profile::new(ProfileOptions::new("TestDFSP"));

    let Err(err) = client.update_profile(&profile).await else {
        panic!("420 should have been rejected");
    };
    assert_eq!(err.kind(), Some(ErrorKind::InvalidValue));
    assert_eq!(err.server_messages(), ["Invalid Value", "Order out of range"]);
}

#[tokio::test]
async fn delete_profile_maps_server_error() {
    let transport =
        MockTransport::new().respond("DeleteDNSProfile", envelope(500, &["Internal"], None));
    let client = ProvisioningClient::new(transport);

    let Err(err) = client.delete_profile("TestDFSP").await else {
        panic!("500 should have been rejected");
    };
    assert!(matches!(err, ProvisioningError::Server { code: 500, .. }));
    assert!(!err.is_expected());
}

#[tokio::test]
async fn query_number_uses_configured_formatter() {
    let transport = MockTransport::new().respond(
        "QueryTN",
        number_document(tn_data(5_158_675_309, 1, "TestDFSP")),
    );
    let client = ProvisioningClient::builder(transport)
        .phone_formatter(|national: u64, country: u16| format!("00{country} {national}"))
        .build();

    let found = require_ok!(client.query_number(&TelephoneNumber::new(5_158_675_309, 1)).await);
    let data = require_some!(found.data);
    assert_eq!(data[0].tn, "001 5158675309");
}

#[tokio::test]
async fn number_requests_carry_tn() {
    let transport = Arc::new(
        MockTransport::new()
            .respond("ActivateTN", envelope(200, &["OK"], None))
            .respond("DeactivateTN", envelope(200, &["OK"], None)),
    );
    let client = ProvisioningClient::new(Arc::clone(&transport));
    let number = TelephoneNumber::new(5_158_675_309, 1);

    require_ok!(client.activate_number(&number, "TestDFSP").await);
    require_ok!(client.deactivate_number(&number).await);

    let calls = transport.calls();
    assert_eq!(calls[0].0, "ActivateTN");
    assert_eq!(
        calls[0].1,
        json!({
            "TN": { "Base": 5_158_675_309_u64, "CountryCode": 1 },
            "DNSProfileID": "TestDFSP"
        })
    );
    assert_eq!(calls[1].0, "DeactivateTN");
    assert_eq!(
        calls[1].1,
        json!({ "TN": { "Base": 5_158_675_309_u64, "CountryCode": 1 } })
    );
}

#[tokio::test]
async fn transport_failure_is_not_a_return_code() {
    let client = ProvisioningClient::new(MockTransport::new());

    let Err(err) = client.query_profile("TestDFSP").await else {
        panic!("missing response should fail");
    };
    assert!(matches!(err, ProvisioningError::Transport { .. }));
    assert_eq!(err.code(), None);
}

#[tokio::test]
async fn batch_query_collects_successes_and_failures() {
    let transport = NumberTransport::default()
        .respond(5_158_675_309, number_document(tn_data(5_158_675_309, 1, "A")))
        .respond(
            3_022_121_211,
            envelope(404, &["Not Found", "No TN profile could be found"], None),
        )
        .respond(
            4_155_550_100,
            number_document(json!([
                tn_data(4_155_550_100, 1, "B"),
                tn_data(4_155_550_100, 1, "C")
            ])),
        );
    let client = ProvisioningClient::builder(transport)
        .phone_formatter(RecordingFormatter::default())
        .build();
    let numbers = [
        TelephoneNumber::new(5_158_675_309, 1),
        TelephoneNumber::new(3_022_121_211, 44),
        TelephoneNumber::new(4_155_550_100, 1),
    ];

    let batch = client.batch_query_numbers(&numbers).await;
    assert_eq!(batch.success_count, 2);
    assert_eq!(batch.failed_count, 1);

    let profiles: Vec<&str> = batch.entries.iter().map(|e| e.profile_id.as_str()).collect();
    assert_eq!(profiles, vec!["A", "B", "C"]);

    assert_eq!(batch.failures[0].request_index, 1);
    assert_eq!(batch.failures[0].number, numbers[1]);
    assert_eq!(batch.failures[0].error.kind(), Some(ErrorKind::NotFound));
}
