#![allow(clippy::unwrap_used)]
// Device endpoint tests, including the alarm fan-out (list devices, then
// fetch settings per device) and its all-or-nothing failure policy.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gconnect_api::{ConnectClient, Error, Profile, TokenBundle, UnitSystem};

async fn setup() -> (MockServer, ConnectClient) {
    let server = MockServer::start().await;
    let api_base = Url::parse(&server.uri()).unwrap();
    let client = ConnectClient::with_session(
        reqwest::Client::new(),
        api_base,
        TokenBundle {
            access_token: "test-access".into(),
            refresh_token: "test-refresh".into(),
            token_type: "Bearer".into(),
            expires_at: i64::MAX,
        },
        Profile {
            display_name: "mountain.goat".into(),
            full_name: "Mountain Goat".into(),
            unit_system: UnitSystem::Metric,
        },
    );
    (server, client)
}

async fn mount_device_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/device-service/deviceregistration/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "deviceId": 111, "productDisplayName": "Forerunner 955" },
            { "deviceId": 222, "productDisplayName": "Edge 840" }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_device_alarms_concatenates_in_device_order() {
    let (server, client) = setup().await;
    mount_device_list(&server).await;

    Mock::given(method("GET"))
        .and(path("/device-service/deviceservice/device-info/settings/111"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "alarms": [
                { "alarmId": "x", "alarmTime": 420 },
                { "alarmId": "y", "alarmTime": 480 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Device B reports no alarm list at all; that counts as empty.
    Mock::given(method("GET"))
        .and(path("/device-service/deviceservice/device-info/settings/222"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "alarms": null })))
        .expect(1)
        .mount(&server)
        .await;

    let alarms = client.get_device_alarms().await.unwrap();

    assert_eq!(alarms.len(), 2);
    assert_eq!(alarms[0]["alarmId"], "x");
    assert_eq!(alarms[1]["alarmId"], "y");
}

#[tokio::test]
async fn test_device_alarms_fails_whole_on_partial_failure() {
    let (server, client) = setup().await;
    mount_device_list(&server).await;

    Mock::given(method("GET"))
        .and(path("/device-service/deviceservice/device-info/settings/111"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "alarms": [{ "alarmId": "x" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/device-service/deviceservice/device-info/settings/222"))
        .respond_with(ResponseTemplate::new(500).set_body_string("settings unavailable"))
        .mount(&server)
        .await;

    // No partial alarm list: the whole operation fails.
    let result = client.get_device_alarms().await;
    assert!(matches!(result, Err(Error::Api { status: 500, .. })));
}

#[tokio::test]
async fn test_device_last_used_path() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/device-service/deviceservice/mylastused"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userDeviceId": 111
        })))
        .expect(1)
        .mount(&server)
        .await;

    let device = client.get_device_last_used().await.unwrap();
    assert_eq!(device["userDeviceId"], 111);
}

#[tokio::test]
async fn test_get_devices_passthrough() {
    let (server, client) = setup().await;
    mount_device_list(&server).await;

    let devices = client.get_devices().await.unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0]["productDisplayName"], "Forerunner 955");
}
