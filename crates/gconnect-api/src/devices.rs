// Device endpoints: registered devices, per-device settings, and the
// alarm fan-out across all devices.

use serde_json::Value;
use tracing::debug;

use crate::client::ConnectClient;
use crate::endpoints::paths;
use crate::error::Error;

impl ConnectClient {
    /// Return the devices registered to the current account.
    pub async fn get_devices(&self) -> Result<Vec<Value>, Error> {
        debug!("requesting devices");
        self.get_json(paths::DEVICES, &[]).await
    }

    /// Return settings for the device with `device_id`.
    pub async fn get_device_settings(&self, device_id: u64) -> Result<Value, Error> {
        let path = format!("{}/device-info/settings/{device_id}", paths::DEVICE);
        debug!("requesting device settings for {device_id}");

        self.get_json(&path, &[]).await
    }

    /// Return the most recently used device.
    pub async fn get_device_last_used(&self) -> Result<Value, Error> {
        let path = format!("{}/mylastused", paths::DEVICE);
        debug!("requesting last used device");

        self.get_json(&path, &[]).await
    }

    /// Collect active alarms from every registered device.
    ///
    /// Lists devices, then fetches each device's settings in device-list
    /// order and concatenates the alarm lists (a null/absent list counts
    /// as empty). If any per-device settings call fails the whole
    /// operation fails; no partial alarm list is returned.
    pub async fn get_device_alarms(&self) -> Result<Vec<Value>, Error> {
        debug!("requesting device alarms");

        let mut alarms = Vec::new();
        for device in self.get_devices().await? {
            let device_id = device
                .get("deviceId")
                .and_then(Value::as_u64)
                .ok_or_else(|| Error::Deserialization {
                    message: "device entry without a numeric deviceId".into(),
                    body: device.to_string(),
                })?;

            let settings = self.get_device_settings(device_id).await?;
            if let Some(Value::Array(device_alarms)) = settings.get("alarms") {
                alarms.extend(device_alarms.clone());
            }
        }
        Ok(alarms)
    }
}
