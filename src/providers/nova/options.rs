//! Nova takes most optional arguments in the JSON body, so apart from
//! [`ListOptions`] these builders render a payload instead of query pairs.

use super::domain::BackupType;
use crate::core::http::Payload;
use crate::request_options;
use crate::utils::error::Result;
use crate::utils::validation::check_argument;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

pub const MAX_METADATA_ENTRIES: usize = 5;
pub const MAX_PERSONALITY_FILES: usize = 5;
pub const MAX_FIELD_BYTES: usize = 255;
pub const MAX_FILE_BYTES: usize = 10 * 1024;

request_options! {
    /// Paging and change filters of list calls.
    pub struct ListOptions;
}

impl ListOptions {
    pub fn changes_since(mut self, since: DateTime<Utc>) -> Self {
        self.base.replace_query(
            "changes-since",
            since.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.base.replace_query("limit", limit.to_string());
        self
    }

    /// Id of the last item of the previous page.
    pub fn marker(mut self, marker: &str) -> Self {
        self.base.replace_query("marker", marker);
        self
    }
}

pub(crate) fn json_payload(body: Value) -> Payload {
    Payload::json(body.to_string())
}

/// Checks the count and size limits Nova puts on server metadata.
pub fn check_metadata(metadata: &BTreeMap<String, String>) -> Result<()> {
    check_argument(metadata.len() <= MAX_METADATA_ENTRIES, || {
        format!(
            "maximum number of metadata entries is {MAX_METADATA_ENTRIES}, got {}",
            metadata.len()
        )
    })?;
    for (key, value) in metadata {
        check_argument(key.len() < MAX_FIELD_BYTES, || {
            format!(
                "maximum length of metadata key is 255 bytes. Key specified {key} is {} bytes",
                key.len()
            )
        })?;
        check_argument(value.len() < MAX_FIELD_BYTES, || {
            format!(
                "maximum length of metadata value is 255 bytes. Value specified for {key} ({value}) is {} bytes",
                value.len()
            )
        })?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PersonalityFile {
    path: String,
    contents: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateServerOptions {
    admin_pass: Option<String>,
    metadata: BTreeMap<String, String>,
    personality: Vec<PersonalityFile>,
    key_name: Option<String>,
    security_group_names: Vec<String>,
    user_data: Option<String>,
    disk_config: Option<String>,
    networks: Vec<String>,
}

impl CreateServerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admin_pass(mut self, admin_pass: &str) -> Self {
        self.admin_pass = Some(admin_pass.to_string());
        self
    }

    /// At most five entries; keys and values shorter than 255 bytes.
    pub fn metadata(mut self, metadata: BTreeMap<String, String>) -> Result<Self> {
        check_metadata(&metadata)?;
        self.metadata = metadata;
        Ok(self)
    }

    /// Injects a file into the server's file system at boot.
    pub fn write_file_to_path(mut self, contents: &[u8], path: &str) -> Result<Self> {
        check_argument(self.personality.len() < MAX_PERSONALITY_FILES, || {
            "maximum number of files allowed is 5".to_string()
        })?;
        check_argument(path.len() < MAX_FIELD_BYTES, || {
            format!(
                "maximum length of path is 255 bytes. Path specified {path} is {} bytes",
                path.len()
            )
        })?;
        check_argument(contents.len() < MAX_FILE_BYTES, || {
            format!(
                "maximum size of the file is 10KB. Contents specified is {} bytes",
                contents.len()
            )
        })?;
        self.personality.push(PersonalityFile {
            path: path.to_string(),
            contents: STANDARD.encode(contents),
        });
        Ok(self)
    }

    pub fn key_pair_name(mut self, key_name: &str) -> Self {
        self.key_name = Some(key_name.to_string());
        self
    }

    /// Replaces the groups; names keep the order they were first given in.
    pub fn security_group_names<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.security_group_names = distinct_non_empty(names, "all security groups must be non-empty")?;
        Ok(self)
    }

    pub fn user_data(mut self, user_data: &[u8]) -> Self {
        self.user_data = Some(STANDARD.encode(user_data));
        self
    }

    /// `AUTO` or `MANUAL`.
    pub fn disk_config(mut self, disk_config: &str) -> Self {
        self.disk_config = Some(disk_config.to_string());
        self
    }

    /// Replaces the network uuids, in order.
    pub fn networks<I, S>(mut self, networks: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.networks = distinct_non_empty(networks, "all networks must be non-empty")?;
        Ok(self)
    }

    /// Renders `{"server": {...}}` for a create call.
    pub fn to_payload(&self, name: &str, image_ref: &str, flavor_ref: &str) -> Payload {
        let mut server = Map::new();
        server.insert("name".into(), json!(name));
        server.insert("imageRef".into(), json!(image_ref));
        server.insert("flavorRef".into(), json!(flavor_ref));
        if let Some(admin_pass) = &self.admin_pass {
            server.insert("adminPass".into(), json!(admin_pass));
        }
        if !self.metadata.is_empty() {
            server.insert("metadata".into(), json!(self.metadata));
        }
        if !self.personality.is_empty() {
            let files: Vec<Value> = self
                .personality
                .iter()
                .map(|file| json!({"path": file.path, "contents": file.contents}))
                .collect();
            server.insert("personality".into(), Value::Array(files));
        }
        if let Some(key_name) = &self.key_name {
            server.insert("key_name".into(), json!(key_name));
        }
        if !self.security_group_names.is_empty() {
            let groups: Vec<Value> = self
                .security_group_names
                .iter()
                .map(|name| json!({"name": name}))
                .collect();
            server.insert("security_groups".into(), Value::Array(groups));
        }
        if let Some(user_data) = &self.user_data {
            server.insert("user_data".into(), json!(user_data));
        }
        if let Some(disk_config) = &self.disk_config {
            server.insert("OS-DCF:diskConfig".into(), json!(disk_config));
        }
        if !self.networks.is_empty() {
            let networks: Vec<Value> = self
                .networks
                .iter()
                .map(|uuid| json!({"uuid": uuid}))
                .collect();
            server.insert("networks".into(), Value::Array(networks));
        }
        json_payload(json!({ "server": server }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildServerOptions {
    image_ref: Option<String>,
    name: Option<String>,
    admin_pass: Option<String>,
}

impl RebuildServerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, image_ref: &str) -> Self {
        self.image_ref = Some(image_ref.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn admin_pass(mut self, admin_pass: &str) -> Self {
        self.admin_pass = Some(admin_pass.to_string());
        self
    }

    pub fn to_payload(&self) -> Payload {
        let mut rebuild = Map::new();
        if let Some(image_ref) = &self.image_ref {
            rebuild.insert("imageRef".into(), json!(image_ref));
        }
        if let Some(name) = &self.name {
            rebuild.insert("name".into(), json!(name));
        }
        if let Some(admin_pass) = &self.admin_pass {
            rebuild.insert("adminPass".into(), json!(admin_pass));
        }
        json_payload(json!({ "rebuild": rebuild }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateVolumeOptions {
    name: Option<String>,
    description: Option<String>,
    volume_type: Option<String>,
    availability_zone: Option<String>,
    snapshot_id: Option<String>,
    metadata: BTreeMap<String, String>,
}

impl CreateVolumeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn volume_type(mut self, volume_type: &str) -> Self {
        self.volume_type = Some(volume_type.to_string());
        self
    }

    pub fn availability_zone(mut self, zone: &str) -> Self {
        self.availability_zone = Some(zone.to_string());
        self
    }

    pub fn snapshot_id(mut self, snapshot_id: &str) -> Self {
        self.snapshot_id = Some(snapshot_id.to_string());
        self
    }

    pub fn metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn to_payload(&self, size_gb: u32) -> Payload {
        let mut volume = Map::new();
        if let Some(name) = &self.name {
            volume.insert("display_name".into(), json!(name));
        }
        if let Some(description) = &self.description {
            volume.insert("display_description".into(), json!(description));
        }
        volume.insert("size".into(), json!(size_gb));
        if let Some(volume_type) = &self.volume_type {
            volume.insert("volume_type".into(), json!(volume_type));
        }
        if let Some(zone) = &self.availability_zone {
            volume.insert("availability_zone".into(), json!(zone));
        }
        if let Some(snapshot_id) = &self.snapshot_id {
            volume.insert("snapshot_id".into(), json!(snapshot_id));
        }
        if !self.metadata.is_empty() {
            volume.insert("metadata".into(), json!(self.metadata));
        }
        json_payload(json!({ "volume": volume }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateVolumeSnapshotOptions {
    name: Option<String>,
    description: Option<String>,
    force: bool,
}

impl CreateVolumeSnapshotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Snapshot even while the volume is attached.
    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    pub fn to_payload(&self, volume_id: &str) -> Payload {
        let mut snapshot = Map::new();
        if let Some(name) = &self.name {
            snapshot.insert("display_name".into(), json!(name));
        }
        snapshot.insert("volume_id".into(), json!(volume_id));
        if let Some(description) = &self.description {
            snapshot.insert("display_description".into(), json!(description));
        }
        if self.force {
            // sent as a string
            snapshot.insert("force".into(), json!("true"));
        }
        json_payload(json!({ "snapshot": snapshot }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateBackupOfServerOptions {
    metadata: BTreeMap<String, String>,
}

impl CreateBackupOfServerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn to_payload(&self, name: &str, backup_type: BackupType, rotation: u32) -> Payload {
        let mut backup = Map::new();
        backup.insert("backup_type".into(), json!(backup_type.as_str()));
        backup.insert("rotation".into(), json!(rotation));
        backup.insert("name".into(), json!(name));
        if !self.metadata.is_empty() {
            backup.insert("metadata".into(), json!(self.metadata));
        }
        json_payload(json!({ "createBackup": backup }))
    }
}

/// Extra specs sent with a new volume type. Without specs the body omits
/// the member; `specs` with an empty map sends `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateVolumeTypeOptions {
    specs: Option<BTreeMap<String, String>>,
}

impl CreateVolumeTypeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn specs(mut self, specs: BTreeMap<String, String>) -> Self {
        self.specs = Some(specs);
        self
    }

    pub fn to_payload(&self, name: &str) -> Payload {
        let mut volume_type = Map::new();
        volume_type.insert("name".into(), json!(name));
        if let Some(specs) = &self.specs {
            volume_type.insert("extra_specs".into(), json!(specs));
        }
        json_payload(json!({ "volume_type": volume_type }))
    }
}

fn distinct_non_empty<I, S>(values: I, message: &str) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut distinct: Vec<String> = Vec::new();
    for value in values {
        let value = value.as_ref();
        check_argument(!value.is_empty(), || message.to_string())?;
        if !distinct.iter().any(|v| v == value) {
            distinct.push(value.to_string());
        }
    }
    Ok(distinct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::RequestOptions;
    use chrono::TimeZone;

    fn body(payload: &Payload) -> Value {
        serde_json::from_str(&payload.content).unwrap()
    }

    #[test]
    fn test_list_options() {
        let since = Utc.with_ymd_and_hms(2012, 3, 8, 10, 0, 0).unwrap();
        let options = ListOptions::new().changes_since(since).limit(10).marker("abc");
        assert_eq!(options.query_values("changes-since"), vec!["2012-03-08T10:00:00Z"]);
        assert_eq!(options.query_values("limit"), vec!["10"]);
        assert_eq!(options.query_values("marker"), vec!["abc"]);
    }

    #[test]
    fn test_create_server_minimal_body() {
        let payload = CreateServerOptions::new().to_payload("test-e92", "1241", "100");
        assert_eq!(
            body(&payload),
            json!({"server": {"name": "test-e92", "imageRef": "1241", "flavorRef": "100"}})
        );
    }

    #[test]
    fn test_create_server_full_body() {
        let metadata = BTreeMap::from([("Server Label".to_string(), "Web Head 1".to_string())]);
        let payload = CreateServerOptions::new()
            .admin_pass("secret")
            .key_pair_name("default")
            .security_group_names(["group1", "group2", "group1"])
            .unwrap()
            .networks(["b3856ac0-f481-11e2-b778-0800200c9a66"])
            .unwrap()
            .disk_config("AUTO")
            .user_data(b"hello")
            .metadata(metadata)
            .unwrap()
            .write_file_to_path(b"ssh-rsa AAAA", "/root/.ssh/authorized_keys")
            .unwrap()
            .to_payload("test-e92", "1241", "100");

        assert_eq!(
            body(&payload),
            json!({"server": {
                "name": "test-e92", "imageRef": "1241", "flavorRef": "100",
                "adminPass": "secret",
                "metadata": {"Server Label": "Web Head 1"},
                "personality": [{"path": "/root/.ssh/authorized_keys", "contents": "c3NoLXJzYSBBQUFB"}],
                "key_name": "default",
                "security_groups": [{"name": "group1"}, {"name": "group2"}],
                "user_data": "aGVsbG8=",
                "OS-DCF:diskConfig": "AUTO",
                "networks": [{"uuid": "b3856ac0-f481-11e2-b778-0800200c9a66"}]
            }})
        );
    }

    #[test]
    fn test_metadata_limits() {
        let six: BTreeMap<String, String> =
            (0..6).map(|i| (format!("k{i}"), "v".to_string())).collect();
        assert!(CreateServerOptions::new().metadata(six).is_err());

        let long_key = BTreeMap::from([("k".repeat(255), "v".to_string())]);
        assert!(CreateServerOptions::new().metadata(long_key).is_err());

        let long_value = BTreeMap::from([("k".to_string(), "v".repeat(255))]);
        assert!(CreateServerOptions::new().metadata(long_value).is_err());

        let ok = BTreeMap::from([("k".repeat(254), "v".repeat(254))]);
        assert!(CreateServerOptions::new().metadata(ok).is_ok());
    }

    #[test]
    fn test_empty_group_or_network_is_rejected() {
        let err = CreateServerOptions::new()
            .security_group_names(["default", ""])
            .unwrap_err();
        assert!(err.to_string().contains("all security groups must be non-empty"));

        let err = CreateServerOptions::new().networks([""]).unwrap_err();
        assert!(err.to_string().contains("all networks must be non-empty"));
    }

    #[test]
    fn test_groups_and_networks_are_replaced() {
        let payload = CreateServerOptions::new()
            .security_group_names(["a", "c"])
            .unwrap()
            .networks(["net-1"])
            .unwrap()
            .security_group_names(["b"])
            .unwrap()
            .networks(["net-2", "net-2"])
            .unwrap()
            .to_payload("test-e92", "1241", "100");

        let server = &body(&payload)["server"];
        assert_eq!(server["security_groups"], json!([{"name": "b"}]));
        assert_eq!(server["networks"], json!([{"uuid": "net-2"}]));
    }

    #[test]
    fn test_personality_limits() {
        let mut options = CreateServerOptions::new();
        for i in 0..MAX_PERSONALITY_FILES {
            options = options.write_file_to_path(b"x", &format!("/etc/{i}")).unwrap();
        }
        assert!(options.write_file_to_path(b"x", "/etc/6").is_err());

        assert!(CreateServerOptions::new()
            .write_file_to_path(b"x", &"p".repeat(255))
            .is_err());
        assert!(CreateServerOptions::new()
            .write_file_to_path(&vec![0u8; MAX_FILE_BYTES], "/etc/big")
            .is_err());
    }

    #[test]
    fn test_volume_and_snapshot_bodies() {
        let volume = CreateVolumeOptions::new()
            .name("cloudapis-test-volume")
            .description("description of test volume")
            .to_payload(1);
        assert_eq!(
            body(&volume),
            json!({"volume": {"display_name": "cloudapis-test-volume",
                              "display_description": "description of test volume", "size": 1}})
        );

        let snapshot = CreateVolumeSnapshotOptions::new()
            .name("cloudapis-live-test")
            .description("nightly snapshot")
            .force()
            .to_payload("13");
        assert_eq!(
            body(&snapshot),
            json!({"snapshot": {"display_name": "cloudapis-live-test", "volume_id": "13",
                                "display_description": "nightly snapshot", "force": "true"}})
        );
    }

    #[test]
    fn test_volume_type_body() {
        assert_eq!(
            body(&CreateVolumeTypeOptions::new().to_payload("cloudapis-test-1")),
            json!({"volume_type": {"name": "cloudapis-test-1"}})
        );
        assert_eq!(
            body(&CreateVolumeTypeOptions::new().specs(BTreeMap::new()).to_payload("cloudapis-test-1")),
            json!({"volume_type": {"name": "cloudapis-test-1", "extra_specs": {}}})
        );
    }

    #[test]
    fn test_backup_body() {
        let metadata = BTreeMap::from([("some".to_string(), "data or other".to_string())]);
        let payload = CreateBackupOfServerOptions::new()
            .metadata(metadata)
            .to_payload("mybackup", BackupType::Weekly, 3);
        assert_eq!(
            body(&payload),
            json!({"createBackup": {"backup_type": "weekly", "rotation": 3, "name": "mybackup",
                                    "metadata": {"some": "data or other"}}})
        );
    }

    #[test]
    fn test_rebuild_body() {
        let payload = RebuildServerOptions::new().with_image("9").to_payload();
        assert_eq!(body(&payload), json!({"rebuild": {"imageRef": "9"}}));
    }
}
