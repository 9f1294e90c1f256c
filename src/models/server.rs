// src/models/server.rs
use craftping::Response as PingResponse;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

// Protocol number the dashboard labels as Purpur. Protocol numbers are shared
// across server software and bump with every Minecraft release, so the label
// is a guess, not a fact.
pub const PURPUR_PROTOCOL: i32 = 755;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub info: String,
    pub bedrock_compatible: bool,
    // Stored and echoed back but read by no logic.
    pub geyser: bool,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

// Create payload. Every field is defaulted: absent fields become empty
// strings / zero / false instead of rejections. `createdBy` always comes from
// the session, never from the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateServerRequest {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub info: String,
    pub bedrock_compatible: bool,
    pub geyser: bool,
}

impl CreateServerRequest {
    pub fn into_record(self, created_by: String) -> ServerRecord {
        ServerRecord {
            id: None,
            name: self.name,
            host: self.host,
            port: self.port,
            info: self.info,
            bedrock_compatible: self.bedrock_compatible,
            geyser: self.geyser,
            created_by,
            icon_url: None,
        }
    }
}

// Live status for one record, rebuilt on every request and never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatusView {
    pub id: String,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub info: String,
    pub bedrock_compatible: bool,
    pub geyser: bool,
    pub created_by: String,
    pub icon_url: String,
    pub online: bool,
    pub players: u32,
    pub max_players: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software: Option<String>,
    #[serde(rename = "type")]
    pub server_type: String,
}

impl ServerStatusView {
    pub fn offline(record: &ServerRecord) -> Self {
        Self::base(record)
    }

    pub fn online(record: &ServerRecord, pong: &PingResponse) -> Self {
        let mut view = Self::base(record);
        view.online = true;
        view.players = pong.online_players as u32;
        view.max_players = pong.max_players as u32;
        view.version = Some(pong.version.clone());
        view.software = Some(software_label(pong.protocol).to_string());
        view
    }

    fn base(record: &ServerRecord) -> Self {
        Self {
            id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: record.name.clone(),
            host: record.host.clone(),
            port: record.port,
            info: record.info.clone(),
            bedrock_compatible: record.bedrock_compatible,
            geyser: record.geyser,
            created_by: record.created_by.clone(),
            icon_url: record
                .icon_url
                .clone()
                .unwrap_or_else(|| default_icon_url(&record.host, record.port)),
            online: false,
            players: 0,
            max_players: 0,
            version: None,
            software: None,
            // Display family comes from the stored flag, never from the probe.
            server_type: if record.bedrock_compatible { "Bedrock" } else { "Java" }.to_string(),
        }
    }
}

pub fn software_label(protocol: i32) -> &'static str {
    if protocol == PURPUR_PROTOCOL {
        "Purpur"
    } else {
        "Java"
    }
}

// Derived at display time when a record carries no icon of its own.
pub fn default_icon_url(host: &str, port: u16) -> String {
    format!("https://api.mcsrvstat.us/icon/{}:{}", host, port)
}
