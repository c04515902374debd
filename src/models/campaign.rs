//! Fundraising campaign model.
//!
//! Campaigns are free-form documents: whatever object the client posts is kept,
//! apart from the identifier and timestamp, which the server always assigns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys the server owns on every campaign document.
const SERVER_ASSIGNED_KEYS: [&str; 2] = ["_id", "createdAt"];

/// A stored fundraising campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: String,
    pub created_at: String,
    /// Client-supplied fields, conventionally title, description,
    /// targetAmount and currentAmount
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// The client-owned part of a campaign, ready to be stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignDraft {
    fields: Map<String, Value>,
}

impl CampaignDraft {
    /// Take a posted body, dropping any server-owned keys it carries.
    pub fn from_body(mut fields: Map<String, Value>) -> Self {
        for key in SERVER_ASSIGNED_KEYS {
            fields.remove(key);
        }
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// A campaign with the conventional fields, used for literal datasets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub title: String,
    pub description: String,
    pub target_amount: f64,
    pub current_amount: f64,
}

impl From<NewCampaign> for CampaignDraft {
    fn from(campaign: NewCampaign) -> Self {
        let fields = match serde_json::to_value(campaign) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        CampaignDraft::from_body(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_keys_are_dropped() {
        let body = json!({
            "_id": "client-id",
            "title": "X",
            "targetAmount": 100,
            "createdAt": "1999-01-01T00:00:00Z"
        });
        let Value::Object(map) = body else {
            unreachable!()
        };

        let draft = CampaignDraft::from_body(map);

        assert!(!draft.fields().contains_key("_id"));
        assert!(!draft.fields().contains_key("createdAt"));
        assert_eq!(draft.fields()["title"], "X");
        assert_eq!(draft.fields()["targetAmount"], 100);
    }

    #[test]
    fn test_new_campaign_uses_camel_case() {
        let draft = CampaignDraft::from(NewCampaign {
            title: "Shelter roof".into(),
            description: "Fix the roof".into(),
            target_amount: 5000.0,
            current_amount: 1250.5,
        });

        assert_eq!(draft.fields()["targetAmount"], 5000.0);
        assert_eq!(draft.fields()["currentAmount"], 1250.5);
    }

    #[test]
    fn test_campaign_serializes_flat() {
        let mut fields = Map::new();
        fields.insert("title".into(), json!("X"));
        let campaign = Campaign {
            id: "abc".into(),
            created_at: "2026-01-01T00:00:00.000000Z".into(),
            fields,
        };

        let value = serde_json::to_value(&campaign).unwrap();
        assert_eq!(value["_id"], "abc");
        assert_eq!(value["createdAt"], "2026-01-01T00:00:00.000000Z");
        assert_eq!(value["title"], "X");
    }
}
