//! Payment channels presented to the user for manual transfers.
//!
//! The engine stores the chosen channel key on a transaction as an opaque tag.
//! Receiving account details are deployment configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key of the M-Pesa channel
pub const MPESA: &str = "mpesa";

/// Key of the e-Mola channel
pub const EMOLA: &str = "emola";

/// Receiving number of a channel nobody has configured yet
pub const UNCONFIGURED_NUMBER: &str = "000000000";

/// Holder name shown for a channel nobody has configured yet
pub const UNCONFIGURED_OWNER: &str = "Não configurado";

/// Receiving account for one mobile-money channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentChannel {
    /// Display name
    pub name: String,
    /// Receiving account number
    pub number: String,
    /// Account holder name
    pub owner: String,
}

impl PaymentChannel {
    /// Placeholder channel until deployment config supplies real details.
    pub fn unconfigured(name: &str) -> Self {
        Self {
            name: name.to_string(),
            number: UNCONFIGURED_NUMBER.to_string(),
            owner: UNCONFIGURED_OWNER.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.number != UNCONFIGURED_NUMBER
    }
}

/// Catalog of payment channels keyed by tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentMethods {
    channels: BTreeMap<String, PaymentChannel>,
}

impl PaymentMethods {
    pub fn new(channels: BTreeMap<String, PaymentChannel>) -> Self {
        Self { channels }
    }

    pub fn get(&self, key: &str) -> Option<&PaymentChannel> {
        self.channels.get(&key.to_ascii_lowercase())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Replaces the receiving details of a channel, adding it if missing.
    pub fn set(&mut self, key: &str, channel: PaymentChannel) {
        self.channels.insert(key.to_ascii_lowercase(), channel);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PaymentChannel)> {
        self.channels.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }
}

impl Default for PaymentMethods {
    fn default() -> Self {
        let mut channels = BTreeMap::new();
        channels.insert(MPESA.to_string(), PaymentChannel::unconfigured("M-Pesa"));
        channels.insert(EMOLA.to_string(), PaymentChannel::unconfigured("Emola"));
        Self { channels }
    }
}
