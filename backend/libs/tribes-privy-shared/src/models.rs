use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Privy app credentials (app id + app secret)
#[derive(Clone)]
pub struct PrivyCredentials {
    pub app_id: String,
    pub app_secret: String,
}

impl fmt::Debug for PrivyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivyCredentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// A Privy user. Only `id` is typed; everything else stays as Privy sent it
/// so the user object is echoed back unchanged, explicit nulls included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivyUser {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PrivyUser {
    /// Object entries of `linked_accounts`; missing or null reads as empty
    pub fn linked_accounts(&self) -> Vec<LinkedAccount> {
        self.extra
            .get("linked_accounts")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|account| account.as_object().cloned().map(LinkedAccount))
            .collect()
    }

    /// First linked wallet on the given chain, if any
    pub fn wallet(&self, chain_type: &str) -> Option<LinkedAccount> {
        self.linked_accounts()
            .into_iter()
            .find(|account| account.is_wallet_on(chain_type))
    }

    pub fn has_wallet(&self, chain_type: &str) -> bool {
        self.wallet(chain_type).is_some()
    }
}

/// Association between a user and a login method or wallet, kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkedAccount(Map<String, Value>);

impl LinkedAccount {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn account_type(&self) -> Option<&str> {
        self.str_field("type")
    }

    pub fn address(&self) -> Option<&str> {
        self.str_field("address")
    }

    pub fn chain_type(&self) -> Option<&str> {
        self.str_field("chain_type")
    }

    pub fn is_wallet_on(&self, chain_type: &str) -> bool {
        self.account_type() == Some("wallet")
            && self
                .chain_type()
                .is_some_and(|c| c.eq_ignore_ascii_case(chain_type))
    }
}

// ===== Privy API Request/Response Types =====

#[derive(Debug, Serialize)]
pub(crate) struct PasswordlessInitRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct PasswordlessAuthenticateRequest<'a> {
    pub email: &'a str,
    pub code: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmailLookupRequest<'a> {
    pub address: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateUserRequest<'a> {
    pub linked_accounts: Vec<NewLinkedAccount<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewLinkedAccount<'a> {
    #[serde(rename = "type")]
    pub account_type: &'a str,
    pub address: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateWalletsRequest<'a> {
    pub wallets: Vec<WalletSpec<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WalletSpec<'a> {
    pub chain_type: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PrivyErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_round_trips_unknown_fields() {
        let raw = json!({
            "id": "did:privy:abc",
            "created_at": 1700000000,
            "has_accepted_terms": false,
            "linked_accounts": [
                {"type": "email", "address": "a@b.co", "verified_at": 1700000000}
            ]
        });

        let user: PrivyUser = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.id, "did:privy:abc");
        assert_eq!(user.linked_accounts()[0].address(), Some("a@b.co"));
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn wallet_lookup_matches_type_and_chain() {
        let user: PrivyUser = serde_json::from_value(json!({
            "id": "did:privy:abc",
            "linked_accounts": [
                {"type": "email", "address": "a@b.co"},
                {"type": "wallet", "address": "So1ana", "chain_type": "solana"},
                {"type": "wallet", "address": "0xabc", "chain_type": "Ethereum"}
            ]
        }))
        .unwrap();

        assert_eq!(
            user.wallet("ethereum").as_ref().and_then(LinkedAccount::address),
            Some("0xabc")
        );
        assert!(user.has_wallet("solana"));
        assert!(!user.has_wallet("bitcoin"));
    }

    #[test]
    fn user_without_linked_accounts_has_no_wallet() {
        let user: PrivyUser = serde_json::from_value(json!({"id": "did:privy:x"})).unwrap();
        assert!(!user.has_wallet("ethereum"));
    }

    #[test]
    fn echo_keeps_nulls_and_absent_fields() {
        let raw = json!({
            "id": "did:privy:n",
            "linked_accounts": [{"type": "email", "address": null, "chain_type": null}]
        });
        let user: PrivyUser = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.linked_accounts()[0].address(), None);
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);

        let bare = json!({"id": "did:privy:y"});
        let user: PrivyUser = serde_json::from_value(bare.clone()).unwrap();
        assert!(user.linked_accounts().is_empty());
        assert_eq!(serde_json::to_value(&user).unwrap(), bare);
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let creds = PrivyCredentials {
            app_id: "app".into(),
            app_secret: "super-secret".into(),
        };
        let printed = format!("{:?}", creds);
        assert!(printed.contains("app"));
        assert!(!printed.contains("super-secret"));
    }
}
