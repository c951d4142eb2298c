/// Tribes FCM Shared Library
///
/// Firebase Cloud Messaging (FCM) HTTP v1 client used by the notification relay.
///
/// It handles:
/// - Service account key loading (explicit path or application-default file)
/// - OAuth2 access token minting with a signed JWT, cached until shortly before expiry
/// - Single message delivery to either a device token or a topic
/// - The `PushProvider` seam the relay dispatches through

pub mod client;
pub mod errors;
pub mod models;
pub mod provider;

pub use client::{FCMClient, DEFAULT_FCM_API_URL};
pub use errors::FCMError;
pub use models::{
    is_valid_topic_name, DeliveryTarget, FCMSendResult, PushMessage, PushNotification,
    ServiceAccountKey,
};
pub use provider::PushProvider;
