/// History rows are keyed by UUID, matching the identity provider's user ids.
pub type RecordId = uuid::Uuid;

/// Subject of an authenticated session.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
