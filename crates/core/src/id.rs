// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record and channel identifier types.
//!
//! Record ids (`ContractorId`, `JobId`, ...) are allocated by the backing
//! store. Channel ids (`UserId`, `ChatId`, `MessageId`) come from the message
//! transport and are signed to match common transport conventions.

crate::define_record_id! {
    /// Identifier of a contractor (usta) record.
    pub struct ContractorId;
}

crate::define_record_id! {
    /// Identifier of a job (lead) record.
    pub struct JobId;
}

crate::define_record_id! {
    /// Identifier of a replacement part.
    pub struct PartId;
}

crate::define_record_id! {
    /// Identifier of a service region (viloyat).
    pub struct RegionId;
}

crate::define_record_id! {
    /// Identifier of a district (tuman) within a region.
    pub struct DistrictId;
}

crate::define_record_id! {
    /// Identifier of a configured job stage in the backing store.
    pub struct StageId;
}

/// Define a signed channel-side identifier newtype.
macro_rules! define_channel_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

define_channel_id! {
    /// Identity of a user on the message transport.
    pub struct UserId;
}

define_channel_id! {
    /// Identity of a chat on the message transport.
    pub struct ChatId;
}

define_channel_id! {
    /// Identity of a single message within a chat.
    pub struct MessageId;
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
