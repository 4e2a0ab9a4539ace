//! The two remote operations the lifecycle controller depends on.

use std::future::Future;

use anyhow::Result;

use crate::models::{CreateGuildRequest, Guild};

/// Remote guild API. Implemented over HTTP by the Discord client and by
/// in-memory fakes in tests.
pub trait GuildApi {
    /// Create a guild. An `Ok` guild with an empty id counts as a failure.
    fn create_guild(&self, request: &CreateGuildRequest)
        -> impl Future<Output = Result<Guild>> + Send;

    fn delete_guild(&self, guild_id: &str) -> impl Future<Output = Result<()>> + Send;
}
