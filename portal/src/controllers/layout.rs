//! Block and room management controller.
//!
//! An admin opens one residency to manage its blocks, then one block to
//! manage its rooms. Each mutation re-fetches the list it changed; nothing
//! is updated optimistically.

use tracing::debug;

use super::reject_locally;
use crate::client::PortalApi;
use crate::domain::{
    ApiResult, Block, BlockDraft, BlockId, Error, ResidencyId, Room, RoomDraft, RoomId,
};
use crate::session::SessionContext;

const NO_RESIDENCY_OPEN: &str = "Select a residency first";
const NO_BLOCK_OPEN: &str = "Select a block first";
const FETCH_BLOCKS_FAILED: &str = "Failed to fetch blocks";
const BLOCK_NOT_FOUND: &str = "Block not found";
const BLOCK_CREATED: &str = "Block created successfully";
const BLOCK_CREATE_FAILED: &str = "Failed to create block";
const BLOCK_UPDATED: &str = "Block updated successfully";
const BLOCK_UPDATE_FAILED: &str = "Failed to update block";
const BLOCK_DELETED: &str = "Block deleted successfully";
const BLOCK_DELETE_FAILED: &str = "Failed to delete block";
const FETCH_ROOMS_FAILED: &str = "Failed to fetch rooms";
const ROOM_NOT_FOUND: &str = "Room not found";
const ROOM_CREATED: &str = "Room created successfully";
const ROOM_CREATE_FAILED: &str = "Failed to create room";
const ROOM_UPDATED: &str = "Room updated successfully";
const ROOM_UPDATE_FAILED: &str = "Failed to update room";
const ROOM_DELETED: &str = "Room deleted successfully";
const ROOM_DELETE_FAILED: &str = "Failed to delete room";

/// State behind the block and room pages.
pub struct LayoutDashboard {
    api: PortalApi,
    session: SessionContext,
    residency: Option<ResidencyId>,
    blocks: Vec<Block>,
    block: Option<BlockId>,
    rooms: Vec<Room>,
    block_draft: BlockDraft,
    room_draft: RoomDraft,
}

impl LayoutDashboard {
    /// Dashboard with nothing open.
    pub fn new(api: PortalApi, session: SessionContext) -> Self {
        Self {
            api,
            session,
            residency: None,
            blocks: Vec::new(),
            block: None,
            rooms: Vec::new(),
            block_draft: BlockDraft::default(),
            room_draft: RoomDraft::default(),
        }
    }

    /// Blocks of the open residency.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Rooms of the open block.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// The block form.
    pub fn block_draft(&self) -> &BlockDraft {
        &self.block_draft
    }

    /// Mutable block form, used by both create and update.
    pub fn block_draft_mut(&mut self) -> &mut BlockDraft {
        &mut self.block_draft
    }

    /// The room form.
    pub fn room_draft(&self) -> &RoomDraft {
        &self.room_draft
    }

    /// Mutable room form, used by both create and update.
    pub fn room_draft_mut(&mut self) -> &mut RoomDraft {
        &mut self.room_draft
    }

    /// Make `id` the residency new blocks are created under, without
    /// fetching. Closes any open block.
    pub fn select_residency(&mut self, id: ResidencyId) {
        self.residency = Some(id);
        self.blocks.clear();
        self.select_block_inner(None);
    }

    /// Select `id` and list its blocks.
    pub async fn open_residency(&mut self, id: ResidencyId) -> ApiResult<()> {
        self.select_residency(id);
        self.fetch_blocks().await
    }

    /// Make `id` the block new rooms are created under, without fetching.
    pub fn select_block(&mut self, id: BlockId) {
        self.select_block_inner(Some(id));
    }

    /// Select `id` and list its rooms.
    pub async fn open_block(&mut self, id: BlockId) -> ApiResult<()> {
        self.select_block(id);
        self.fetch_rooms().await
    }

    /// Replace the block list for the open residency.
    pub async fn fetch_blocks(&mut self) -> ApiResult<()> {
        let residency = self.open_residency_id()?;
        match self.api.list_blocks(&residency).await {
            Ok(blocks) => {
                debug!(residency_id = %residency, count = blocks.len(), "blocks fetched");
                self.blocks = blocks;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, FETCH_BLOCKS_FAILED);
                Err(error)
            }
        }
    }

    /// Look up one block.
    pub async fn find_block(&self, id: &BlockId) -> ApiResult<Block> {
        self.api.get_block(id).await.inspect_err(|error| {
            self.session.report(error, BLOCK_NOT_FOUND);
        })
    }

    /// Create a block from the form under the open residency.
    ///
    /// On success the form resets and the block list is re-fetched.
    pub async fn add_block(&mut self) -> ApiResult<()> {
        let residency = self.open_residency_id()?;
        self.block_draft
            .validate()
            .map_err(|error| reject_locally(&self.session, &error))?;
        match self.api.create_block(&residency, &self.block_draft).await {
            Ok(ack) => {
                debug!(id = ?ack.id, "block created");
                self.session.success(BLOCK_CREATED);
                self.block_draft = BlockDraft::default();
                self.refresh_blocks().await;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, BLOCK_CREATE_FAILED);
                Err(error)
            }
        }
    }

    /// Overwrite block `id` with the form.
    pub async fn update_block(&mut self, id: &BlockId) -> ApiResult<()> {
        self.block_draft
            .validate()
            .map_err(|error| reject_locally(&self.session, &error))?;
        match self.api.update_block(id, &self.block_draft).await {
            Ok(_) => {
                self.session.success(BLOCK_UPDATED);
                self.block_draft = BlockDraft::default();
                self.refresh_blocks().await;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, BLOCK_UPDATE_FAILED);
                Err(error)
            }
        }
    }

    /// Delete block `id`, closing it if open, and re-fetch the list.
    pub async fn delete_block(&mut self, id: &BlockId) -> ApiResult<()> {
        match self.api.delete_block(id).await {
            Ok(()) => {
                self.session.success(BLOCK_DELETED);
                if self.block.as_ref() == Some(id) {
                    self.select_block_inner(None);
                }
                self.refresh_blocks().await;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, BLOCK_DELETE_FAILED);
                Err(error)
            }
        }
    }

    /// Replace the room list for the open block.
    pub async fn fetch_rooms(&mut self) -> ApiResult<()> {
        let block = self.open_block_id()?;
        match self.api.list_rooms(&block).await {
            Ok(rooms) => {
                debug!(block_id = %block, count = rooms.len(), "rooms fetched");
                self.rooms = rooms;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, FETCH_ROOMS_FAILED);
                Err(error)
            }
        }
    }

    /// Look up one room.
    pub async fn find_room(&self, id: &RoomId) -> ApiResult<Room> {
        self.api.get_room(id).await.inspect_err(|error| {
            self.session.report(error, ROOM_NOT_FOUND);
        })
    }

    /// Create a room from the form under the open block.
    ///
    /// On success the form resets and the room list is re-fetched.
    pub async fn add_room(&mut self) -> ApiResult<()> {
        let block = self.open_block_id()?;
        self.room_draft
            .validate()
            .map_err(|error| reject_locally(&self.session, &error))?;
        match self.api.create_room(&block, &self.room_draft).await {
            Ok(ack) => {
                debug!(id = ?ack.id, "room created");
                self.session.success(ROOM_CREATED);
                self.room_draft = RoomDraft::default();
                self.refresh_rooms().await;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, ROOM_CREATE_FAILED);
                Err(error)
            }
        }
    }

    /// Overwrite room `id` with the form.
    pub async fn update_room(&mut self, id: &RoomId) -> ApiResult<()> {
        self.room_draft
            .validate()
            .map_err(|error| reject_locally(&self.session, &error))?;
        match self.api.update_room(id, &self.room_draft).await {
            Ok(_) => {
                self.session.success(ROOM_UPDATED);
                self.room_draft = RoomDraft::default();
                self.refresh_rooms().await;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, ROOM_UPDATE_FAILED);
                Err(error)
            }
        }
    }

    /// Delete room `id` and re-fetch the list.
    pub async fn delete_room(&mut self, id: &RoomId) -> ApiResult<()> {
        match self.api.delete_room(id).await {
            Ok(()) => {
                self.session.success(ROOM_DELETED);
                self.refresh_rooms().await;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, ROOM_DELETE_FAILED);
                Err(error)
            }
        }
    }

    fn select_block_inner(&mut self, id: Option<BlockId>) {
        self.block = id;
        self.rooms.clear();
    }

    fn open_residency_id(&self) -> ApiResult<ResidencyId> {
        self.residency.clone().ok_or_else(|| {
            self.session.error(NO_RESIDENCY_OPEN);
            Error::invalid_request(NO_RESIDENCY_OPEN)
        })
    }

    fn open_block_id(&self) -> ApiResult<BlockId> {
        self.block.clone().ok_or_else(|| {
            self.session.error(NO_BLOCK_OPEN);
            Error::invalid_request(NO_BLOCK_OPEN)
        })
    }

    /// Re-fetch blocks after a mutation when a residency is open.
    async fn refresh_blocks(&mut self) {
        if self.residency.is_none() {
            return;
        }
        if let Err(error) = self.fetch_blocks().await {
            debug!(%error, "re-fetch after mutation failed");
        }
    }

    /// Re-fetch rooms after a mutation when a block is open.
    async fn refresh_rooms(&mut self) {
        if self.block.is_none() {
            return;
        }
        if let Err(error) = self.fetch_rooms().await {
            debug!(%error, "re-fetch after mutation failed");
        }
    }
}

#[cfg(test)]
mod tests;
