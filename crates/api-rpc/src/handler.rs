//! RPC Method Handlers
//!
//! Thin adapters from JSON-RPC methods onto the core QueueService.

use crate::error::to_rpc_error;
use crate::types::{
    CreateQueueRequest, CreateQueueResponse, DeleteQueueRequest, DeleteQueueResponse, EntryView,
    FlushQueueRequest, FlushQueueResponse, JoinQueueRequest, JoinQueueResponse, LeaveQueueRequest,
    LeaveQueueResponse, ListAllRequest, ListAllResponse, PositionRequest, PositionResponse,
    QueueView, StatusRequest, UpdateStatusRequest,
};
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;
use waitline_core::application::queue_ops;
use waitline_core::application::QueueService;

/// RPC Handler with the injected queue service
pub struct RpcHandler {
    service: Arc<QueueService>,
}

impl RpcHandler {
    pub fn new(service: Arc<QueueService>) -> Self {
        Self { service }
    }

    /// queue.create.v1
    pub async fn create_queue(
        &self,
        params: CreateQueueRequest,
    ) -> Result<CreateQueueResponse, ErrorObjectOwned> {
        let queue = self
            .service
            .create_queue(queue_ops::CreateQueueRequest {
                name: params.name,
                description: params.description,
            })
            .await
            .map_err(to_rpc_error)?;

        Ok(CreateQueueResponse {
            queue_id: queue.id,
            created_at: queue.created_at,
        })
    }

    /// queue.delete.v1
    pub async fn delete_queue(
        &self,
        params: DeleteQueueRequest,
    ) -> Result<DeleteQueueResponse, ErrorObjectOwned> {
        self.service
            .delete_queue(&params.queue_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(DeleteQueueResponse {
            queue_id: params.queue_id,
            deleted: true,
        })
    }

    /// queue.flush.v1
    pub async fn flush_queue(
        &self,
        params: FlushQueueRequest,
    ) -> Result<FlushQueueResponse, ErrorObjectOwned> {
        let entries_removed = self
            .service
            .flush_queue(&params.queue_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(FlushQueueResponse {
            queue_id: params.queue_id,
            entries_removed,
        })
    }

    /// queue.join.v1
    pub async fn join_queue(
        &self,
        params: JoinQueueRequest,
    ) -> Result<JoinQueueResponse, ErrorObjectOwned> {
        let entry = self
            .service
            .join_queue(queue_ops::JoinQueueRequest {
                queue_id: params.queue_id,
                msisdn: params.msisdn,
                full_name: params.full_name,
            })
            .await
            .map_err(to_rpc_error)?;

        Ok(JoinQueueResponse {
            entry_id: entry.id,
            status: entry.status.to_string(),
        })
    }

    /// queue.leave.v1
    pub async fn leave_queue(
        &self,
        params: LeaveQueueRequest,
    ) -> Result<LeaveQueueResponse, ErrorObjectOwned> {
        self.service
            .leave_queue(&params.queue_id, &params.msisdn)
            .await
            .map_err(to_rpc_error)?;

        Ok(LeaveQueueResponse {
            queue_id: params.queue_id,
            left: true,
        })
    }

    /// queue.status.v1
    pub async fn get_status(&self, params: StatusRequest) -> Result<EntryView, ErrorObjectOwned> {
        let entry = self
            .service
            .get_status(&params.queue_id, &params.msisdn)
            .await
            .map_err(to_rpc_error)?;

        Ok(EntryView::from(entry))
    }

    /// queue.updateStatus.v1
    pub async fn update_status(
        &self,
        params: UpdateStatusRequest,
    ) -> Result<EntryView, ErrorObjectOwned> {
        let entry = self
            .service
            .update_status(&params.queue_id, &params.msisdn, &params.status)
            .await
            .map_err(to_rpc_error)?;

        Ok(EntryView::from(entry))
    }

    /// queue.position.v1
    pub async fn position(
        &self,
        params: PositionRequest,
    ) -> Result<PositionResponse, ErrorObjectOwned> {
        let position = self
            .service
            .position(&params.queue_id, &params.msisdn)
            .await
            .map_err(to_rpc_error)?;

        Ok(PositionResponse {
            queue_id: params.queue_id,
            msisdn: params.msisdn,
            position,
        })
    }

    /// queue.listAll.v1
    pub async fn list_all(
        &self,
        _params: ListAllRequest,
    ) -> Result<ListAllResponse, ErrorObjectOwned> {
        let queues = self.service.list_all_queues().await.map_err(to_rpc_error)?;

        Ok(ListAllResponse {
            queues: queues
                .into_iter()
                .map(|(queue, entries)| QueueView::new(queue, entries))
                .collect(),
        })
    }
}
