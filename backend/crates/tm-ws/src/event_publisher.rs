use crate::ConnectionRegistry;

use tm_core::Task;

/// Publishes task lifecycle events to every connected client
#[derive(Clone)]
pub struct EventPublisher {
    registry: ConnectionRegistry,
}

impl EventPublisher {
    pub fn new(registry: ConnectionRegistry) -> Self {
        Self { registry }
    }

    pub async fn task_created(&self, task: &Task) {
        self.publish(format!("New task created: {}", task.title)).await;
    }

    pub async fn task_updated(&self, task_id: i64) {
        self.publish(format!("Task {task_id} updated")).await;
    }

    pub async fn task_deleted(&self, task_id: i64) {
        self.publish(format!("Task {task_id} deleted")).await;
    }

    async fn publish(&self, event: String) {
        let delivered = self.registry.broadcast(&event).await;
        log::debug!("Published event to {delivered} connections: {event}");
    }
}
