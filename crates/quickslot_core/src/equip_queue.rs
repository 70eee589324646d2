//! Deferred equip tasks
//!
//! Equips are never issued from inside a pose or button callback. The
//! dispatcher enqueues an [`EquipTask`] and the host drains the queue on
//! its own main-thread tick. Fire-and-forget: nothing flows back.

use crate::error::QueueClosed;
use crossbeam_channel::{unbounded, Receiver, Sender};
use quickslot_catalog::{EquipHandler, FormId, HandSlot};

/// One deferred equip request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipTask {
    pub id: FormId,
    pub slot: HandSlot,
}

impl EquipTask {
    pub fn new(id: FormId, slot: HandSlot) -> Self {
        Self { id, slot }
    }
}

/// Single-consumer queue of equip tasks
pub struct EquipQueue {
    sender: Sender<EquipTask>,
    receiver: Receiver<EquipTask>,
}

impl EquipQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Producer handle for the dispatcher
    pub fn sender(&self) -> EquipSender {
        EquipSender {
            sender: self.sender.clone(),
        }
    }

    /// Number of queued tasks
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Run every queued task against the host's equip machinery.
    ///
    /// Failures are logged and dropped. Returns the number of tasks that
    /// equipped successfully.
    pub fn drain(&self, handler: &mut dyn EquipHandler) -> usize {
        let mut equipped = 0;

        for task in self.receiver.try_iter() {
            match handler.equip(task.id, task.slot) {
                Ok(()) => {
                    log::debug!("Equipped {} ({:?})", task.id, task.slot);
                    equipped += 1;
                }
                Err(e) => log::warn!("Deferred equip of {} failed: {}", task.id, e),
            }
        }

        equipped
    }
}

impl Default for EquipQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable producer side of an [`EquipQueue`]
#[derive(Clone)]
pub struct EquipSender {
    sender: Sender<EquipTask>,
}

impl EquipSender {
    /// Enqueue a task; fails only if the queue was dropped
    pub fn send(&self, task: EquipTask) -> Result<(), QueueClosed> {
        self.sender.send(task).map_err(|_| QueueClosed)
    }
}
