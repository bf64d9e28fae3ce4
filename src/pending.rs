//! Single-slot result handles
//!
//! A [`Pending<T>`] is the consumer half of a one-shot handoff: the state
//! that issued a request polls it once per tick and never blocks. The
//! producer half, [`Completer<T>`], may live on another thread. Dropping a
//! `Pending` abandons the request; the producer's late write is ignored.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Result of polling a [`Pending`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poll<T> {
    /// Still running
    Waiting,
    Ready(T),
    /// The producer went away without answering
    Lost,
}

#[derive(Debug)]
enum Slot<T> {
    Waiting(Receiver<T>),
    Ready(T),
    Taken,
    Lost,
}

/// Consumer side of a one-shot result
#[derive(Debug)]
pub struct Pending<T> {
    slot: Slot<T>,
}

/// Producer side of a one-shot result
#[derive(Debug)]
pub struct Completer<T> {
    tx: Sender<T>,
}

/// Create a linked producer/consumer pair
pub fn channel<T>() -> (Completer<T>, Pending<T>) {
    let (tx, rx) = mpsc::channel();
    (
        Completer { tx },
        Pending {
            slot: Slot::Waiting(rx),
        },
    )
}

impl<T> Completer<T> {
    /// Publish the result; a consumer that already gave up is ignored
    pub fn complete(self, value: T) {
        let _ = self.tx.send(value);
    }
}

impl<T> Pending<T> {
    /// An already-resolved handle
    pub fn ready(value: T) -> Self {
        Self {
            slot: Slot::Ready(value),
        }
    }

    fn refresh(&mut self) {
        if let Slot::Waiting(rx) = &self.slot {
            self.slot = match rx.try_recv() {
                Ok(v) => Slot::Ready(v),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => Slot::Lost,
            };
        }
    }

    /// True while the result has not arrived
    pub fn is_waiting(&mut self) -> bool {
        self.refresh();
        matches!(self.slot, Slot::Waiting(_))
    }

    /// Non-blocking poll; a ready value is handed out once
    pub fn poll(&mut self) -> Poll<T> {
        self.refresh();
        match std::mem::replace(&mut self.slot, Slot::Taken) {
            Slot::Waiting(rx) => {
                self.slot = Slot::Waiting(rx);
                Poll::Waiting
            }
            Slot::Ready(v) => Poll::Ready(v),
            Slot::Lost => {
                self.slot = Slot::Lost;
                Poll::Lost
            }
            Slot::Taken => Poll::Lost,
        }
    }
}
