use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use log::debug;

use crate::service::data_manager::{DataRetrievalError, DataRetrievalResult};

pub type RequestToken = u64;

type Tagged<T> = (RequestToken, DataRetrievalResult<T>);

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

/// One fetch slot. Every `begin` issues a new token; only the response carrying the
/// current token is committed, anything older is dropped on arrival.
pub struct AsyncData<T> {
    state: LoadState<T>,
    token: RequestToken,
    sender: Sender<Tagged<T>>,
    receiver: Receiver<Tagged<T>>,
}

impl<T> AsyncData<T> {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            state: LoadState::Loading,
            token: 0,
            sender,
            receiver,
        }
    }

    pub fn begin(&mut self) -> Responder<T> {
        self.token += 1;
        self.state = LoadState::Loading;
        Responder {
            token: self.token,
            sender: Some(self.sender.clone()),
        }
    }

    /// Applies every response that arrived since the last call. Returns whether the state changed.
    pub fn try_update(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.receiver.try_recv() {
                Ok((token, result)) => {
                    if token != self.token {
                        debug!("Discarding stale response #{} (current #{})", token, self.token);
                        continue;
                    }
                    self.state = match result {
                        Ok(data) => LoadState::Ready(data),
                        Err(e) => LoadState::Failed(format!("{}", e)),
                    };
                    changed = true;
                }
                // We hold a sender ourselves, so the channel never disconnects
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn get_data(&self) -> Option<&T> {
        match &self.state {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl<T> Default for AsyncData<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Write end handed to a worker. Dropping it without sending fails the request.
pub struct Responder<T> {
    token: RequestToken,
    sender: Option<Sender<Tagged<T>>>,
}

impl<T> Responder<T> {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub fn send(mut self, result: DataRetrievalResult<T>) {
        if let Some(sender) = self.sender.take() {
            // Receiver gone means the controller was dropped
            let _ = sender.send((self.token, result));
        }
    }
}

impl<T> Drop for Responder<T> {
    fn drop(&mut self) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.send((self.token, Err(DataRetrievalError::Abandoned)));
        }
    }
}
