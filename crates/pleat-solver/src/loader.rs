//! Asynchronous physics world construction.
//!
//! The world is built on a worker thread and handed back over a
//! channel. The frame loop polls without blocking; tests and the CLI
//! can wait with a timeout.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use pleat_types::{PleatError, PleatResult};

use crate::config::SolverConfig;
use crate::world::PhysicsWorld;

/// Pending or delivered physics world.
pub struct WorldLoader {
    ready: Option<PhysicsWorld>,
    rx: Option<Receiver<PleatResult<PhysicsWorld>>>,
}

/// Sending half of a [`WorldLoader::deferred`] loader.
pub struct WorldHandoff {
    tx: Sender<PleatResult<PhysicsWorld>>,
}

impl WorldHandoff {
    /// Delivers the world (or the error that prevented building it).
    pub fn deliver(self, world: PleatResult<PhysicsWorld>) {
        if self.tx.send(world).is_err() {
            tracing::debug!("world loader dropped before delivery");
        }
    }
}

impl WorldLoader {
    /// Builds a world from `config` on a worker thread.
    pub fn spawn(config: SolverConfig) -> PleatResult<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("pleat-physics-loader".into())
            .spawn(move || {
                let world = PhysicsWorld::new(config);
                if tx.send(world).is_err() {
                    tracing::debug!("world loader dropped before delivery");
                }
            })?;
        Ok(Self {
            ready: None,
            rx: Some(rx),
        })
    }

    /// A loader holding an already-built world.
    pub fn ready(world: PhysicsWorld) -> Self {
        Self {
            ready: Some(world),
            rx: None,
        }
    }

    /// A loader whose world is supplied later through the returned handoff.
    pub fn deferred() -> (Self, WorldHandoff) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                ready: None,
                rx: Some(rx),
            },
            WorldHandoff { tx },
        )
    }

    /// Takes the world if it has arrived. Never blocks.
    ///
    /// Returns `Ok(None)` while loading and after the world was taken.
    pub fn poll(&mut self) -> PleatResult<Option<PhysicsWorld>> {
        if let Some(world) = self.ready.take() {
            return Ok(Some(world));
        }
        let Some(rx) = self.rx.as_ref() else {
            return Ok(None);
        };
        match rx.try_recv() {
            Ok(result) => {
                self.rx = None;
                result.map(Some)
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                self.rx = None;
                Err(loader_gone())
            }
        }
    }

    /// Blocks until the world arrives or `timeout` elapses.
    pub fn wait(mut self, timeout: Duration) -> PleatResult<PhysicsWorld> {
        if let Some(world) = self.ready.take() {
            return Ok(world);
        }
        let Some(rx) = self.rx.take() else {
            return Err(PleatError::PhysicsNotReady);
        };
        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(PleatError::PhysicsNotReady),
            Err(RecvTimeoutError::Disconnected) => Err(loader_gone()),
        }
    }
}

fn loader_gone() -> PleatError {
    PleatError::Io(std::io::Error::other(
        "physics loader exited without delivering a world",
    ))
}
