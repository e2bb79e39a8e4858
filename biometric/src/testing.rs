//! Scripted platform used by the unit tests.

use std::sync::{Arc, Mutex};

use crate::completion::Reply;
use crate::{AuthContext, Modality, Platform, PlatformError};

/// How the fake answers a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Finish the reply before `evaluate` returns.
    Inline,
    /// Finish the reply from a separate OS thread.
    Thread,
    /// Drop the reply without answering.
    Dropped,
}

/// Something a fake context was asked to do, tagged with the context id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Check(usize),
    Challenge(usize, String),
}

#[derive(Debug)]
struct Script {
    capability: Result<Modality, PlatformError>,
    challenge: Result<(), PlatformError>,
    delivery: Delivery,
    contexts: usize,
    events: Vec<Event>,
}

#[derive(Debug, Clone)]
pub struct FakePlatform {
    script: Arc<Mutex<Script>>,
}

impl FakePlatform {
    fn scripted(capability: Result<Modality, PlatformError>) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                capability,
                challenge: Ok(()),
                delivery: Delivery::Inline,
                contexts: 0,
                events: Vec::new(),
            })),
        }
    }

    pub fn supporting(modality: Modality) -> Self {
        Self::scripted(Ok(modality))
    }

    pub fn unsupported(reason: &str) -> Self {
        Self::scripted(Err(PlatformError::message(reason)))
    }

    pub fn challenge_fails(self, message: &str) -> Self {
        self.script.lock().unwrap().challenge = Err(PlatformError::message(message));
        self
    }

    pub fn delivered(self, delivery: Delivery) -> Self {
        self.script.lock().unwrap().delivery = delivery;
        self
    }

    pub fn set_capability(&self, capability: Result<Modality, PlatformError>) {
        self.script.lock().unwrap().capability = capability;
    }

    pub fn events(&self) -> Vec<Event> {
        self.script.lock().unwrap().events.clone()
    }

    pub fn challenges_issued(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, Event::Challenge(..)))
            .count()
    }
}

impl Platform for FakePlatform {
    type Context = FakeContext;

    fn new_context(&self) -> FakeContext {
        let mut script = self.script.lock().unwrap();
        let id = script.contexts;
        script.contexts += 1;
        FakeContext {
            id,
            script: Arc::clone(&self.script),
        }
    }
}

#[derive(Debug)]
pub struct FakeContext {
    id: usize,
    script: Arc<Mutex<Script>>,
}

impl AuthContext for FakeContext {
    async fn can_evaluate(&mut self) -> Result<Modality, PlatformError> {
        let mut script = self.script.lock().unwrap();
        script.events.push(Event::Check(self.id));
        script.capability.clone()
    }

    async fn evaluate(self, reason: &str, reply: Reply) {
        let (result, delivery) = {
            let mut script = self.script.lock().unwrap();
            script
                .events
                .push(Event::Challenge(self.id, reason.to_string()));
            (script.challenge.clone(), script.delivery)
        };

        match delivery {
            Delivery::Inline => reply.finish(result),
            Delivery::Thread => {
                std::thread::spawn(move || reply.finish(result));
            }
            Delivery::Dropped => drop(reply),
        }
    }
}
