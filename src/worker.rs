//! Whole-step background offload.
//!
//! A step is a pure transform `(bodies, params, dt) -> (bodies, events)`,
//! so it can run on any single-threaded channel and hand its result back
//! atomically. The worker owns its own [`Engine`]; the host submits a job,
//! keeps rendering, and polls for the finished step. There is no intra-step
//! parallelism and no mid-step cancellation — a submitted step always runs
//! to completion.

use std::io;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::core::{Body, SimParams, StepResult};
use crate::engine::Engine;

struct StepJob {
    bodies: Vec<Body>,
    params: SimParams,
    dt: f64,
}

/// Background step executor with a single result slot.
pub struct StepWorker {
    jobs: Option<Sender<StepJob>>,
    result: Arc<Mutex<Option<StepResult>>>,
    handle: Option<JoinHandle<()>>,
}

impl StepWorker {
    pub fn spawn() -> io::Result<Self> {
        let (jobs, receiver) = mpsc::channel::<StepJob>();
        let result = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&result);

        let handle = thread::Builder::new()
            .name("gravity-well-step".into())
            .spawn(move || {
                let mut engine = Engine::new();
                while let Ok(job) = receiver.recv() {
                    let outcome = engine.step(job.bodies, &job.params, job.dt);
                    *slot.lock() = Some(outcome);
                }
            })?;

        Ok(Self {
            jobs: Some(jobs),
            result,
            handle: Some(handle),
        })
    }

    /// Queues the next step. Returns `false` if the worker thread is gone.
    pub fn submit(&self, bodies: Vec<Body>, params: &SimParams, dt: f64) -> bool {
        match &self.jobs {
            Some(sender) => sender
                .send(StepJob {
                    bodies,
                    params: *params,
                    dt,
                })
                .is_ok(),
            None => false,
        }
    }

    /// Takes the most recently completed step, if one is ready. Never blocks.
    pub fn try_take(&self) -> Option<StepResult> {
        self.result.lock().take()
    }
}

impl Drop for StepWorker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop.
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
