//! Non-blocking score service
//!
//! States never call a [`ScoreStore`] directly. They ask a [`ScoreService`]
//! for a [`Pending`] result and poll it each tick. Store failures are logged
//! and degraded here (0, empty list, `false`, `None`) so the player never
//! sees an error.

use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use crate::error::StoreError;
use crate::highscores::{HighScore, ScoreStore};
use crate::pending::{self, Completer, Pending};

/// Score-store capability as seen by the game states
pub trait ScoreService {
    fn highest_score(&mut self) -> Pending<u64>;
    fn top_scores(&mut self, limit: usize) -> Pending<Vec<HighScore>>;
    fn is_high_score(&mut self, score: u64) -> Pending<bool>;
    /// Resolves to the new record id, or `None` if the score was not stored
    fn submit_score(&mut self, player_name: &str, score: u64) -> Pending<Option<u64>>;
}

fn degrade<T>(what: &str, result: Result<T, StoreError>, fallback: T) -> T {
    result.unwrap_or_else(|e| {
        log::warn!("Score store {what} failed: {e}");
        fallback
    })
}

/// Answers immediately on the calling thread
#[derive(Debug)]
pub struct InlineScoreService<S> {
    store: S,
    top_n: usize,
}

impl<S: ScoreStore> InlineScoreService<S> {
    pub fn new(store: S, top_n: usize) -> Self {
        Self { store, top_n }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ScoreStore> ScoreService for InlineScoreService<S> {
    fn highest_score(&mut self) -> Pending<u64> {
        Pending::ready(degrade("highest_score", self.store.highest_score(), 0))
    }

    fn top_scores(&mut self, limit: usize) -> Pending<Vec<HighScore>> {
        Pending::ready(degrade("top_scores", self.store.top_scores(limit), Vec::new()))
    }

    fn is_high_score(&mut self, score: u64) -> Pending<bool> {
        Pending::ready(degrade(
            "is_high_score",
            self.store.is_high_score(score, self.top_n),
            false,
        ))
    }

    fn submit_score(&mut self, player_name: &str, score: u64) -> Pending<Option<u64>> {
        Pending::ready(degrade(
            "save_score",
            self.store.save_score(player_name, score).map(Some),
            None,
        ))
    }
}

enum Job {
    Highest(Completer<u64>),
    Top(usize, Completer<Vec<HighScore>>),
    Qualifies(u64, Completer<bool>),
    Submit(String, u64, Completer<Option<u64>>),
}

/// Store owned by a worker thread; requests never block the caller
pub struct ThreadedScoreService {
    jobs: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl ThreadedScoreService {
    pub fn spawn(store: Box<dyn ScoreStore + Send>, top_n: usize) -> Result<Self, StoreError> {
        let (tx, rx) = mpsc::channel::<Job>();
        let worker = thread::Builder::new()
            .name("score-store".into())
            .spawn(move || {
                let mut store = store;
                log::debug!("Score worker started");
                for job in rx {
                    run_job(store.as_mut(), top_n, job);
                }
                log::debug!("Score worker stopped");
            })?;
        Ok(Self {
            jobs: Some(tx),
            worker: Some(worker),
        })
    }

    /// Queue a job; if the worker is gone the job (and its completer) is
    /// dropped, which resolves the caller's handle as lost
    fn send(&self, job: Job) {
        let sent = self.jobs.as_ref().map(|tx| tx.send(job).is_ok());
        if sent != Some(true) {
            log::warn!("Score store request dropped: {}", StoreError::WorkerGone);
        }
    }
}

fn run_job(store: &mut dyn ScoreStore, top_n: usize, job: Job) {
    match job {
        Job::Highest(done) => done.complete(degrade("highest_score", store.highest_score(), 0)),
        Job::Top(limit, done) => {
            done.complete(degrade("top_scores", store.top_scores(limit), Vec::new()))
        }
        Job::Qualifies(score, done) => done.complete(degrade(
            "is_high_score",
            store.is_high_score(score, top_n),
            false,
        )),
        Job::Submit(name, score, done) => done.complete(degrade(
            "save_score",
            store.save_score(&name, score).map(Some),
            None,
        )),
    }
}

impl ScoreService for ThreadedScoreService {
    fn highest_score(&mut self) -> Pending<u64> {
        let (done, pending) = pending::channel();
        self.send(Job::Highest(done));
        pending
    }

    fn top_scores(&mut self, limit: usize) -> Pending<Vec<HighScore>> {
        let (done, pending) = pending::channel();
        self.send(Job::Top(limit, done));
        pending
    }

    fn is_high_score(&mut self, score: u64) -> Pending<bool> {
        let (done, pending) = pending::channel();
        self.send(Job::Qualifies(score, done));
        pending
    }

    fn submit_score(&mut self, player_name: &str, score: u64) -> Pending<Option<u64>> {
        let (done, pending) = pending::channel();
        self.send(Job::Submit(player_name.to_string(), score, done));
        pending
    }
}

impl Drop for ThreadedScoreService {
    fn drop(&mut self) {
        // Closing the queue ends the worker loop after pending jobs drain
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Score worker panicked");
            }
        }
    }
}

impl<T: ScoreService + ?Sized> ScoreService for Box<T> {
    fn highest_score(&mut self) -> Pending<u64> {
        (**self).highest_score()
    }

    fn top_scores(&mut self, limit: usize) -> Pending<Vec<HighScore>> {
        (**self).top_scores(limit)
    }

    fn is_high_score(&mut self, score: u64) -> Pending<bool> {
        (**self).is_high_score(score)
    }

    fn submit_score(&mut self, player_name: &str, score: u64) -> Pending<Option<u64>> {
        (**self).submit_score(player_name, score)
    }
}
