// crates/audiocut-media/src/worker.rs
//
// EncodeWorker: runs MP3 encodes on background threads.
//
// Each `submit` spawns one thread and returns an `EncodeTicket` holding the
// receiving end of that job's event channel. The thread owns its `Mp3Job`
// outright; nothing mutable is shared except the job's cancel flag.
//
// Event stream per job: zero or more `Progress`, then exactly one of
// `Done`, `Failed` or `Cancelled`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, TryRecvError};
use parking_lot::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use audiocut_core::media_types::EncodeEvent;

use crate::encode::{encode_mp3, Mp3Backend, Mp3Job};
use crate::error::EncodeError;

// ── EncodeWorker ──────────────────────────────────────────────────────────────

pub struct EncodeWorker {
    backend:  Arc<dyn Mp3Backend>,
    shutdown: Arc<AtomicBool>,
    /// Per-job cancel flags, keyed by job id. Inserted before the thread is
    /// spawned and removed by the thread when the job ends.
    cancels:  Arc<Mutex<HashMap<Uuid, Arc<AtomicBool>>>>,
}

impl EncodeWorker {
    pub fn new(backend: Arc<dyn Mp3Backend>) -> Self {
        Self {
            backend,
            shutdown: Arc::new(AtomicBool::new(false)),
            cancels:  Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Start encoding `job` on its own thread.
    pub fn submit(&self, job: Mp3Job) -> EncodeTicket {
        let job_id = Uuid::new_v4();
        let cancel = Arc::new(AtomicBool::new(false));
        let (tx, rx) = unbounded();

        // Register before spawning so an immediate cancel() finds the flag.
        self.cancels.lock().insert(job_id, Arc::clone(&cancel));

        let backend  = Arc::clone(&self.backend);
        let cancels  = Arc::clone(&self.cancels);
        let sd       = Arc::clone(&self.shutdown);
        let flag     = Arc::clone(&cancel);
        thread::spawn(move || {
            let event = if sd.load(Ordering::Relaxed) {
                EncodeEvent::Failed { job_id, error: EncodeError::WorkerGone }
            } else {
                let progress_tx = tx.clone();
                let mut on_progress = |percent| {
                    let _ = progress_tx.send(EncodeEvent::Progress { job_id, percent });
                };
                match encode_mp3(backend.as_ref(), &job, Some(&flag), &mut on_progress) {
                    Ok(data) => EncodeEvent::Done { job_id, data },
                    Err(EncodeError::Cancelled) => EncodeEvent::Cancelled { job_id },
                    Err(e) => {
                        warn!(%job_id, error = %e, "mp3 job failed");
                        EncodeEvent::Failed { job_id, error: e }
                    }
                }
            };

            cancels.lock().remove(&job_id);
            // Receiver may already be gone; the result is simply dropped.
            let _ = tx.send(event);
        });

        debug!(%job_id, "mp3 job submitted");
        EncodeTicket { job_id, rx, cancel }
    }

    /// Ask the job to stop before its next block.
    pub fn cancel(&self, job_id: Uuid) {
        if let Some(flag) = self.cancels.lock().get(&job_id) {
            flag.store(true, Ordering::Relaxed);
        }
    }

    /// Number of jobs that have not finished yet.
    pub fn active_jobs(&self) -> usize {
        self.cancels.lock().len()
    }

    /// Cancel every running job and refuse new ones.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        for flag in self.cancels.lock().values() {
            flag.store(true, Ordering::Relaxed);
        }
    }
}

impl Drop for EncodeWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ── EncodeTicket ──────────────────────────────────────────────────────────────

/// Handle to one submitted job.
pub struct EncodeTicket {
    job_id: Uuid,
    rx:     Receiver<EncodeEvent>,
    cancel: Arc<AtomicBool>,
}

impl EncodeTicket {
    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Next event if one is waiting. Poll this from an event loop.
    pub fn try_recv(&self) -> Option<EncodeEvent> {
        match self.rx.try_recv() {
            Ok(ev) => Some(ev),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Block until the job ends, forwarding progress to `on_progress`.
    pub fn wait(self, mut on_progress: impl FnMut(u8)) -> Result<Vec<u8>, EncodeError> {
        loop {
            match self.rx.recv() {
                Ok(EncodeEvent::Progress { percent, .. }) => on_progress(percent),
                Ok(EncodeEvent::Done { data, .. }) => return Ok(data),
                Ok(EncodeEvent::Failed { error, .. }) => return Err(error),
                Ok(EncodeEvent::Cancelled { .. }) => return Err(EncodeError::Cancelled),
                Err(_) => return Err(EncodeError::WorkerGone),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::buffer::SampleBuffer;
    use crate::encode::tests::FakeBackend;
    use crate::encode::BLOCK_SIZE;

    fn job(blocks: usize) -> Mp3Job {
        Mp3Job::from_buffer(&SampleBuffer::silent(44_100, 2, BLOCK_SIZE * blocks), 128)
    }

    #[test]
    fn job_reports_progress_then_done() {
        let worker = EncodeWorker::new(Arc::new(FakeBackend::default()));
        let mut progress = Vec::new();
        let data = worker.submit(job(40)).wait(|p| progress.push(p)).unwrap();

        assert_eq!(data.len(), 41); // one byte per block plus flush
        assert_eq!(progress.last(), Some(&100));
        assert!(progress.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn events_carry_the_job_id() {
        let worker = EncodeWorker::new(Arc::new(FakeBackend::default()));
        let ticket = worker.submit(job(1));
        let id = ticket.job_id();

        let mut terminal = None;
        for _ in 0..200 {
            if let Some(ev) = ticket.try_recv() {
                assert_eq!(ev.job_id(), id);
                if ev.is_terminal() {
                    terminal = Some(ev);
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(5));
            }
        }
        assert!(matches!(terminal, Some(EncodeEvent::Done { .. })));
    }

    #[test]
    fn shut_down_worker_fails_new_jobs() {
        let worker = EncodeWorker::new(Arc::new(FakeBackend::default()));
        worker.shutdown();
        let err = worker.submit(job(1)).wait(|_| {}).unwrap_err();
        assert_eq!(err, EncodeError::WorkerGone);
    }

    #[test]
    fn backend_error_keeps_its_type() {
        struct Picky;
        impl Mp3Backend for Picky {
            fn open(&self, _: u8, _: u32, kbps: u32) -> Result<Box<dyn crate::encode::FrameEncoder>, EncodeError> {
                Err(EncodeError::UnsupportedBitrate(kbps))
            }
        }

        let worker = EncodeWorker::new(Arc::new(Picky));
        let err = worker.submit(job(1)).wait(|_| {}).unwrap_err();
        assert_eq!(err, EncodeError::UnsupportedBitrate(128));
    }

    #[test]
    fn cancelled_job_ends_with_cancelled() {
        // A backend that blocks in open() until released, so cancel lands first.
        struct Gate(Arc<(Mutex<bool>, parking_lot::Condvar)>, FakeBackend);
        impl Mp3Backend for Gate {
            fn open(&self, c: u8, r: u32, k: u32) -> Result<Box<dyn crate::encode::FrameEncoder>, EncodeError> {
                let (lock, cvar) = &*self.0;
                let mut open = lock.lock();
                while !*open {
                    cvar.wait(&mut open);
                }
                self.1.open(c, r, k)
            }
        }

        let gate = Arc::new((Mutex::new(false), parking_lot::Condvar::new()));
        let worker = EncodeWorker::new(Arc::new(Gate(Arc::clone(&gate), FakeBackend::default())));
        let ticket = worker.submit(job(10));
        worker.cancel(ticket.job_id());
        *gate.0.lock() = true;
        gate.1.notify_all();

        assert_eq!(ticket.wait(|_| {}), Err(EncodeError::Cancelled));
    }
}
