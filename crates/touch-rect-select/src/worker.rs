//! Background thread that runs a [`RectangleDetector`].

use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::{DetectionRequest, DetectionResponse, RectangleDetector};

/// Runs detection passes off the event thread.
///
/// Requests go in through [`submit`](Self::submit); responses come back in
/// submission order through [`try_recv`](Self::try_recv) or
/// [`recv_timeout`](Self::recv_timeout), to be handed to
/// [`SelectionEngine::detection_completed`](crate::SelectionEngine::detection_completed).
/// Dropping the worker closes the request channel and joins the thread.
pub struct DetectionWorker {
    requests: Option<Sender<DetectionRequest>>,
    responses: Receiver<DetectionResponse>,
    thread: Option<JoinHandle<()>>,
}

impl DetectionWorker {
    pub fn spawn<D>(detector: D) -> std::io::Result<Self>
    where
        D: RectangleDetector + Send + 'static,
    {
        let (req_tx, req_rx) = crossbeam_channel::unbounded::<DetectionRequest>();
        let (resp_tx, resp_rx) = crossbeam_channel::unbounded::<DetectionResponse>();

        let thread = std::thread::Builder::new()
            .name("touch-rect-detect".into())
            .spawn(move || {
                for request in req_rx.iter() {
                    let candidates = detector.detect(&request.frame);
                    log::trace!(
                        "detection {} on frame {}: {} candidates",
                        request.id,
                        request.frame.id,
                        candidates.len()
                    );
                    if resp_tx
                        .send(DetectionResponse::new(&request, candidates))
                        .is_err()
                    {
                        break;
                    }
                }
                log::debug!("detection worker exiting");
            })?;

        Ok(Self {
            requests: Some(req_tx),
            responses: resp_rx,
            thread: Some(thread),
        })
    }

    /// Queue a request. Returns `false` if the worker thread is gone.
    pub fn submit(&self, request: DetectionRequest) -> bool {
        match &self.requests {
            Some(tx) => tx.send(request).is_ok(),
            None => false,
        }
    }

    /// Next finished response, if one is ready.
    pub fn try_recv(&self) -> Option<DetectionResponse> {
        match self.responses.try_recv() {
            Ok(resp) => Some(resp),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::warn!("detection worker disconnected");
                None
            }
        }
    }

    /// Block up to `timeout` for the next response.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<DetectionResponse> {
        match self.responses.recv_timeout(timeout) {
            Ok(resp) => Some(resp),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                log::warn!("detection worker disconnected");
                None
            }
        }
    }
}

impl Drop for DetectionWorker {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("detection worker panicked");
            }
        }
    }
}
