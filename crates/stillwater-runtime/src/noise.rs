//! Decorative noise generation on a worker thread.
//!
//! The only cross-thread boundary in the system: requests go over a
//! channel, the worker answers with a filled buffer, and the frame loop
//! polls for responses without ever blocking. Shutdown is idempotent.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;

/// One noise-texture request
#[derive(Clone, Copy, Debug)]
pub struct NoiseRequest {
    pub seed: i32,
    pub width: usize,
    pub height: usize,
    pub frequency: f32,
    /// Animation phase offset applied on the y axis
    pub phase: f32,
}

/// A filled noise buffer, row-major `width * height`, values in [-1, 1]
#[derive(Clone, Debug)]
pub struct NoiseResponse {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f32>,
}

enum WorkerMessage {
    Generate(NoiseRequest),
    Stop,
}

pub struct NoiseWorker {
    sender: Sender<WorkerMessage>,
    receiver: Receiver<NoiseResponse>,
    handle: Option<JoinHandle<()>>,
}

impl NoiseWorker {
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<WorkerMessage>();
        let (response_tx, response_rx) = mpsc::channel::<NoiseResponse>();

        let handle = std::thread::spawn(move || {
            while let Ok(message) = request_rx.recv() {
                match message {
                    WorkerMessage::Generate(request) => {
                        let response = generate(&request);
                        if response_tx.send(response).is_err() {
                            break;
                        }
                    }
                    WorkerMessage::Stop => break,
                }
            }
        });

        Self {
            sender: request_tx,
            receiver: response_rx,
            handle: Some(handle),
        }
    }

    /// Fire-and-forget: queue a generation request. Returns false if the
    /// worker has already stopped.
    pub fn request(&self, request: NoiseRequest) -> bool {
        self.sender.send(WorkerMessage::Generate(request)).is_ok()
    }

    /// Non-blocking poll for a finished buffer
    pub fn poll(&self) -> Option<NoiseResponse> {
        match self.receiver.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Stop the worker and join it. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.sender.send(WorkerMessage::Stop);
            if handle.join().is_err() {
                eprintln!("[noise] worker thread panicked during shutdown");
            }
        }
    }
}

impl Drop for NoiseWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn generate(request: &NoiseRequest) -> NoiseResponse {
    let mut noise = FastNoiseLite::with_seed(request.seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(request.frequency));

    let mut values = Vec::with_capacity(request.width * request.height);
    for y in 0..request.height {
        for x in 0..request.width {
            values.push(noise.get_noise_2d(x as f32, y as f32 + request.phase));
        }
    }
    NoiseResponse {
        width: request.width,
        height: request.height,
        values,
    }
}
