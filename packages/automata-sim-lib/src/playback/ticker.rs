use std::{
    sync::{Arc, Mutex, mpsc},
    thread::JoinHandle,
    time::Duration,
};

use crate::playback::PlaybackState;

/// A background tick timer for playback.
///
/// The thread waits on a stop channel with a timeout equal to the tick
/// interval: a timeout is a tick, a message (or a dropped sender) is a
/// cancellation. This way cancel takes effect mid-interval instead of
/// waiting for the next tick.
pub struct Ticker {
    thread: Option<JoinHandle<()>>,
    stop_sender: Option<mpsc::Sender<()>>,
}

impl Ticker {
    pub(crate) fn spawn(interval: Duration, state: Arc<Mutex<PlaybackState>>) -> Self {
        let (stop_sender, stop_receiver) = mpsc::channel::<()>();

        let thread = std::thread::spawn(move || {
            loop {
                match stop_receiver.recv_timeout(interval) {
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        if !state.lock().unwrap().advance() {
                            break;
                        }
                    }
                }
            }
        });

        Ticker {
            thread: Some(thread),
            stop_sender: Some(stop_sender),
        }
    }

    /// Stops the timer and waits for the thread to exit. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(sender) = self.stop_sender.take() {
            // The thread may have already stopped on its own.
            sender.send(()).ok();
        }

        if let Some(thread) = self.thread.take() {
            thread.join().ok();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
