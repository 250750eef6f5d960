//! Stop request raised from the terminal, checked between ticks.

use anyhow::{Context, Result};
use std::{
    io::{self, BufRead},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    requested: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a signal raised as soon as a line (Enter) is read from stdin.
    ///
    /// A closed stdin never raises it.
    pub fn listen_for_enter() -> Result<Self> {
        let signal = Self::new();
        let listener = signal.clone();
        thread::Builder::new()
            .name("stop-listener".to_owned())
            .spawn(move || {
                let mut line = String::new();
                match io::stdin().lock().read_line(&mut line) {
                    Ok(0) => log::debug!("stdin closed, stop on enter disabled"),
                    Ok(_) => listener.request(),
                    Err(error) => log::warn!("failed to read stdin: {error}"),
                }
            })
            .context("failed to spawn stop listener")?;
        Ok(signal)
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
        log::info!("stop requested");
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}
