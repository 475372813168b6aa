use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use rand::Rng;

use crate::greeting::selector::{Greeting, GreetingSelector};
use crate::model::catalog::Catalog;

/// A background clock that ticks at a fixed interval.
///
/// The thread exits on its own once the `Ticker` is dropped.
pub struct Ticker {
    rx: mpsc::Receiver<Instant>,
}

impl Ticker {
    pub fn start(interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            loop {
                thread::sleep(interval);
                if tx.send(Instant::now()).is_err() {
                    break;
                }
            }
        });
        Ticker { rx }
    }

    /// Block until the next tick.
    pub fn wait(&self) -> Option<Instant> {
        self.rx.recv().ok()
    }

    /// Non-blocking: number of ticks queued since the last call.
    pub fn poll(&self) -> usize {
        self.rx.try_iter().count()
    }
}

/// Emit one greeting right away and one per tick after that, stopping
/// after `count` greetings when given. Returns how many were emitted.
pub fn drive<C, R, F>(
    selector: &mut GreetingSelector<C, R>,
    ticker: &Ticker,
    count: Option<usize>,
    mut emit: F,
) -> io::Result<usize>
where
    C: Catalog,
    R: Rng,
    F: FnMut(&Greeting) -> io::Result<()>,
{
    let mut emitted = 0;
    loop {
        if count.is_some_and(|c| emitted >= c) {
            break;
        }
        if emitted > 0 && ticker.wait().is_none() {
            break;
        }
        let lang = selector.language();
        let greeting = selector.choose(&lang, &Local::now());
        emit(&greeting)?;
        emitted += 1;
    }
    Ok(emitted)
}
