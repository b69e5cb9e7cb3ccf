use super::input::Event;
use std::io;
use std::sync::mpsc::Sender;

/// Turn SIGINT and SIGTERM into [`Event::Shutdown`] for the command loop.
///
/// The default handlers are replaced, so the process only exits once the loop
/// has flushed storage.
#[cfg(unix)]
pub fn listen(events: Sender<Event>) -> io::Result<()> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use std::thread;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    thread::spawn(move || {
        for signal in signals.forever() {
            tracing::info!(signal, "termination signal received");
            if events.send(Event::Shutdown).is_err() {
                break;
            }
        }
    });
    Ok(())
}

#[cfg(not(unix))]
pub fn listen(_events: Sender<Event>) -> io::Result<()> {
    Ok(())
}
