use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).lines().map(|l| l.trim().to_owned()).collect()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a scoped host subscriber and returns what it printed.
pub fn captured<F: FnOnce()>(f: F) -> Vec<String> {
    let capture = Capture::default();
    let writer = capture.clone();
    tracing::subscriber::with_default(fc::host_subscriber(move || writer.clone()), f);
    capture.lines()
}
