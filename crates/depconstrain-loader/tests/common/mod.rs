//! Shared helpers for loader integration tests

#![allow(dead_code)]

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture_dir(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

pub fn fixture_file(dir: &str, file: &str) -> PathBuf {
    fixture_dir(dir).join(file)
}

/// Counts how many times the wrapped reader is dropped
pub struct DropCounter<R> {
    inner: R,
    drops: Arc<AtomicUsize>,
}

#[derive(Clone)]
pub struct DropCount(Arc<AtomicUsize>);

impl DropCount {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<R: Read> DropCounter<R> {
    pub fn new(inner: R) -> (Self, DropCount) {
        let drops = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                drops: Arc::clone(&drops),
            },
            DropCount(drops),
        )
    }
}

impl<R: Read> Read for DropCounter<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R> Drop for DropCounter<R> {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// A reader whose every read fails
pub struct FailingRead;

impl Read for FailingRead {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
    }
}
