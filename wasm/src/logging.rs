//! Routes `tracing` output to the browser console.
//!
//! Each event is buffered by a [`ConsoleWriter`] and emitted on drop through
//! the `console` method that matches its level. The level filter sits behind
//! a reload handle so it can change after startup.

use std::io;
use std::sync::OnceLock;

use tracing::{Level, Metadata};
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    reload,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};
use wasm_bindgen::JsValue;
use web_sys::console;

/// Default filter directive when none is given
pub const DEFAULT_FILTER: &str = "info";

static FILTER_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Buffers one formatted event
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buffer);
        let message = JsValue::from_str(text.trim_end());
        match self.level {
            Level::ERROR => console::error_1(&message),
            Level::WARN => console::warn_1(&message),
            Level::INFO => console::info_1(&message),
            _ => console::debug_1(&message),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Parse `EnvFilter` directives such as `"debug"` or `"shared=trace,info"`.
/// Invalid directives fall back to [`DEFAULT_FILTER`].
pub fn parse_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Later calls are no-ops; use
/// [`set_filter`] to change the level afterwards.
pub fn init_logging(filter: &str, json: bool) {
    let (filter_layer, handle) = reload::Layer::new(parse_filter(filter));

    // The wasm target has no clock, so timestamps stay off.
    let text_layer = (!json).then(|| {
        fmt::layer()
            .without_time()
            .with_ansi(false)
            .with_target(true)
            .with_writer(MakeConsoleWriter)
    });
    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .without_time()
            .with_writer(MakeConsoleWriter)
    });

    let installed = tracing_subscriber::registry()
        .with(filter_layer)
        .with(text_layer)
        .with(json_layer)
        .try_init();

    match installed {
        Ok(()) => {
            let _ = FILTER_HANDLE.set(handle);
        }
        Err(_) => console::debug_1(&JsValue::from_str("tracing subscriber already installed")),
    }
}

/// Swap the active level filter of the installed subscriber.
pub fn set_filter(filter: &str) -> Result<(), String> {
    let handle = FILTER_HANDLE
        .get()
        .ok_or_else(|| "logging is not initialized".to_string())?;
    handle.reload(parse_filter(filter)).map_err(|e| e.to_string())
}
