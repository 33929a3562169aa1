use std::io::{self, Write};

use serde::Serialize;

use crate::app::{ProgressEvent, ProgressSink, RunResult};

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Text,
    Json,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_run(result: &RunResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_collections(result: &[crate::app::CollectionSummary]) -> io::Result<()> {
        Self::print_json(&result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl ProgressSink for JsonOutput {
    fn event(&self, _event: ProgressEvent) {}
}

/// Forwards progress events to the log.
pub struct LogSink;

impl ProgressSink for LogSink {
    fn event(&self, event: ProgressEvent) {
        match event.elapsed {
            Some(elapsed) => {
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "{}", event.message)
            }
            None => tracing::info!("{}", event.message),
        }
    }
}

pub fn print_run_text(result: &RunResult) {
    let verb = if result.loaded { "loaded" } else { "prepared" };
    for collection in &result.collections {
        println!("{verb} {:>5} {}", collection.documents, collection.name);
    }
    println!("finished at {}", result.finished_at);
}
