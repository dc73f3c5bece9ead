use super::command::SessionCommand;
use ferrous_resolve_application::events::ResolutionEvent;
use ferrous_resolve_application::use_cases::ResolveDomainUseCase;
use ferrous_resolve_domain::RecordCache;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

pub const PROMPT: &str = "Enter a domain name or .list/.clear/.remove N/.exit > ";

/// Interactive session: owns the record cache and runs one resolution at a
/// time. A failed resolution is reported and the session carries on.
pub struct Session<W> {
    resolve_domain: Arc<ResolveDomainUseCase>,
    events: mpsc::UnboundedReceiver<ResolutionEvent>,
    cache: RecordCache,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(
        resolve_domain: Arc<ResolveDomainUseCase>,
        events: mpsc::UnboundedReceiver<ResolutionEvent>,
        out: W,
    ) -> Self {
        Self {
            resolve_domain,
            events,
            cache: RecordCache::new(),
            out,
        }
    }

    pub fn cache(&self) -> &RecordCache {
        &self.cache
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Read lines until `.exit` or end of input.
    pub async fn run<R>(&mut self, input: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        loop {
            write!(self.out, "{}", PROMPT)?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(self.out)?;
                break;
            };

            if !self.handle(&line).await? {
                break;
            }
        }

        debug!(entries = self.cache.len(), "Session finished");
        Ok(())
    }

    /// Returns `false` once the session should end.
    pub async fn handle(&mut self, line: &str) -> io::Result<bool> {
        match SessionCommand::parse(line) {
            SessionCommand::Exit => return Ok(false),
            SessionCommand::Blank => {}
            SessionCommand::List => self.print_cache()?,
            SessionCommand::Clear => {
                self.cache.clear();
                writeln!(self.out, "Cache cleared")?;
            }
            SessionCommand::Remove(index) => match self.cache.remove(index) {
                Ok(entry) => writeln!(self.out, "Removed {}", entry.name)?,
                Err(e) => writeln!(self.out, "{}", e)?,
            },
            SessionCommand::RemoveUsage => writeln!(self.out, " Usage: .remove N")?,
            SessionCommand::Resolve(input) => self.resolve(&input).await?,
        }

        Ok(true)
    }

    async fn resolve(&mut self, input: &str) -> io::Result<()> {
        let outcome = self.resolve_domain.execute(input, &mut self.cache).await;
        self.print_trace()?;

        match outcome {
            Ok(resolution) => {
                if resolution.canonical != resolution.domain {
                    writeln!(
                        self.out,
                        "{} is an alias for {}",
                        resolution.domain, resolution.canonical
                    )?;
                }
                writeln!(
                    self.out,
                    "{} has address {}",
                    resolution.domain, resolution.address
                )?;
            }
            Err(e) => {
                writeln!(
                    self.out,
                    "Failed to resolve '{}' ({}): {}",
                    input,
                    e.kind().as_str(),
                    e
                )?;
            }
        }

        Ok(())
    }

    fn print_trace(&mut self) -> io::Result<()> {
        while let Ok(event) = self.events.try_recv() {
            writeln!(self.out, "{}", event)?;
        }
        Ok(())
    }

    fn print_cache(&mut self) -> io::Result<()> {
        if self.cache.is_empty() {
            return writeln!(self.out, "Cache is empty");
        }

        writeln!(self.out, "Cache contents")?;
        for (i, entry) in self.cache.list().iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, entry)?;
        }
        Ok(())
    }
}
