use std::io::{self, Result, Write};

/// Controls where logs for a specific channel are routed to
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Policy {
    Stdout,
    Stderr,
    Silent,
}

pub struct Policies {
    /// Output the user asked for directly, like help and version text.
    pub output: Policy,
    /// Phase headers like "--- Download ---" and other progress chatter.
    pub progress: Policy,
    /// Conflict reports and fatal errors.
    pub error: Policy,
}

impl Default for Policies {
    fn default() -> Self {
        Self {
            output: Policy::Stdout,
            progress: Policy::Stdout,
            error: Policy::Stderr,
        }
    }
}

enum Sink {
    Real(Box<dyn Write>),
    Vec(Vec<u8>),
}

impl Sink {
    fn recorded(&self) -> String {
        match self {
            Self::Real(_) => String::new(),
            Self::Vec(v) => String::from_utf8_lossy(v).into_owned(),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        match self {
            Self::Real(w) => w.write(bytes),
            Self::Vec(v) => v.write(bytes),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            Self::Real(w) => w.flush(),
            Self::Vec(_) => Ok(()),
        }
    }
}

pub enum LogWriter<'a> {
    Stream(&'a mut dyn Write),
    Silent,
}

impl Write for LogWriter<'_> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        match self {
            Self::Stream(w) => w.write(bytes),
            Self::Silent => Ok(bytes.len()),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            Self::Stream(w) => w.flush(),
            Self::Silent => Ok(()),
        }
    }
}

pub struct Logger {
    stdout: Sink,
    stderr: Sink,
    pub pol: Policies,
}

impl Logger {
    fn new(stdout: Sink, stderr: Sink) -> Self {
        Self {
            stdout: stdout,
            stderr: stderr,
            pol: Policies::default(),
        }
    }

    /// Log to the process's real stdout and stderr.
    pub fn new_real() -> Self {
        Self::new(
            Sink::Real(Box::new(io::stdout())),
            Sink::Real(Box::new(io::stderr())),
        )
    }

    /// Log into memory, for tests. See `recorded`.
    pub fn new_vec() -> Self {
        Self::new(Sink::Vec(vec![]), Sink::Vec(vec![]))
    }

    /// Everything written so far as (stdout, stderr). Always empty for real
    /// loggers.
    pub fn recorded(&self) -> (String, String) {
        (self.stdout.recorded(), self.stderr.recorded())
    }

    /// Drop all progress output. Errors still get through.
    pub fn quiet(&mut self) {
        self.pol.progress = Policy::Silent;
    }

    fn lw_for(&mut self, pol: Policy) -> LogWriter<'_> {
        match pol {
            Policy::Stdout => LogWriter::Stream(&mut self.stdout),
            Policy::Stderr => LogWriter::Stream(&mut self.stderr),
            Policy::Silent => LogWriter::Silent,
        }
    }

    pub fn output(&mut self) -> LogWriter<'_> {
        self.lw_for(self.pol.output)
    }

    pub fn progress(&mut self) -> LogWriter<'_> {
        self.lw_for(self.pol.progress)
    }

    pub fn error(&mut self) -> LogWriter<'_> {
        self.lw_for(self.pol.error)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_progress() -> Result<()> {
        let mut log = Logger::new_vec();
        write!(log.progress(), "Writing to {}...", "stdout")?;
        assert_eq!(log.recorded(), ("Writing to stdout...".into(), "".into()));
        Ok(())
    }

    #[test]
    fn test_error() -> Result<()> {
        let mut log = Logger::new_vec();
        write!(log.error(), "Writing to {}...", "stderr")?;
        assert_eq!(log.recorded(), ("".into(), "Writing to stderr...".into()));
        Ok(())
    }

    #[test]
    fn test_quiet() -> Result<()> {
        let mut log = Logger::new_vec();
        log.quiet();
        write!(log.progress(), "hidden\n")?;
        write!(log.output(), "asked for\n")?;
        write!(log.error(), "shown\n")?;
        assert_eq!(log.recorded(), ("asked for\n".into(), "shown\n".into()));
        Ok(())
    }

    #[test]
    fn test_rerouted() -> Result<()> {
        let mut log = Logger::new_vec();
        log.pol.progress = Policy::Stderr;
        write!(log.progress(), "a")?;
        write!(log.error(), "b")?;
        assert_eq!(log.recorded(), ("".into(), "ab".into()));
        Ok(())
    }

    #[test]
    fn test_real_records_nothing() {
        let log = Logger::new_real();
        assert_eq!(log.recorded(), ("".into(), "".into()));
    }
}
