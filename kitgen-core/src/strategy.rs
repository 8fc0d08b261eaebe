use std::{
    fmt,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::{Error, Result};

/// What to do with a rendered artifact.
///
/// The strategy is decided once, before rendering, and then executed with the
/// rendered content. Deciding and executing are separate so that a unit can be
/// run against a substituted strategy without touching template logic.
#[derive(Debug, Clone)]
pub enum WriteStrategy {
    /// Leave the existing file alone. Not an error.
    Skip(PathBuf),
    /// Create the file, replacing any previous content.
    CreateOrOverwrite(PathBuf),
    /// Append to the file, creating it if needed.
    AppendTo(PathBuf),
    /// Write to a shared output stream instead of the filesystem.
    EmitToStream(Sink),
}

/// Inputs of the strategy decision.
#[derive(Debug, Clone)]
pub struct StrategyInput {
    /// Absolute target path.
    pub path: PathBuf,
    /// Whether a file already exists at `path`.
    pub file_exists: bool,
    /// Run-level force flag.
    pub run_force: bool,
    /// Force requested by a documentation tag (or the template's own policy).
    pub tag_force: bool,
    /// Stream requested instead of an output directory.
    pub stream: Option<Sink>,
}

impl StrategyInput {
    /// Build the input for `path`, peeking at the filesystem for existence.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_exists = path.exists();
        Self {
            path,
            file_exists,
            run_force: false,
            tag_force: false,
            stream: None,
        }
    }

    pub fn run_force(mut self, force: bool) -> Self {
        self.run_force = force;
        self
    }

    pub fn tag_force(mut self, force: bool) -> Self {
        self.tag_force = force;
        self
    }

    pub fn stream(mut self, sink: Option<Sink>) -> Self {
        self.stream = sink;
        self
    }
}

impl WriteStrategy {
    /// Decide the strategy.
    ///
    /// Precedence: stream requested, then any force flag, then file existence.
    pub fn decide(input: StrategyInput) -> Self {
        if let Some(sink) = input.stream {
            return Self::EmitToStream(sink);
        }
        if input.run_force || input.tag_force {
            return Self::CreateOrOverwrite(input.path);
        }
        if input.file_exists {
            Self::Skip(input.path)
        } else {
            Self::CreateOrOverwrite(input.path)
        }
    }

    /// Check if this strategy writes nothing.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip(_))
    }

    /// Persist `content` according to this strategy.
    pub fn write(&self, content: &str) -> Result<WriteOutcome> {
        match self {
            Self::Skip(path) => Ok(WriteOutcome::Skipped(path.clone())),
            Self::CreateOrOverwrite(path) => {
                write_file(path, content).map_err(|source| Error::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(WriteOutcome::Written {
                    path: path.clone(),
                    bytes: content.len(),
                })
            }
            Self::AppendTo(path) => {
                append_file(path, content).map_err(|source| Error::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(WriteOutcome::Appended {
                    path: path.clone(),
                    bytes: content.len(),
                })
            }
            Self::EmitToStream(sink) => {
                sink.emit(content).map_err(|source| Error::Io {
                    path: PathBuf::from(sink.name()),
                    source,
                })?;
                Ok(WriteOutcome::Streamed {
                    stream: sink.name().to_string(),
                    bytes: content.len(),
                })
            }
        }
    }
}

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

fn append_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content.as_bytes())
}

/// Result of executing a write strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File was created or overwritten.
    Written { path: PathBuf, bytes: usize },
    /// Content was appended to the file.
    Appended { path: PathBuf, bytes: usize },
    /// File was skipped (already exists, not forced).
    Skipped(PathBuf),
    /// Content was written to a stream.
    Streamed { stream: String, bytes: usize },
}

impl WriteOutcome {
    /// Number of bytes persisted.
    pub fn bytes(&self) -> usize {
        match self {
            Self::Written { bytes, .. }
            | Self::Appended { bytes, .. }
            | Self::Streamed { bytes, .. } => *bytes,
            Self::Skipped(_) => 0,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// A shared output stream.
///
/// Cloning shares the underlying writer; each emit holds the lock for the
/// whole artifact so concurrent units never interleave within a file.
#[derive(Clone)]
pub struct Sink {
    name: String,
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Sink {
    pub fn new(name: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        Self {
            name: name.into(),
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// A sink writing to standard output.
    pub fn stdout() -> Self {
        Self::new("<stdout>", io::stdout())
    }

    /// An in-memory sink and a handle to read what was written.
    pub fn memory() -> (Self, MemoryBuffer) {
        let buffer = MemoryBuffer::default();
        (Self::new("<memory>", buffer.clone()), buffer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, content: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("output stream lock poisoned"))?;
        writer.write_all(content.as_bytes())?;
        writer.flush()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("name", &self.name).finish()
    }
}

/// Shared in-memory buffer backing [`Sink::memory`].
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer(Arc<Mutex<Vec<u8>>>);

impl MemoryBuffer {
    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        match self.0.lock() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }
}

impl Write for MemoryBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .0
            .lock()
            .map_err(|_| io::Error::other("memory buffer lock poisoned"))?;
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
