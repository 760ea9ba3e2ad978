//! Stream opening with transparent compression
//!
//! Inputs may be plain text, gzip/BGZF or bzip2; the format is chosen from the
//! extension first and the magic bytes second. Plain inputs go through
//! [`SmartReader`], which picks buffered or memory-mapped reading by file size.
//! Outputs are compressed by extension and must be closed with
//! [`SmartWriter::finish`] so encoder trailers and flush errors are not lost.

use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Default buffer size for BufReader/BufWriter (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Large buffer size for high-throughput I/O (1MB)
pub const LARGE_BUFFER_SIZE: usize = 1024 * 1024;

/// Threshold for using memory mapping (100MB)
pub const MMAP_THRESHOLD: u64 = 100 * 1024 * 1024;

/// Compression format of an input or output stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip or BGZF compressed (.gz, .bgz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

impl CompressionFormat {
    /// Format implied by a path's extension alone
    pub fn from_extension(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
            "gz" | "bgz" => CompressionFormat::Gzip,
            "bz2" => CompressionFormat::Bzip2,
            _ => CompressionFormat::Plain,
        }
    }

    /// Format implied by the leading bytes of a stream
    pub fn from_magic(magic: &[u8]) -> Self {
        if magic.len() >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
            CompressionFormat::Gzip
        } else if magic.starts_with(b"BZh") {
            CompressionFormat::Bzip2
        } else {
            CompressionFormat::Plain
        }
    }
}

/// Detect compression format from file path and/or content
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    // First check by extension
    let by_ext = CompressionFormat::from_extension(path);
    if by_ext != CompressionFormat::Plain {
        return Ok(by_ext);
    }

    // Then check by magic bytes
    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;
    Ok(CompressionFormat::from_magic(&magic[..bytes_read]))
}

/// A reader over an uncompressed file, buffered or memory-mapped by size
pub enum SmartReader {
    /// Buffered reader for smaller files or streaming
    Buffered(BufReader<File>),
    /// Memory-mapped reader for large files
    Mapped(MappedReader),
}

/// Memory-mapped file reader
pub struct MappedReader {
    mmap: Mmap,
    position: usize,
}

impl MappedReader {
    pub fn new(file: &File) -> io::Result<Self> {
        // SAFETY: We assume the file won't be modified while mapped
        let mmap = unsafe { Mmap::map(file)? };
        Ok(Self { mmap, position: 0 })
    }
}

impl Read for MappedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.mmap[self.position..];
        let to_read = std::cmp::min(buf.len(), remaining.len());
        buf[..to_read].copy_from_slice(&remaining[..to_read]);
        self.position += to_read;
        Ok(to_read)
    }
}

impl BufRead for MappedReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(&self.mmap[self.position..])
    }

    fn consume(&mut self, amt: usize) {
        self.position = std::cmp::min(self.position + amt, self.mmap.len());
    }
}

impl SmartReader {
    /// Open a file, memory-mapping it at or above [`MMAP_THRESHOLD`]
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        let file_size = file.metadata()?.len();

        if file_size >= MMAP_THRESHOLD {
            return Ok(SmartReader::Mapped(MappedReader::new(&file)?));
        }
        let buf_size = if file_size > 10 * 1024 * 1024 {
            LARGE_BUFFER_SIZE
        } else {
            DEFAULT_BUFFER_SIZE
        };
        Ok(SmartReader::Buffered(BufReader::with_capacity(buf_size, file)))
    }
}

impl Read for SmartReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            SmartReader::Buffered(reader) => reader.read(buf),
            SmartReader::Mapped(reader) => reader.read(buf),
        }
    }
}

impl BufRead for SmartReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            SmartReader::Buffered(reader) => reader.fill_buf(),
            SmartReader::Mapped(reader) => reader.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            SmartReader::Buffered(reader) => reader.consume(amt),
            SmartReader::Mapped(reader) => reader.consume(amt),
        }
    }
}

/// Open a text input, decompressing gzip/BGZF or bzip2 transparently
pub fn open_input<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    match detect_compression(path)? {
        CompressionFormat::Gzip => {
            // BGZF files are a series of gzip members
            let decoder = MultiGzDecoder::new(File::open(path)?);
            Ok(Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, decoder)))
        }
        CompressionFormat::Bzip2 => {
            let decoder = BzDecoder::new(File::open(path)?);
            Ok(Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, decoder)))
        }
        CompressionFormat::Plain => Ok(Box::new(SmartReader::open(path)?)),
    }
}

/// A buffered output file, compressed according to its extension
pub enum SmartWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
    Bzip2(BzEncoder<BufWriter<File>>),
}

impl SmartWriter {
    /// Create (or truncate) an output file
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let inner = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, File::create(path)?);
        Ok(match CompressionFormat::from_extension(path) {
            CompressionFormat::Plain => SmartWriter::Plain(inner),
            CompressionFormat::Gzip => {
                SmartWriter::Gzip(GzEncoder::new(inner, flate2::Compression::default()))
            }
            CompressionFormat::Bzip2 => {
                SmartWriter::Bzip2(BzEncoder::new(inner, bzip2::Compression::default()))
            }
        })
    }

    /// Write any encoder trailer and flush everything to disk
    pub fn finish(self) -> io::Result<()> {
        let mut inner = match self {
            SmartWriter::Plain(w) => w,
            SmartWriter::Gzip(enc) => enc.finish()?,
            SmartWriter::Bzip2(enc) => enc.finish()?,
        };
        inner.flush()?;
        inner.into_inner().map_err(|e| e.into_error())?.sync_all()
    }
}

impl Write for SmartWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SmartWriter::Plain(w) => w.write(buf),
            SmartWriter::Gzip(w) => w.write(buf),
            SmartWriter::Bzip2(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SmartWriter::Plain(w) => w.flush(),
            SmartWriter::Gzip(w) => w.flush(),
            SmartWriter::Bzip2(w) => w.flush(),
        }
    }
}

/// Line iterator that reuses a buffer to avoid allocations
pub struct LineIterator<R: BufRead> {
    reader: R,
    buffer: String,
}

impl<R: BufRead> LineIterator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::with_capacity(1024),
        }
    }

    /// Read the next line into the internal buffer
    /// Returns None at EOF, Some(Ok(&str)) on success, Some(Err) on error
    pub fn next_line(&mut self) -> Option<io::Result<&str>> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None, // EOF
            Ok(_) => {
                // Remove trailing newline
                if self.buffer.ends_with('\n') {
                    self.buffer.pop();
                    if self.buffer.ends_with('\r') {
                        self.buffer.pop();
                    }
                }
                Some(Ok(&self.buffer))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
