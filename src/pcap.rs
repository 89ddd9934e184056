// Legacy pcap reading and writing for frame replay.
//
// Only Ethernet captures are accepted. Frames are read fully into memory;
// the writer emits a little-endian legacy header with the same timestamp
// precision as the input.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use pcap_parser::traits::PcapReaderIterator;
use pcap_parser::{LegacyPcapReader, Linktype, PcapBlockOwned, PcapError};

use crate::error::SieveError;

const READER_CAPACITY: usize = 65536;

/// Snapshot length written into output files.
pub const OUTPUT_SNAPLEN: u32 = 262_144;

const MAGIC_USEC: u32 = 0xa1b2_c3d4;
const MAGIC_NSEC: u32 = 0xa1b2_3c4d;

/// One captured frame with its record header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    pub ts_sec: u32,
    /// Microseconds, or nanoseconds when the capture has nanosecond precision.
    pub ts_frac: u32,
    /// Length of the frame on the wire.
    pub orig_len: u32,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capture {
    pub nanosecond: bool,
    pub frames: Vec<CapturedFrame>,
}

/// Read every frame of a legacy pcap file.
pub fn open_pcap(path: &Path) -> Result<Capture, SieveError> {
    let file = File::open(path).map_err(SieveError::Input)?;
    read_pcap(file)
}

pub fn read_pcap<R: Read>(input: R) -> Result<Capture, SieveError> {
    let mut reader = LegacyPcapReader::new(READER_CAPACITY, input)
        .map_err(|e| SieveError::Pcap(format!("not a legacy pcap file: {e:?}")))?;
    let mut capture = Capture::default();

    loop {
        match reader.next() {
            Ok((offset, block)) => {
                match block {
                    PcapBlockOwned::LegacyHeader(ref hdr) => {
                        if hdr.network != Linktype::ETHERNET {
                            return Err(SieveError::LinkType(hdr.network.0));
                        }
                        capture.nanosecond = hdr.is_nanosecond_precision();
                        log::debug!(
                            "pcap v{}.{} snaplen={} nanosecond={}",
                            hdr.version_major,
                            hdr.version_minor,
                            hdr.snaplen,
                            capture.nanosecond
                        );
                    }
                    PcapBlockOwned::Legacy(ref pkt) => capture.frames.push(CapturedFrame {
                        ts_sec: pkt.ts_sec,
                        ts_frac: pkt.ts_usec,
                        orig_len: pkt.origlen,
                        data: pkt.data.to_vec(),
                    }),
                    PcapBlockOwned::NG(_) => {
                        log::warn!("pcapng block encountered, only legacy pcap is supported");
                    }
                }
                drop(block);
                reader.consume(offset);
            }
            Err(PcapError::Eof) => break,
            Err(PcapError::Incomplete { .. }) => {
                reader
                    .refill()
                    .map_err(|e| SieveError::Pcap(format!("refill error: {e:?}")))?;
            }
            Err(e) => return Err(SieveError::Pcap(format!("{e:?}"))),
        }
    }

    log::info!("read {} frames", capture.frames.len());
    Ok(capture)
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Streams frames into a legacy pcap with an Ethernet link type.
pub struct PcapWriter<W: Write> {
    inner: W,
    written: usize,
}

impl<W: Write> PcapWriter<W> {
    /// Write the global header and return a writer positioned for records.
    pub fn new(mut inner: W, nanosecond: bool) -> Result<Self, SieveError> {
        let magic = if nanosecond { MAGIC_NSEC } else { MAGIC_USEC };
        write_global_header(&mut inner, magic).map_err(SieveError::Output)?;
        Ok(Self { inner, written: 0 })
    }

    pub fn write_frame(&mut self, frame: &CapturedFrame) -> Result<(), SieveError> {
        write_record(&mut self.inner, frame).map_err(SieveError::Output)?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W, SieveError> {
        self.inner.flush().map_err(SieveError::Output)?;
        Ok(self.inner)
    }
}

/// Create `path` and write the global header into it.
pub fn create_pcap(path: &Path, nanosecond: bool) -> Result<PcapWriter<BufWriter<File>>, SieveError> {
    let file = File::create(path).map_err(SieveError::Output)?;
    PcapWriter::new(BufWriter::new(file), nanosecond)
}

fn write_global_header(w: &mut impl Write, magic: u32) -> std::io::Result<()> {
    w.write_all(&magic.to_le_bytes())?;
    w.write_all(&2u16.to_le_bytes())?;
    w.write_all(&4u16.to_le_bytes())?;
    w.write_all(&0i32.to_le_bytes())?;
    w.write_all(&0u32.to_le_bytes())?;
    w.write_all(&OUTPUT_SNAPLEN.to_le_bytes())?;
    w.write_all(&(Linktype::ETHERNET.0 as u32).to_le_bytes())?;
    Ok(())
}

fn write_record(w: &mut impl Write, frame: &CapturedFrame) -> std::io::Result<()> {
    let caplen = frame.data.len() as u32;
    w.write_all(&frame.ts_sec.to_le_bytes())?;
    w.write_all(&frame.ts_frac.to_le_bytes())?;
    w.write_all(&caplen.to_le_bytes())?;
    w.write_all(&frame.orig_len.max(caplen).to_le_bytes())?;
    w.write_all(&frame.data)?;
    Ok(())
}
