/// Failure of a single dissection or rewrite step.
///
/// Every variant is local to one classification pass; the classifier maps
/// each of them to the default action of the running program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DissectError {
    #[error("truncated header at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("malformed header at offset {offset}: {reason}")]
    Malformed { offset: usize, reason: &'static str },
    #[error("extension header chain longer than {limit} links")]
    ChainTooLong { limit: usize },
    #[error("cannot adjust frame head by {delta} bytes: {reason}")]
    ResizeFailed { delta: isize, reason: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum SieveError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("cannot read capture file: {0}")]
    Input(#[source] std::io::Error),
    #[error("cannot write capture file: {0}")]
    Output(#[source] std::io::Error),
    #[error("pcap parse error: {0}")]
    Pcap(String),
    #[error("unsupported pcap link type {0} (only Ethernet is supported)")]
    LinkType(i32),
    #[error("serialization error: {0}")]
    Serialization(#[source] std::io::Error),
    #[error("fatal: {0}")]
    Fatal(String),
}
