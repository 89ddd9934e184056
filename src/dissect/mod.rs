// Layer-by-layer header dissection.
//
// Each parser takes the shared `HeaderCursor`, bounds-checks before touching
// any byte, and on success returns the next protocol in host byte order
// together with a typed view of the header it consumed. A header that does
// not fit leaves the cursor where that header starts.

pub mod ipv6_ext;
pub mod link;
pub mod network;
pub mod transport;

pub use link::{LinkLayer, VlanStack, parse_ethhdr};
pub use network::{NetworkHeader, NetworkLayer, parse_ip6hdr, parse_iphdr, parse_network};
pub use transport::{parse_icmp6hdr, parse_icmphdr, parse_tcphdr, parse_udphdr};
