//! A TUN device abstraction built on split async halves.
//!
//! Creating and configuring the actual TUN interface (naming it, assigning
//! an address, bringing it up) is platform-specific setup the embedder
//! performs before handing a device to this crate — see the `tun` crate's
//! own builder. What lives here is the thin adapter the engine's pumps
//! read and write packets through, plus the split into independent
//! reader/writer halves so the egress and ingress pumps can each own one
//! without sharing a lock.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf, split};

use crate::error::Error;

/// Splits any async TUN handle into independent read/write halves.
///
/// This is a thin wrapper over [`tokio::io::split`]; it exists so the
/// engine depends on `tunnel_transport::tun` rather than reaching into
/// `tokio::io` directly, keeping the split point — and the packet framing
/// convention around it — in one place.
pub fn split_tun<T>(device: T) -> (TunReader<T>, TunWriter<T>)
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let (read_half, write_half) = split(device);
    (TunReader { inner: read_half }, TunWriter { inner: write_half })
}

/// The read half of a TUN device: yields one IP packet per `read_packet`
/// call, matching the kernel's one-packet-per-read contract for TUN
/// devices in IFF_NO_PI mode.
pub struct TunReader<T> {
    inner: ReadHalf<T>,
}

impl<T> TunReader<T>
where
    T: AsyncRead + Unpin,
{
    /// Read the next packet into `buf`, returning the number of bytes
    /// filled.
    ///
    /// Cancel-safe: usable as a `tokio::select!` branch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tun`] if the underlying read fails.
    pub async fn read_packet(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        self.inner.read(buf).await.map_err(Error::Tun)
    }
}

/// The write half of a TUN device.
pub struct TunWriter<T> {
    inner: WriteHalf<T>,
}

impl<T> TunWriter<T>
where
    T: AsyncWrite + Unpin,
{
    /// Write one packet in full.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tun`] if the underlying write fails. A write
    /// failure here is the one condition the engine treats as fatal to
    /// the ingress direction specifically, rather than to the whole
    /// session — see the engine's pump documentation.
    pub async fn write_packet(&mut self, packet: &[u8]) -> Result<(), Error> {
        self.inner.write_all(packet).await.map_err(Error::Tun)
    }
}
