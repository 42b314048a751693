use std::io::{Cursor, Write};

use tracing::debug;

use crate::error::Result;
use crate::geo_traits::{GeometryFactory, GeometryTrait};
use crate::io::sqlserver::header::Header;
use crate::io::sqlserver::options::SqlServerOptions;
use crate::io::sqlserver::payload::{Payload, Serialized};
use crate::io::sqlserver::reader::build;
use crate::io::sqlserver::writer::decompose;

/// Decode a serialized SQL Server geometry or geography value.
///
/// Returns `Ok(None)` for the null sentinel.
pub fn from_sqlserver<F: GeometryFactory>(
    buf: &[u8],
    factory: &F,
    options: &SqlServerOptions,
) -> Result<Option<F::Geometry>> {
    let Some(raw) = Serialized::read(buf)? else {
        debug!(len = buf.len(), "null geometry");
        return Ok(None);
    };
    log_payload("decoding", &raw);
    build(raw, factory, options).map(Some)
}

/// Encode a geometry to the serialized SQL Server format.
pub fn to_sqlserver<G: GeometryTrait>(geom: &G, options: &SqlServerOptions) -> Result<Vec<u8>> {
    let raw = decompose(geom, options)?;
    log_payload("encoding", &raw);
    let mut buf = Vec::with_capacity(raw.size());
    raw.write(&mut buf)?;
    Ok(buf)
}

/// Encode a geometry into `writer`.
///
/// The whole payload is laid out before the first byte is written, so a geometry that cannot
/// be encoded leaves `writer` untouched.
pub fn write_sqlserver<W: Write, G: GeometryTrait>(
    writer: &mut W,
    geom: &G,
    options: &SqlServerOptions,
) -> Result<()> {
    let buf = to_sqlserver(geom, options)?;
    writer.write_all(&buf)?;
    Ok(())
}

/// Read only the header of a serialized value, `None` for the null sentinel.
pub fn read_header(buf: &[u8]) -> Result<Option<Header>> {
    Header::read(&mut Cursor::new(buf))
}

fn log_payload(action: &str, raw: &Serialized) {
    match &raw.payload {
        Payload::Tables(tables) => debug!(
            srid = raw.header.srid,
            version = ?raw.header.version,
            dim = %raw.header.dim,
            points = tables.coords.len(),
            figures = tables.figures.len(),
            shapes = tables.shapes.len(),
            segments = tables.segments.len(),
            "{action} geometry"
        ),
        Payload::SinglePoint(_) | Payload::SingleLineSegment(_) => debug!(
            srid = raw.header.srid,
            layout = ?raw.header.layout,
            dim = %raw.header.dim,
            "{action} compact geometry"
        ),
    }
}

/// A codec bound to one geometry factory and one set of options.
///
/// Holds no state besides its configuration, so one instance can serve any number of
/// threads when the factory is [`Sync`].
#[derive(Debug, Clone, Copy)]
pub struct SqlServerCodec<'a, F> {
    factory: &'a F,
    options: SqlServerOptions,
}

impl<'a, F: GeometryFactory> SqlServerCodec<'a, F> {
    pub fn new(factory: &'a F, options: SqlServerOptions) -> Self {
        Self { factory, options }
    }

    pub fn options(&self) -> &SqlServerOptions {
        &self.options
    }

    pub fn decode(&self, buf: &[u8]) -> Result<Option<F::Geometry>> {
        from_sqlserver(buf, self.factory, &self.options)
    }

    pub fn encode<G: GeometryTrait>(&self, geom: &G) -> Result<Vec<u8>> {
        to_sqlserver(geom, &self.options)
    }

    /// The number of bytes [`encode`](Self::encode) would produce for `geom`.
    pub fn encoded_size<G: GeometryTrait>(&self, geom: &G) -> Result<usize> {
        Ok(decompose(geom, &self.options)?.size())
    }
}
