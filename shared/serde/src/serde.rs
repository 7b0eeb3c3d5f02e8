use crate::{error::SerdeErr, read_stream::ReadStream, write_stream::WriteStream};

/// A type that can be written to a WriteStream and read back from a ReadStream
pub trait Serde: Sized {
    fn ser(&self, writer: &mut WriteStream);

    fn de(reader: &mut ReadStream) -> Result<Self, SerdeErr>;
}

impl Serde for u8 {
    fn ser(&self, writer: &mut WriteStream) {
        writer.write_u8(*self);
    }

    fn de(reader: &mut ReadStream) -> Result<Self, SerdeErr> {
        reader.read_u8()
    }
}

impl Serde for u16 {
    fn ser(&self, writer: &mut WriteStream) {
        writer.write_u16(*self);
    }

    fn de(reader: &mut ReadStream) -> Result<Self, SerdeErr> {
        reader.read_u16()
    }
}

impl Serde for u32 {
    fn ser(&self, writer: &mut WriteStream) {
        writer.write_u32(*self);
    }

    fn de(reader: &mut ReadStream) -> Result<Self, SerdeErr> {
        reader.read_u32()
    }
}

impl Serde for f32 {
    fn ser(&self, writer: &mut WriteStream) {
        writer.write_f32(*self);
    }

    fn de(reader: &mut ReadStream) -> Result<Self, SerdeErr> {
        reader.read_f32()
    }
}

impl Serde for f64 {
    fn ser(&self, writer: &mut WriteStream) {
        writer.write_f64(*self);
    }

    fn de(reader: &mut ReadStream) -> Result<Self, SerdeErr> {
        reader.read_f64()
    }
}

impl Serde for bool {
    fn ser(&self, writer: &mut WriteStream) {
        writer.write_u8(u8::from(*self));
    }

    fn de(reader: &mut ReadStream) -> Result<Self, SerdeErr> {
        match reader.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            tag => Err(SerdeErr::InvalidTag { kind: "bool", tag }),
        }
    }
}

// Strings are a u32 byte length followed by UTF-8
impl Serde for String {
    fn ser(&self, writer: &mut WriteStream) {
        writer.write_u32(self.len() as u32);
        writer.write_bytes(self.as_bytes());
    }

    fn de(reader: &mut ReadStream) -> Result<Self, SerdeErr> {
        let length = reader.read_u32()? as usize;
        let offset = reader.offset();
        let bytes = reader.read_bytes(length)?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| SerdeErr::InvalidUtf8 { offset })
    }
}
