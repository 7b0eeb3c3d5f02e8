use crate::error::SerdeErr;

/// Reads little-endian values out of a borrowed byte slice.
pub struct ReadStream<'b> {
    buffer: &'b [u8],
    offset: usize,
}

impl<'b> ReadStream<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<&'b [u8], SerdeErr> {
        if self.remaining() < length {
            return Err(SerdeErr::UnexpectedEnd {
                offset: self.offset,
                needed: length,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.buffer[self.offset..self.offset + length];
        self.offset += length;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], SerdeErr> {
        let mut output = [0; N];
        output.copy_from_slice(self.read_bytes(N)?);
        Ok(output)
    }

    pub fn read_u8(&mut self) -> Result<u8, SerdeErr> {
        Ok(u8::from_le_bytes(self.read_array()?))
    }

    pub fn read_u16(&mut self) -> Result<u16, SerdeErr> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, SerdeErr> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, SerdeErr> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, SerdeErr> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }
}
