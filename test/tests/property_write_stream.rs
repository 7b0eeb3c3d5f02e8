//! PROPERTY-BASED TESTS: WriteStream
//!
//! Key invariants:
//! 1. `bytes` is exactly what was written, little-endian, in order
//! 2. Offsets returned by writes stay valid after growth
//! 3. A reset stream behaves like a fresh one

use proptest::prelude::*;
use patchwork_shared::{BufferPool, PoolConfig, ReadStream, WriteStream};

#[derive(Clone, Debug)]
enum Op {
    U8(u8),
    U16(u16),
    U32(u32),
    F32(f32),
    F64(f64),
    Bytes(Vec<u8>),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::U8),
        any::<u16>().prop_map(Op::U16),
        any::<u32>().prop_map(Op::U32),
        any::<f32>().prop_map(Op::F32),
        any::<f64>().prop_map(Op::F64),
        prop::collection::vec(any::<u8>(), 0..40).prop_map(Op::Bytes),
    ]
}

/// Applies `ops`, checking each returned offset, and returns the expected bytes
fn apply(stream: &mut WriteStream, ops: &[Op]) -> Result<Vec<u8>, TestCaseError> {
    let mut expected = Vec::new();
    for op in ops {
        let offset = match op {
            Op::U8(value) => {
                let offset = stream.write_u8(*value);
                expected.push(*value);
                offset
            }
            Op::U16(value) => {
                let offset = stream.write_u16(*value);
                expected.extend_from_slice(&value.to_le_bytes());
                offset
            }
            Op::U32(value) => {
                let offset = stream.write_u32(*value);
                expected.extend_from_slice(&value.to_le_bytes());
                offset
            }
            Op::F32(value) => {
                let offset = stream.write_f32(*value);
                expected.extend_from_slice(&value.to_le_bytes());
                offset
            }
            Op::F64(value) => {
                let offset = stream.write_f64(*value);
                expected.extend_from_slice(&value.to_le_bytes());
                offset
            }
            Op::Bytes(bytes) => {
                let offset = stream.write_bytes(bytes);
                expected.extend_from_slice(bytes);
                offset
            }
        };
        prop_assert!(offset <= expected.len());
        prop_assert!(stream.offset() <= stream.capacity());
    }
    Ok(expected)
}

proptest! {
    #[test]
    fn prop_bytes_match_writes(ops in prop::collection::vec(op(), 0..64), capacity in 0usize..32) {
        let mut stream = WriteStream::new(capacity);

        let expected = apply(&mut stream, &ops)?;

        prop_assert_eq!(stream.bytes(), expected.as_slice());
        prop_assert_eq!(stream.offset(), expected.len());
    }

    #[test]
    fn prop_backpatch_survives_growth(
        ops in prop::collection::vec(op(), 0..64),
        count in any::<u32>(),
    ) {
        let mut stream = WriteStream::new(4);
        let count_offset = stream.write_u32(0);
        let mut expected = 0u32.to_le_bytes().to_vec();
        expected.extend(apply(&mut stream, &ops)?);

        stream.write_u32_at(count, count_offset);
        expected[..4].copy_from_slice(&count.to_le_bytes());

        prop_assert_eq!(stream.bytes(), expected.as_slice());
        let mut reader = ReadStream::new(stream.bytes());
        prop_assert_eq!(reader.read_u32(), Ok(count));
    }

    #[test]
    fn prop_reset_behaves_like_fresh(
        first in prop::collection::vec(op(), 0..32),
        second in prop::collection::vec(op(), 0..32),
    ) {
        let pool = BufferPool::new(PoolConfig::default());
        let mut reused = WriteStream::with_pool(pool.clone(), 16);
        apply(&mut reused, &first)?;
        reused.reset();
        let mut fresh = WriteStream::with_pool(pool, 16);

        apply(&mut reused, &second)?;
        apply(&mut fresh, &second)?;

        prop_assert_eq!(reused.bytes(), fresh.bytes());
        prop_assert_eq!(reused.offset(), fresh.offset());
    }
}

#[test]
fn reset_returns_buffers_to_the_pool() {
    let pool = BufferPool::new(PoolConfig::default());
    let mut stream = WriteStream::with_pool(pool.clone(), 64);
    stream.write_bytes(&[7; 200]);
    // the initial 64 byte buffer went back when the stream grew
    assert_eq!(pool.free_count(), 1);

    stream.reset();

    // the 256 byte buffer is parked, the 64 byte one is back in use
    assert_eq!(pool.free_count(), 1);
    assert_eq!(stream.capacity(), 64);
    assert_eq!(stream.bytes(), &[] as &[u8]);
}
